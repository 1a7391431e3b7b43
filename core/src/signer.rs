use crate::time::{Clock, SystemClock};
use crate::{Context, Error, Payload, ProvideCredential, Result, SignRequest, SigningCredential};
use log::debug;
use std::sync::Arc;
use std::time::Duration;

/// Signer is the main struct used to sign the request.
///
/// For every call it captures exactly one credential snapshot and one
/// timestamp, then hands both to the scheme's [`SignRequest`]
/// implementation. Nothing is cached between calls, so rotating credentials
/// are picked up on the next request.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    clock: Arc<dyn Clock>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the credential provider.
    pub fn with_credential_provider(
        mut self,
        provider: impl ProvideCredential<Credential = K>,
    ) -> Self {
        self.loader = Arc::new(provider);
        self
    }

    /// Replace the clock used to timestamp signatures.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Sign the request, returning a new signed request.
    ///
    /// The input request is left untouched.
    pub async fn sign(
        &self,
        req: &http::Request<Payload>,
        expires_in: Option<Duration>,
    ) -> Result<http::Request<Payload>> {
        let cred = self
            .loader
            .provide_credential(&self.ctx)
            .await?
            .ok_or_else(|| Error::credential_missing("no credential found by provider"))?;

        let now = self.clock.now();
        let ctx = self.builder.build_context(req, now)?;
        debug!("signing {} {} with {:?}", req.method(), req.uri(), ctx);

        self.builder.sign_request(req, &ctx, &cred, expires_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{format_iso8601, parse_iso8601, DateTime, FixedClock};
    use crate::{ErrorKind, SignatureResult, SigningContext, SigningRequest};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct TestCredential {
        token: String,
    }

    impl SigningCredential for TestCredential {
        fn is_valid(&self) -> bool {
            !self.token.is_empty()
        }
    }

    /// Hands out a new token on every call.
    #[derive(Debug, Default)]
    struct RotatingProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ProvideCredential for RotatingProvider {
        type Credential = TestCredential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(TestCredential {
                token: format!("token-{n}"),
            }))
        }
    }

    #[derive(Debug)]
    struct EmptyProvider;

    #[async_trait]
    impl ProvideCredential for EmptyProvider {
        type Credential = TestCredential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
            Ok(None)
        }
    }

    #[derive(Debug)]
    struct TokenScheme;

    impl SignRequest for TokenScheme {
        type Credential = TestCredential;

        fn build_context(
            &self,
            _: &http::Request<Payload>,
            now: DateTime,
        ) -> Result<SigningContext> {
            Ok(SigningContext::new(format_iso8601(now)))
        }

        fn sign_request(
            &self,
            req: &http::Request<Payload>,
            ctx: &SigningContext,
            credential: &Self::Credential,
            _: Option<Duration>,
        ) -> Result<http::Request<Payload>> {
            let mut signing = SigningRequest::build(req)?;
            let result = SignatureResult::new(credential.token.clone())
                .with_header("x-token", credential.token.clone())
                .with_header("x-date", ctx.timestamp.clone());
            signing.apply_signature(&result)?;
            signing.apply()
        }
    }

    fn request() -> http::Request<Payload> {
        http::Request::get("https://example.com/")
            .body(Payload::Empty)
            .expect("request must be valid")
    }

    #[tokio::test]
    async fn test_credential_fetched_per_call() {
        let provider = RotatingProvider::default();
        let calls = provider.calls.clone();
        let now = parse_iso8601("20240101T000000Z").unwrap();
        let signer =
            Signer::new(Context::new(), provider, TokenScheme).with_clock(FixedClock(now));

        let req = request();
        let first = signer.sign(&req, None).await.unwrap();
        let second = signer.sign(&req, None).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(first.headers()["x-token"], "token-0");
        assert_eq!(second.headers()["x-token"], "token-1");
        assert_eq!(first.headers()["x-date"], "20240101T000000Z");
        assert!(req.headers().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_fails() {
        let signer = Signer::new(Context::new(), EmptyProvider, TokenScheme);
        let err = signer.sign(&request(), None).await.expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::CredentialMissing);
    }

    #[tokio::test]
    async fn test_signer_is_shareable_across_tasks() {
        let signer = Signer::new(Context::new(), RotatingProvider::default(), TokenScheme);

        let handles = (0..8)
            .map(|_| {
                let signer = signer.clone();
                tokio::spawn(async move { signer.sign(&request(), None).await })
            })
            .collect::<Vec<_>>();

        let mut tokens = Vec::new();
        for handle in handles {
            let signed = handle.await.unwrap().unwrap();
            tokens.push(signed.headers()["x-token"].to_str().unwrap().to_string());
        }
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), 8);
    }
}
