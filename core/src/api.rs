use crate::time::DateTime;
use crate::{Context, Payload, Result};
use std::fmt::Debug;
use std::time::Duration;

/// SigningCredential is the trait used by signer as the signing key.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is valid.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(ctx) = self else {
            return false;
        };

        ctx.is_valid()
    }
}

/// ProvideCredential is the trait used by signer to load the credential.
///
/// Implementations may do I/O (read a key file, refresh temporary
/// credentials). The signer calls them once per signing operation and never
/// caches the returned snapshot.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load a credential snapshot from current env.
    ///
    /// Returns `Ok(None)` when this provider has nothing to offer.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// SignRequest is implemented once per signing scheme.
///
/// Signing is a pure, synchronous computation: given the same request,
/// context and credential it always produces the same output, and it never
/// modifies the input request.
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: Send + Sync + Unpin + 'static;

    /// Build the per-call signing context.
    ///
    /// `now` is the single timestamp captured for this call; schemes format
    /// it and resolve whatever scope they need from the request.
    fn build_context(&self, req: &http::Request<Payload>, now: DateTime)
        -> Result<SigningContext>;

    /// Sign the request and return a new, signed request.
    ///
    /// ## Expires In
    ///
    /// `expires_in` asks for a query-signed (presigned) request valid for the
    /// given duration. Schemes that only sign headers return an error.
    fn sign_request(
        &self,
        req: &http::Request<Payload>,
        ctx: &SigningContext,
        credential: &Self::Credential,
        expires_in: Option<Duration>,
    ) -> Result<http::Request<Payload>>;
}

/// SigningContext holds everything about one signing call that is not the
/// request or the credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    /// Timestamp already rendered in the scheme's wire format.
    pub timestamp: String,
    /// Service token used for scoping, empty if the scheme has none.
    pub service: String,
    /// Region token used for scoping, empty if the scheme has none.
    pub region: String,
    /// API version of the target service.
    pub api_version: Option<String>,
}

impl SigningContext {
    /// Create a context that only carries a timestamp.
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            service: String::new(),
            region: String::new(),
            api_version: None,
        }
    }

    /// Set service and region.
    pub fn with_scope(mut self, service: impl Into<String>, region: impl Into<String>) -> Self {
        self.service = service.into();
        self.region = region.into();
        self
    }

    /// Set the api version.
    pub fn with_api_version(mut self, api_version: Option<String>) -> Self {
        self.api_version = api_version;
        self
    }
}

/// SignatureResult is the output of a signature computation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureResult {
    /// The signature, hex or base64 encoded depending on the scheme.
    pub value: String,
    /// Headers to inject into the signed request, in order.
    pub auxiliary_headers: Vec<(String, String)>,
    /// Names of auxiliary headers whose values must be marked sensitive.
    pub sensitive_headers: Vec<String>,
}

impl SignatureResult {
    /// Create a result carrying only the signature value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    /// Append an auxiliary header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.auxiliary_headers.push((name.into(), value.into()));
        self
    }

    /// Append an auxiliary header whose value must not leak into logs.
    pub fn with_sensitive_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.sensitive_headers.push(name.clone());
        self.auxiliary_headers.push((name, value.into()));
        self
    }
}
