use async_trait::async_trait;
use cloudsign_core::hash::hex_hmac_sha256;
use cloudsign_core::time::{format_iso8601, DateTime};
use cloudsign_core::{
    Context, OsEnv, Payload, ProvideCredential, Result, SignRequest, SignatureResult, Signer,
    SigningContext, SigningCredential, SigningRequest,
};
use std::time::Duration;

// A credential for an imaginary API that signs `METHOD\nPATH\nTIMESTAMP`.
#[derive(Clone, Debug)]
struct MyCredential {
    api_key: String,
    api_secret: String,
}

impl SigningCredential for MyCredential {
    fn is_valid(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

#[derive(Debug)]
struct MyCredentialLoader;

#[async_trait]
impl ProvideCredential for MyCredentialLoader {
    type Credential = MyCredential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let (Some(api_key), Some(api_secret)) =
            (ctx.env_var("MY_API_KEY"), ctx.env_var("MY_API_SECRET"))
        else {
            println!("No credentials found in environment, using demo credentials");
            return Ok(Some(MyCredential {
                api_key: "demo-api-key".to_string(),
                api_secret: "demo-api-secret".to_string(),
            }));
        };

        Ok(Some(MyCredential {
            api_key,
            api_secret,
        }))
    }
}

#[derive(Debug)]
struct MyRequestSigner;

impl SignRequest for MyRequestSigner {
    type Credential = MyCredential;

    fn build_context(&self, _: &http::Request<Payload>, now: DateTime) -> Result<SigningContext> {
        Ok(SigningContext::new(format_iso8601(now)))
    }

    fn sign_request(
        &self,
        req: &http::Request<Payload>,
        ctx: &SigningContext,
        cred: &Self::Credential,
        _: Option<Duration>,
    ) -> Result<http::Request<Payload>> {
        let mut signing = SigningRequest::build(req)?;

        let string_to_sign = format!("{}\n{}\n{}", signing.method, signing.path, ctx.timestamp);
        let signature = hex_hmac_sha256(cred.api_secret.as_bytes(), string_to_sign.as_bytes());

        let result = SignatureResult::new(signature.clone())
            .with_header("x-api-key", cred.api_key.clone())
            .with_header("x-api-timestamp", ctx.timestamp.clone())
            .with_sensitive_header("x-api-signature", signature);
        signing.apply_signature(&result)?;
        signing.apply()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let ctx = Context::new().with_env(OsEnv);
    let signer = Signer::new(ctx, MyCredentialLoader, MyRequestSigner);

    let req = http::Request::get("https://api.example.com/v1/users").body(Payload::Empty)?;
    let signed = signer.sign(&req, None).await?;

    for (name, value) in signed.headers() {
        println!("{name}: {value:?}");
    }
    Ok(())
}
