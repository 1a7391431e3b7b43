use anyhow::Result;
use cloudsign::aws::{AwsHostResolver, EnvCredentialProvider, RequestSigner};
use cloudsign::{default_context, Payload, Signer};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = default_context();

    // Pick the service and region out of the endpoint host.
    let builder = RequestSigner::new("s3", "us-east-1")
        .with_resolver(AwsHostResolver::from_env(&ctx).with_service("s3"));
    let signer = Signer::new(ctx, EnvCredentialProvider::new(), builder);

    let req = http::Request::get("https://mybucket.s3.eu-west-1.amazonaws.com/hello.txt")
        .body(Payload::Empty)?;

    let signed = signer.sign(&req, None).await?;
    println!("signed headers:");
    for (name, value) in signed.headers() {
        println!("  {name}: {value:?}");
    }

    let presigned = signer.sign(&req, Some(Duration::from_secs(3600))).await?;
    println!("presigned url: {}", presigned.uri());
    Ok(())
}
