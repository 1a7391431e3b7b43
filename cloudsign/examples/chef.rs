use anyhow::Result;
use cloudsign::chef::{EnvCredentialProvider, RequestSigner};
use cloudsign::{default_context, Payload, Signer};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Requires CHEF_USER_ID and either CHEF_CLIENT_KEY or CHEF_CLIENT_KEY_PEM.
    let signer = Signer::new(
        default_context(),
        EnvCredentialProvider::new(),
        RequestSigner::new(),
    );

    let req = http::Request::get("https://chef.example.com/organizations/org/nodes")
        .header(http::header::ACCEPT, "application/json")
        .body(Payload::Empty)?;

    let signed = signer.sign(&req, None).await?;
    for (name, value) in signed.headers() {
        println!("{name}: {value:?}");
    }
    Ok(())
}
