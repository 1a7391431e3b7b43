use anyhow::Result;
use cloudsign_chef::{
    parse_private_key, verify_signature, EnvCredentialProvider, RequestSigner,
    StaticCredentialProvider,
};
use cloudsign_core::time::{parse_rfc3339, FixedClock};
use cloudsign_core::{
    Context, ErrorKind, FormPart, Multipart, Payload, ProvideCredentialChain, Signer, StaticEnv,
};
use cloudsign_file_read_tokio::TokioFileRead;
use http::{header, Method, Request};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

const TEST_KEY: &str = include_str!("../testdata/chef_test_key.pem");
const TEST_KEY_PKCS8: &str = include_str!("../testdata/chef_test_key_pkcs8.pem");

fn init_signer(provider: StaticCredentialProvider) -> Signer<cloudsign_chef::Credential> {
    let _ = env_logger::builder().is_test(true).try_init();

    let now = parse_rfc3339("2009-01-01T12:00:00Z").expect("timestamp must be valid");
    Signer::new(Context::new(), provider, RequestSigner::new()).with_clock(FixedClock(now))
}

fn authorization(req: &Request<Payload>) -> String {
    (1..)
        .map_while(|idx| req.headers().get(format!("x-ops-authorization-{idx}")))
        .map(|v| v.to_str().expect("chunk must be ascii"))
        .collect()
}

#[tokio::test]
async fn test_get_clients() -> Result<()> {
    let signer = init_signer(StaticCredentialProvider::from_pem("u", TEST_KEY)?);

    let req = Request::get("https://chef.example.com/clients").body(Payload::Empty)?;
    let signed = signer.sign(&req, None).await?;

    assert_eq!(signed.headers()["x-ops-content-hash"], "2jmj7l5rSw0yVb/vlWAYkK/YBwk=");
    assert_eq!(signed.headers()["x-ops-timestamp"], "2009-01-01T12:00:00Z");
    assert_eq!(
        authorization(&signed),
        "ETIv+Myf8FCtjj5e+6xLSahsg1PR7KHRU+9n70tHoW3ZFqAhEHSMHvFaDUdh9Dg8UJ/fZbHAAsXTPOSfymG7hT97q+kHAIHOcg+l/GdRmv93K9SP9YEI5Cu/iPgFAY+MZ4ipzcGv7WnHvPP/P5QAhFywD5asZJXdSRA2gmRvdDyHvQLSuQ+DD0jIQMzxd2+90daL1cfhxOUxi+N4/Spf7lZk3nMNkOV6rgW0aaN9ukEct91rIuYkch/x3wxu5/Wbaz/faAbVVKeZy/MTbwIW/bzW454aOFhn0E55UIqJ5nasFkd0eHrYkn6pqALPeM3+AayZX+Yu4zpkqQjk/d2q5Q=="
    );
    Ok(())
}

#[tokio::test]
async fn test_pkcs8_key_signs_identically() -> Result<()> {
    let req = Request::get("https://chef.example.com/clients").body(Payload::Empty)?;

    let pkcs1 = init_signer(StaticCredentialProvider::from_pem("u", TEST_KEY)?)
        .sign(&req, None)
        .await?;
    let pkcs8 = init_signer(StaticCredentialProvider::from_pem("u", TEST_KEY_PKCS8)?)
        .sign(&req, None)
        .await?;
    assert_eq!(authorization(&pkcs1), authorization(&pkcs8));
    Ok(())
}

#[tokio::test]
async fn test_create_node_round_trip() -> Result<()> {
    let signer = init_signer(StaticCredentialProvider::from_pem("admin", TEST_KEY)?);

    let req = Request::builder()
        .method(Method::POST)
        .uri("https://chef.example.com/nodes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Payload::from(r#"{"name":"node1"}"#))?;
    let signed = signer.sign(&req, None).await?;

    assert_eq!(signed.headers()["x-ops-content-hash"], "sUzYyVzGUO/MewhtIfx2juEojiw=");
    assert_eq!(signed.headers()["x-ops-userid"], "admin");
    assert_eq!(signed.headers()[header::CONTENT_TYPE], "application/json");

    let public_key = parse_private_key(TEST_KEY)?.to_public_key();
    verify_signature(&signed, &public_key)?;
    Ok(())
}

#[tokio::test]
async fn test_sandbox_upload_hashes_file_part() -> Result<()> {
    let signer = init_signer(StaticCredentialProvider::from_pem("u", TEST_KEY)?);

    let form = Multipart::new("cloudsign-boundary")
        .part(FormPart::new("name", "apache2"))
        .part(
            FormPart::new("file", "hello world")
                .with_filename("README.md")
                .with_content_type("text/plain"),
        );
    let req = Request::builder()
        .method(Method::PUT)
        .uri("https://chef.example.com/organizations/org//sandboxes/")
        .header(header::CONTENT_TYPE, form.content_type())
        .body(Payload::Multipart(form))?;
    let signed = signer.sign(&req, None).await?;

    assert_eq!(signed.headers()["x-ops-content-hash"], "Kq5sNclPz7QV2+lfQIuc6R7oRu0=");

    let public_key = parse_private_key(TEST_KEY)?.to_public_key();
    verify_signature(&signed, &public_key)?;
    Ok(())
}

#[tokio::test]
async fn test_chain_falls_back_to_static_key() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let chain = ProvideCredentialChain::new()
        .push(EnvCredentialProvider::new())
        .push(StaticCredentialProvider::from_pem("fallback", TEST_KEY)?);
    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::new(),
        });
    let signer = Signer::new(ctx, chain, RequestSigner::new());

    let req = Request::get("https://chef.example.com/clients").body(Payload::Empty)?;
    let signed = signer.sign(&req, None).await?;
    assert_eq!(signed.headers()["x-ops-userid"], "fallback");
    Ok(())
}

#[tokio::test]
async fn test_no_credential() -> Result<()> {
    let ctx = Context::new().with_env(StaticEnv::default());
    let signer = Signer::new(ctx, EnvCredentialProvider::new(), RequestSigner::new());

    let req = Request::get("https://chef.example.com/clients").body(Payload::Empty)?;
    let err = signer.sign(&req, None).await.expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::CredentialMissing);
    Ok(())
}
