use super::{init_signer, signature_of, ACCESS_KEY_ID, SECRET_ACCESS_KEY};
use anyhow::Result;
use cloudsign_aws_v4::{AwsHostResolver, RequestSigner, StaticCredentialProvider};
use cloudsign_core::{ErrorKind, Payload};
use http::{header, Method, Request};
use pretty_assertions::assert_eq;
use sha2::{Digest, Sha256};

fn iam_request() -> Request<Payload> {
    Request::builder()
        .method(Method::POST)
        .uri("https://iam.amazonaws.com/")
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=utf-8",
        )
        .body(Payload::from("Action=ListUsers&Version=2010-05-08"))
        .expect("request must be valid")
}

#[tokio::test]
async fn test_iam_list_users() -> Result<()> {
    let signer = init_signer(
        RequestSigner::new("iam", "us-east-1"),
        StaticCredentialProvider::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY),
        "20110909T233600Z",
    );

    let signed = signer.sign(&iam_request(), None).await?;
    let auth = signed.headers()[header::AUTHORIZATION].to_str()?;
    assert!(auth.ends_with(
        "Signature=ced6826de92d2bdeed8f846f0bf508e8559e98e4b0199114b84c54174deb456c"
    ));
    assert_eq!(signed.headers()["x-amz-date"], "20110909T233600Z");
    Ok(())
}

#[tokio::test]
async fn test_iam_list_users_with_resolver() -> Result<()> {
    let signer = init_signer(
        RequestSigner::new("unused", "unused").with_resolver(AwsHostResolver::new()),
        StaticCredentialProvider::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY),
        "20110909T233600Z",
    );

    let signed = signer.sign(&iam_request(), None).await?;
    assert_eq!(
        signature_of(&signed),
        "ced6826de92d2bdeed8f846f0bf508e8559e98e4b0199114b84c54174deb456c"
    );
    Ok(())
}

#[tokio::test]
async fn test_iam_list_users_with_session_token() -> Result<()> {
    let signer = init_signer(
        RequestSigner::new("iam", "us-east-1"),
        StaticCredentialProvider::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY)
            .with_session_token("session-token-value"),
        "20110909T233600Z",
    );

    let signed = signer.sign(&iam_request(), None).await?;
    assert_eq!(
        signed.headers()["x-amz-security-token"],
        "session-token-value"
    );
    assert_eq!(
        signature_of(&signed),
        "36b673bf7674220359cee0cb718f522b876f7ccb24d5f94e92b21c73ce775423"
    );
    Ok(())
}

#[tokio::test]
async fn test_put_object_with_content_sha256() -> Result<()> {
    let signer = init_signer(
        RequestSigner::new("s3", "us-east-1"),
        StaticCredentialProvider::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY),
        "20130524T000000Z",
    );

    let body = "Hello, World!";
    let body_digest = hex::encode(Sha256::digest(body).as_slice());

    let with_header = Request::builder()
        .method(Method::PUT)
        .uri("https://examplebucket.s3.amazonaws.com/put_object_test")
        .header("x-amz-content-sha256", body_digest)
        .body(Payload::from(body))?;
    let signed = signer.sign(&with_header, None).await?;
    let auth = signed.headers()[header::AUTHORIZATION].to_str()?;
    assert!(auth.contains("SignedHeaders=host;x-amz-content-sha256;x-amz-date,"));
    assert_eq!(signed.body(), &Payload::from(body));
    Ok(())
}

#[tokio::test]
async fn test_missing_credential() -> Result<()> {
    let signer = init_signer(
        RequestSigner::new("iam", "us-east-1"),
        StaticCredentialProvider::new(ACCESS_KEY_ID, ""),
        "20110909T233600Z",
    );

    let err = signer
        .sign(&iam_request(), None)
        .await
        .expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::CredentialMissing);
    Ok(())
}
