use super::{init_signer, signature_of, ACCESS_KEY_ID, SECRET_ACCESS_KEY};
use anyhow::Result;
use cloudsign_aws_v4::{RequestSigner, StaticCredentialProvider};
use cloudsign_core::Payload;
use http::Request;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

#[tokio::test]
async fn test_encoded_and_raw_paths_sign_identically() -> Result<()> {
    let signer = init_signer(
        RequestSigner::new("s3", "us-east-1"),
        StaticCredentialProvider::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY),
        "20130524T000000Z",
    );

    // The path is decoded before canonicalization, so over-encoded input is not double encoded.
    let raw = Request::get("https://examplebucket.s3.amazonaws.com/a%20b/c~d.txt")
        .body(Payload::Empty)?;
    let over_encoded = Request::get(format!(
        "https://examplebucket.s3.amazonaws.com/{}/{}",
        utf8_percent_encode("a b", NON_ALPHANUMERIC),
        utf8_percent_encode("c~d.txt", NON_ALPHANUMERIC),
    ))
    .body(Payload::Empty)?;

    let raw = signer.sign(&raw, None).await?;
    let over_encoded = signer.sign(&over_encoded, None).await?;
    assert_eq!(signature_of(&raw), signature_of(&over_encoded));
    Ok(())
}

#[tokio::test]
async fn test_special_characters_in_path() -> Result<()> {
    let signer = init_signer(
        RequestSigner::new("s3", "us-east-1"),
        StaticCredentialProvider::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY),
        "20130524T000000Z",
    );

    let req = Request::head(format!(
        "https://examplebucket.s3.amazonaws.com/{}",
        utf8_percent_encode("!@#$%^&*()_+-=;:'><,/?.txt", NON_ALPHANUMERIC)
    ))
    .body(Payload::Empty)?;

    let signed = signer.sign(&req, None).await?;
    assert_eq!(signed.uri(), req.uri());
    assert_eq!(signature_of(&signed).len(), 64);
    Ok(())
}

#[tokio::test]
async fn test_query_values_with_reserved_characters() -> Result<()> {
    let signer = init_signer(
        RequestSigner::new("s3", "us-east-1"),
        StaticCredentialProvider::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY),
        "20130524T000000Z",
    );

    let flag = Request::get("https://examplebucket.s3.amazonaws.com/?acl")
        .body(Payload::Empty)?;
    let empty = Request::get("https://examplebucket.s3.amazonaws.com/?acl=")
        .body(Payload::Empty)?;
    assert_eq!(
        signature_of(&signer.sign(&flag, None).await?),
        signature_of(&signer.sign(&empty, None).await?)
    );
    Ok(())
}
