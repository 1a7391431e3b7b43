//! AWS Signature Version 4 signing.
//!
//! This crate signs requests for AWS services and AWS compatible endpoints.
//!
//! ## Example
//!
//! ```no_run
//! use cloudsign_aws_v4::{AwsHostResolver, EnvCredentialProvider, RequestSigner};
//! use cloudsign_core::{Context, OsEnv, Payload, Result, Signer};
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let builder = RequestSigner::new("s3", "us-east-1")
//!     .with_resolver(AwsHostResolver::from_env(&ctx).with_service("s3"));
//! let signer = Signer::new(ctx, EnvCredentialProvider::new(), builder);
//!
//! let req = http::Request::get("https://mybucket.s3.amazonaws.com/hello.txt")
//!     .body(Payload::Empty)?;
//! let signed = signer.sign(&req, None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Pass `Some(duration)` as `expires_in` to get a presigned request instead,
//! with every signing input carried in the query string.

#![warn(missing_docs)]

mod constants;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod resolve;
pub use resolve::{AwsHostResolver, ResolveServiceAndRegion, StaticServiceAndRegion};

mod sign_request;
pub use sign_request::RequestSigner;
