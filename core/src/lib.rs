//! Core components for signing cloud provider API requests.
//!
//! This crate provides the foundational types and traits shared by every
//! signing scheme in the cloudsign workspace.
//!
//! ## Overview
//!
//! - **Context**: capabilities (environment, file reading) credential
//!   providers may consult. Signers themselves never do I/O.
//! - **Payload**: a repeatable request body that can be hashed and sent.
//! - **Traits**: [`ProvideCredential`] to fetch a credential snapshot and
//!   [`SignRequest`] to sign a request with one scheme.
//! - **Signer**: the orchestrator that fetches one credential snapshot and one
//!   timestamp per call and produces a new signed request.
//!
//! ## Example
//!
//! ```no_run
//! use cloudsign_core::{
//!     Context, Payload, ProvideCredential, Result, SignRequest, SignatureResult,
//!     Signer, SigningContext, SigningCredential, SigningRequest,
//! };
//! use cloudsign_core::time::{format_iso8601, DateTime};
//! use async_trait::async_trait;
//! use std::time::Duration;
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     token: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.token.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyLoader;
//!
//! #[async_trait]
//! impl ProvideCredential for MyLoader {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<MyCredential>> {
//!         Ok(Some(MyCredential { token: "my-token".to_string() }))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyScheme;
//!
//! impl SignRequest for MyScheme {
//!     type Credential = MyCredential;
//!
//!     fn build_context(&self, _: &http::Request<Payload>, now: DateTime) -> Result<SigningContext> {
//!         Ok(SigningContext::new(format_iso8601(now)))
//!     }
//!
//!     fn sign_request(
//!         &self,
//!         req: &http::Request<Payload>,
//!         _: &SigningContext,
//!         cred: &MyCredential,
//!         _: Option<Duration>,
//!     ) -> Result<http::Request<Payload>> {
//!         let mut signing = SigningRequest::build(req)?;
//!         signing.apply_signature(
//!             &SignatureResult::new("").with_sensitive_header("x-token", cred.token.clone()),
//!         )?;
//!         signing.apply()
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::new(), MyLoader, MyScheme);
//! let req = http::Request::get("https://example.com").body(Payload::Empty)?;
//! let signed = signer.sign(&req, None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time formatting and the [`time::Clock`] abstraction
//! - [`utils`]: Redaction and header value helpers

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod context;
pub use context::{Context, Env, FileRead, NoopEnv, NoopFileRead, OsEnv, StaticEnv};

mod payload;
pub use payload::{FormPart, Multipart, Payload};

mod api;
pub use api::{
    ProvideCredential, SignRequest, SignatureResult, SigningContext, SigningCredential,
};
mod chain;
pub use chain::ProvideCredentialChain;
mod request;
pub use request::SigningRequest;
mod signer;
pub use signer::Signer;
