//! Chef server request signing.
//!
//! Implements the header based authentication protocol of Chef servers
//! (mixlib-authentication, sign version `1.0`): every request carries its
//! content hash, the client name and a timestamp in `X-Ops-*` headers, plus
//! an RSA signature split over `X-Ops-Authorization-1..N`.
//!
//! ## Example
//!
//! ```no_run
//! use cloudsign_chef::{KeyFileCredentialProvider, RequestSigner};
//! use cloudsign_core::{Context, OsEnv, Payload, Result, Signer};
//! use cloudsign_file_read_tokio::TokioFileRead;
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
//! let provider = KeyFileCredentialProvider::new("node1", "~/.chef/client.pem");
//! let signer = Signer::new(ctx, provider, RequestSigner::new());
//!
//! let req = http::Request::get("https://chef.example.com/organizations/org/nodes")
//!     .body(Payload::Empty)?;
//! let signed = signer.sign(&req, None).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod constants;
pub use constants::CHUNK_SIZE;

mod credential;
pub use credential::Credential;

mod key;
pub use key::parse_private_key;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{canonical_path, split_signature, verify_signature, RequestSigner};
