// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
//! AWS Signature Version 4 support with convenience APIs.

pub use cloudsign_aws_v4::*;

#[cfg(feature = "default-context")]
use crate::{default_context, Signer};

/// Default AWS signer type.
#[cfg(feature = "default-context")]
pub type DefaultSigner = Signer<Credential>;

/// Create an AWS signer with the default configuration.
///
/// The signer is built from:
///
/// - the default context, backed by the OS environment and tokio file reads
/// - [`EnvCredentialProvider`], reading `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`
///   and `AWS_SESSION_TOKEN`
/// - a [`RequestSigner`] scoped to the given service and region
///
/// # Example
///
/// ```no_run
/// use cloudsign::aws::{default_signer, StaticCredentialProvider};
/// use cloudsign::Payload;
///
/// # async fn example() -> cloudsign::Result<()> {
/// let signer = default_signer("s3", "us-east-1").with_credential_provider(
///     StaticCredentialProvider::new("my-access-key", "my-secret-key"),
/// );
///
/// let req = http::Request::get("https://mybucket.s3.amazonaws.com/hello.txt")
///     .body(Payload::Empty)?;
/// let presigned = signer
///     .sign(&req, Some(std::time::Duration::from_secs(3600)))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_signer(service: &str, region: &str) -> DefaultSigner {
    let ctx = default_context();
    let provider = EnvCredentialProvider::new();
    let signer = RequestSigner::new(service, region);
    Signer::new(ctx, provider, signer)
}
