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
//! Chef server authentication support with convenience APIs.

pub use cloudsign_chef::*;

#[cfg(feature = "default-context")]
use crate::{default_context, Signer};

/// Default Chef signer type.
#[cfg(feature = "default-context")]
pub type DefaultSigner = Signer<Credential>;

/// Create a Chef signer with the default configuration.
///
/// Credentials come from [`EnvCredentialProvider`]: the client name in
/// `CHEF_USER_ID`, and the private key either inline in `CHEF_CLIENT_KEY_PEM`
/// or as a file path in `CHEF_CLIENT_KEY`.
///
/// # Example
///
/// ```no_run
/// use cloudsign::chef::{default_signer, KeyFileCredentialProvider};
/// use cloudsign::Payload;
///
/// # async fn example() -> cloudsign::Result<()> {
/// let signer = default_signer().with_credential_provider(KeyFileCredentialProvider::new(
///     "node1",
///     "~/.chef/client.pem",
/// ));
///
/// let req = http::Request::get("https://chef.example.com/organizations/org/nodes")
///     .body(Payload::Empty)?;
/// let signed = signer.sign(&req, None).await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_signer() -> DefaultSigner {
    let ctx = default_context();
    let provider = EnvCredentialProvider::new();
    let signer = RequestSigner::new();
    Signer::new(ctx, provider, signer)
}
