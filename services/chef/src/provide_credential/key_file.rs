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

use crate::Credential;
use async_trait::async_trait;
use cloudsign_core::{Context, Error, ProvideCredential, Result};
use log::debug;

/// KeyFileCredentialProvider reads the client key from a PEM file, the way
/// `client_key` is configured for knife and chef-client.
///
/// The file is read through [`Context::file_read`] on every call, so a
/// rotated key is picked up by the next signing operation. `~/` is expanded
/// to the home directory.
#[derive(Debug, Clone)]
pub struct KeyFileCredentialProvider {
    user_id: String,
    key_path: String,
}

impl KeyFileCredentialProvider {
    /// Create a provider for `user_id` whose key lives at `key_path`.
    pub fn new(user_id: &str, key_path: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            key_path: key_path.to_string(),
        }
    }
}

#[async_trait]
impl ProvideCredential for KeyFileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let path = ctx.expand_home_dir(&self.key_path).ok_or_else(|| {
            Error::config_invalid(format!(
                "home dir is required to expand key path {}",
                self.key_path
            ))
        })?;
        debug!("loading chef client key for {} from {path}", self.user_id);

        let pem = ctx.file_read_as_string(&path).await?;
        Ok(Some(Credential::from_pem(&self.user_id, &pem)?))
    }
}
