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

use crate::constants::*;
use crate::provide_credential::KeyFileCredentialProvider;
use crate::Credential;
use async_trait::async_trait;
use cloudsign_core::{Context, ProvideCredential, Result};
use log::debug;

/// EnvCredentialProvider loads the Chef client credential from environment variables.
///
/// This provider looks for the following environment variables:
/// - `CHEF_USER_ID`: name of the client or user
/// - `CHEF_CLIENT_KEY_PEM`: PEM encoded private key
/// - `CHEF_CLIENT_KEY`: path to the PEM encoded private key, used when
///   `CHEF_CLIENT_KEY_PEM` is not set
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let Some(user_id) = envs.get(CHEF_USER_ID).filter(|v| !v.is_empty()) else {
            debug!("{CHEF_USER_ID} not set");
            return Ok(None);
        };

        if let Some(pem) = envs.get(CHEF_CLIENT_KEY_PEM).filter(|v| !v.is_empty()) {
            return Ok(Some(Credential::from_pem(user_id, pem)?));
        }

        match envs.get(CHEF_CLIENT_KEY).filter(|v| !v.is_empty()) {
            Some(path) => {
                KeyFileCredentialProvider::new(user_id, path)
                    .provide_credential(ctx)
                    .await
            }
            None => {
                debug!("neither {CHEF_CLIENT_KEY_PEM} nor {CHEF_CLIENT_KEY} set");
                Ok(None)
            }
        }
    }
}
