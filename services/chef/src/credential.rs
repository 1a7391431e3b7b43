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

use crate::key::parse_private_key;
use cloudsign_core::{Result, SigningCredential};
use rsa::RsaPrivateKey;
use std::fmt::{Debug, Formatter};

/// Credential of a Chef client or user: its name and RSA private key.
#[derive(Default, Clone)]
pub struct Credential {
    /// Name of the client or user, sent as `X-Ops-Userid`.
    pub user_id: String,
    /// Private key registered for `user_id` on the Chef server.
    pub private_key: Option<RsaPrivateKey>,
}

impl Credential {
    /// Create a credential from an already parsed key.
    pub fn new(user_id: &str, private_key: RsaPrivateKey) -> Self {
        Self {
            user_id: user_id.to_string(),
            private_key: Some(private_key),
        }
    }

    /// Create a credential from a PEM encoded PKCS#1 or PKCS#8 private key.
    pub fn from_pem(user_id: &str, pem: &str) -> Result<Self> {
        Ok(Self::new(user_id, parse_private_key(pem)?))
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("user_id", &self.user_id)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "***"),
            )
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.user_id.is_empty() && self.private_key.is_some()
    }
}
