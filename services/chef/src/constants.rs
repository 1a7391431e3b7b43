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

// Headers used by mixlib-authentication.
pub const X_OPS_CONTENT_HASH: &str = "x-ops-content-hash";
pub const X_OPS_USERID: &str = "x-ops-userid";
pub const X_OPS_SIGN: &str = "x-ops-sign";
pub const X_OPS_TIMESTAMP: &str = "x-ops-timestamp";
pub const X_OPS_AUTHORIZATION_PREFIX: &str = "x-ops-authorization-";

pub const SIGN_VERSION: &str = "version=1.0";

/// Width of every `X-Ops-Authorization-N` header value, fixed by the wire format.
pub const CHUNK_SIZE: usize = 60;

/// Multipart uploads are hashed over this part only.
pub const MULTIPART_FILE_PART: &str = "file";

// Env values used by chef.
pub const CHEF_USER_ID: &str = "CHEF_USER_ID";
pub const CHEF_CLIENT_KEY: &str = "CHEF_CLIENT_KEY";
pub const CHEF_CLIENT_KEY_PEM: &str = "CHEF_CLIENT_KEY_PEM";
