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

use crate::constants::{AWS_DEFAULT_REGION, AWS_REGION, DEFAULT_REGION, GLOBAL_SERVICES};
use cloudsign_core::{Context, Error, Result};
use log::debug;
use std::fmt::Debug;

/// ResolveServiceAndRegion maps an endpoint host to the service and region
/// tokens used in the SigV4 credential scope.
///
/// Implement it to sign for endpoints whose hostnames don't follow AWS
/// conventions, without touching the signer itself.
pub trait ResolveServiceAndRegion: Debug + Send + Sync + 'static {
    /// Service token for the given host, for example `s3` or `iam`.
    fn service(&self, host: &str) -> Result<String>;

    /// Region token for the given host, for example `us-east-1`.
    fn region(&self, host: &str) -> Result<String>;
}

/// StaticServiceAndRegion ignores the host and always returns the same scope.
#[derive(Debug, Clone)]
pub struct StaticServiceAndRegion {
    service: String,
    region: String,
}

impl StaticServiceAndRegion {
    /// Create a resolver for a fixed service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.to_string(),
            region: region.to_string(),
        }
    }
}

impl ResolveServiceAndRegion for StaticServiceAndRegion {
    fn service(&self, _: &str) -> Result<String> {
        Ok(self.service.clone())
    }

    fn region(&self, _: &str) -> Result<String> {
        Ok(self.region.clone())
    }
}

/// AwsHostResolver parses AWS style hostnames.
///
/// Recognized forms (each may end in `.amazonaws.com` or `.amazonaws.com.cn`):
///
/// - `<service>.<region>`, for example `ec2.eu-west-1.amazonaws.com`
/// - `<region>.<service>`, the legacy ordering used by a few services
/// - `s3`, `<bucket>.s3`, `s3-external-1`, `s3-<region>`, `<bucket>.s3.<region>`
/// - `<service>` alone for global services such as `iam.amazonaws.com`
///
/// Hosts outside of AWS resolve to the configured service and the default
/// region.
#[derive(Debug, Clone)]
pub struct AwsHostResolver {
    service: Option<String>,
    default_region: String,
}

impl Default for AwsHostResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AwsHostResolver {
    /// Create a resolver with `us-east-1` as default region and no fallback service.
    pub fn new() -> Self {
        Self {
            service: None,
            default_region: DEFAULT_REGION.to_string(),
        }
    }

    /// Create a resolver whose default region comes from `AWS_REGION` or
    /// `AWS_DEFAULT_REGION`.
    pub fn from_env(ctx: &Context) -> Self {
        let mut resolver = Self::new();
        if let Some(region) = ctx
            .env_var(AWS_REGION)
            .or_else(|| ctx.env_var(AWS_DEFAULT_REGION))
            .filter(|v| !v.is_empty())
        {
            resolver.default_region = region;
        }
        resolver
    }

    /// Set the service used for hosts that don't name one.
    pub fn with_service(mut self, service: &str) -> Self {
        self.service = Some(service.to_string());
        self
    }

    /// Set the region used for hosts that don't name one.
    pub fn with_default_region(mut self, region: &str) -> Self {
        self.default_region = region.to_string();
        self
    }

    fn resolve(&self, host: &str) -> Option<(String, Option<String>)> {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        let rest = host
            .strip_suffix(".amazonaws.com")
            .or_else(|| host.strip_suffix(".amazonaws.com.cn"))?;
        let labels = rest.split('.').collect::<Vec<_>>();

        // Bucket names may contain dots, so search for the s3 label from the right.
        if let Some(idx) = labels
            .iter()
            .rposition(|v| *v == "s3" || v.starts_with("s3-"))
        {
            let label = labels[idx];
            let region = match label {
                "s3" => labels[idx + 1..].iter().find(|v| is_region(v)).copied(),
                "s3-external-1" => None,
                _ => Some(&label[3..]).filter(|v| is_region(v)),
            };
            let region = region.unwrap_or(DEFAULT_REGION).to_string();
            return Some(("s3".to_string(), Some(region)));
        }

        match labels.as_slice() {
            [service] => Some((service.to_string(), None)),
            [.., first, second] if is_region(second) => {
                Some((first.to_string(), Some(second.to_string())))
            }
            [.., first, second] if is_region(first) => {
                Some((second.to_string(), Some(first.to_string())))
            }
            _ => None,
        }
    }
}

impl ResolveServiceAndRegion for AwsHostResolver {
    fn service(&self, host: &str) -> Result<String> {
        if let Some((service, _)) = self.resolve(host) {
            return Ok(service);
        }

        debug!("host {host} is not an aws endpoint, using configured service");
        self.service.clone().ok_or_else(|| {
            Error::request_malformed(format!(
                "service can't be resolved from host {host} and no service is configured"
            ))
        })
    }

    fn region(&self, host: &str) -> Result<String> {
        match self.resolve(host) {
            Some((_, Some(region))) => Ok(region),
            Some((service, None)) if GLOBAL_SERVICES.contains(&service.as_str()) => {
                Ok(DEFAULT_REGION.to_string())
            }
            _ => Ok(self.default_region.clone()),
        }
    }
}

/// Region tokens look like `us-east-1`, `eu-central-2` or `us-gov-west-1`.
fn is_region(v: &str) -> bool {
    let parts = v.split('-').collect::<Vec<_>>();
    parts.len() >= 3
        && parts[0].len() == 2
        && parts[0].bytes().all(|b| b.is_ascii_lowercase())
        && parts[1..parts.len() - 1]
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_lowercase()))
        && parts[parts.len() - 1]
            .bytes()
            .all(|b| b.is_ascii_digit())
        && !parts[parts.len() - 1].is_empty()
}
