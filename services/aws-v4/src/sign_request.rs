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
use crate::resolve::{ResolveServiceAndRegion, StaticServiceAndRegion};
use crate::Credential;
use bytes::Bytes;
use cloudsign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use cloudsign_core::time::{format_iso8601, parse_iso8601, DateTime};
use cloudsign_core::utils::collapse_whitespace;
use cloudsign_core::{
    Error, Payload, Result, SignRequest, SignatureResult, SigningContext, SigningRequest,
};
use http::header;
use log::debug;
use percent_encoding::utf8_percent_encode;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

/// RequestSigner that implement AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// Without `expires_in` the signature goes into the `Authorization` header.
/// With `expires_in` the request is presigned: every signing input is carried
/// in the query string and the payload is left unsigned.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    resolver: Arc<dyn ResolveServiceAndRegion>,
    api_version: Option<String>,
}

impl RequestSigner {
    /// Create a new signer for a fixed service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            resolver: Arc::new(StaticServiceAndRegion::new(service, region)),
            api_version: None,
        }
    }

    /// Resolve service and region from each request's host instead.
    pub fn with_resolver(mut self, resolver: impl ResolveServiceAndRegion) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Specify the api version of the Query API being called.
    ///
    /// Form encoded payloads that don't carry a `Version` field get one
    /// appended before signing.
    pub fn with_api_version(mut self, api_version: &str) -> Self {
        self.api_version = Some(api_version.to_string());
        self
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn build_context(&self, req: &http::Request<Payload>, now: DateTime) -> Result<SigningContext> {
        let host = req
            .uri()
            .host()
            .ok_or_else(|| Error::request_malformed("request without host is invalid for signing"))?;

        Ok(SigningContext::new(format_iso8601(now))
            .with_scope(self.resolver.service(host)?, self.resolver.region(host)?)
            .with_api_version(self.api_version.clone()))
    }

    fn sign_request(
        &self,
        req: &http::Request<Payload>,
        ctx: &SigningContext,
        cred: &Self::Credential,
        expires_in: Option<Duration>,
    ) -> Result<http::Request<Payload>> {
        if cred.is_empty() {
            return Err(Error::credential_missing(
                "access key id and secret access key are required",
            ));
        }
        if cred.is_expired_at(parse_iso8601(&ctx.timestamp)?) {
            return Err(Error::credential_expired(format!(
                "credential expired at {:?}",
                cred.expires_in
            )));
        }
        let date = ctx.timestamp.get(..8).ok_or_else(|| {
            Error::unexpected(format!("timestamp {} is too short", ctx.timestamp))
        })?;

        let mut signed_req = SigningRequest::build(req)?;
        // Headers owned by the signer from a previous signing are replaced, never signed.
        signed_req.headers.remove(header::AUTHORIZATION);
        signed_req.headers.remove(X_AMZ_DATE);
        signed_req.headers.remove(X_AMZ_SECURITY_TOKEN);
        signed_req
            .query
            .retain(|(k, _)| !PRESIGN_QUERY_KEYS.contains(&k.as_str()));

        if let Some(api_version) = &ctx.api_version {
            append_api_version(&mut signed_req, api_version)?;
        }

        let payload_hash = payload_hash(&signed_req, expires_in)?;

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = format!("{date}/{}/{}/aws4_request", ctx.region, ctx.service);
        debug!("calculated scope: {scope}");

        let mut result = canonicalize_header(&signed_req, ctx, cred, expires_in);
        signed_req.apply_signature(&result)?;
        canonicalize_query(&mut signed_req, ctx, cred, expires_in, &scope);

        // build canonical request and string to sign.
        let creq = canonical_request_string(&signed_req, &payload_hash)?;
        debug!("calculated canonical request: {creq}");
        let encoded_req = hex_sha256(creq.as_bytes());

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{ALGORITHM}")?;
            writeln!(f, "{}", ctx.timestamp)?;
            writeln!(f, "{scope}")?;
            write!(f, "{encoded_req}")?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key =
            generate_signing_key(&cred.secret_access_key, date, &ctx.region, &ctx.service);
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        if expires_in.is_some() {
            signed_req.query_push(X_AMZ_SIGNATURE_QUERY, signature.clone());
        } else {
            let authorization = format!(
                "{ALGORITHM} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
                cred.access_key_id,
                signed_req.header_name_to_vec_sorted().join(";"),
            );
            result = result.with_sensitive_header(header::AUTHORIZATION.as_str(), authorization);
        }
        result.value = signature;
        signed_req.apply_signature(&result)?;

        signed_req.apply()
    }
}

/// Hex encoded SHA-256 of the payload, or the value the caller already
/// committed to in `x-amz-content-sha256`.
///
/// Presigned requests without that header use `UNSIGNED-PAYLOAD`.
fn payload_hash(req: &SigningRequest, expires_in: Option<Duration>) -> Result<String> {
    if let Some(v) = req.headers.get(X_AMZ_CONTENT_SHA_256) {
        return Ok(v.to_str()?.to_string());
    }
    if expires_in.is_some() {
        return Ok(UNSIGNED_PAYLOAD.to_string());
    }
    Ok(hex_sha256(&req.payload.to_bytes()?))
}

/// Append `Version=<api_version>` to a form encoded payload that lacks it.
fn append_api_version(req: &mut SigningRequest, api_version: &str) -> Result<()> {
    let is_form = req
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));
    if !is_form {
        return Ok(());
    }

    let body = req.payload.to_bytes()?;
    if form_urlencoded::parse(&body).any(|(k, _)| k == "Version") {
        return Ok(());
    }

    let mut content = body.into_owned();
    if !content.is_empty() {
        content.push(b'&');
    }
    content.extend(
        form_urlencoded::Serializer::new(String::new())
            .append_pair("Version", api_version)
            .finish()
            .into_bytes(),
    );

    if req.headers.contains_key(header::CONTENT_LENGTH) {
        req.headers
            .insert(header::CONTENT_LENGTH, content.len().into());
    }
    req.payload = Payload::Bytes(Bytes::from(content));
    Ok(())
}

/// Headers that must be present before the canonical request is built.
fn canonicalize_header(
    req: &SigningRequest,
    ctx: &SigningContext,
    cred: &Credential,
    expires_in: Option<Duration>,
) -> SignatureResult {
    let mut result = SignatureResult::default();

    if !req.headers.contains_key(header::HOST) {
        result = result.with_header(header::HOST.as_str(), req.host());
    }

    if expires_in.is_none() {
        result = result.with_header(X_AMZ_DATE, ctx.timestamp.clone());

        if let Some(token) = &cred.session_token {
            result = result.with_sensitive_header(X_AMZ_SECURITY_TOKEN, token.clone());
        }
    }

    result
}

/// Add the presign query parameters.
fn canonicalize_query(
    req: &mut SigningRequest,
    ctx: &SigningContext,
    cred: &Credential,
    expires_in: Option<Duration>,
    scope: &str,
) {
    let Some(expire) = expires_in else {
        return;
    };

    let signed_headers = req.header_name_to_vec_sorted().join(";");

    req.query_push(X_AMZ_ALGORITHM_QUERY, ALGORITHM);
    req.query_push(
        X_AMZ_CREDENTIAL_QUERY,
        format!("{}/{scope}", cred.access_key_id),
    );
    req.query_push(X_AMZ_DATE_QUERY, ctx.timestamp.clone());
    req.query_push(X_AMZ_EXPIRES_QUERY, expire.as_secs().to_string());
    req.query_push(X_AMZ_SIGNED_HEADERS_QUERY, signed_headers);

    if let Some(token) = &cred.session_token {
        req.query_push(X_AMZ_SECURITY_TOKEN_QUERY, token.clone());
    }
}

fn canonical_request_string(req: &SigningRequest, payload_hash: &str) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", req.method)?;
    // Insert encoded path
    let path = req.path_percent_decoded()?;
    writeln!(f, "{}", utf8_percent_encode(&path, &AWS_URI_ENCODE_SET))?;
    // Insert query
    let mut query = req
        .query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect::<Vec<_>>();
    query.sort();
    writeln!(
        f,
        "{}",
        query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    )?;
    // Insert signed headers
    let signed_headers = req.header_name_to_vec_sorted();
    for name in signed_headers.iter() {
        let values = req
            .headers
            .get_all(*name)
            .iter()
            .map(|v| Ok(collapse_whitespace(v.to_str()?)))
            .collect::<Result<Vec<_>>>()?;
        writeln!(f, "{name}:{}", values.join(","))?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;
    write!(f, "{payload_hash}")?;

    Ok(f)
}

fn generate_signing_key(secret: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}
