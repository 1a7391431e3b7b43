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
use crate::Credential;
use cloudsign_core::hash::{base64_decode, base64_encode, base64_sha1, EMPTY_STRING_BASE64_SHA1};
use cloudsign_core::time::{format_iso8601_with_separator, DateTime};
use cloudsign_core::{
    Error, Payload, Result, SignRequest, SignatureResult, SigningContext, SigningRequest,
};
use http::Method;
use log::debug;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use std::time::Duration;

/// RequestSigner that implements Chef server authentication, version 1.0.
///
/// - [Chef Server API authentication](https://docs.chef.io/server/api_chef_server/#authentication-headers)
///
/// The string to sign is transformed with the raw RSA private key operation
/// and PKCS#1 type 1 padding, without hashing it or wrapping it in a
/// `DigestInfo` first. This matches OpenSSL's `RSA_private_encrypt`, which
/// mixlib-authentication uses. It is not a standard RSA signature scheme
/// but Chef servers verify exactly this construction.
#[derive(Debug, Default, Clone)]
pub struct RequestSigner;

impl RequestSigner {
    /// Create a new Chef signer.
    pub fn new() -> Self {
        Self
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn build_context(&self, _: &http::Request<Payload>, now: DateTime) -> Result<SigningContext> {
        Ok(SigningContext::new(format_iso8601_with_separator(now)))
    }

    fn sign_request(
        &self,
        req: &http::Request<Payload>,
        ctx: &SigningContext,
        cred: &Self::Credential,
        expires_in: Option<Duration>,
    ) -> Result<http::Request<Payload>> {
        if expires_in.is_some() {
            return Err(Error::request_malformed(
                "chef authentication can't be carried in the query string",
            ));
        }
        if cred.user_id.is_empty() {
            return Err(Error::credential_missing("chef user id is required"));
        }
        let Some(private_key) = &cred.private_key else {
            return Err(Error::credential_missing("chef client key is required"));
        };

        let mut signed_req = SigningRequest::build(req)?;
        signed_req.header_remove_with_prefix(X_OPS_AUTHORIZATION_PREFIX);
        normalize_query_delimiter(&mut signed_req);

        let content_hash = content_hash(&signed_req.payload)?;
        let string_to_sign = string_to_sign(
            &signed_req.method,
            &signed_req.path,
            &content_hash,
            &ctx.timestamp,
            &cred.user_id,
        );
        debug!("calculated string to sign: {string_to_sign}");

        let signature = sign(private_key, &string_to_sign)?;

        let mut result = SignatureResult::new(signature.clone())
            .with_header(X_OPS_CONTENT_HASH, content_hash)
            .with_header(X_OPS_USERID, cred.user_id.clone())
            .with_header(X_OPS_SIGN, SIGN_VERSION)
            .with_header(X_OPS_TIMESTAMP, ctx.timestamp.clone());
        for (idx, chunk) in split_signature(&signature).into_iter().enumerate() {
            result = result
                .with_sensitive_header(format!("{X_OPS_AUTHORIZATION_PREFIX}{}", idx + 1), chunk);
        }
        signed_req.apply_signature(&result)?;

        signed_req.apply()
    }
}

/// Collapse repeated `/` and drop a trailing `/` unless the path is the root.
///
/// ```
/// use cloudsign_chef::canonical_path;
///
/// assert_eq!(canonical_path("/a//b///"), "/a/b");
/// assert_eq!(canonical_path("/"), "/");
/// ```
pub fn canonical_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Split a base64 signature into `X-Ops-Authorization-N` sized chunks.
pub fn split_signature(signature: &str) -> Vec<&str> {
    let mut chunks = Vec::with_capacity(signature.len().div_ceil(CHUNK_SIZE));
    let mut rest = signature;
    while !rest.is_empty() {
        let (chunk, tail) = rest.split_at(rest.len().min(CHUNK_SIZE));
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

/// Verify the `X-Ops-Authorization-N` headers of a signed request the way a
/// Chef server does.
///
/// The payload, method, path and every `X-Ops-*` header are checked against
/// the signature.
pub fn verify_signature(req: &http::Request<Payload>, public_key: &RsaPublicKey) -> Result<()> {
    let content_hash = content_hash(req.body())?;
    if header_value(req, X_OPS_CONTENT_HASH)? != content_hash {
        return Err(Error::crypto_provider("content hash doesn't match payload"));
    }

    let mut signature = String::new();
    for idx in 1.. {
        let Some(chunk) = req
            .headers()
            .get(format!("{X_OPS_AUTHORIZATION_PREFIX}{idx}"))
        else {
            break;
        };
        signature.push_str(chunk.to_str()?);
    }

    let string_to_sign = string_to_sign(
        req.method(),
        req.uri().path(),
        &content_hash,
        header_value(req, X_OPS_TIMESTAMP)?,
        header_value(req, X_OPS_USERID)?,
    );
    public_key
        .verify(
            Pkcs1v15Sign::new_unprefixed(),
            string_to_sign.as_bytes(),
            &base64_decode(&signature)?,
        )
        .map_err(|e| Error::crypto_provider(format!("signature verification failed: {e}")))
}

fn header_value<'a>(req: &'a http::Request<Payload>, name: &str) -> Result<&'a str> {
    let value = req
        .headers()
        .get(name)
        .ok_or_else(|| Error::request_malformed(format!("header {name} is missing")))?;
    Ok(value.to_str()?)
}

/// An over-encoded `?` in the path is the real query delimiter.
fn normalize_query_delimiter(req: &mut SigningRequest) {
    let Some((path, query)) = req.path.split_once("%3F") else {
        return;
    };

    let mut pairs = form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect::<Vec<_>>();
    pairs.append(&mut req.query);
    req.query = pairs;
    req.path = path.to_string();
}

/// Base64 SHA-1 of the payload; multipart uploads only hash their `file` part.
fn content_hash(payload: &Payload) -> Result<String> {
    Ok(match payload {
        Payload::Empty => EMPTY_STRING_BASE64_SHA1.to_string(),
        Payload::Multipart(form) => match form.get(MULTIPART_FILE_PART) {
            Some(part) => base64_sha1(&part.content),
            None => base64_sha1(&form.to_bytes()),
        },
        _ => base64_sha1(&payload.to_bytes()?),
    })
}

fn string_to_sign(
    method: &Method,
    path: &str,
    content_hash: &str,
    timestamp: &str,
    user_id: &str,
) -> String {
    format!(
        "Method:{}\nHashed Path:{}\nX-Ops-Content-Hash:{content_hash}\nX-Ops-Timestamp:{timestamp}\nX-Ops-UserId:{user_id}",
        method.as_str(),
        base64_sha1(canonical_path(path).as_bytes()),
    )
}

fn sign(private_key: &RsaPrivateKey, string_to_sign: &str) -> Result<String> {
    let signature = private_key
        .sign(Pkcs1v15Sign::new_unprefixed(), string_to_sign.as_bytes())
        .map_err(|e| Error::crypto_provider(format!("failed to sign request: {e}")))?;
    Ok(base64_encode(&signature))
}
