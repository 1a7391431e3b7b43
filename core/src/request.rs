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

use std::borrow::Cow;
use std::str::FromStr;

use http::header::HeaderName;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Request;
use http::Uri;
use http::Version;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

use crate::{Error, Payload, Result, SignatureResult};

/// Characters kept verbatim when a query pair is written back into the uri.
///
/// Everything except RFC 3986 unreserved characters is encoded.
static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// SigningRequest is a working copy of an outbound request.
///
/// It is built from a shared reference to the caller's request, so the
/// original is never touched. Signers canonicalize and decorate the copy,
/// then [`SigningRequest::apply`] turns it into a brand new request.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, still percent encoded as it appeared in the uri.
    pub path: String,
    /// HTTP query parameters, percent decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
    /// HTTP version.
    pub version: Version,
    /// Request payload.
    pub payload: Payload,
}

impl SigningRequest {
    /// Build a signing request from the caller's request.
    pub fn build(req: &Request<Payload>) -> Result<Self> {
        let uri = req.uri();
        let authority = uri.authority().cloned().ok_or_else(|| {
            Error::request_malformed("request without authority is invalid for signing")
        })?;

        let path = match uri.path() {
            "" => "/".to_string(),
            v => v.to_string(),
        };

        Ok(SigningRequest {
            method: req.method().clone(),
            scheme: uri.scheme().cloned().unwrap_or(Scheme::HTTP),
            authority,
            path,
            query: uri
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),
            headers: req.headers().clone(),
            version: req.version(),
            payload: req.body().clone(),
        })
    }

    /// Turn the signing request into a new `http::Request`.
    pub fn apply(self) -> Result<Request<Payload>> {
        let query_size = self.query_size();
        let paq = if self.query.is_empty() {
            self.path
        } else {
            let mut s = self.path;
            s.reserve(query_size + 1);

            s.push('?');
            for (i, (k, v)) in self.query.iter().enumerate() {
                if i > 0 {
                    s.push('&');
                }

                s.extend(utf8_percent_encode(k, &QUERY_ENCODE_SET));
                if !v.is_empty() {
                    s.push('=');
                    s.extend(utf8_percent_encode(v, &QUERY_ENCODE_SET));
                }
            }

            s
        };

        let uri = Uri::builder()
            .scheme(self.scheme)
            .authority(self.authority)
            .path_and_query(PathAndQuery::from_str(&paq)?)
            .build()?;

        let mut req = Request::builder()
            .method(self.method)
            .uri(uri)
            .version(self.version)
            .body(self.payload)?;
        *req.headers_mut() = self.headers;

        Ok(req)
    }

    /// Insert every auxiliary header of a signature result.
    ///
    /// Names already present are replaced, never appended to.
    pub fn apply_signature(&mut self, result: &SignatureResult) -> Result<()> {
        for (name, value) in &result.auxiliary_headers {
            let name = HeaderName::from_str(name)?;
            let mut value = HeaderValue::from_str(value)?;
            if result
                .sensitive_headers
                .iter()
                .any(|v| v.eq_ignore_ascii_case(name.as_str()))
            {
                value.set_sensitive(true);
            }
            self.headers.insert(name, value);
        }
        Ok(())
    }

    /// Get the path percent decoded.
    pub fn path_percent_decoded(&self) -> Result<Cow<'_, str>> {
        percent_encoding::percent_decode_str(&self.path)
            .decode_utf8()
            .map_err(|e| Error::request_malformed("path is not valid utf-8").with_source(e))
    }

    /// Get query size.
    #[inline]
    pub fn query_size(&self) -> usize {
        self.query
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum::<usize>()
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Host value derived from the authority, with default ports and any
    /// userinfo stripped.
    pub fn host(&self) -> String {
        let host = self.authority.host();
        let default_port = if self.scheme == Scheme::HTTPS {
            Some(443)
        } else if self.scheme == Scheme::HTTP {
            Some(80)
        } else {
            None
        };

        match self.authority.port_u16() {
            Some(port) if Some(port) != default_port => format!("{host}:{port}"),
            _ => host.to_string(),
        }
    }

    /// Remove every header whose name starts with given prefix.
    pub fn header_remove_with_prefix(&mut self, prefix: &str) {
        let names = self
            .headers
            .keys()
            .filter(|k| k.as_str().starts_with(prefix))
            .cloned()
            .collect::<Vec<_>>();
        for name in names {
            self.headers.remove(name);
        }
    }

    /// Get header names as sorted vector.
    pub fn header_name_to_vec_sorted(&self) -> Vec<&str> {
        let mut h = self
            .headers
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<&str>>();
        h.sort_unstable();

        h
    }
}
