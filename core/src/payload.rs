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

use crate::{Error, Result};
use bytes::{BufMut, Bytes, BytesMut};
use std::borrow::Cow;

/// Payload is the body of a request that is about to be signed.
///
/// Signing schemes hash the payload, so it must be repeatable: the signer
/// reads it once for hashing and the transport reads it again for sending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Payload {
    /// No body at all.
    #[default]
    Empty,
    /// An in-memory body.
    Bytes(Bytes),
    /// A `multipart/form-data` body made of named parts.
    Multipart(Multipart),
    /// A one-shot body owned by the transport.
    ///
    /// Its bytes are not available to the signer and cannot be replayed, so
    /// every scheme that hashes the payload rejects it.
    Streaming,
}

impl Payload {
    /// Render the payload into bytes for hashing.
    ///
    /// Fails with [`ErrorKind::PayloadUnreadable`](crate::ErrorKind::PayloadUnreadable)
    /// for [`Payload::Streaming`].
    pub fn to_bytes(&self) -> Result<Cow<'_, [u8]>> {
        match self {
            Payload::Empty => Ok(Cow::Borrowed(&[])),
            Payload::Bytes(bs) => Ok(Cow::Borrowed(bs.as_ref())),
            Payload::Multipart(mp) => Ok(Cow::Owned(mp.to_bytes().to_vec())),
            Payload::Streaming => Err(Error::payload_unreadable(
                "streaming payload is not repeatable and cannot be hashed",
            )),
        }
    }
}

impl From<Bytes> for Payload {
    fn from(value: Bytes) -> Self {
        Payload::Bytes(value)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Payload::Bytes(Bytes::from(value))
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Bytes(Bytes::from(value))
    }
}

impl From<&'static str> for Payload {
    fn from(value: &'static str) -> Self {
        Payload::Bytes(Bytes::from_static(value.as_bytes()))
    }
}

impl From<Multipart> for Payload {
    fn from(value: Multipart) -> Self {
        Payload::Multipart(value)
    }
}

/// Multipart is a `multipart/form-data` body (RFC 7578).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multipart {
    boundary: String,
    parts: Vec<FormPart>,
}

impl Multipart {
    /// Create an empty multipart body with the given boundary.
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Append a part.
    pub fn part(mut self, part: FormPart) -> Self {
        self.parts.push(part);
        self
    }

    /// The value for the `Content-Type` header of this body.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Find the first part with given name.
    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Render the whole body.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::new();

        for part in &self.parts {
            buf.put_slice(b"--");
            buf.put_slice(self.boundary.as_bytes());
            buf.put_slice(b"\r\n");

            buf.put_slice(b"Content-Disposition: form-data; name=\"");
            buf.put_slice(part.name.as_bytes());
            buf.put_slice(b"\"");
            if let Some(filename) = &part.filename {
                buf.put_slice(b"; filename=\"");
                buf.put_slice(filename.as_bytes());
                buf.put_slice(b"\"");
            }
            buf.put_slice(b"\r\n");
            if let Some(content_type) = &part.content_type {
                buf.put_slice(b"Content-Type: ");
                buf.put_slice(content_type.as_bytes());
                buf.put_slice(b"\r\n");
            }
            buf.put_slice(b"\r\n");
            buf.put_slice(&part.content);
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_bytes());
        buf.put_slice(b"--\r\n");

        buf.freeze()
    }
}

/// FormPart is a single named part of a [`Multipart`] body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    /// Form field name.
    pub name: String,
    /// Optional file name.
    pub filename: Option<String>,
    /// Optional part content type.
    pub content_type: Option<String>,
    /// Part content.
    pub content: Bytes,
}

impl FormPart {
    /// Create a new part with given name and content.
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: None,
            content: content.into(),
        }
    }

    /// Set the file name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
