//! Request definitions
//!
//! A request is three fields joined by [`SPLIT_TOKEN`]: key, method,
//! payload.

use std::fmt;

use crate::error::{BucketError, Result};

use super::codec::{NULL_SENTINEL, SPLIT_TOKEN};

/// Methods understood by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Set,
    Get,
    Delete,
}

impl Method {
    /// Wire name of the method
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Method::Set => b"set",
            Method::Get => b"get",
            Method::Delete => b"delete",
        }
    }

    /// Match a wire name exactly (case-sensitive)
    pub fn parse(name: &[u8]) -> Option<Method> {
        match name {
            b"set" => Some(Method::Set),
            b"get" => Some(Method::Get),
            b"delete" => Some(Method::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Set => "set",
            Method::Get => "get",
            Method::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// A parsed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub key: String,
    pub method: Method,
    /// Raw value for `set`, `__null__` otherwise
    pub payload: Vec<u8>,
}

impl Request {
    /// Store `value` under `key`
    pub fn set(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            method: Method::Set,
            payload: value.into(),
        }
    }

    /// Fetch the value under `key`
    pub fn get(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            method: Method::Get,
            payload: NULL_SENTINEL.to_vec(),
        }
    }

    /// Remove the value under `key`
    pub fn delete(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            method: Method::Delete,
            payload: NULL_SENTINEL.to_vec(),
        }
    }

    /// Encode the request body (without the end token)
    pub fn encode(&self) -> Vec<u8> {
        let method = self.method.as_bytes();
        let mut body = Vec::with_capacity(
            self.key.len() + method.len() + self.payload.len() + 2 * SPLIT_TOKEN.len(),
        );
        body.extend_from_slice(self.key.as_bytes());
        body.extend_from_slice(SPLIT_TOKEN);
        body.extend_from_slice(method);
        body.extend_from_slice(SPLIT_TOKEN);
        body.extend_from_slice(&self.payload);
        body
    }

    /// Parse a request body (end token already stripped)
    ///
    /// Fails with `MalformedRequest` unless the body splits into exactly
    /// three fields, `InvalidEncoding` if the key or method is not UTF-8,
    /// and `UnknownMethod` for anything but set/get/delete.
    pub fn parse(body: &[u8]) -> Result<Request> {
        let fields = split_fields(body);
        let [key, method, payload] = fields.as_slice() else {
            return Err(BucketError::MalformedRequest {
                fields: fields.len(),
            });
        };

        let key = std::str::from_utf8(key).map_err(|_| BucketError::InvalidEncoding("key"))?;
        let method_name =
            std::str::from_utf8(method).map_err(|_| BucketError::InvalidEncoding("method"))?;
        let method = Method::parse(method)
            .ok_or_else(|| BucketError::UnknownMethod(method_name.to_string()))?;

        Ok(Request {
            key: key.to_string(),
            method,
            payload: payload.to_vec(),
        })
    }
}

/// Split a body on every occurrence of [`SPLIT_TOKEN`]
///
/// Like a plain byte split: `n` separators always give `n + 1` fields,
/// empty ones included.
pub fn split_fields(body: &[u8]) -> Vec<&[u8]> {
    let mut fields = Vec::with_capacity(3);
    let mut start = 0;
    let mut i = 0;

    while i + SPLIT_TOKEN.len() <= body.len() {
        if &body[i..i + SPLIT_TOKEN.len()] == SPLIT_TOKEN {
            fields.push(&body[start..i]);
            i += SPLIT_TOKEN.len();
            start = i;
        } else {
            i += 1;
        }
    }

    fields.push(&body[start..]);
    fields
}
