//! Dispatcher Module
//!
//! Turns one decoded request body into a storage call and a reply.
//!
//! ## Responsibilities
//! - Parse the body into key, method and payload
//! - Route set/get/delete to the file store
//! - Decide whether a reply is sent at all
//!
//! Holds no per-request state; one dispatcher is shared by every
//! connection thread.

use std::sync::Arc;
use std::time::Instant;

use crate::error::{BucketError, Result};
use crate::protocol::{Method, Reply, Request};
use crate::storage::FileStore;

/// Routes requests to the store
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: Arc<FileStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<FileStore>) -> Self {
        Self { store }
    }

    /// Get the underlying store
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Handle a raw request body
    ///
    /// Returns:
    /// - `Ok(Some(reply))` — request served, send the reply
    /// - `Ok(None)` — unknown method, close without replying
    /// - `Err(_)` — malformed request or storage failure, close without
    ///   replying
    pub fn handle(&self, body: &[u8]) -> Result<Option<Reply>> {
        let request = match Request::parse(body) {
            Ok(request) => request,
            Err(BucketError::UnknownMethod(method)) => {
                tracing::warn!("Ignoring request with unknown method {:?}", method);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        self.execute(request).map(Some)
    }

    /// Execute an already parsed request
    pub fn execute(&self, request: Request) -> Result<Reply> {
        let started = Instant::now();
        let Request {
            key,
            method,
            payload,
        } = request;

        let reply = match method {
            Method::Set => {
                self.store.put(&key, &payload)?;
                Reply::Ok
            }
            Method::Get => match self.store.get(&key)? {
                Some(value) => Reply::Value(value),
                None => Reply::Null,
            },
            Method::Delete => {
                self.store.delete(&key)?;
                Reply::Ok
            }
        };

        tracing::debug!(
            key = %key,
            method = %method,
            bytes = payload_len(method, &payload, &reply) as u64,
            elapsed_us = started.elapsed().as_micros() as u64,
            "Request served"
        );

        Ok(reply)
    }
}

/// Size of the value moved by the request, for logging
fn payload_len(method: Method, payload: &[u8], reply: &Reply) -> usize {
    match (method, reply) {
        (Method::Set, _) => payload.len(),
        (Method::Get, Reply::Value(value)) => value.len(),
        _ => 0,
    }
}
