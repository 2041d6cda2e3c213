//! # bucket
//!
//! A network-accessible key/value blob store:
//! - One file per key under a root directory
//! - Nested keys (`reports/jan`) map to nested directories
//! - Delimiter-framed TCP protocol, one request per connection
//! - Thread-per-connection server
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │              (one thread per connection)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ frame: body + [-_-]
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Dispatcher                                │
//! │          (key [*SPLIT*] method [*SPLIT*] payload)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │   FileStore   │
//!               │ {root}/{key}  │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod storage;
pub mod dispatcher;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BucketError, Result};
pub use config::{ClientConfig, Config};
pub use client::Client;
pub use dispatcher::Dispatcher;
pub use storage::FileStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of bucket
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
