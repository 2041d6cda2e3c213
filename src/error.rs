//! Error types for bucket
//!
//! Provides a unified error type for all operations.

use std::io::ErrorKind;

use thiserror::Error;

/// Result type alias using BucketError
pub type Result<T> = std::result::Result<T, BucketError>;

/// Unified error type for bucket operations
#[derive(Debug, Error)]
pub enum BucketError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    /// Peer closed the stream before the end token arrived
    #[error("Connection closed before end of message")]
    IncompleteMessage,

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("Malformed request: expected 3 fields, got {fields}")]
    MalformedRequest { fields: usize },

    #[error("Malformed request: {0} is not valid UTF-8")]
    InvalidEncoding(&'static str),

    #[error("Unknown method: {0:?}")]
    UnknownMethod(String),

    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BucketError {
    /// True when the error means the peer went away or stopped talking
    /// (closed, reset, timed out) rather than something going wrong here.
    pub fn is_disconnect(&self) -> bool {
        match self {
            BucketError::IncompleteMessage => true,
            BucketError::Io(e) => matches!(
                e.kind(),
                ErrorKind::UnexpectedEof
                    | ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::BrokenPipe
                    | ErrorKind::WouldBlock
                    | ErrorKind::TimedOut
            ),
            _ => false,
        }
    }

    /// True for requests that violate the wire protocol
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            BucketError::MalformedRequest { .. }
                | BucketError::InvalidEncoding(_)
                | BucketError::UnknownMethod(_)
                | BucketError::InvalidKey(_)
        )
    }
}
