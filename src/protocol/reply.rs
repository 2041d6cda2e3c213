//! Reply definitions

use super::codec::{NULL_SENTINEL, OK_TOKEN};

/// A reply body sent back to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `ok` after set/delete
    Ok,

    /// Stored bytes for a get hit
    Value(Vec<u8>),

    /// `__null__` for a get miss
    Null,
}

impl Reply {
    /// Wire form of the reply body
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Reply::Ok => OK_TOKEN.to_vec(),
            Reply::Value(value) => value,
            Reply::Null => NULL_SENTINEL.to_vec(),
        }
    }

    /// Interpret the body of a reply to `get`
    ///
    /// A stored value that is literally `__null__` is indistinguishable
    /// from a miss.
    pub fn from_get_body(body: Vec<u8>) -> Reply {
        if body == NULL_SENTINEL {
            Reply::Null
        } else {
            Reply::Value(body)
        }
    }

    /// Collapse into the stored value, if any
    pub fn into_value(self) -> Option<Vec<u8>> {
        match self {
            Reply::Value(value) => Some(value),
            Reply::Ok | Reply::Null => None,
        }
    }
}
