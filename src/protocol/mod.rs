//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Framing
//! Every message, in both directions, is its body followed by a fixed
//! end token. There is no length prefix.
//! ```text
//! ┌─────────────────────────────┬─────────┐
//! │            Body             │ [-_-]   │
//! └─────────────────────────────┴─────────┘
//! ```
//!
//! ### Request Body
//! ```text
//! ┌───────┬────────────────────────┬────────┬────────────────────────┬─────────┐
//! │  Key  │ [*BUCKET_SPLIT_TOKEN*] │ Method │ [*BUCKET_SPLIT_TOKEN*] │ Payload │
//! └───────┴────────────────────────┴────────┴────────────────────────┴─────────┘
//! ```
//!
//! ### Methods
//! - `set`    - Payload: raw value bytes
//! - `get`    - Payload: `__null__`
//! - `delete` - Payload: `__null__`
//!
//! ### Reply Body
//! - `ok`       - set/delete succeeded
//! - `__null__` - get miss
//! - raw bytes  - get hit
//!
//! Unknown methods get no reply at all.
//!
//! Payloads are not escaped: a value containing the split token, or
//! ending in the end token, will not survive the trip.

mod codec;
mod reply;
mod request;

pub use codec::{
    encode_frame, read_frame, write_frame, END_TOKEN, NULL_SENTINEL, OK_TOKEN,
    READ_CHUNK_SIZE, SPLIT_TOKEN,
};
pub use reply::Reply;
pub use request::{split_fields, Method, Request};
