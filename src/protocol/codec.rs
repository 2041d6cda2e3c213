//! Protocol codec
//!
//! Framing functions for the wire protocol. A frame is the message body
//! followed by [`END_TOKEN`]; the reader accumulates bytes until the
//! buffer ends with the token.

use std::io::{ErrorKind, Read, Write};

use bytes::BytesMut;

use crate::error::{BucketError, Result};

/// End-of-message delimiter
pub const END_TOKEN: &[u8] = b"[-_-]";

/// Separator between the key, method and payload fields of a request
pub const SPLIT_TOKEN: &[u8] = b"[*BUCKET_SPLIT_TOKEN*]";

/// Placeholder payload for get/delete, and the reply for a get miss
pub const NULL_SENTINEL: &[u8] = b"__null__";

/// Acknowledgment for set/delete
pub const OK_TOKEN: &[u8] = b"ok";

/// Bytes requested from the stream per read
pub const READ_CHUNK_SIZE: usize = 1024;

// =============================================================================
// Frame Encoding
// =============================================================================

/// Encode a message body as a frame
pub fn encode_frame(body: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(body.len() + END_TOKEN.len());
    frame.extend_from_slice(body);
    frame.extend_from_slice(END_TOKEN);
    frame
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one complete frame from a stream and return its body
///
/// Blocks until the end token is seen. If the peer closes the stream
/// first, returns [`BucketError::IncompleteMessage`]. Read timeouts
/// surface as `Io` errors.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut buffer = BytesMut::with_capacity(READ_CHUNK_SIZE);
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    while !buffer.ends_with(END_TOKEN) {
        let n = match reader.read(&mut chunk) {
            Ok(0) => return Err(BucketError::IncompleteMessage),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        buffer.extend_from_slice(&chunk[..n]);
    }

    buffer.truncate(buffer.len() - END_TOKEN.len());
    Ok(Vec::from(buffer))
}

/// Write a message body to a stream as one frame
pub fn write_frame<W: Write>(writer: &mut W, body: &[u8]) -> Result<()> {
    writer.write_all(&encode_frame(body))?;
    writer.flush()?;
    Ok(())
}
