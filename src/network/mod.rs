//! Network Module
//!
//! TCP server and connection handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - One spawned thread per accepted connection
//! - One request and at most one reply per connection
//! - Requests routed through the Dispatcher

mod server;
mod connection;

pub use server::Server;
pub use connection::Connection;

use std::net::TcpStream;
use std::time::Duration;

use crate::error::Result;

/// Disable Nagle's algorithm and bound how long a read or write may stall
///
/// Shared by the server and the client so both ends behave the same.
pub fn configure_stream(stream: &TcpStream, timeout: Duration) -> Result<()> {
    stream.set_nodelay(true)?;

    // A zero duration is rejected by std; treat it as "no timeout".
    let timeout = (!timeout.is_zero()).then_some(timeout);
    stream.set_read_timeout(timeout)?;
    stream.set_write_timeout(timeout)?;

    Ok(())
}
