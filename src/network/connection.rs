//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;
use std::time::Duration;

use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::protocol::{read_frame, write_frame};

use super::configure_stream;

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Shared request router
    dispatcher: Dispatcher,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O, disables Nagle and applies the inactivity
    /// timeout in both directions.
    pub fn new(stream: TcpStream, dispatcher: Dispatcher, timeout: Duration) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        configure_stream(&stream, timeout)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            dispatcher,
            peer_addr,
        })
    }

    /// Handle the connection (blocking until the exchange is over)
    ///
    /// Reads one request, sends at most one reply, then drops the
    /// stream. Any error ends the exchange without a reply.
    pub fn handle(mut self) -> Result<()> {
        tracing::trace!("Connection established from {}", self.peer_addr);

        let body = read_frame(&mut self.reader)?;

        match self.dispatcher.handle(&body)? {
            Some(reply) => write_frame(&mut self.writer, &reply.into_bytes())?,
            None => tracing::debug!("No reply sent to {}", self.peer_addr),
        }

        Ok(())
    }

    /// Handle the connection and log how it ended
    ///
    /// Used by the server's per-connection threads, which have nobody to
    /// return an error to.
    pub fn serve(self) {
        let peer_addr = self.peer_addr.clone();

        match self.handle() {
            Ok(()) => {}
            Err(e) if e.is_disconnect() => {
                tracing::debug!("Client {} went away: {}", peer_addr, e);
            }
            Err(e) if e.is_protocol_violation() => {
                tracing::warn!("Protocol violation from {}: {}", peer_addr, e);
            }
            Err(e) => {
                tracing::warn!("Request from {} failed: {}", peer_addr, e);
            }
        }
    }
}
