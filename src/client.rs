//! Client
//!
//! Blocking client for a bucket server. Every call opens its own
//! connection, sends one request and reads one reply; the socket is
//! closed when the call returns, whether it succeeded or not.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::network::configure_stream;
use crate::protocol::{read_frame, write_frame, Reply, Request};

/// Connection settings for talking to one server
#[derive(Debug, Clone)]
pub struct Client {
    addr: String,
    timeout: Duration,
}

impl Client {
    /// Create a client for `addr` (`host:port`)
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.addr(), config.timeout)
    }

    /// Store `value` under `key`
    pub fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.round_trip(&Request::set(key, value))?;
        Ok(())
    }

    /// Fetch the value under `key`, `None` if the server has none
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let body = self.round_trip(&Request::get(key))?;
        Ok(Reply::from_get_body(body).into_value())
    }

    /// Remove the value under `key`
    pub fn delete(&self, key: &str) -> Result<()> {
        self.round_trip(&Request::delete(key))?;
        Ok(())
    }

    /// Send one request on a fresh connection and return the reply body
    fn round_trip(&self, request: &Request) -> Result<Vec<u8>> {
        let stream = TcpStream::connect(&self.addr)?;
        configure_stream(&stream, self.timeout)?;

        let mut writer = BufWriter::new(stream.try_clone()?);
        write_frame(&mut writer, &request.encode())?;

        let mut reader = BufReader::new(stream);
        read_frame(&mut reader)
    }
}
