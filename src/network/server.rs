//! TCP Server
//!
//! Accepts connections and hands each one to its own thread.

use std::io::ErrorKind;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::storage::FileStore;

use super::Connection;

/// TCP server for bucket
pub struct Server {
    /// Bound listening socket
    listener: TcpListener,

    /// Request router shared with every connection
    dispatcher: Dispatcher,

    /// Inactivity timeout applied to accepted connections
    timeout: Duration,

    /// Counter used to name connection threads
    next_conn_id: AtomicU64,
}

impl Server {
    /// Open the store under `config.root` and bind the listener
    pub fn bind(config: &Config) -> Result<Self> {
        let store = FileStore::open(&config.root)?;
        Self::with_store(config, Arc::new(store))
    }

    /// Bind the listener in front of an already opened store
    pub fn with_store(config: &Config, store: Arc<FileStore>) -> Result<Self> {
        let listener = TcpListener::bind(config.server_addr())?;
        let local = listener.local_addr()?;

        tracing::info!(
            "running bucket server {} @ {} (root {})",
            local.ip(),
            local.port(),
            store.root().display()
        );

        Ok(Self {
            listener,
            dispatcher: Dispatcher::new(store),
            timeout: config.timeout,
            next_conn_id: AtomicU64::new(1),
        })
    }

    /// Address the listener is actually bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Start the accept loop (blocking, never returns `Ok`)
    ///
    /// Accept-side timeouts and peers that vanish mid-handshake are
    /// skipped; any other accept error stops the server.
    pub fn run(&self) -> Result<()> {
        loop {
            let (stream, addr) = match self.listener.accept() {
                Ok(pair) => pair,
                Err(e) if is_benign_accept_error(e.kind()) => {
                    tracing::trace!("Accept interrupted: {}", e);
                    continue;
                }
                Err(e) => {
                    tracing::error!("Accept failed: {}", e);
                    return Err(e.into());
                }
            };

            self.dispatch_connection(stream, addr);
        }
    }

    /// Run the accept loop on a background thread
    pub fn spawn(self) -> Result<JoinHandle<Result<()>>> {
        let handle = thread::Builder::new()
            .name("bucket-accept".to_string())
            .spawn(move || self.run())?;
        Ok(handle)
    }

    /// Configure the stream and serve it on a new thread
    fn dispatch_connection(&self, stream: TcpStream, addr: SocketAddr) {
        let connection = match Connection::new(stream, self.dispatcher.clone(), self.timeout) {
            Ok(connection) => connection,
            Err(e) => {
                tracing::debug!("Dropping connection from {}: {}", addr, e);
                return;
            }
        };

        let id = self.next_conn_id.fetch_add(1, Ordering::Relaxed);
        let spawned = thread::Builder::new()
            .name(format!("bucket-conn-{id}"))
            .spawn(move || connection.serve());

        if let Err(e) = spawned {
            tracing::warn!("Failed to spawn handler for {}: {}", addr, e);
        }
    }
}

fn is_benign_accept_error(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::TimedOut
            | ErrorKind::WouldBlock
            | ErrorKind::Interrupted
            | ErrorKind::ConnectionAborted
            | ErrorKind::ConnectionReset
    )
}
