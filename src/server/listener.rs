//! Accept Loop
//!
//! Binds the line protocol port and spawns a handler task per client.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::processor::RequestProcessor;
use crate::server::handle_connection;

/// Pause after a failed accept (e.g. file descriptor exhaustion).
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// TCP server speaking the line protocol.
pub struct LineServer {
    listener: TcpListener,
    processor: RequestProcessor,
}

impl LineServer {
    /// Binds `addr`; port 0 picks an ephemeral port.
    pub async fn bind(addr: SocketAddr, processor: RequestProcessor) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            processor,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts clients until `shutdown` resolves.
    ///
    /// On shutdown, handler tasks still running are aborted; any permit they
    /// hold is returned to the pool as the task unwinds.
    pub async fn run<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        info!("New client connected: {}", peer);
                        let processor = self.processor.clone();
                        connections.spawn(async move {
                            let peer = peer.to_string();
                            if let Err(e) = handle_connection(stream, &peer, processor).await {
                                warn!("Client handler error for {}: {}", peer, e);
                            }
                            info!("Client disconnected: {}", peer);
                        });
                    }
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                    }
                },
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
            }
        }

        info!(
            "Line server stopping, aborting {} open connections",
            connections.len()
        );
        connections.shutdown().await;
    }
}
