//! WebSocket server the automation bridge connects to.
//!
//! # Connection Flow
//!
//! 1. Bind a WebSocket server to `localhost:0` (random port)
//! 2. Hand [`PendingServer::ws_url`] to whatever starts the bridge
//! 3. The bridge connects and sends a READY message carrying its session
//! 4. Commands flow over the resulting [`Connection`]

// ============================================================================
// Imports
// ============================================================================

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::identifiers::SessionId;

use super::Connection;

// ============================================================================
// Constants
// ============================================================================

/// Default time to wait for the bridge to connect.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// PendingServer
// ============================================================================

/// A WebSocket server that is bound but not yet connected.
///
/// # Example
///
/// ```ignore
/// use std::net::{IpAddr, Ipv4Addr};
/// use widget_verify::transport::PendingServer;
///
/// let server = PendingServer::bind(IpAddr::V4(Ipv4Addr::LOCALHOST), 0).await?;
/// println!("bridge should dial {}", server.ws_url());
///
/// let (connection, session) = server.accept().await?;
/// ```
#[derive(Debug)]
pub struct PendingServer {
    listener: TcpListener,
    port: u16,
    connect_timeout: Duration,
}

impl PendingServer {
    /// Binds a WebSocket server to the specified address and port.
    ///
    /// Use port 0 to let the OS assign a random available port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if binding fails.
    pub async fn bind(ip: IpAddr, port: u16) -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::new(ip, port)).await?;
        let actual_port = listener.local_addr()?.port();

        debug!(port = actual_port, "WebSocket server bound");

        Ok(Self {
            listener,
            port: actual_port,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        })
    }

    /// Sets how long [`PendingServer::accept`] waits for the bridge.
    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Returns the port the server is bound to.
    #[inline]
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the WebSocket URL for this server.
    ///
    /// Format: `ws://127.0.0.1:{port}`
    #[inline]
    #[must_use]
    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}", self.port)
    }

    /// Returns the local socket address.
    #[inline]
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), self.port)
    }

    /// Accepts the bridge's connection and completes the READY handshake.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionTimeout`] if nothing connects in time
    /// - [`Error::Connection`] if the WebSocket upgrade fails
    /// - [`Error::ConnectionClosed`] if the socket drops before READY
    pub async fn accept(self) -> Result<(Connection, SessionId)> {
        let wait_ms = u64::try_from(self.connect_timeout.as_millis()).unwrap_or(u64::MAX);

        let (stream, addr) = timeout(self.connect_timeout, self.listener.accept())
            .await
            .map_err(|_| Error::connection_timeout(wait_ms))??;

        debug!(?addr, "TCP connection accepted");

        let ws_stream = tokio_tungstenite::accept_async(stream)
            .await
            .map_err(|e| Error::connection(format!("WebSocket upgrade failed: {e}")))?;

        info!(port = self.port, "WebSocket connection established");

        let connection = Connection::new(ws_stream);
        let ready = connection.wait_ready().await?;

        Ok((connection, ready.session_id))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use futures_util::SinkExt;
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::Message;

    async fn bind() -> PendingServer {
        PendingServer::bind(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
            .await
            .expect("bind should succeed")
    }

    #[tokio::test]
    async fn test_server_bind_random_port() {
        let server = bind().await;

        assert!(server.port() > 0);
        assert_eq!(server.ws_url(), format!("ws://127.0.0.1:{}", server.port()));
        assert_eq!(server.local_addr().port(), server.port());
    }

    #[tokio::test]
    async fn test_accept_times_out_without_client() {
        let server = bind().await.with_connect_timeout(Duration::from_millis(50));

        let err = server.accept().await.expect_err("nobody connects");
        assert!(matches!(err, Error::ConnectionTimeout { timeout_ms: 50 }));
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_accept_reads_ready_session() {
        let server = bind().await;
        let url = server.ws_url();

        let bridge = tokio::spawn(async move {
            let (mut ws, _) = connect_async(url).await.expect("connect");
            ws.send(Message::Text(
                r#"{"id":"00000000-0000-0000-0000-000000000000","type":"success","result":{"sessionId":7}}"#
                    .to_string()
                    .into(),
            ))
            .await
            .expect("ready");
            ws
        });

        let (connection, session) = server.accept().await.expect("accept");
        assert_eq!(session, SessionId::new(7));
        assert_eq!(connection.pending_count(), 0);

        drop(bridge.await.expect("bridge task"));
    }
}
