use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SenderError {
    #[error("Invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },
    #[error("Socket error: {0}")]
    Socket(#[from] std::io::Error),
}

/// Fire-and-forget UDP emitter.
///
/// One connected socket, one datagram per formatted line. No retry, no
/// acknowledgment, and no response is ever read: there is no caller waiting
/// on the result of a forwarded message.
#[derive(Debug)]
pub struct UdpSender {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpSender {
    pub async fn connect(server: &str, port: u16) -> Result<Self, SenderError> {
        let target = tokio::net::lookup_host((server, port))
            .await
            .map_err(|e| SenderError::InvalidTarget {
                target: format!("{server}:{port}"),
                reason: e.to_string(),
            })?
            .next()
            .ok_or_else(|| SenderError::InvalidTarget {
                target: format!("{server}:{port}"),
                reason: "no addresses resolved".to_string(),
            })?;

        let bind_addr = if target.is_ipv6() { "[::]:0" } else { "0.0.0.0:0" };
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(target).await?;

        Ok(Self { socket, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Local IP the OS routed through to reach the target. Stamped into BSD
    /// headers as the originating host when none is configured.
    pub fn local_ip(&self) -> Option<String> {
        self.socket
            .local_addr()
            .ok()
            .filter(|addr| !addr.ip().is_unspecified())
            .map(|addr| addr.ip().to_string())
    }

    /// Sends one datagram. Failures are logged and swallowed; there is no
    /// feedback path to report them through.
    pub async fn send(&self, line: &str) {
        match self.socket.send(line.as_bytes()).await {
            Ok(bytes) => debug!(bytes, peer = %self.target, "sent syslog datagram"),
            Err(e) => warn!("UDP send to {} failed: {e}", self.target),
        }
    }
}
