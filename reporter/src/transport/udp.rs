//! UDP push sender
//!
//! Identical in shape to the TCP sender but over a connectionless socket.
//! Delivery is **fire-and-forget**: the sender provides no delivery or
//! ordering guarantee, mirroring the best-effort nature of UDP metric push.
//! A successful `send` only means the datagram left this host.

use std::io;

use async_trait::async_trait;
use tokio::net::UdpSocket;

use crate::transport::endpoint::EndpointDescriptor;
use crate::transport::factory::{SenderBuildError, SenderSettings};
use crate::transport::{Point, SendError, Sender, encode_batch};
use crate::utils::time::{TimePrecision, saturated_millis};

pub struct UdpSender {
    socket: UdpSocket,
    target: String,
    /// URI path carried through unmodified, leading slash intact
    path: String,
    precision: TimePrecision,
    socket_timeout_ms: i32,
}

impl UdpSender {
    /// Bind a local socket and fix the remote target. DNS resolution happens
    /// here; any failure is a construction error with the cause attached.
    /// The local socket is bound in the address family of the resolved peer,
    /// so IPv6-only targets work.
    pub async fn connect(
        endpoint: &EndpointDescriptor,
        settings: &SenderSettings,
    ) -> Result<Self, SenderBuildError> {
        let target = endpoint.address();

        let peer = tokio::net::lookup_host(target.as_str())
            .await
            .map_err(|e| SenderBuildError::construction("udp", &target, e))?
            .next()
            .ok_or_else(|| {
                SenderBuildError::construction(
                    "udp",
                    &target,
                    io::Error::new(io::ErrorKind::NotFound, "no addresses resolved"),
                )
            })?;

        let bind_addr = if peer.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| SenderBuildError::construction("udp", &target, e))?;
        socket
            .connect(peer)
            .await
            .map_err(|e| SenderBuildError::construction("udp", &target, e))?;

        Ok(Self {
            socket,
            target,
            path: endpoint.path.clone(),
            precision: settings.time_precision,
            socket_timeout_ms: saturated_millis(settings.socket_timeout),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn socket_timeout_ms(&self) -> i32 {
        self.socket_timeout_ms
    }
}

#[async_trait]
impl Sender for UdpSender {
    /// Emit the batch as a single datagram. Fire-and-forget: no delivery or
    /// ordering guarantee is provided.
    async fn send(&self, batch: &[Point]) -> Result<(), SendError> {
        let body = encode_batch(batch, self.precision);
        self.socket.send(body.as_bytes()).await?;
        Ok(())
    }

    fn transport(&self) -> &'static str {
        "udp"
    }
}
