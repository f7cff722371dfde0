//! TCP push sender
//!
//! Connects at construction time and holds the connection for the process
//! lifetime of the reporter. Writes are bounded by the socket timeout; a
//! timed-out or failed write surfaces as a send error for the caller's
//! flush scheduler to report.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::transport::endpoint::EndpointDescriptor;
use crate::transport::factory::{SenderBuildError, SenderSettings};
use crate::transport::{Point, SendError, Sender, encode_batch};
use crate::utils::time::{TimePrecision, saturated_millis};

pub struct TcpSender {
    stream: Mutex<TcpStream>,
    target: String,
    /// URI path carried through unmodified, leading slash intact
    path: String,
    precision: TimePrecision,
    socket_timeout_ms: i32,
}

impl TcpSender {
    /// Connect to the endpoint. DNS resolution and the TCP handshake happen
    /// here; any failure is a construction error with the cause attached.
    pub async fn connect(
        endpoint: &EndpointDescriptor,
        settings: &SenderSettings,
    ) -> Result<Self, SenderBuildError> {
        let socket_timeout_ms = saturated_millis(settings.socket_timeout);
        let target = endpoint.address();

        let connect = TcpStream::connect((endpoint.host.as_str(), endpoint.port));
        let stream = tokio::time::timeout(Duration::from_millis(socket_timeout_ms as u64), connect)
            .await
            .map_err(|e| SenderBuildError::construction("tcp", &target, e))?
            .map_err(|e| SenderBuildError::construction("tcp", &target, e))?;

        Ok(Self {
            stream: Mutex::new(stream),
            target,
            path: endpoint.path.clone(),
            precision: settings.time_precision,
            socket_timeout_ms,
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
impl Sender for TcpSender {
    async fn send(&self, batch: &[Point]) -> Result<(), SendError> {
        let body = encode_batch(batch, self.precision);
        let mut stream = self.stream.lock().await;

        let write = async {
            stream.write_all(body.as_bytes()).await?;
            stream.flush().await
        };
        tokio::time::timeout(Duration::from_millis(self.socket_timeout_ms as u64), write)
            .await
            .map_err(|_| SendError::Timeout {
                timeout_ms: self.socket_timeout_ms,
            })??;
        Ok(())
    }

    fn transport(&self) -> &'static str {
        "tcp"
    }
}
