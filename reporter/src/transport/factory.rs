//! Per-scheme sender construction
//!
//! Turns a resolved endpoint descriptor plus timing settings into the
//! matching network sender. Construction is a one-time, blocking operation
//! performed at reporter startup; any underlying failure (client build, DNS,
//! socket connect) is wrapped and surfaced immediately. A sender is required
//! for the reporter to function at all, so there is no partial recovery: if
//! the endpoint config is wrong the whole reporting subsystem declares so.

use std::time::Duration;

use thiserror::Error;

use crate::core::constants::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_READ_TIMEOUT_MS, DEFAULT_SOCKET_TIMEOUT_MS,
};
use crate::transport::Sender;
use crate::transport::endpoint::{EndpointDescriptor, EndpointError, Scheme};
use crate::transport::http::HttpSender;
use crate::transport::tcp::TcpSender;
use crate::transport::udp::UdpSender;
use crate::utils::time::TimePrecision;

// =============================================================================
// Settings
// =============================================================================

/// Timing and precision parameters for sender construction
///
/// Timeouts are converted to milliseconds and saturated to `i32::MAX` by the
/// individual senders; see `utils::time::saturated_millis`.
#[derive(Debug, Clone)]
pub struct SenderSettings {
    pub time_precision: TimePrecision,
    /// Connect timeout (HTTP family)
    pub connect_timeout: Duration,
    /// Read timeout (HTTP family)
    pub read_timeout: Duration,
    /// Socket timeout (TCP/UDP)
    pub socket_timeout: Duration,
}

impl Default for SenderSettings {
    fn default() -> Self {
        Self {
            time_precision: TimePrecision::default(),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
            socket_timeout: Duration::from_millis(DEFAULT_SOCKET_TIMEOUT_MS),
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Error, Debug)]
pub enum SenderBuildError {
    /// The endpoint URI failed to resolve
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    /// An underlying construction step failed; the original cause is carried
    /// as the error source. No partial sender is ever returned.
    #[error("failed to construct {transport} sender for {target}: {source}")]
    Construction {
        transport: &'static str,
        target: String,
        #[source]
        source: anyhow::Error,
    },
}

impl SenderBuildError {
    pub(crate) fn construction(
        transport: &'static str,
        target: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Construction {
            transport,
            target: target.into(),
            source: source.into(),
        }
    }
}

// =============================================================================
// Factory
// =============================================================================

/// Construct the sender matching the descriptor's scheme.
pub async fn build_sender(
    endpoint: &EndpointDescriptor,
    settings: &SenderSettings,
) -> Result<Box<dyn Sender>, SenderBuildError> {
    let sender: Box<dyn Sender> = match endpoint.scheme {
        Scheme::Http | Scheme::Https => Box::new(HttpSender::build(endpoint, settings)?),
        Scheme::Tcp => Box::new(TcpSender::connect(endpoint, settings).await?),
        Scheme::Udp => Box::new(UdpSender::connect(endpoint, settings).await?),
    };

    tracing::debug!(
        transport = sender.transport(),
        target = %endpoint.address(),
        time_precision = %settings.time_precision,
        "Constructed metrics sender"
    );
    Ok(sender)
}

/// Resolve a connection URI and construct the matching sender in one step.
pub async fn build_sender_for(
    uri: &str,
    settings: &SenderSettings,
) -> Result<Box<dyn Sender>, SenderBuildError> {
    let endpoint = EndpointDescriptor::resolve(uri)?;
    build_sender(&endpoint, settings).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_scheme_fails_naming_it() {
        let err = build_sender_for("ftp://host", &SenderSettings::default())
            .await
            .err()
            .expect("unsupported scheme must be rejected");
        assert_eq!(err.to_string(), "unsupported protocol \"ftp\"");
    }

    #[tokio::test]
    async fn test_resolve_then_build_http_round_trip() {
        // No connection is made for the HTTP family at build time, so this
        // exercises the full resolve + build chain offline.
        let sender = build_sender_for("https://user@host:9999/db", &SenderSettings::default())
            .await
            .unwrap();
        assert_eq!(sender.transport(), "http");
    }

    #[tokio::test]
    async fn test_tcp_connect_refused_is_construction_error() {
        // Port 1 on localhost is closed in practice
        let err = build_sender_for("tcp://127.0.0.1:1/metrics", &SenderSettings::default())
            .await
            .err()
            .expect("closed port must fail construction");
        match err {
            SenderBuildError::Construction { transport, target, .. } => {
                assert_eq!(transport, "tcp");
                assert_eq!(target, "127.0.0.1:1");
            }
            other => panic!("expected construction error, got {other}"),
        }
    }
}
