//! Push transport layer
//!
//! - `endpoint` - URI parsing into a validated endpoint descriptor
//! - `factory` - per-scheme sender construction
//! - `http` / `tcp` / `udp` - the concrete senders
//!
//! A sender is constructed once at reporter startup and owns its connection
//! or socket resources for the process lifetime of the reporter. Batching
//! and flush scheduling are the caller's concern; `send` delivers exactly
//! the batch it is given, with no retry.

pub mod endpoint;
pub mod factory;
pub mod http;
pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::utils::time::TimePrecision;

// =============================================================================
// Wire Point
// =============================================================================

/// One wire-ready push datum
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub name: String,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

impl Point {
    pub fn new(name: impl Into<String>, value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            value,
            timestamp,
        }
    }

    /// Render this point as one line-protocol record
    pub fn encode(&self, precision: TimePrecision) -> String {
        format!(
            "{} value={} {}",
            escape_name(&self.name),
            self.value,
            precision.timestamp(self.timestamp)
        )
    }
}

/// Render a batch as newline-separated line-protocol text
pub fn encode_batch(points: &[Point], precision: TimePrecision) -> String {
    let mut body = String::new();
    for point in points {
        body.push_str(&point.encode(precision));
        body.push('\n');
    }
    body
}

/// Escape characters with structural meaning in the line format
fn escape_name(name: &str) -> String {
    name.replace(' ', "\\ ").replace(',', "\\,")
}

// =============================================================================
// Sender Abstraction
// =============================================================================

/// Errors surfaced by a sender's `send`
#[derive(Error, Debug)]
pub enum SendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("send timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: i32 },
}

/// Push-transport abstraction delivering point batches to a remote backend
///
/// Implementations hold their own connection/socket resources and must be
/// safe to share across tasks. Delivery semantics depend on the transport:
/// the UDP sender in particular is fire-and-forget (see [`udp::UdpSender`]).
#[async_trait]
pub trait Sender: Send + Sync {
    /// Deliver one batch of points
    async fn send(&self, batch: &[Point]) -> Result<(), SendError>;

    /// Transport name for logging, e.g. `"http"`
    fn transport(&self) -> &'static str;
}
