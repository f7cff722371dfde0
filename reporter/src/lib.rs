//! Metric-sample translation and dispatch core
//!
//! Converts a tree of hierarchical, dot-separated metric names and numeric
//! readings into:
//! - labeled [`Sample`]s for a pull-based collector (scrape exposition), and
//! - wire-ready [`Point`] batches for push-based time-series backends over
//!   HTTP(S), TCP, or UDP.
//!
//! Modules:
//! - `core` - configuration loading and shared constants
//! - `domain` - stream/rule entities and the sample building pipeline
//! - `transport` - endpoint resolution and push-sender construction
//! - `utils` - name sanitization and time precision helpers
//!
//! The collection mechanism itself (a timer-driven stream of named readings)
//! and the batching/flush scheduler for push backends are external
//! collaborators; this crate is invoked once per reading or once per batch.

pub mod core;
pub mod domain;
pub mod transport;
pub mod utils;

pub use crate::core::config::ReporterConfig;
pub use domain::entities::{RuleType, Stream, StreamRule, StreamRuleStore, StreamStore};
pub use domain::samples::{LabelSet, ParsedMetricIdentity, Sample, SampleBuilder};
pub use transport::endpoint::{EndpointDescriptor, EndpointError, Scheme};
pub use transport::factory::{SenderBuildError, SenderSettings, build_sender, build_sender_for};
pub use transport::{Point, SendError, Sender};
pub use utils::time::TimePrecision;
