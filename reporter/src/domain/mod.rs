//! Domain logic for metric-sample translation
//!
//! - `entities` - stream and stream-rule entities plus their lookup traits
//! - `samples` - the parse -> enrich -> assemble sample pipeline

pub mod entities;
pub mod samples;

pub use entities::{RuleType, Stream, StreamRule, StreamRuleStore, StreamStore};
pub use samples::{LabelSet, ParsedMetricIdentity, Sample, SampleBuilder};
