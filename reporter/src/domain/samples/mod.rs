//! Sample building pipeline
//!
//! Translates one raw metric reading into one labeled sample:
//! parse (split out the embedded entity id) -> enrich (attach stream/rule
//! labels) -> assemble (merge labels and value, sanitize the name).
//!
//! Per-sample failures never propagate: an unmatched name falls back to
//! sanitized emission with base labels, and lookup misses only drop labels.

mod assemble;
mod enrich;
mod identity;

pub use assemble::{Sample, assemble};
pub use enrich::{LabelSet, SampleEnricher};
pub use identity::{MetricIdentityParser, ParsedMetricIdentity};

use std::sync::Arc;

use crate::domain::entities::{StreamRuleStore, StreamStore};

/// Builds labeled samples from raw metric readings
///
/// Stateless apart from the compiled pattern and store handles; safe for
/// unsynchronized concurrent use from multiple exporter tasks running on
/// independent schedules.
pub struct SampleBuilder {
    parser: MetricIdentityParser,
    enricher: SampleEnricher,
}

impl SampleBuilder {
    pub fn new(rules: Arc<dyn StreamRuleStore>, streams: Arc<dyn StreamStore>) -> Self {
        Self {
            parser: MetricIdentityParser::new(),
            enricher: SampleEnricher::new(rules, streams),
        }
    }

    /// Build one sample from one reading.
    ///
    /// Infallible by design: degraded output (fewer labels, unparsed name)
    /// is always preferred over a dropped data point.
    pub async fn build(&self, raw_name: &str, base_labels: &LabelSet, value: f64) -> Sample {
        match self.parser.parse(raw_name) {
            Some(identity) => {
                let labels = self.enricher.enrich(raw_name, &identity, base_labels).await;
                assemble(Some(&identity), labels, raw_name, value)
            }
            None => assemble(None, base_labels.clone(), raw_name, value),
        }
    }
}
