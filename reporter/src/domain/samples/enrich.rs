//! Sample enrichment with stream and rule metadata
//!
//! Given a parsed metric identity, looks up the referenced domain entities
//! and attaches descriptive labels. Every lookup can miss (entities are
//! deleted concurrently); a miss only costs labels, never the sample.

use std::sync::Arc;

use crate::core::constants::{
    LABEL_ID, LABEL_INDEX_SET_ID, LABEL_RULE_TYPE, LABEL_STREAM_ID, LABEL_STREAM_TITLE,
    RULE_TYPE_UNKNOWN, STREAM_MARKER, STREAM_RULE_MARKER,
};
use crate::domain::entities::{StreamRuleStore, StreamStore};
use crate::domain::samples::identity::ParsedMetricIdentity;

// =============================================================================
// Label Set
// =============================================================================

/// Ordered, append-only sequence of (name, value) label pairs
///
/// Names and values are paired positionally, not as a mapping: duplicate
/// names are permitted and insertion order is significant. The enrichment
/// path relies on both properties (see the duplicate `id` append below).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    pairs: Vec<(String, String)>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Append a pair; never deduplicates or reorders
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, String)> {
        self.pairs.iter()
    }

    /// Split into positionally-paired name and value sequences
    pub fn into_split(self) -> (Vec<String>, Vec<String>) {
        self.pairs.into_iter().unzip()
    }
}

// =============================================================================
// Enricher
// =============================================================================

/// Attaches domain labels to parsed metric identities
///
/// Performs blocking metadata-store reads; holds no mutable state, so it is
/// safe to share across concurrently running exporter tasks. Lookups are
/// never retried: a miss is permanent for the current sample.
pub struct SampleEnricher {
    rules: Arc<dyn StreamRuleStore>,
    streams: Arc<dyn StreamStore>,
}

impl SampleEnricher {
    pub fn new(rules: Arc<dyn StreamRuleStore>, streams: Arc<dyn StreamStore>) -> Self {
        Self { rules, streams }
    }

    /// Extend the base labels with entity-derived labels.
    ///
    /// Always appends `id`. The stream-rule and stream category checks are
    /// independent and both applied; each silently contributes nothing on a
    /// lookup miss. Returns the extended label set.
    pub async fn enrich(
        &self,
        raw_name: &str,
        parsed: &ParsedMetricIdentity,
        base_labels: &LabelSet,
    ) -> LabelSet {
        let id = parsed.entity_id.as_str();
        let mut labels = base_labels.clone();
        labels.push(LABEL_ID, id);

        if raw_name.contains(STREAM_RULE_MARKER) {
            match self.rules.load(id).await {
                Some(rule) => {
                    // Second `id` append is intentional; downstream consumers
                    // depend on the positional pair list exactly as emitted.
                    labels.push(LABEL_ID, id);
                    labels.push(LABEL_RULE_TYPE, rule.rule_type.as_str());

                    match self.streams.load(&rule.stream_id).await {
                        Some(stream) => {
                            labels.push(LABEL_STREAM_ID, stream.id);
                            labels.push(LABEL_STREAM_TITLE, stream.title);
                            labels.push(LABEL_INDEX_SET_ID, stream.index_set_id);
                        }
                        None => {
                            tracing::debug!(
                                rule_id = id,
                                stream_id = %rule.stream_id,
                                "Owning stream not found, emitting sample without stream labels"
                            );
                        }
                    }
                }
                None => {
                    tracing::debug!(rule_id = id, "Stream rule not found");
                    labels.push(LABEL_RULE_TYPE, RULE_TYPE_UNKNOWN);
                }
            }
        }

        if raw_name.contains(STREAM_MARKER) {
            match self.streams.load(id).await {
                Some(stream) => {
                    labels.push(LABEL_STREAM_TITLE, stream.title);
                    labels.push(LABEL_INDEX_SET_ID, stream.index_set_id);
                }
                None => {
                    tracing::debug!(
                        stream_id = id,
                        "Stream not found, emitting sample without stream labels"
                    );
                }
            }
        }

        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{RuleType, Stream, StreamRule};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FixedRules(HashMap<String, StreamRule>);

    #[async_trait]
    impl StreamRuleStore for FixedRules {
        async fn load(&self, id: &str) -> Option<StreamRule> {
            self.0.get(id).cloned()
        }
    }

    struct FixedStreams(HashMap<String, Stream>);

    #[async_trait]
    impl StreamStore for FixedStreams {
        async fn load(&self, id: &str) -> Option<Stream> {
            self.0.get(id).cloned()
        }
    }

    fn enricher(
        rules: Vec<StreamRule>,
        streams: Vec<Stream>,
    ) -> SampleEnricher {
        SampleEnricher::new(
            Arc::new(FixedRules(
                rules.into_iter().map(|r| (r.id.clone(), r)).collect(),
            )),
            Arc::new(FixedStreams(
                streams.into_iter().map(|s| (s.id.clone(), s)).collect(),
            )),
        )
    }

    fn parsed(base: &str, id: &str, leaf: &str) -> ParsedMetricIdentity {
        ParsedMetricIdentity {
            base_name: base.to_string(),
            entity_id: id.to_string(),
            remainder: leaf.to_string(),
        }
    }

    fn pairs(labels: &LabelSet) -> Vec<(&str, &str)> {
        labels
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .collect()
    }

    #[tokio::test]
    async fn test_plain_id_only_gets_single_id_label() {
        let e = enricher(vec![], vec![]);
        let labels = e
            .enrich(
                "inputs.deadbeef01.incomingMessages",
                &parsed("inputs", "deadbeef01", "incomingMessages"),
                &LabelSet::new(),
            )
            .await;
        assert_eq!(pairs(&labels), vec![("id", "deadbeef01")]);
    }

    #[tokio::test]
    async fn test_rule_found_with_stream() {
        let e = enricher(
            vec![StreamRule {
                id: "1a2b3c4d".into(),
                rule_type: RuleType::Regex,
                stream_id: "feedc0de".into(),
            }],
            vec![Stream {
                id: "feedc0de".into(),
                title: "Orders".into(),
                index_set_id: "idx-1".into(),
            }],
        );
        let labels = e
            .enrich(
                "metrics.StreamRule.1a2b3c4d.executionTime",
                &parsed("metrics.StreamRule", "1a2b3c4d", "executionTime"),
                &LabelSet::new(),
            )
            .await;
        assert_eq!(
            pairs(&labels),
            vec![
                ("id", "1a2b3c4d"),
                ("id", "1a2b3c4d"), // duplicate append preserved from source
                ("rule-type", "REGEX"),
                ("stream-id", "feedc0de"),
                ("stream-title", "Orders"),
                ("index-set-id", "idx-1"),
            ]
        );
    }

    #[tokio::test]
    async fn test_rule_found_but_stream_missing() {
        let e = enricher(
            vec![StreamRule {
                id: "1a2b3c4d".into(),
                rule_type: RuleType::Exact,
                stream_id: "gone".into(),
            }],
            vec![],
        );
        let labels = e
            .enrich(
                "metrics.StreamRule.1a2b3c4d.executionTime",
                &parsed("metrics.StreamRule", "1a2b3c4d", "executionTime"),
                &LabelSet::new(),
            )
            .await;
        assert_eq!(
            pairs(&labels),
            vec![
                ("id", "1a2b3c4d"),
                ("id", "1a2b3c4d"),
                ("rule-type", "EXACT"),
            ]
        );
    }

    #[tokio::test]
    async fn test_rule_not_found_yields_unknown_type() {
        let e = enricher(vec![], vec![]);
        let labels = e
            .enrich(
                "metrics.StreamRule.1a2b3c4d.executionTime",
                &parsed("metrics.StreamRule", "1a2b3c4d", "executionTime"),
                &LabelSet::new(),
            )
            .await;
        // No second id append here: that only happens when the rule is found
        assert_eq!(
            pairs(&labels),
            vec![("id", "1a2b3c4d"), ("rule-type", "unknown")]
        );
    }

    #[tokio::test]
    async fn test_stream_found() {
        let e = enricher(
            vec![],
            vec![Stream {
                id: "deadbeef01".into(),
                title: "Orders".into(),
                index_set_id: "idx-1".into(),
            }],
        );
        let labels = e
            .enrich(
                "metrics.Stream.deadbeef01.throughput",
                &parsed("metrics.Stream", "deadbeef01", "throughput"),
                &LabelSet::new(),
            )
            .await;
        assert_eq!(
            pairs(&labels),
            vec![
                ("id", "deadbeef01"),
                ("stream-title", "Orders"),
                ("index-set-id", "idx-1"),
            ]
        );
    }

    #[tokio::test]
    async fn test_stream_not_found_omits_silently() {
        let e = enricher(vec![], vec![]);
        let labels = e
            .enrich(
                "metrics.Stream.deadbeef01.throughput",
                &parsed("metrics.Stream", "deadbeef01", "throughput"),
                &LabelSet::new(),
            )
            .await;
        assert_eq!(pairs(&labels), vec![("id", "deadbeef01")]);
    }

    #[tokio::test]
    async fn test_base_labels_come_first() {
        let e = enricher(vec![], vec![]);
        let mut base = LabelSet::new();
        base.push("node", "node-1");
        let labels = e
            .enrich(
                "inputs.deadbeef01.incomingMessages",
                &parsed("inputs", "deadbeef01", "incomingMessages"),
                &base,
            )
            .await;
        assert_eq!(
            pairs(&labels),
            vec![("node", "node-1"), ("id", "deadbeef01")]
        );
        // Caller-supplied set is not mutated
        assert_eq!(base.len(), 1);
    }
}
