//! Final sample assembly
//!
//! Merges the (possibly enriched) label set and the numeric reading into the
//! sample record handed to the exposition layer. Name sanitization is always
//! the last step and applies to the name only, never to label values.

use crate::core::constants::NAME_ID_JOINER;
use crate::domain::samples::enrich::LabelSet;
use crate::domain::samples::identity::ParsedMetricIdentity;
use crate::utils::sanitize::sanitize_metric_name;

/// One (name, labels, value) data point for exposition
///
/// Label names and values are paired positionally; the two sequences always
/// have equal length. Immutable once assembled, consumed once, discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub label_names: Vec<String>,
    pub label_values: Vec<String>,
    pub value: f64,
}

/// Assemble the final sample from the parse result and label set.
///
/// Without a parse match the full raw name is sanitized as-is and the label
/// set is the caller's base labels unchanged. With a match the name becomes
/// `base_name:entity_id` (sanitized); the metric leaf name is dropped, as the
/// exposition layer appends its own suffixes.
pub fn assemble(
    parsed: Option<&ParsedMetricIdentity>,
    labels: LabelSet,
    raw_name: &str,
    value: f64,
) -> Sample {
    let name = match parsed {
        Some(identity) => sanitize_metric_name(&format!(
            "{}{}{}",
            identity.base_name, NAME_ID_JOINER, identity.entity_id
        )),
        None => sanitize_metric_name(raw_name),
    };

    let (label_names, label_values) = labels.into_split();
    Sample {
        name,
        label_names,
        label_values,
        value,
    }
}
