//! Metric identifier parsing
//!
//! Raw metric names are dot-separated hierarchical identifiers. Names that
//! describe a specific domain object embed its id as a hex-like token, e.g.
//! `org.example.StreamRule.58a1b2c3d4e5f60718293a4b.executionTime`. The
//! majority of names (process, runtime, JVM-style metrics) carry no id and
//! must still be reported, so a failed parse is not an error.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::constants::ID_METRIC_PATTERN;

/// A raw metric name split around its embedded entity id
///
/// Computed fresh per sample and discarded after label attachment. Joining
/// the three fields with `.` reconstructs the original name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMetricIdentity {
    /// Everything before the entity id
    pub base_name: String,
    /// Hex-like token of length >= 8
    pub entity_id: String,
    /// Metric leaf name after the id, e.g. `executionTime`
    pub remainder: String,
}

/// Matches raw metric names against the identifier-embedding pattern
#[derive(Debug, Default)]
pub struct MetricIdentityParser;

impl MetricIdentityParser {
    pub fn new() -> Self {
        Self
    }

    /// Split a raw name into base name, entity id, and remainder.
    ///
    /// Returns `None` when no embedded id exists; the caller falls back to
    /// treating the full raw name as an unparsed sanitized name.
    pub fn parse(&self, raw_name: &str) -> Option<ParsedMetricIdentity> {
        static ID_PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern =
            ID_PATTERN.get_or_init(|| Regex::new(ID_METRIC_PATTERN).expect("Invalid regex"));

        let captures = pattern.captures(raw_name)?;
        Some(ParsedMetricIdentity {
            base_name: captures[1].to_string(),
            entity_id: captures[2].to_string(),
            remainder: captures[3].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_embedded_id() {
        let parser = MetricIdentityParser::new();
        let parsed = parser
            .parse("org.example.StreamRule.58a1b2c3d4e5f60718293a4b.executionTime")
            .unwrap();
        assert_eq!(parsed.base_name, "org.example.StreamRule");
        assert_eq!(parsed.entity_id, "58a1b2c3d4e5f60718293a4b");
        assert_eq!(parsed.remainder, "executionTime");
    }

    #[test]
    fn test_parse_reconstructs_input() {
        let parser = MetricIdentityParser::new();
        let raw = "metrics.Stream.deadbeef01.throughput.1-minute";
        let parsed = parser.parse(raw).unwrap();
        assert_eq!(
            format!("{}.{}.{}", parsed.base_name, parsed.entity_id, parsed.remainder),
            raw
        );
    }

    #[test]
    fn test_first_hex_token_wins() {
        // Non-greedy prefix: the earliest qualifying token is the id,
        // everything after it lands in the remainder.
        let parser = MetricIdentityParser::new();
        let parsed = parser.parse("a.1234abcd.5678abcd.leaf").unwrap();
        assert_eq!(parsed.base_name, "a");
        assert_eq!(parsed.entity_id, "1234abcd");
        assert_eq!(parsed.remainder, "5678abcd.leaf");
    }

    #[test]
    fn test_dashed_uuid_style_id() {
        let parser = MetricIdentityParser::new();
        let parsed = parser
            .parse("inputs.5e2f1701-51fa-4b31-9a0a-c0d2c3a5e9d1.incomingMessages")
            .unwrap();
        assert_eq!(parsed.entity_id, "5e2f1701-51fa-4b31-9a0a-c0d2c3a5e9d1");
    }

    #[test]
    fn test_no_embedded_id() {
        let parser = MetricIdentityParser::new();
        assert_eq!(parser.parse("jvm.memory.heap.used"), None);
        assert_eq!(parser.parse("process.cpu.seconds"), None);
    }

    #[test]
    fn test_short_hex_token_is_not_an_id() {
        // Token shorter than 8 chars does not qualify
        let parser = MetricIdentityParser::new();
        assert_eq!(MetricIdentityParser::new().parse("a.abc123.leaf"), None);
        assert_eq!(parser.parse("cache.f00d.hits"), None);
    }

    #[test]
    fn test_uppercase_hex_is_not_an_id() {
        let parser = MetricIdentityParser::new();
        assert_eq!(parser.parse("a.DEADBEEF01.leaf"), None);
    }

    #[test]
    fn test_id_requires_surrounding_segments() {
        let parser = MetricIdentityParser::new();
        // No leading segment before the token
        assert_eq!(parser.parse("deadbeef01.leaf"), None);
        // No trailing segment after the token
        assert_eq!(parser.parse("metrics.deadbeef01"), None);
    }
}
