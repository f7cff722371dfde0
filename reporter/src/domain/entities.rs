//! Stream and stream-rule entities
//!
//! Read-only domain objects looked up during sample enrichment. Entities may
//! be deleted concurrently by other subsystems, so every lookup can come back
//! empty; absence is expected and non-fatal.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// Rule Type Enum
// =============================================================================

/// Matcher kind of a stream rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Exact,
    Regex,
    Greater,
    Smaller,
    Presence,
    Contains,
    AlwaysMatch,
    MatchInput,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "EXACT",
            Self::Regex => "REGEX",
            Self::Greater => "GREATER",
            Self::Smaller => "SMALLER",
            Self::Presence => "PRESENCE",
            Self::Contains => "CONTAINS",
            Self::AlwaysMatch => "ALWAYS_MATCH",
            Self::MatchInput => "MATCH_INPUT",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Entities
// =============================================================================

/// A stream matching rule, owned by a stream
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamRule {
    pub id: String,
    pub rule_type: RuleType,
    /// Id of the owning stream
    pub stream_id: String,
}

/// A message stream
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Stream {
    pub id: String,
    pub title: String,
    pub index_set_id: String,
}

// =============================================================================
// Lookup Traits
// =============================================================================

/// Lookup capability for stream rules
///
/// Implementations read from the backing metadata store. A `None` return
/// means the rule does not (or no longer does) exist; callers degrade
/// gracefully instead of failing the sample.
#[async_trait]
pub trait StreamRuleStore: Send + Sync {
    async fn load(&self, id: &str) -> Option<StreamRule>;
}

/// Lookup capability for streams
#[async_trait]
pub trait StreamStore: Send + Sync {
    async fn load(&self, id: &str) -> Option<Stream>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_type_display() {
        assert_eq!(RuleType::Exact.to_string(), "EXACT");
        assert_eq!(RuleType::AlwaysMatch.to_string(), "ALWAYS_MATCH");
    }

    #[test]
    fn test_rule_type_serde_round_trip() {
        let json = serde_json::to_string(&RuleType::MatchInput).unwrap();
        assert_eq!(json, r#""match_input""#);
        let back: RuleType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RuleType::MatchInput);
    }
}
