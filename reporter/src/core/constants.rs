// =============================================================================
// Metric Identity
// =============================================================================

/// Pattern splitting a raw dotted metric name into (base name, entity id,
/// remainder). The entity id is the first hex-like token of length >= 8
/// after the first dot-delimited segment.
pub const ID_METRIC_PATTERN: &str = r"^(.*?)\.([0-9a-f-]{8,})\.(.*)$";

/// Separator between base name and entity id in assembled sample names
pub const NAME_ID_JOINER: &str = ":";

// =============================================================================
// Enrichment Categories
// =============================================================================

/// Substring marking a raw name as belonging to the stream-rule category
pub const STREAM_RULE_MARKER: &str = ".StreamRule.";

/// Substring marking a raw name as belonging to the stream category
pub const STREAM_MARKER: &str = ".Stream.";

// =============================================================================
// Label Names
// =============================================================================

/// Entity id label
pub const LABEL_ID: &str = "id";

/// Stream rule type label
pub const LABEL_RULE_TYPE: &str = "rule-type";

/// Owning stream id label
pub const LABEL_STREAM_ID: &str = "stream-id";

/// Stream title label
pub const LABEL_STREAM_TITLE: &str = "stream-title";

/// Index set id label
pub const LABEL_INDEX_SET_ID: &str = "index-set-id";

/// Rule type value emitted when the rule cannot be found
pub const RULE_TYPE_UNKNOWN: &str = "unknown";

// =============================================================================
// Sender Defaults
// =============================================================================

/// Default connect timeout in milliseconds (HTTP family)
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Default read timeout in milliseconds (HTTP family)
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10_000;

/// Default socket timeout in milliseconds (TCP/UDP)
pub const DEFAULT_SOCKET_TIMEOUT_MS: u64 = 10_000;
