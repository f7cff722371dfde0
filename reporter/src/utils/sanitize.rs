//! Metric name sanitization for the pull exposition format
//!
//! Reproduces the exposition format's own naming rule: a metric name must
//! match `[a-zA-Z_:][a-zA-Z0-9_:]*`. Every illegal character is replaced
//! with `_`. Label values are never sanitized, only names.

/// Sanitize a metric name for exposition.
///
/// The first character must be a letter, `_`, or `:`; subsequent characters
/// may additionally be digits. Anything else becomes `_`.
pub fn sanitize_metric_name(name: &str) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| {
            let legal = c.is_ascii_alphabetic() || c == '_' || c == ':' || (i > 0 && c.is_ascii_digit());
            if legal { c } else { '_' }
        })
        .collect()
}
