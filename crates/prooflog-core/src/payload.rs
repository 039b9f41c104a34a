//! Sub-parser for the `key: value, key: value` payload embedded in a
//! `TraceCheckpoint { ... }` line.

/// Split a payload into trimmed `(key, value)` pairs, preserving order.
///
/// Pieces that do not split into exactly one key and one value are skipped.
pub fn parse_pairs(payload: &str) -> Vec<(&str, &str)> {
    payload
        .split(',')
        .filter_map(|pair| {
            let mut parts = pair.split(':');
            let key = parts.next()?;
            let value = parts.next()?;
            if parts.next().is_some() {
                return None;
            }
            Some((key.trim(), value.trim()))
        })
        .collect()
}
