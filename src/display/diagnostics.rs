//! Depth-limited JSON summaries for verbose diagnostics.

use crate::utils::text::shorten_if_longer;
use serde_json::Value;

/// Nesting depth shown for live version payloads in verbose mode
pub const DEFAULT_MAX_DEPTH: usize = 3;

const LONG_STRING_THRESHOLD: usize = 100;
const LONG_STRING_KEEP: usize = 20;

/// Keys whose values are always shown in full, whatever their depth
const ALWAYS_EXPANDED: [&str; 5] = [
    "tag",
    "parameter",
    "firingTriggerId",
    "monitoringMetadata",
    "consentSettings",
];

/// Reduce `value` to at most `max_depth` levels of nesting.
///
/// Deeper objects and arrays become placeholder strings such as
/// `"{...4 keys}"` or `"[...2 items]"`. Strings longer than 100 characters
/// are cut to their first 20 characters plus `...`.
pub fn summarize(value: &Value, max_depth: usize) -> Value {
    summarize_at(value, 0, Some(max_depth))
}

/// Pretty-printed form of [`summarize`]
pub fn describe(value: &Value, max_depth: usize) -> String {
    let summary = summarize(value, max_depth);
    serde_json::to_string_pretty(&summary).unwrap_or_else(|_| summary.to_string())
}

fn summarize_at(value: &Value, depth: usize, limit: Option<usize>) -> Value {
    let exhausted = limit.is_some_and(|max| depth >= max);

    match value {
        Value::String(s) => Value::String(shorten_if_longer(
            s,
            LONG_STRING_THRESHOLD,
            LONG_STRING_KEEP,
        )),
        Value::Object(map) if exhausted => Value::String(format!("{{...{} keys}}", map.len())),
        Value::Array(items) if exhausted => Value::String(format!("[...{} items]", items.len())),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| {
                    let child_limit = if ALWAYS_EXPANDED.contains(&key.as_str()) {
                        None
                    } else {
                        limit
                    };
                    (key.clone(), summarize_at(child, depth + 1, child_limit))
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| summarize_at(item, depth + 1, limit))
                .collect(),
        ),
        other => other.clone(),
    }
}
