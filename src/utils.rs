//! Utility helpers shared across the WASM frontend.

use serde_json::Value;
use unicode_segmentation::UnicodeSegmentation;

use crate::constants::SHORT_ID_LEN;

/// Shorten a trace / run id for display: the first eight graphemes followed
/// by an ellipsis.  Ids that already fit are returned unchanged.
pub fn short_id(id: &str) -> String {
    let mut graphemes = id.graphemes(true);
    let head: String = graphemes.by_ref().take(SHORT_ID_LEN).collect();
    if graphemes.next().is_some() {
        format!("{}\u{2026}", head)
    } else {
        head
    }
}

/// Two-space indented JSON, or the compact form if pretty printing fails.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Number of entries in an object or array; zero for anything else.
pub fn count_keys(value: Option<&Value>) -> usize {
    match value {
        Some(Value::Object(map)) => map.len(),
        Some(Value::Array(items)) => items.len(),
        _ => 0,
    }
}

/// Format a 0..1 confidence with two decimals.
pub fn format_confidence(confidence: Option<f64>) -> String {
    confidence.map(|c| format!("{:.2}", c)).unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn short_id_truncates_on_graphemes() {
        assert_eq!(short_id("0123456789abcdef"), "01234567\u{2026}");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("12345678"), "12345678");
        // Flag emoji are two code points but one grapheme.
        assert_eq!(short_id("🇫🇷🇫🇷🇫🇷🇫🇷🇫🇷🇫🇷🇫🇷🇫🇷🇫🇷"), "🇫🇷🇫🇷🇫🇷🇫🇷🇫🇷🇫🇷🇫🇷🇫🇷\u{2026}");
    }

    #[test]
    fn counts_objects_and_arrays() {
        assert_eq!(count_keys(Some(&json!({"a": 1, "b": 2}))), 2);
        assert_eq!(count_keys(Some(&json!([1, 2, 3]))), 3);
        assert_eq!(count_keys(Some(&json!("x"))), 0);
        assert_eq!(count_keys(None), 0);
    }

    #[test]
    fn confidence_has_two_decimals() {
        assert_eq!(format_confidence(Some(0.923)), "0.92");
        assert_eq!(format_confidence(None), "n/a");
    }

    #[test]
    fn pretty_json_indents() {
        assert_eq!(pretty_json(&json!({"a": 1})), "{\n  \"a\": 1\n}");
    }
}
