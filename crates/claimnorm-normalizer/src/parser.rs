//! Pull a JSON object out of raw model output

use crate::error::ParseError;
use serde_json::{Map, Value};

/// Parse a completion into a JSON object
///
/// Models wrap their JSON in prose, markdown fences, or both, and stop
/// sequences can cut the object short. The first balanced `{...}` span is
/// taken; if the first object never closes, the span up to the last `}` is
/// tried instead. The span is then parsed strictly.
pub fn parse_completion(raw: &str) -> Result<Map<String, Value>, ParseError> {
    let span = extract_object_span(raw)?;

    match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ParseError::InvalidJson {
            message: format!("expected a JSON object, found {}", other),
            raw: raw.to_string(),
        }),
        Err(e) => Err(ParseError::InvalidJson {
            message: e.to_string(),
            raw: raw.to_string(),
        }),
    }
}

/// Locate the candidate object span inside `raw`
fn extract_object_span(raw: &str) -> Result<&str, ParseError> {
    let start = raw.find('{').ok_or_else(|| ParseError::NoJsonObject {
        raw: raw.to_string(),
    })?;
    let tail = &raw[start..];

    if let Some(len) = balanced_len(tail) {
        return Ok(&tail[..len]);
    }

    match tail.rfind('}') {
        Some(end) => Ok(&tail[..=end]),
        None => Err(ParseError::Unbalanced {
            raw: raw.to_string(),
        }),
    }
}

/// Byte length of the balanced object at the start of `s`
///
/// `s` must start with `{`. Braces inside string literals are not counted.
fn balanced_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, c) in s.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx + c.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_object() {
        let map = parse_completion(r#"{"loss_type": "Fire", "confidence": 0.5}"#).unwrap();
        assert_eq!(map["loss_type"], "Fire");
        assert_eq!(map["confidence"], 0.5);
    }

    #[test]
    fn test_parse_fenced_object_with_prose() {
        let raw = "Here is the JSON: ```json {\"loss_type\":\"Fire\",\"severity\":\"High\"} ```";
        let map = parse_completion(raw).unwrap();
        assert_eq!(map["loss_type"], "Fire");
        assert_eq!(map["severity"], "High");
    }

    #[test]
    fn test_parse_multiline_fence() {
        let raw = "```json\n{\n  \"asset\": \"Laptop\"\n}\n```\nLet me know if you need more.";
        let map = parse_completion(raw).unwrap();
        assert_eq!(map["asset"], "Laptop");
    }

    #[test]
    fn test_no_json_object() {
        let err = parse_completion("I cannot process this request.").unwrap_err();
        assert!(matches!(err, ParseError::NoJsonObject { .. }));
        assert_eq!(err.raw(), "I cannot process this request.");
    }

    #[test]
    fn test_braces_inside_strings_do_not_count() {
        let raw = r#"{"explanation": "the {left} brace } and { right", "asset": "Door"} trailing }"#;
        let map = parse_completion(raw).unwrap();
        assert_eq!(map["explanation"], "the {left} brace } and { right");
        assert_eq!(map["asset"], "Door");
    }

    #[test]
    fn test_escaped_quotes_inside_strings() {
        let raw = r#"{"explanation": "he said \"fire {here}\"", "asset": "Shed"}"#;
        let map = parse_completion(raw).unwrap();
        assert_eq!(map["asset"], "Shed");
    }

    #[test]
    fn test_first_of_several_objects_wins() {
        let raw = r#"{"loss_type": "Theft"} and also {"loss_type": "Fire"}"#;
        let map = parse_completion(raw).unwrap();
        assert_eq!(map["loss_type"], "Theft");
    }

    #[test]
    fn test_nested_objects_balance() {
        let raw = r#"Result: {"location": {"city": "Austin"}, "asset": "Roof"} done"#;
        let map = parse_completion(raw).unwrap();
        assert_eq!(map["asset"], "Roof");
        assert_eq!(map["location"]["city"], "Austin");
    }

    #[test]
    fn test_truncated_object_without_close() {
        let raw = r#"{"loss_type": "Fire", "severity": "Hi"#;
        let err = parse_completion(raw).unwrap_err();
        assert!(matches!(err, ParseError::Unbalanced { .. }));
    }

    #[test]
    fn test_truncated_outer_falls_back_to_last_brace() {
        // Outer object never closes; the last '}' closes the inner one
        let raw = r#"{"a": {"b": 1}"#;
        let err = parse_completion(raw).unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson { .. }));
    }

    #[test]
    fn test_trailing_comma_is_rejected() {
        let raw = r#"{"loss_type": "Fire",}"#;
        let err = parse_completion(raw).unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson { .. }));
        assert_eq!(err.raw(), raw);
    }

    #[test]
    fn test_unicode_before_and_inside_object() {
        let raw = "Résultat → {\"location\": \"Zürich\", \"asset\": \"Café\"}";
        let map = parse_completion(raw).unwrap();
        assert_eq!(map["location"], "Zürich");
    }

    #[test]
    fn test_balanced_len() {
        assert_eq!(balanced_len("{}"), Some(2));
        assert_eq!(balanced_len("{\"a\":\"}\"} x"), Some(9));
        assert_eq!(balanced_len("{{}"), None);
    }
}
