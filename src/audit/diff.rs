//! Diff generation for audit logging
//!
//! Turns two JSON snapshots of an entity into a one-line summary of the
//! top-level fields that changed.

use serde_json::Value;

/// Fields that change on every write and would drown out real changes
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Describe the changes between two JSON values, or `None` if nothing changed
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            changes
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let truncated: String = s.chars().take(47).collect();
            format!("\"{}...\"", truncated)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_field_change() {
        let before = json!({"name": "Checking", "current_balance": 10000});
        let after = json!({"name": "Checking", "current_balance": 7000});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "current_balance: 10000 -> 7000");
    }

    #[test]
    fn test_updated_at_is_ignored() {
        let before = json!({"status": "active", "updated_at": "2025-01-01T00:00:00Z"});
        let after = json!({"status": "active", "updated_at": "2025-01-02T00:00:00Z"});

        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"name": "Test", "old": "value"});
        let after = json!({"name": "Test", "budget_limit": 100});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("old: \"value\" -> (removed)"));
        assert!(diff.contains("budget_limit: (added) -> 100"));
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(
            generate_diff(&json!(true), &json!(false)).unwrap(),
            "true -> false"
        );
        assert!(generate_diff(&json!(null), &json!(null)).is_none());
    }

    #[test]
    fn test_long_string_truncation() {
        let before = json!({"description": "a".repeat(100)});
        let after = json!({"description": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\""));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(format_value(&json!({"a": 1, "b": 2})), "{2 fields}");
    }
}
