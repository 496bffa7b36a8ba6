use serde_json::Value;

use super::display_value;
use crate::types::FeedError;

/// Render the aggregate-statistics region: one `key: value` line per entry,
/// in payload order. A failed poll renders the failure message instead.
pub fn render_stats(result: &Result<Value, FeedError>) -> String {
    match result {
        Ok(Value::Object(fields)) => {
            let mut out = String::new();
            for (key, value) in fields {
                out.push_str(&format!(
                    "<p><strong>{key}:</strong> {}</p>\n",
                    display_value(value)
                ));
            }
            out
        }
        // Not the documented shape, but still displayable.
        Ok(other) => format!("<p>{other}</p>\n"),
        Err(err) => format!("<code>{err}</code>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_one_line_per_key_in_payload_order() {
        let result = Ok(json!({"totalTasks": 42, "errors": 0}));
        let out = render_stats(&result);

        let total = out.find("<strong>totalTasks:</strong> 42").expect("totalTasks line");
        let errors = out.find("<strong>errors:</strong> 0").expect("errors line");
        assert!(total < errors);
        assert_eq!(out.matches("<p>").count(), 2);
    }

    #[test]
    fn failure_renders_message_as_preformatted_text() {
        let result = Err(FeedError::Status(503));
        let out = render_stats(&result);
        assert_eq!(out, "<code>status code 503</code>");
    }

    #[test]
    fn rendering_twice_produces_identical_content() {
        let result = Ok(json!({"totalTasks": 42, "errors": 0}));
        assert_eq!(render_stats(&result), render_stats(&result));
    }

    #[test]
    fn string_values_render_without_quotes() {
        let result = Ok(json!({"lastUpdated": "2024-01-01T00:00:00Z"}));
        let out = render_stats(&result);
        assert!(out.contains("<strong>lastUpdated:</strong> 2024-01-01T00:00:00Z"));
        assert!(!out.contains('"'));
    }

    #[test]
    fn non_object_payload_renders_as_json_text() {
        let result = Ok(json!([1, 2, 3]));
        assert_eq!(render_stats(&result), "<p>[1,2,3]</p>\n");
    }
}
