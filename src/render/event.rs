use serde_json::Value;

use super::display_value;
use crate::types::FeedError;

/// Render one sampled event: a header naming the requested index, then one
/// `key: value` line per payload field. The header is rendered on failure
/// too, so the viewer always sees which index was asked for.
pub fn render_event(result: &Result<Value, FeedError>, index: u8) -> String {
    let mut out = format!("<h5>Event {index}</h5>\n");
    match result {
        Ok(payload) => {
            if let Some(fields) = payload.as_object() {
                for (key, value) in fields {
                    // The sampled index is already in the header.
                    if key == "index" {
                        continue;
                    }
                    out.push_str(&format!(
                        "<p><strong>{key}:</strong> {}</p>\n",
                        display_value(value)
                    ));
                }
            } else if !payload.is_null() {
                out.push_str(&format!("<p>{payload}</p>\n"));
            }
        }
        Err(err) => out.push_str(&format!("<code>{err}</code>")),
    }
    out
}
