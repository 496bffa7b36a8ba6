use chrono::{DateTime, Local};
use serde_json::Value;

use crate::feed::AnomalyRecord;
use crate::types::FeedError;

/// Render the anomaly region: one block per record, in received order. A
/// failed poll renders the failure message instead.
pub fn render_anomalies(result: &Result<Vec<AnomalyRecord>, FeedError>) -> String {
    match result {
        Ok(records) => {
            let mut out = String::new();
            for record in records {
                out.push_str(&format!(
                    "<div class=\"anomaly\">\n<h5>Anomaly ID: {}</h5>\n<p><strong>Description:</strong> {}</p>\n<p><strong>Date/Time Detected:</strong> {}</p>\n</div>\n",
                    record.event_id,
                    record.description,
                    format_detected_at(&record.timestamp)
                ));
            }
            out
        }
        Err(err) => format!("<code>{err}</code>"),
    }
}

/// Local human-readable form of an anomaly timestamp. Accepts epoch
/// milliseconds or an RFC 3339 string; anything unparseable falls back to
/// its raw text form.
fn format_detected_at(timestamp: &Value) -> String {
    if let Some(millis) = timestamp.as_i64() {
        if let Some(parsed) = DateTime::from_timestamp_millis(millis) {
            return parsed
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();
        }
    }
    if let Some(text) = timestamp.as_str() {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return parsed
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();
        }
        return text.to_string();
    }
    timestamp.to_string()
}
