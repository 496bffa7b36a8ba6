//! Per-feed renderers and the host-document region store.
//!
//! Renderers are pure: each produces the full replacement content for its
//! region from one poll's outcome, so a region never mixes stale data with
//! an error message. Rendered values are inserted without HTML escaping,
//! matching the display contract of the upstream dashboard; payload content
//! is trusted. Known risk, tracked upstream, deliberately not corrected
//! here.

mod anomalies;
mod event;
mod stats;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::feed::EventFeed;

pub use anomalies::render_anomalies;
pub use event::render_event;
pub use stats::render_stats;

pub const STATS_REGION: &str = "stats";
pub const ANOMALIES_REGION: &str = "anomalies";

const PAGE_SECTIONS: [(&str, &str); 4] = [
    (STATS_REGION, "Processing Statistics"),
    (
        EventFeed::Tasks.region_id(),
        EventFeed::Tasks.section_title(),
    ),
    (
        EventFeed::CompletedTasks.region_id(),
        EventFeed::CompletedTasks.section_title(),
    ),
    (ANOMALIES_REGION, "Detected Anomalies"),
];

const EMPTY_REGION: &str = "<p>No data yet</p>\n";

/// Write access to one named region of the host document.
///
/// `replace` swaps the region's entire content; there is no append. The
/// poller holds the sink as a trait object so tests can substitute their
/// own recording implementation.
#[async_trait]
pub trait RegionSink: Send + Sync {
    async fn replace(&self, region: &str, content: String);
}

/// In-process model of the host page: one content fragment per region.
///
/// Each region is written exclusively by its own feed's poll, so the lock
/// is only ever contended with page reads.
#[derive(Clone, Default)]
pub struct Document {
    regions: Arc<RwLock<HashMap<String, String>>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn content(&self, region: &str) -> Option<String> {
        self.regions.read().await.get(region).cloned()
    }

    /// Assemble the full host page from the current region contents.
    /// Regions that have not been rendered yet show a placeholder.
    pub async fn render_page(&self) -> String {
        let regions = self.regions.read().await;
        let mut page = String::from(
            "<!DOCTYPE html>\n<html>\n<head><title>Processing Dashboard</title></head>\n<body>\n<h1>Processing Dashboard</h1>\n",
        );
        for (region, title) in PAGE_SECTIONS {
            let content = regions.get(region).map(String::as_str).unwrap_or(EMPTY_REGION);
            page.push_str(&format!(
                "<section id=\"{region}\">\n<h3>{title}</h3>\n{content}</section>\n"
            ));
        }
        page.push_str("</body>\n</html>\n");
        page
    }
}

#[async_trait]
impl RegionSink for Document {
    async fn replace(&self, region: &str, content: String) {
        self.regions.write().await.insert(region.to_string(), content);
    }
}

/// String form used for rendered values: strings bare, everything else as
/// its JSON text (so nested structures stay readable).
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replace_overwrites_previous_content() {
        let document = Document::new();
        document.replace(STATS_REGION, "<p>first</p>".to_string()).await;
        document.replace(STATS_REGION, "<p>second</p>".to_string()).await;
        assert_eq!(
            document.content(STATS_REGION).await.as_deref(),
            Some("<p>second</p>")
        );
    }

    #[tokio::test]
    async fn regions_do_not_affect_each_other() {
        let document = Document::new();
        document.replace(STATS_REGION, "<p>stats</p>".to_string()).await;
        document
            .replace(ANOMALIES_REGION, "<code>down</code>".to_string())
            .await;
        assert_eq!(
            document.content(STATS_REGION).await.as_deref(),
            Some("<p>stats</p>")
        );
        assert_eq!(
            document.content(ANOMALIES_REGION).await.as_deref(),
            Some("<code>down</code>")
        );
    }

    #[tokio::test]
    async fn page_shows_placeholder_until_first_render() {
        let document = Document::new();
        let page = document.render_page().await;
        for (region, title) in PAGE_SECTIONS {
            assert!(page.contains(&format!("id=\"{region}\"")));
            assert!(page.contains(title));
        }
        assert!(page.contains("No data yet"));
    }

    #[tokio::test]
    async fn page_embeds_rendered_region_content() {
        let document = Document::new();
        document
            .replace(STATS_REGION, "<p><strong>totalTasks:</strong> 42</p>\n".to_string())
            .await;
        let page = document.render_page().await;
        assert!(page.contains("<strong>totalTasks:</strong> 42"));
    }

    #[test]
    fn display_value_renders_strings_bare_and_structures_as_json() {
        assert_eq!(display_value(&serde_json::json!("plain")), "plain");
        assert_eq!(display_value(&serde_json::json!(42)), "42");
        assert_eq!(
            display_value(&serde_json::json!({"nested": true})),
            r#"{"nested":true}"#
        );
    }
}
