use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::feed::{AnomalyRecord, EventFeed, EventQuery, EventSampler, FeedClient};
use crate::render::{
    render_anomalies, render_event, render_stats, RegionSink, ANOMALIES_REGION, STATS_REGION,
};

/// Drives the poll/render loop for all four feeds.
///
/// The first cycle runs immediately on startup; afterwards a cycle starts
/// every poll interval. Cycles are spawned rather than awaited, so a cycle
/// that outlives the period overlaps the next one; the request timeout
/// bounds how long any single fetch can linger. The four feed operations
/// inside one cycle run concurrently and never wait on each other.
pub struct Poller {
    config: Config,
    client: FeedClient,
    sampler: EventSampler,
    sink: Arc<dyn RegionSink>,
}

impl Poller {
    pub fn new(config: Config, client: FeedClient, sink: Arc<dyn RegionSink>) -> Self {
        Self {
            config,
            client,
            sampler: EventSampler,
            sink,
        }
    }

    pub async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.config.poll_interval());
        loop {
            ticker.tick().await;
            let poller = Arc::clone(&self);
            tokio::spawn(async move {
                poller.run_cycle().await;
            });
        }
    }

    /// One full fetch-and-render pass over all four feeds. Each feed's
    /// outcome lands in its own region regardless of what the others do.
    pub async fn run_cycle(&self) {
        tokio::join!(
            self.poll_stats(),
            self.poll_event(EventFeed::Tasks),
            self.poll_event(EventFeed::CompletedTasks),
            self.poll_anomalies(),
        );
    }

    async fn poll_stats(&self) {
        let result = self.client.get_json::<Value>(&self.config.stats_url).await;
        match &result {
            Ok(payload) => debug!(feed = "stats", %payload, "Received stats"),
            Err(err) => warn!(feed = "stats", error = ?err, "Stats fetch failed"),
        }
        self.sink.replace(STATS_REGION, render_stats(&result)).await;
    }

    async fn poll_event(&self, feed: EventFeed) {
        let index = self.sampler.next_index();
        let result = self
            .client
            .get_json_with_query::<Value, _>(self.config.event_url(feed), &EventQuery { index })
            .await;
        match &result {
            Ok(payload) => debug!(feed = feed.label(), index, %payload, "Received event"),
            Err(err) => warn!(feed = feed.label(), index, error = ?err, "Event fetch failed"),
        }
        self.sink
            .replace(feed.region_id(), render_event(&result, index))
            .await;
    }

    async fn poll_anomalies(&self) {
        let result = self
            .client
            .get_json::<Vec<AnomalyRecord>>(&self.config.anomalies_url)
            .await;
        match &result {
            Ok(records) => debug!(feed = "anomalies", count = records.len(), "Received anomalies"),
            Err(err) => warn!(feed = "anomalies", error = ?err, "Anomaly fetch failed"),
        }
        self.sink
            .replace(ANOMALIES_REGION, render_anomalies(&result))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Document;
    use crate::testutil::StubServer;
    use std::time::Duration;

    fn poller_for(stub: &StubServer, document: &Document) -> Poller {
        let config = Config {
            stats_url: stub.url("/stats"),
            tasks_url: stub.url("/event1"),
            completed_tasks_url: stub.url("/event2"),
            anomalies_url: stub.url("/anomalies"),
            ..Config::default()
        };
        let client = FeedClient::new(Duration::from_secs(2)).expect("build client");
        Poller::new(config, client, Arc::new(document.clone()))
    }

    #[tokio::test]
    async fn cycle_renders_each_feed_into_its_own_region() {
        let stub = StubServer::start(|target| {
            if target.starts_with("/stats") {
                (200, r#"{"totalTasks": 42, "errors": 0}"#.to_string())
            } else if target.starts_with("/event1") {
                (200, r#"{"task_id": "t-1"}"#.to_string())
            } else if target.starts_with("/event2") {
                (500, r#"{"message": "boom"}"#.to_string())
            } else {
                (404, r#"{"message": "missing"}"#.to_string())
            }
        })
        .await;

        let document = Document::new();
        poller_for(&stub, &document).run_cycle().await;

        let stats = document.content(STATS_REGION).await.expect("stats region");
        assert!(stats.contains("<strong>totalTasks:</strong> 42"));
        assert!(stats.contains("<strong>errors:</strong> 0"));

        let tasks = document
            .content(EventFeed::Tasks.region_id())
            .await
            .expect("tasks region");
        assert!(tasks.contains("<strong>task_id:</strong> t-1"));

        // A failing feed shows its status in its own region only.
        let completed = document
            .content(EventFeed::CompletedTasks.region_id())
            .await
            .expect("completed region");
        assert!(completed.starts_with("<h5>Event "));
        assert!(completed.contains("500"));

        let anomalies = document
            .content(ANOMALIES_REGION)
            .await
            .expect("anomalies region");
        assert_eq!(anomalies, "<code>status code 404</code>");
    }

    #[tokio::test]
    async fn event_header_matches_the_requested_index() {
        let stub = StubServer::start(|_| (500, r#"{"message": "down"}"#.to_string())).await;
        let document = Document::new();
        let poller = poller_for(&stub, &document);

        poller.poll_event(EventFeed::Tasks).await;

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        let (_, sent_index) = requests[0]
            .split_once("index=")
            .expect("index query parameter");

        let region = document
            .content(EventFeed::Tasks.region_id())
            .await
            .expect("tasks region");
        assert!(region.starts_with(&format!("<h5>Event {sent_index}</h5>")));
    }

    #[tokio::test]
    async fn repeated_cycles_replace_rather_than_accumulate() {
        let stub = StubServer::start(|target| {
            if target.starts_with("/anomalies") {
                (
                    200,
                    r#"[{"eventId":"a1","description":"spike","timestamp":1700000000000}]"#
                        .to_string(),
                )
            } else {
                (200, r#"{"totalTasks": 42}"#.to_string())
            }
        })
        .await;

        let document = Document::new();
        let poller = poller_for(&stub, &document);

        poller.run_cycle().await;
        let stats_first = document.content(STATS_REGION).await.expect("stats region");
        let anomalies_first = document
            .content(ANOMALIES_REGION)
            .await
            .expect("anomalies region");

        poller.run_cycle().await;
        assert_eq!(
            document.content(STATS_REGION).await.as_deref(),
            Some(stats_first.as_str())
        );
        assert_eq!(
            document.content(ANOMALIES_REGION).await.as_deref(),
            Some(anomalies_first.as_str())
        );
        assert_eq!(anomalies_first.matches("class=\"anomaly\"").count(), 1);
    }
}
