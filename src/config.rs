use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, warn};

use crate::feed::EventFeed;
use crate::types::FeedError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_stats_url")]
    pub stats_url: String,

    #[serde(default = "default_tasks_url")]
    pub tasks_url: String,

    #[serde(default = "default_completed_tasks_url")]
    pub completed_tasks_url: String,

    #[serde(default = "default_anomalies_url")]
    pub anomalies_url: String,

    /// Period between poll cycles, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stats_url: default_stats_url(),
            tasks_url: default_tasks_url(),
            completed_tasks_url: default_completed_tasks_url(),
            anomalies_url: default_anomalies_url(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_stats_url() -> String {
    "http://localhost:8100/stats".to_string()
}

fn default_tasks_url() -> String {
    "http://localhost:8110/event1".to_string()
}

fn default_completed_tasks_url() -> String {
    "http://localhost:8110/event2".to_string()
}

fn default_anomalies_url() -> String {
    "http://localhost:8120/anomalies".to_string()
}

fn default_poll_interval_ms() -> u64 {
    5000
}

fn default_request_timeout_secs() -> u64 {
    8
}

fn default_listen_addr() -> String {
    "127.0.0.1:8200".to_string()
}

impl Config {
    /// Load configuration from config.json in the working directory
    /// (overridable via `FEEDBOARD_CONFIG`).
    /// Falls back to defaults if the file doesn't exist or can't be parsed.
    pub async fn load() -> Self {
        match Self::try_load().await {
            Ok(config) => {
                info!(
                    stats = %config.stats_url,
                    anomalies = %config.anomalies_url,
                    interval_ms = config.poll_interval_ms,
                    "Loaded configuration"
                );
                config
            }
            Err(err) => {
                warn!(error = ?err, "Failed to load config.json, using defaults");
                Self::default()
            }
        }
    }

    async fn try_load() -> Result<Self, FeedError> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            warn!(path = %config_path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .await
            .map_err(|err| FeedError::Config(format!("Failed to read config file: {err}")))?;

        serde_json::from_str(&contents)
            .map_err(|err| FeedError::Config(format!("Failed to parse config.json: {err}")))
    }

    fn config_path() -> PathBuf {
        env::var("FEEDBOARD_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.json"))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base endpoint for one of the two event feeds.
    pub fn event_url(&self, feed: EventFeed) -> &str {
        match feed {
            EventFeed::Tasks => &self.tasks_url,
            EventFeed::CompletedTasks => &self.completed_tasks_url,
        }
    }
}
