use thiserror::Error;

/// Errors produced while fetching and decoding feed payloads, plus the
/// config/bootstrap failures surfaced during startup.
///
/// Per-poll failures never propagate past the renderer: the poller converts
/// them into region content and keeps ticking.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("status code {0}")]
    Status(u16),

    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
