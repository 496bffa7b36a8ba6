use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use feedboard::config::Config;
use feedboard::feed::FeedClient;
use feedboard::http;
use feedboard::poller::Poller;
use feedboard::render::Document;
use feedboard::types::FeedError;

#[tokio::main]
async fn main() -> Result<(), FeedError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().await;
    let listen_addr = config.listen_addr.clone();

    let document = Document::new();
    let client = FeedClient::new(config.request_timeout())?;
    let poller = Arc::new(Poller::new(config, client, Arc::new(document.clone())));
    tokio::spawn(poller.run());

    let listener = TcpListener::bind(&listen_addr).await?;
    info!(addr = %listen_addr, "Serving dashboard");
    http::serve(listener, document).await
}
