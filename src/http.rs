//! Thin delivery surface for the host document. Page layout and styling
//! live with the page's consumers; this only hands out the current region
//! contents and a liveness probe.

use axum::{extract::State, response::Html, routing::get, Json, Router};
use tokio::net::TcpListener;

use crate::render::Document;
use crate::types::FeedError;

pub fn router(document: Document) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .with_state(document)
}

pub async fn serve(listener: TcpListener, document: Document) -> Result<(), FeedError> {
    axum::serve(listener, router(document)).await?;
    Ok(())
}

async fn index(State(document): State<Document>) -> Html<String> {
    Html(document.render_page().await)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
