use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::FeedError;

/// Thin GET-and-decode wrapper around a shared `reqwest` client.
///
/// Every failure mode is converted into a `FeedError` at this boundary:
/// transport problems, non-success statuses and undecodable bodies. No
/// retries, no caching; each poll issues exactly one request.
#[derive(Clone)]
pub struct FeedClient {
    http: Client,
}

impl FeedClient {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    pub async fn get_json<T>(&self, url: &str) -> Result<T, FeedError>
    where
        T: DeserializeOwned,
    {
        self.get_json_with_query(url, &()).await
    }

    pub async fn get_json_with_query<T, Q>(&self, url: &str, query: &Q) -> Result<T, FeedError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        // Decoded from text so that an unparseable body surfaces as a decode
        // failure rather than a transport one.
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
