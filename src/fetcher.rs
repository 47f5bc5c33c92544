use crate::types::{PipelineError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Fetches the raw feed document over HTTP. Any transport failure or
/// non-success status is fatal for the run.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(user_agent: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_seconds))
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }

    pub async fn fetch_feed(&self, url: &str) -> Result<String> {
        Url::parse(url)?;

        debug!("Fetching feed: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PipelineError::FeedFetch(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::FeedFetch(format!(
                "HTTP {} from {}",
                status, url
            )));
        }

        let content = response
            .text()
            .await
            .map_err(|e| PipelineError::FeedFetch(format!("reading body from {} failed: {}", url, e)))?;

        info!("Fetched feed: {} ({} bytes)", url, content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_invalid_url() {
        let fetcher = Fetcher::new("test-agent", 5).unwrap();
        let result = fetcher.fetch_feed("not a url").await;
        assert!(matches!(result, Err(PipelineError::InvalidUrl(_))));
    }
}
