use crate::config::SourceConfig;
use crate::error::{AppError, Result};
use crate::model::{LatestResponse, StationReading};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct Fetcher {
    client: Client,
    base_url: String,
    country: String,
    limit: u32,
}

impl Fetcher {
    pub fn new(source: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("openaq-ingest/0.1.0")
            .timeout(Duration::from_secs(source.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: source.base_url.trim_end_matches('/').to_string(),
            country: source.country.clone(),
            limit: source.limit,
        })
    }

    /// Fetches the latest station readings for the configured country.
    pub async fn fetch_latest(&self) -> Result<Vec<StationReading>> {
        retry_with_backoff(3, || async { self.fetch_latest_impl().await }).await
    }

    /// Fetch with the empty-on-failure boundary the pipeline consumes:
    /// a network error, non-success status, or unparseable body all
    /// collapse to "zero raw readings". The suppression is deliberate —
    /// downstream the fallback dataset substitutes transparently.
    pub async fn fetch_latest_or_empty(&self) -> Vec<StationReading> {
        match self.fetch_latest().await {
            Ok(readings) => readings,
            Err(e) => {
                warn!("Upstream fetch failed, continuing with zero readings: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_latest_impl(&self) -> Result<Vec<StationReading>> {
        debug!(
            "Fetching latest readings from {} (country={}, limit={})",
            self.base_url, self.country, self.limit
        );

        let limit = self.limit.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("country", self.country.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Http(response.error_for_status().unwrap_err()));
        }

        let body = response.text().await?;
        let parsed: LatestResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::Parse(format!("Malformed latest response: {}", e)))?;

        info!("Fetched {} station readings", parsed.results.len());
        Ok(parsed.results)
    }
}

/// Retry a future with exponential backoff
async fn retry_with_backoff<F, Fut, T>(max_retries: u32, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut retries = 0;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                retries += 1;

                if retries > max_retries {
                    return Err(e);
                }

                // Check if error is transient (retryable)
                let should_retry = match &e {
                    AppError::Http(reqwest_err) => {
                        // Retry on connection errors, timeouts, server errors (5xx)
                        reqwest_err.is_timeout()
                            || reqwest_err.is_connect()
                            || reqwest_err
                                .status()
                                .map(|s| s.is_server_error())
                                .unwrap_or(false)
                    }
                    AppError::Io(_) => true, // Retry IO errors
                    _ => false,              // Don't retry parse errors, config errors, etc.
                };

                if !should_retry {
                    return Err(e);
                }

                let delay = Duration::from_secs(2u64.pow(retries.saturating_sub(1)));
                warn!(
                    "Request failed (attempt {}/{}): {}. Retrying in {:?}...",
                    retries, max_retries, e, delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
