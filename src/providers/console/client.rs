use async_trait::async_trait;
use log::{info, warn};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::auth::credentials::{CredentialManager, TOKEN_KEY};
use crate::config::Config;
use crate::error::Error;
use crate::providers::console::error::ConsoleDnsError;
use crate::providers::console::types::*;

/// Zone operations offered by the console-dns API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ZoneClient: Send + Sync {
    async fn list_zone(&self, zone: &str) -> Result<Zone, ConsoleDnsError>;

    async fn create_record(
        &self,
        zone: &str,
        name: &str,
        record: &ProviderRecord,
    ) -> Result<(), ConsoleDnsError>;

    async fn update_record(
        &self,
        zone: &str,
        name: &str,
        old: &ProviderRecord,
        new: &ProviderRecord,
    ) -> Result<(), ConsoleDnsError>;

    async fn delete_record(
        &self,
        zone: &str,
        name: &str,
        record: &ProviderRecord,
    ) -> Result<(), ConsoleDnsError>;
}

pub struct ConsoleDnsClient {
    api_url: Url,
    client: Client,
    token: String,
    rate_limiter: RateLimiter,
}

#[derive(Clone)]
struct RateLimiter {
    last_request: Arc<Mutex<Option<Instant>>>,
    min_delay: Duration,
}

impl RateLimiter {
    fn new(min_delay: Duration) -> Self {
        Self {
            last_request: Arc::new(Mutex::new(None)),
            min_delay,
        }
    }

    async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_delay {
                tokio::time::sleep(self.min_delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Pause requested by a 429 response, 5s when the header is absent or unusable.
fn retry_after(headers: &HeaderMap) -> Duration {
    let secs = headers
        .get(RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(5);
    Duration::from_secs(secs)
}

impl ConsoleDnsClient {
    pub fn new(
        config: &Config,
        credentials: Arc<dyn CredentialManager>,
    ) -> Result<Self, ConsoleDnsError> {
        let api_url = Url::parse(&config.api_url).map_err(|e| {
            ConsoleDnsError::InvalidInput(format!("api url {}: {e}", config.api_url))
        })?;
        if api_url.cannot_be_a_base() {
            return Err(ConsoleDnsError::InvalidInput(format!(
                "api url {} cannot be used as a base",
                config.api_url
            )));
        }
        let token = credentials
            .get(TOKEN_KEY)
            .map_err(|e| match e {
                Error::CredentialError(msg) => ConsoleDnsError::Credential(msg),
                other => ConsoleDnsError::Credential(other.to_string()),
            })?;

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            api_url,
            client,
            token,
            rate_limiter: RateLimiter::new(config.min_delay),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v1", "zones"]).extend(segments);
        }
        url
    }

    fn record_url(&self, zone: &str, name: &str, record: &ProviderRecord) -> Url {
        self.endpoint(&[zone, "records", name, record.record_type().as_str()])
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ConsoleDnsError> {
        self.rate_limiter.wait().await;
        let response = request.bearer_auth(&self.token).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            let pause = retry_after(response.headers());
            warn!("console-dns rate limit hit, pausing {}s", pause.as_secs());
            tokio::time::sleep(pause).await;
            return Err(ConsoleDnsError::RateLimited);
        }
        if status == StatusCode::NOT_FOUND {
            let error: ApiError = response.json().await.unwrap_or(ApiError {
                code: "not_found".to_string(),
                message: "Not found".to_string(),
            });
            return Err(error.into());
        }
        let error: ApiError = response.json().await.unwrap_or(ApiError {
            code: "unknown".to_string(),
            message: "Unknown error".to_string(),
        });
        Err(error.into())
    }
}

#[async_trait]
impl ZoneClient for ConsoleDnsClient {
    async fn list_zone(&self, zone: &str) -> Result<Zone, ConsoleDnsError> {
        let url = self.endpoint(&[zone]);
        let response = self.send(self.client.get(url)).await?;
        Ok(response.json().await?)
    }

    async fn create_record(
        &self,
        zone: &str,
        name: &str,
        record: &ProviderRecord,
    ) -> Result<(), ConsoleDnsError> {
        info!(
            "creating {} record {name} in zone {zone}",
            record.record_type()
        );
        let url = self.record_url(zone, name, record);
        self.send(self.client.post(url).json(record)).await?;
        Ok(())
    }

    async fn update_record(
        &self,
        zone: &str,
        name: &str,
        old: &ProviderRecord,
        new: &ProviderRecord,
    ) -> Result<(), ConsoleDnsError> {
        if old.record_type() != new.record_type() {
            return Err(ConsoleDnsError::InvalidInput(format!(
                "cannot update {} record with {} data",
                old.record_type(),
                new.record_type()
            )));
        }
        info!("updating {} record {name} in zone {zone}", new.record_type());
        let url = self.record_url(zone, name, new);
        let body = UpdateRecordRequest { old, new };
        self.send(self.client.put(url).json(&body)).await?;
        Ok(())
    }

    async fn delete_record(
        &self,
        zone: &str,
        name: &str,
        record: &ProviderRecord,
    ) -> Result<(), ConsoleDnsError> {
        info!(
            "deleting {} record {name} in zone {zone}",
            record.record_type()
        );
        let url = self.record_url(zone, name, record);
        self.send(self.client.delete(url).json(record)).await?;
        Ok(())
    }
}
