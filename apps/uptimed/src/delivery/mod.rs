use std::time::Duration;

use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Serialize;
use tracing::debug;
use uptime_probe::Report;

use crate::config::CallbackConfig;

pub mod error;

pub use self::error::DeliveryError;

#[async_trait::async_trait]
pub trait ReportDelivery: Send + Sync {
    async fn deliver(&self, return_url: &str, report: &Report) -> Result<(), DeliveryError>;
}

/// posts json payloads to caller-supplied return urls, retrying transient failures
#[derive(Clone, Debug)]
pub struct CallbackClient {
    client: ClientWithMiddleware,
    timeout: Duration,
}

impl CallbackClient {
    /// builds the client from a config
    pub fn from_config(config: &CallbackConfig) -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

        CallbackClient {
            client: reqwest_middleware::ClientBuilder::new(reqwest::Client::new())
                .with(RetryTransientMiddleware::new_with_policy(retry_policy))
                .build(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub async fn post_json<T>(&self, url: &str, payload: &T) -> Result<(), DeliveryError>
    where
        T: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(DeliveryError::Rejected { status, body });
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl ReportDelivery for CallbackClient {
    async fn deliver(&self, return_url: &str, report: &Report) -> Result<(), DeliveryError> {
        debug!("Posting report to '{}'", return_url);
        self.post_json(return_url, report).await
    }
}
