use std::time::Duration;

use reqwest::redirect;
use tracing::debug;

use crate::{
    error::ProbeError,
    types::{outcome::ProbeOutcome, ReportMode},
};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait::async_trait]
pub trait Probe: Send + Sync {
    /// checks one target; every failure mode is returned as an outcome, never raised
    async fn probe(&self, target: &str) -> ProbeOutcome;
}

/// single GET reachability check
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    timeout: Duration,
    mode: ReportMode,
}

impl HttpProbe {
    /// builds a pooled client meant to be shared by every probe of the process
    pub fn new(timeout: Duration, mode: ReportMode) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .map_err(ProbeError::ClientBuild)?;

        Ok(Self::with_client(client, timeout, mode))
    }

    pub fn with_client(client: reqwest::Client, timeout: Duration, mode: ReportMode) -> Self {
        HttpProbe {
            client,
            timeout,
            mode,
        }
    }

    async fn get_status(&self, target: &str) -> Result<reqwest::StatusCode, ProbeError> {
        let response = self
            .client
            .get(target)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout(self.timeout)
                } else {
                    ProbeError::Transport(e)
                }
            })?;

        Ok(response.status())
    }
}

#[async_trait::async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, target: &str) -> ProbeOutcome {
        let outcome = match self.get_status(target).await {
            Ok(status) if status.as_u16() < 400 => {
                let detail = match self.mode {
                    ReportMode::Strict => None,
                    ReportMode::Lenient => {
                        Some(format!("{} is up (status {})", target, status.as_u16()))
                    }
                };
                ProbeOutcome::up(target, detail)
            }
            Ok(status) => ProbeOutcome::down(target, status.as_u16()),
            Err(e) => ProbeOutcome::failed(target, &e),
        };

        debug!(target = target, status = ?outcome.status, "Probe finished");
        outcome
    }
}
