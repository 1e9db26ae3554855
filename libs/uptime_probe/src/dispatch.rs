use std::sync::Arc;
use std::time::Duration;

use tokio::{sync::Semaphore, task::AbortHandle, time::Instant};
use tracing::{debug, warn};

use crate::{error::ProbeError, probe::Probe, types::outcome::ProbeOutcome};

pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Fans a batch of targets out to concurrent probes and joins the outcomes back
/// in target order.
///
/// The concurrency cap is shared by every batch run through the same dispatcher.
#[derive(Clone)]
pub struct Dispatcher {
    probe: Arc<dyn Probe>,
    permits: Arc<Semaphore>,
    batch_timeout: Option<Duration>,
}

// aborts probes that are still running when a dispatch is dropped mid-flight
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

impl Dispatcher {
    pub fn new(
        probe: Arc<dyn Probe>,
        max_concurrency: usize,
        batch_timeout: Option<Duration>,
    ) -> Self {
        Dispatcher {
            probe,
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
            batch_timeout,
        }
    }

    /// Probes every target and returns exactly one outcome per target, in input order.
    ///
    /// A probe task that panics, or that is still running when the batch deadline
    /// passes, is reported as an `Error` outcome for its target.
    pub async fn dispatch(&self, targets: &[String]) -> Vec<ProbeOutcome> {
        let deadline = self.batch_timeout.map(|timeout| Instant::now() + timeout);

        // stores all task handles, index matches the target index
        let mut handles = Vec::with_capacity(targets.len());
        for target in targets {
            let probe = self.probe.clone();
            let permits = self.permits.clone();
            let target = target.clone();

            handles.push(tokio::spawn(async move {
                // the permit lives until the probe returns
                let _permit = permits.acquire_owned().await;
                probe.probe(&target).await
            }));
        }
        let _guard = AbortOnDrop(handles.iter().map(|h| h.abort_handle()).collect());

        debug!("Dispatched {} probes", handles.len());

        let mut outcomes = Vec::with_capacity(targets.len());
        for (target, mut handle) in targets.iter().zip(handles) {
            let joined = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, &mut handle).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        handle.abort();
                        warn!(target = %target, "Probe still running at batch deadline");
                        outcomes.push(ProbeOutcome::failed(target, &ProbeError::DeadlineExceeded));
                        continue;
                    }
                },
                None => (&mut handle).await,
            };

            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(target = %target, "Probe task failed: {}", e);
                    ProbeOutcome::failed(target, &ProbeError::TaskFailed(e.to_string()))
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}
