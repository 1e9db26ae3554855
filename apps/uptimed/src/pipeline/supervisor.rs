use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::{
    sync::{
        mpsc::{self, error::TrySendError},
        Semaphore,
    },
    task::{JoinError, JoinHandle, JoinSet},
};
use tracing::{debug, error, info, warn};
use uptime_probe::MonitorRequest;
use uuid::Uuid;

use crate::config::PipelineConfig;

use super::{Pipeline, RunState};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("pipeline queue is full")]
    QueueFull,
    #[error("pipeline supervisor has shut down")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Queued(Uuid),
    /// an identical target set for the same return url is still running
    AlreadyRunning,
}

struct PipelineJob {
    run_id: Uuid,
    request: MonitorRequest,
    _flight: Option<InFlightGuard>,
}

type InFlight = Arc<Mutex<HashSet<u64>>>;

// releases the single-flight key once the run is over, including on panic
struct InFlightGuard {
    in_flight: InFlight,
    key: u64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut keys = self.in_flight.lock().unwrap_or_else(|p| p.into_inner());
        keys.remove(&self.key);
    }
}

fn flight_key(return_url: &str, targets: &[String]) -> u64 {
    let mut hasher = DefaultHasher::new();
    return_url.hash(&mut hasher);
    targets.hash(&mut hasher);
    hasher.finish()
}

/// Accepts monitor requests from the http layer and runs them in the background.
///
/// Requests go through a bounded queue to a single worker, which runs at most
/// `max_concurrent_runs` pipelines at a time and logs how each one ended.
#[derive(Clone)]
pub struct PipelineSupervisor {
    tx: mpsc::Sender<PipelineJob>,
    pipeline: Pipeline,
    in_flight: Option<InFlight>,
}

impl PipelineSupervisor {
    /// spawns the worker; it exits once every supervisor handle is dropped and the queue is drained
    pub fn start(
        pipeline: Pipeline,
        config: &PipelineConfig,
    ) -> (PipelineSupervisor, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let worker = tokio::spawn(run_worker(
            pipeline.clone(),
            rx,
            config.max_concurrent_runs.max(1),
        ));

        let supervisor = PipelineSupervisor {
            tx,
            pipeline,
            in_flight: config
                .single_flight
                .then(|| Arc::new(Mutex::new(HashSet::new()))),
        };

        (supervisor, worker)
    }

    /// queues a request without waiting for it to run
    pub fn submit(&self, request: MonitorRequest) -> Result<Submission, SubmitError> {
        let run_id = Uuid::new_v4();

        let flight = match &self.in_flight {
            Some(in_flight) => {
                let key = flight_key(&request.return_url, &self.pipeline.targets(&request));
                if !in_flight
                    .lock()
                    .unwrap_or_else(|p| p.into_inner())
                    .insert(key)
                {
                    info!(
                        channel_id = request.channel_id.as_str(),
                        "Skipping tick, the same targets are still being checked"
                    );
                    return Ok(Submission::AlreadyRunning);
                }
                Some(InFlightGuard {
                    in_flight: in_flight.clone(),
                    key,
                })
            }
            None => None,
        };

        let job = PipelineJob {
            run_id,
            request,
            _flight: flight,
        };

        match self.tx.try_send(job) {
            Ok(()) => {
                debug!(run_id = %run_id, "Queued pipeline run");
                Ok(Submission::Queued(run_id))
            }
            Err(TrySendError::Full(_)) => Err(SubmitError::QueueFull),
            Err(TrySendError::Closed(_)) => Err(SubmitError::Closed),
        }
    }
}

async fn run_worker(pipeline: Pipeline, mut rx: mpsc::Receiver<PipelineJob>, max_runs: usize) {
    // semaphore to limit concurrent runs
    let permits = Arc::new(Semaphore::new(max_runs));
    let mut runs = JoinSet::new();

    loop {
        tokio::select! {
            job = rx.recv() => {
                let Some(job) = job else { break };

                // get a permit from the semaphore
                let Ok(permit) = permits.clone().acquire_owned().await else { break };
                let pipeline = pipeline.clone();

                runs.spawn(async move {
                    let _permit = permit;
                    let PipelineJob { run_id, request, _flight } = job;
                    let state = pipeline.run(run_id, request).await;
                    drop(_flight);
                    (run_id, state)
                });
            }
            Some(finished) = runs.join_next(), if !runs.is_empty() => log_finished(finished),
        }
    }

    info!(
        "Pipeline queue closed, waiting for {} runs to finish",
        runs.len()
    );
    while let Some(finished) = runs.join_next().await {
        log_finished(finished);
    }
    info!("Pipeline worker stopped");
}

fn log_finished(finished: Result<(Uuid, RunState), JoinError>) {
    match finished {
        Ok((run_id, RunState::Done)) => debug!(run_id = %run_id, "Pipeline run finished"),
        Ok((run_id, state)) => {
            warn!(run_id = %run_id, state = ?state, "Pipeline run incomplete")
        }
        Err(e) if e.is_panic() => error!("Pipeline run panicked: {}", e),
        Err(e) => warn!("Pipeline run was cancelled: {}", e),
    }
}
