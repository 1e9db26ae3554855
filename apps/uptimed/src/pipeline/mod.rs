use std::sync::Arc;

use tracing::{error, info};
use uptime_probe::{Dispatcher, HttpProbe, MonitorRequest, Report, ReportMode};
use uuid::Uuid;

use crate::{config::ProbeConfig, delivery::ReportDelivery};

pub mod supervisor;

/// lifecycle of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Received,
    Dispatching,
    Aggregating,
    Delivering,
    Done,
    DeliveryFailed,
}

/// dispatch -> aggregate -> deliver, for one monitor request at a time
#[derive(Clone)]
pub struct Pipeline {
    dispatcher: Dispatcher,
    delivery: Arc<dyn ReportDelivery>,
    target_prefix: String,
    report_mode: ReportMode,
}

impl Pipeline {
    pub fn new(
        dispatcher: Dispatcher,
        delivery: Arc<dyn ReportDelivery>,
        target_prefix: String,
        report_mode: ReportMode,
    ) -> Self {
        Pipeline {
            dispatcher,
            delivery,
            target_prefix,
            report_mode,
        }
    }

    /// builds the shared http probe and dispatcher from a config
    pub fn from_config(
        config: &ProbeConfig,
        delivery: Arc<dyn ReportDelivery>,
    ) -> eyre::Result<Self> {
        let probe = HttpProbe::new(config.timeout(), config.report_mode)?;
        let dispatcher = Dispatcher::new(
            Arc::new(probe),
            config.max_concurrency,
            config.batch_timeout(),
        );

        Ok(Pipeline::new(
            dispatcher,
            delivery,
            config.target_prefix.clone(),
            config.report_mode,
        ))
    }

    pub fn targets(&self, request: &MonitorRequest) -> Vec<String> {
        request.targets(&self.target_prefix)
    }

    pub fn delivery(&self) -> Arc<dyn ReportDelivery> {
        self.delivery.clone()
    }

    /// probes the targets and builds the report, without delivering it
    pub async fn check(&self, targets: &[String]) -> Report {
        let outcomes = self.dispatcher.dispatch(targets).await;
        Report::build(&outcomes, self.report_mode)
    }

    /// Runs one request to completion and returns the terminal state.
    ///
    /// Probe failures never end a run early; only delivery can fail it.
    pub async fn run(&self, run_id: Uuid, request: MonitorRequest) -> RunState {
        let channel_id = request.channel_id.as_str();
        let transition = |state: RunState| {
            info!(
                run_id = %run_id,
                channel_id = channel_id,
                state = ?state,
                "Pipeline run state changed"
            );
            state
        };

        transition(RunState::Received);
        let targets = self.targets(&request);

        transition(RunState::Dispatching);
        let outcomes = self.dispatcher.dispatch(&targets).await;

        transition(RunState::Aggregating);
        let report = Report::build(&outcomes, self.report_mode);
        info!(
            run_id = %run_id,
            "Checked {} targets, {} with problems",
            outcomes.len(),
            outcomes.iter().filter(|o| o.is_problem()).count()
        );

        transition(RunState::Delivering);
        match self.delivery.deliver(&request.return_url, &report).await {
            Ok(()) => transition(RunState::Done),
            Err(e) => {
                error!(
                    run_id = %run_id,
                    "Failed to deliver report to '{}': {}", request.return_url, e
                );
                transition(RunState::DeliveryFailed)
            }
        }
    }
}
