use serde::{Deserialize, Serialize};

use crate::types::{outcome::ProbeOutcome, ReportMode};

pub const REPORT_USERNAME: &str = "Uptime Monitor";
pub const REPORT_EVENT_NAME: &str = "Uptime Check";
// the receiving platform keys this integration's events on "error", even for an all-clear
pub const REPORT_STATUS: &str = "error";
pub const ALL_CLEAR_MESSAGE: &str = "We are still up";

/// callback payload, serialized as-is onto the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub message: String,
    pub username: String,
    pub event_name: String,
    pub status: String,
}

impl Report {
    pub fn new(message: String) -> Self {
        Report {
            message,
            username: REPORT_USERNAME.into(),
            event_name: REPORT_EVENT_NAME.into(),
            status: REPORT_STATUS.into(),
        }
    }

    /// joins the details of every `Down`/`Error` outcome, one per line, in outcome order
    pub fn build(outcomes: &[ProbeOutcome], mode: ReportMode) -> Self {
        let problems: Vec<&str> = outcomes
            .iter()
            .filter(|outcome| outcome.is_problem())
            .filter_map(|outcome| outcome.detail.as_deref())
            .collect();

        let message = match (problems.is_empty(), mode) {
            (true, ReportMode::Strict) => String::new(),
            (true, ReportMode::Lenient) => ALL_CLEAR_MESSAGE.to_string(),
            (false, _) => problems.join("\n"),
        };

        Report::new(message)
    }
}
