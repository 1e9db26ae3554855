//! Concurrent reachability probing: classify one url, fan a batch out, fold the
//! outcomes into a single callback report.

pub mod dispatch;
pub mod error;
pub mod probe;
pub mod report;
pub mod types;

pub use dispatch::Dispatcher;
pub use error::{ProbeError, ValidationError};
pub use probe::{HttpProbe, Probe};
pub use report::Report;
pub use types::{
    outcome::{ProbeOutcome, ProbeStatus},
    MonitorRequest, ReportMode, Setting,
};
