use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
    #[error("{}", error_chain(.0))]
    Transport(#[from] reqwest::Error),
    #[error("probe task failed: {0}")]
    TaskFailed(String),
    #[error("batch deadline exceeded")]
    DeadlineExceeded,
    #[error("failed to build http client: {0}")]
    ClientBuild(reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("return_url must be an absolute http(s) url, got '{0}'")]
    InvalidReturnUrl(String),
}

// reqwest only prints the outermost error, the useful cause sits in the sources
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
