use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Callback request could not be sent: {0}")]
    Transport(#[from] reqwest_middleware::Error),
    #[error("Callback returned non-success status {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}
