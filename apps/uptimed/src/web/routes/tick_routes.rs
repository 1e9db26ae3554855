use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection, extract::State, http::StatusCode, routing::post, Json,
    Router,
};
use tracing::debug;
use uptime_probe::MonitorRequest;

use crate::pipeline::supervisor::Submission;
use crate::web::{models::TickAccepted, AppError, AppState};

pub fn create_tick_router() -> Router<Arc<AppState>> {
    Router::new().route("/tick", post(tick))
}

/// Validates the trigger and hands it to the pipeline supervisor.
///
/// Always answers before any probe starts; the report arrives later at `return_url`.
async fn tick(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<MonitorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TickAccepted>), AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let channel_id = request.channel_id.clone();
    match app_state.supervisor.submit(request)? {
        Submission::Queued(run_id) => {
            debug!(run_id = %run_id, %channel_id, "Tick accepted")
        }
        Submission::AlreadyRunning => {
            debug!(%channel_id, "Tick accepted, previous run still active")
        }
    }

    Ok((StatusCode::ACCEPTED, Json(TickAccepted::default())))
}
