use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use tracing::warn;

use crate::formatter::FormatRules;
use crate::web::{
    models::{FormatMessageRequest, FormattedMessage},
    AppError, AppState,
};

pub fn create_formatter_router() -> Router<Arc<AppState>> {
    Router::new().route("/format_message", post(format_message))
}

async fn format_message(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<FormatMessageRequest>, JsonRejection>,
) -> Result<Json<FormattedMessage>, AppError> {
    let Json(request) = payload?;
    let rules = FormatRules::from_settings(&request.settings)?;

    let formatted = FormattedMessage {
        event_name: app_state.config.formatter.event_name.clone(),
        message: rules.apply(&request.message),
        status: "success".into(),
        username: app_state.config.formatter.username.clone(),
    };

    let return_url = request
        .return_url
        .or_else(|| app_state.config.formatter.return_url.clone());
    if let Some(return_url) = return_url {
        let callback = app_state.callback.clone();
        let event = formatted.clone();
        app_state.background.spawn(async move {
            if let Err(e) = callback.post_json(&return_url, &event).await {
                warn!(
                    "Failed to post formatted message to '{}': {}",
                    return_url, e
                );
            }
        });
    }

    Ok(Json(formatted))
}
