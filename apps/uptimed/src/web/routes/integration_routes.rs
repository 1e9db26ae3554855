use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap},
    routing::get,
    Json, Router,
};

use crate::web::{models::integration_models::IntegrationDescriptor, AppState};

pub fn create_integration_router() -> Router<Arc<AppState>> {
    Router::new().route("/integration.json", get(get_integration_json))
}

/// configured public url wins, otherwise the Host the caller reached us on
fn base_url(app_state: &AppState, headers: &HeaderMap) -> String {
    if let Some(public_url) = &app_state.config.server.public_url {
        return public_url.trim_end_matches('/').to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{}", host)
}

async fn get_integration_json(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<IntegrationDescriptor> {
    let base_url = base_url(&app_state, &headers);
    Json(IntegrationDescriptor::new(
        &app_state.config.integration,
        &base_url,
    ))
}
