use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::web::AppState;

pub fn create_info_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_info))
}

async fn get_info(State(app_state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let current_datetime = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    Json(serde_json::json!({
        "email": app_state.config.info.email,
        "current_datetime": current_datetime,
        "github_url": app_state.config.info.github_url,
    }))
}
