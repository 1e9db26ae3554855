use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::numbers::NumberReport;
use crate::web::AppState;

pub fn create_number_router() -> Router<Arc<AppState>> {
    Router::new().route("/api/classify-number", get(classify_number))
}

/// first `number` value of the query string, empty when absent
fn raw_number(query: Result<Query<Vec<(String, String)>>, QueryRejection>) -> String {
    query
        .ok()
        .and_then(|Query(pairs)| {
            pairs
                .into_iter()
                .find(|(key, _)| key == "number")
                .map(|(_, value)| value)
        })
        .unwrap_or_default()
}

async fn classify_number(
    State(app_state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let raw = raw_number(query);
    let Ok(number) = raw.trim().parse::<i64>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "number": raw, "error": true })),
        )
            .into_response();
    };

    let fun_fact = app_state.fun_facts.fun_fact(number).await;
    Json(NumberReport::classify(number, fun_fact)).into_response()
}
