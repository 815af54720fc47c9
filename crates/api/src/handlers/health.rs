use crate::{dto::HealthResponse, state::AppState};
use axum::{extract::State, Json};

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        endpoints: state.summary.execute().endpoints.len(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}
