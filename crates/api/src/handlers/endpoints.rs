use crate::{dto::EndpointResponse, state::AppState};
use axum::{extract::State, Json};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_endpoints")]
pub async fn get_endpoints(State(state): State<AppState>) -> Json<Vec<EndpointResponse>> {
    let report = state.summary.execute();
    debug!(count = report.endpoints.len(), "Endpoint statistics retrieved");

    Json(
        report
            .endpoints
            .iter()
            .map(EndpointResponse::from)
            .collect(),
    )
}
