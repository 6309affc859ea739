use axum::{extract::State, http::StatusCode, response::Json};
use model::LedgerRepository;
use tracing::instrument;
use crate::schemas::{AppState, HealthResponse};

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 500, description = "Service is unhealthy", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    let store = state.store.read().await;
    let store_status = format!(
        "{} accounts, {} recurring rules, {} debts",
        store.accounts().len(),
        store.recurring_rules().len(),
        store.debts().len()
    );

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store_status,
    };

    Ok(Json(response))
}
