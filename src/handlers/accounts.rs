use crate::helpers::converters::account_to_dto;
use crate::schemas::{ApiResponse, AppState};
use axum::{extract::State, response::Json};
use common::AccountDto;
use model::LedgerRepository;
use tracing::{debug, instrument};

/// List accounts with their current balances
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    tag = "accounts",
    responses(
        (status = 200, description = "Accounts retrieved successfully", body = ApiResponse<Vec<AccountDto>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_accounts(State(state): State<AppState>) -> Json<ApiResponse<Vec<AccountDto>>> {
    let accounts: Vec<AccountDto> = state
        .store
        .read()
        .await
        .accounts()
        .into_iter()
        .map(account_to_dto)
        .collect();
    debug!("Returning {} accounts", accounts.len());

    Json(ApiResponse::ok(accounts, "Accounts retrieved successfully"))
}
