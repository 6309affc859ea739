use crate::handlers::today;
use crate::handlers::validation::validate_non_negative;
use crate::helpers::converters::{comparison_to_dto, plan_to_dto};
use crate::helpers::errors::{ApiError, compute_error};
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse};
use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDate;
use common::{DebtPlanDto, StrategyComparisonDto};
use compute::{DebtStrategy, compare_strategies, simulate};
use model::LedgerRepository;
use model::entities::debt::DebtSnapshot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A debt as submitted for simulation
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct DebtInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(custom(function = "validate_non_negative"))]
    #[schema(value_type = String)]
    pub current_balance: Decimal,
    #[validate(custom(function = "validate_non_negative"))]
    #[schema(value_type = String)]
    pub minimum_payment: Decimal,
    /// Nominal annual rate in percent
    #[validate(custom(function = "validate_non_negative"))]
    #[schema(value_type = String)]
    pub interest_rate: Decimal,
}

impl DebtInput {
    fn snapshot(&self) -> DebtSnapshot {
        DebtSnapshot::new(
            self.name.clone(),
            self.current_balance,
            self.minimum_payment,
            self.interest_rate,
        )
    }
}

/// Request body for a single-strategy simulation
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct SimulateDebtsRequest {
    #[validate(nested)]
    pub debts: Vec<DebtInput>,
    /// Monthly amount on top of the minimum payments
    #[serde(default)]
    #[validate(custom(function = "validate_non_negative"))]
    #[schema(value_type = String)]
    pub extra_payment: Decimal,
    /// `snowball` or `avalanche`
    pub strategy: String,
    /// First simulated month (defaults to today)
    pub start_date: Option<NaiveDate>,
}

/// Request body for a side-by-side comparison of both strategies
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct CompareStrategiesRequest {
    #[validate(nested)]
    pub debts: Vec<DebtInput>,
    #[serde(default)]
    #[validate(custom(function = "validate_non_negative"))]
    #[schema(value_type = String)]
    pub extra_payment: Decimal,
    pub start_date: Option<NaiveDate>,
}

/// Query parameters for the plan over stored debts
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct DebtPlanQuery {
    #[validate(custom(function = "validate_non_negative"))]
    #[param(value_type = Option<String>)]
    pub extra_payment: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
}

fn snapshots(debts: &[DebtInput]) -> Vec<DebtSnapshot> {
    debts.iter().map(DebtInput::snapshot).collect()
}

async fn cached_comparison(
    state: &AppState,
    debts: Vec<DebtSnapshot>,
    extra_payment: Decimal,
    start_date: NaiveDate,
) -> Result<StrategyComparisonDto, ApiError> {
    let cache_key = format!("compare_{:?}_{}_{}", debts, extra_payment, start_date);
    if let Some(CachedData::Comparison(comparison)) = state.cache.get(&cache_key).await {
        debug!("Strategy comparison served from cache");
        return Ok(comparison);
    }

    let comparison = compare_strategies(&debts, extra_payment, start_date).map_err(compute_error)?;
    let dto = comparison_to_dto(&comparison);
    state
        .cache
        .insert(cache_key, CachedData::Comparison(dto.clone()))
        .await;
    Ok(dto)
}

/// Simulate paying off debts with one strategy
#[utoipa::path(
    post,
    path = "/api/v1/debts/simulate",
    tag = "debts",
    request_body = SimulateDebtsRequest,
    responses(
        (status = 200, description = "Payoff plan computed", body = ApiResponse<DebtPlanDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn simulate_debts(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<SimulateDebtsRequest>>,
) -> Result<Json<ApiResponse<DebtPlanDto>>, ApiError> {
    trace!("Entering simulate_debts function");
    let strategy: DebtStrategy = request.strategy.parse().map_err(compute_error)?;
    let start_date = request.start_date.unwrap_or_else(today);
    let debts = snapshots(&request.debts);

    let cache_key = format!("simulate_{}_{:?}_{}_{}", strategy, debts, request.extra_payment, start_date);
    if let Some(CachedData::Plan(plan)) = state.cache.get(&cache_key).await {
        debug!("Payoff plan served from cache");
        let message = plan.summary.clone();
        return Ok(Json(ApiResponse::ok(plan, message)));
    }

    let plan = simulate(&debts, request.extra_payment, strategy, start_date).map_err(compute_error)?;
    let dto = plan_to_dto(&plan);
    state.cache.insert(cache_key, CachedData::Plan(dto.clone())).await;

    Ok(Json(ApiResponse::ok(dto, plan.summary())))
}

/// Compare Snowball and Avalanche for the same debts
#[utoipa::path(
    post,
    path = "/api/v1/debts/compare",
    tag = "debts",
    request_body = CompareStrategiesRequest,
    responses(
        (status = 200, description = "Both payoff plans computed", body = ApiResponse<StrategyComparisonDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn compare_debt_strategies(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CompareStrategiesRequest>>,
) -> Result<Json<ApiResponse<StrategyComparisonDto>>, ApiError> {
    let start_date = request.start_date.unwrap_or_else(today);
    let comparison = cached_comparison(
        &state,
        snapshots(&request.debts),
        request.extra_payment,
        start_date,
    )
    .await?;

    Ok(Json(ApiResponse::ok(comparison, "Strategies compared successfully")))
}

/// Compare both strategies over the stored debts
#[utoipa::path(
    get,
    path = "/api/v1/debts/plan",
    tag = "debts",
    params(DebtPlanQuery),
    responses(
        (status = 200, description = "Both payoff plans computed", body = ApiResponse<StrategyComparisonDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_debt_plan(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<DebtPlanQuery>>,
) -> Result<Json<ApiResponse<StrategyComparisonDto>>, ApiError> {
    let debts: Vec<DebtSnapshot> = state
        .store
        .read()
        .await
        .debts()
        .iter()
        .map(|d| d.snapshot())
        .collect();
    debug!("Planning payoff of {} stored debts", debts.len());

    let comparison = cached_comparison(
        &state,
        debts,
        query.extra_payment.unwrap_or(Decimal::ZERO),
        query.start_date.unwrap_or_else(today),
    )
    .await?;

    Ok(Json(ApiResponse::ok(comparison, "Payoff plan computed successfully")))
}
