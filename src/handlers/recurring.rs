use crate::handlers::today;
use crate::handlers::validation::validate_positive;
use crate::helpers::converters::{projection_to_dto, report_to_dto, rule_to_dto};
use crate::helpers::errors::{ApiError, compute_error};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDate;
use common::{ProcessReportDto, ProjectionDto, RecurringRuleDto};
use compute::{process_due_rules, project_due_dates};
use model::LedgerRepository;
use model::entities::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Recurring rule as submitted for an ad-hoc projection
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct RecurringRuleInput {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub account_id: i32,
    #[serde(default)]
    pub description: String,
    /// Unsigned amount; the sign follows `kind`
    #[validate(custom(function = "validate_positive"))]
    #[schema(value_type = String)]
    pub amount: Decimal,
    #[schema(value_type = String, example = "expense")]
    pub kind: TransactionKind,
    #[schema(value_type = String, example = "monthly")]
    pub frequency: Frequency,
    #[validate(range(min = 1, max = 31))]
    pub anchor_day: u32,
    /// Second day of the month, required for `semi_monthly`
    #[validate(range(min = 1, max = 31))]
    pub anchor_day_2: Option<u32>,
    /// Month of the year, required for `annual`
    #[validate(range(min = 1, max = 12))]
    pub anchor_month: Option<u32>,
    pub start_date: NaiveDate,
    pub last_processed_date: Option<NaiveDate>,
}

impl From<RecurringRuleInput> for RecurringRule {
    fn from(input: RecurringRuleInput) -> Self {
        Self {
            id: input.id,
            account_id: input.account_id,
            description: input.description,
            amount: input.amount,
            kind: input.kind,
            frequency: input.frequency,
            anchor_day: input.anchor_day,
            anchor_day_2: input.anchor_day_2,
            anchor_month: input.anchor_month,
            start_date: input.start_date,
            last_processed_date: input.last_processed_date,
        }
    }
}

/// Request body for projecting a recurring rule
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct ProjectRuleRequest {
    #[validate(nested)]
    pub rule: RecurringRuleInput,
    /// Defaults to today
    pub as_of_date: Option<NaiveDate>,
}

/// Query parameters for batch processing
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ProcessQuery {
    /// Book every occurrence due on or before this date (defaults to today)
    pub as_of_date: Option<NaiveDate>,
}

/// Project the due dates of a recurring rule
#[utoipa::path(
    post,
    path = "/api/v1/recurring/project",
    tag = "recurring",
    request_body = ProjectRuleRequest,
    responses(
        (status = 200, description = "Due dates computed", body = ApiResponse<ProjectionDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 422, description = "Misconfigured recurring rule or total out of range", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn project_rule(
    Valid(Json(request)): Valid<Json<ProjectRuleRequest>>,
) -> Result<Json<ApiResponse<ProjectionDto>>, ApiError> {
    trace!("Entering project_rule function");
    let as_of = request.as_of_date.unwrap_or_else(today);
    let rule = RecurringRule::from(request.rule);
    debug!("Projecting rule {} ({:?}) up to {}", rule.id, rule.frequency, as_of);

    let projection = project_due_dates(&rule, as_of).map_err(compute_error)?;

    let dto = projection_to_dto(&rule, as_of, &projection).map_err(compute_error)?;

    Ok(Json(ApiResponse::ok(
        dto,
        format!("{} due dates", projection.due_dates.len()),
    )))
}

/// List stored recurring rules
#[utoipa::path(
    get,
    path = "/api/v1/recurring-rules",
    tag = "recurring",
    responses(
        (status = 200, description = "Recurring rules retrieved successfully", body = ApiResponse<Vec<RecurringRuleDto>>)
    )
)]
#[instrument(skip(state))]
pub async fn get_recurring_rules(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<RecurringRuleDto>>> {
    let rules: Vec<RecurringRuleDto> = state
        .store
        .read()
        .await
        .recurring_rules()
        .into_iter()
        .map(rule_to_dto)
        .collect();

    Json(ApiResponse::ok(rules, "Recurring rules retrieved successfully"))
}

/// Book every due occurrence of the stored recurring rules
#[utoipa::path(
    post,
    path = "/api/v1/recurring-rules/process",
    tag = "recurring",
    params(ProcessQuery),
    responses(
        (status = 200, description = "Due occurrences booked", body = ApiResponse<ProcessReportDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 422, description = "Due dates fall outside the supported calendar", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn process_recurring_rules(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<ProcessQuery>>,
) -> Result<Json<ApiResponse<ProcessReportDto>>, ApiError> {
    let as_of = query.as_of_date.unwrap_or_else(today);

    let report = {
        let mut store = state.store.write().await;
        process_due_rules(&mut *store, as_of).map_err(compute_error)?
    };

    info!(
        "Processed {} rules up to {}: {} entries, {} warnings",
        report.rules_processed,
        as_of,
        report.recorded.len(),
        report.warnings.len()
    );
    let message = format!("{} entries recorded", report.recorded.len());
    Ok(Json(ApiResponse::ok(report_to_dto(report), message)))
}
