use crate::config::AppConfig;
use common::{
    AccountDto, DebtPlanDto, LedgerEntryDto, PlanEntryDto, ProcessReportDto, ProjectionDto,
    RecurringRuleDto, RuleWarningDto, StrategyComparisonDto,
};
use model::InMemoryLedger;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::{OpenApi, ToSchema};

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Ledger store; batch processing takes the write lock for the whole run
    pub store: Arc<RwLock<InMemoryLedger>>,
    /// Cache for expensive operations
    pub cache: Cache<String, CachedData>,
    pub config: Arc<AppConfig>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Plan(DebtPlanDto),
    Comparison(StrategyComparisonDto),
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Ledger store contents
    pub store: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::accounts::get_accounts,
        crate::handlers::recurring::project_rule,
        crate::handlers::recurring::get_recurring_rules,
        crate::handlers::recurring::process_recurring_rules,
        crate::handlers::debts::simulate_debts,
        crate::handlers::debts::compare_debt_strategies,
        crate::handlers::debts::get_debt_plan,
    ),
    components(
        schemas(
            ApiResponse<ProjectionDto>,
            ApiResponse<ProcessReportDto>,
            ApiResponse<DebtPlanDto>,
            ApiResponse<StrategyComparisonDto>,
            ErrorResponse,
            HealthResponse,
            AccountDto,
            RecurringRuleDto,
            LedgerEntryDto,
            RuleWarningDto,
            ProjectionDto,
            ProcessReportDto,
            PlanEntryDto,
            DebtPlanDto,
            StrategyComparisonDto,
            crate::handlers::recurring::ProjectRuleRequest,
            crate::handlers::recurring::RecurringRuleInput,
            crate::handlers::debts::DebtInput,
            crate::handlers::debts::SimulateDebtsRequest,
            crate::handlers::debts::CompareStrategiesRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "accounts", description = "Account balances"),
        (name = "recurring", description = "Recurring transaction projection and processing"),
        (name = "debts", description = "Debt payoff simulation"),
    ),
    info(
        title = "Fintrack API",
        description = "Personal finance API - recurring transaction projection and debt payoff planning",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
