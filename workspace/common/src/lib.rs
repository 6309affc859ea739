//! Transport-layer types shared by the HTTP API and the CLI.
//! These structs are the serialized shapes of the compute results, kept
//! free of compute and model dependencies.

mod debts;
pub mod money;
mod recurring;

pub use debts::{DebtPlanDto, PlanEntryDto, StrategyComparisonDto};
pub use recurring::{
    AccountDto, LedgerEntryDto, ProcessReportDto, ProjectionDto, RecurringRuleDto, RuleWarningDto,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
