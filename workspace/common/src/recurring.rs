use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Due dates of one recurring rule up to an as-of date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProjectionDto {
    pub rule_id: i32,
    pub as_of_date: NaiveDate,
    /// Ascending, without duplicates
    pub due_dates: Vec<NaiveDate>,
    /// Cursor the rule should store once the dates are booked
    pub last_processed_date: Option<NaiveDate>,
    /// Signed sum of all occurrences (income positive)
    #[schema(value_type = String)]
    pub total_amount: Decimal,
}

/// Stored recurring rule.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RecurringRuleDto {
    pub id: i32,
    pub account_id: i32,
    pub description: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// `income` or `expense`
    pub kind: String,
    /// `monthly`, `semi_monthly` or `annual`
    pub frequency: String,
    pub anchor_day: u32,
    pub anchor_day_2: Option<u32>,
    pub anchor_month: Option<u32>,
    pub start_date: NaiveDate,
    pub last_processed_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AccountDto {
    pub id: i32,
    pub name: String,
    #[schema(value_type = String)]
    pub balance: Decimal,
}

/// Transaction booked from a recurring rule.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LedgerEntryDto {
    pub id: i64,
    pub account_id: i32,
    pub recurring_rule_id: Option<i32>,
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub description: String,
}

/// A rule skipped during batch processing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RuleWarningDto {
    pub rule_id: i32,
    pub message: String,
}

/// Outcome of booking every due recurring rule.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProcessReportDto {
    pub as_of_date: NaiveDate,
    pub rules_processed: usize,
    pub entries: Vec<LedgerEntryDto>,
    pub warnings: Vec<RuleWarningDto>,
}
