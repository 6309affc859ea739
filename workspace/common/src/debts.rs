use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A month in which one or more debts were paid off.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PlanEntryDto {
    pub month: u32,
    pub date: NaiveDate,
    pub paid_off: Vec<String>,
    #[schema(value_type = String)]
    pub remaining_balance: Decimal,
}

/// Payoff plan for a single strategy.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DebtPlanDto {
    /// `snowball` or `avalanche`
    pub strategy: String,
    /// `"N years, M months"`, `"no active debts"` or
    /// `"calculation exceeded 100 years"`
    pub summary: String,
    /// Months to debt freedom, absent when the plan does not finish
    pub months: Option<u32>,
    pub completed: bool,
    pub entries: Vec<PlanEntryDto>,
    #[schema(value_type = String)]
    pub total_interest: Decimal,
    #[schema(value_type = String)]
    pub total_paid: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StrategyComparisonDto {
    pub snowball: DebtPlanDto,
    pub avalanche: DebtPlanDto,
    /// Positive when Avalanche pays less interest
    #[schema(value_type = Option<String>)]
    pub interest_saved_by_avalanche: Option<Decimal>,
    pub recommended: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_serializes_decimals_as_strings() {
        let plan = DebtPlanDto {
            strategy: "avalanche".to_string(),
            summary: "0 years, 10 months".to_string(),
            months: Some(10),
            completed: true,
            entries: vec![PlanEntryDto {
                month: 5,
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                paid_off: vec!["B".to_string()],
                remaining_balance: Decimal::new(67250, 2),
            }],
            total_interest: Decimal::new(9165, 2),
            total_paid: Decimal::new(159165, 2),
        };

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["entries"][0]["remaining_balance"], "672.50");
        assert_eq!(json["entries"][0]["date"], "2024-05-01");
        assert_eq!(json["total_interest"], "91.65");

        let back: DebtPlanDto = serde_json::from_value(json).unwrap();
        assert_eq!(back, plan);
    }
}
