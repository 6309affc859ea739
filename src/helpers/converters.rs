//! Conversions from model and compute types to the transport DTOs.

use chrono::NaiveDate;
use common::{
    AccountDto, DebtPlanDto, LedgerEntryDto, PlanEntryDto, ProcessReportDto, ProjectionDto,
    RecurringRuleDto, RuleWarningDto, StrategyComparisonDto,
};
use compute::{ProcessReport, ProjectionResult, RuleWarning, SimulationPlan, StrategyComparison};
use model::entities::prelude::*;

pub fn projection_to_dto(
    rule: &RecurringRule,
    as_of_date: NaiveDate,
    projection: &ProjectionResult,
) -> compute::Result<ProjectionDto> {
    let total_amount = projection.total_amount(rule.signed_amount())?;
    Ok(ProjectionDto {
        rule_id: rule.id,
        as_of_date,
        due_dates: projection.due_dates.clone(),
        last_processed_date: projection.cursor,
        total_amount,
    })
}

pub fn rule_to_dto(rule: RecurringRule) -> RecurringRuleDto {
    RecurringRuleDto {
        id: rule.id,
        account_id: rule.account_id,
        description: rule.description,
        amount: rule.amount,
        kind: rule.kind.as_str().to_string(),
        frequency: rule.frequency.as_str().to_string(),
        anchor_day: rule.anchor_day,
        anchor_day_2: rule.anchor_day_2,
        anchor_month: rule.anchor_month,
        start_date: rule.start_date,
        last_processed_date: rule.last_processed_date,
    }
}

pub fn account_to_dto(account: Account) -> AccountDto {
    AccountDto {
        id: account.id,
        name: account.name,
        balance: account.balance,
    }
}

pub fn entry_to_dto(entry: LedgerEntry) -> LedgerEntryDto {
    LedgerEntryDto {
        id: entry.id,
        account_id: entry.account_id,
        recurring_rule_id: entry.recurring_rule_id,
        date: entry.date,
        amount: entry.amount,
        description: entry.description,
    }
}

fn warning_to_dto(warning: RuleWarning) -> RuleWarningDto {
    RuleWarningDto {
        rule_id: warning.rule_id,
        message: warning.message,
    }
}

pub fn report_to_dto(report: ProcessReport) -> ProcessReportDto {
    ProcessReportDto {
        as_of_date: report.as_of,
        rules_processed: report.rules_processed,
        entries: report.recorded.into_iter().map(entry_to_dto).collect(),
        warnings: report.warnings.into_iter().map(warning_to_dto).collect(),
    }
}

pub fn plan_to_dto(plan: &SimulationPlan) -> DebtPlanDto {
    DebtPlanDto {
        strategy: plan.strategy.to_string(),
        summary: plan.summary(),
        months: plan.months(),
        completed: plan.months().is_some(),
        entries: plan
            .entries
            .iter()
            .map(|e| PlanEntryDto {
                month: e.month,
                date: e.date,
                paid_off: e.paid_off.clone(),
                remaining_balance: e.remaining_balance,
            })
            .collect(),
        total_interest: plan.total_interest,
        total_paid: plan.total_paid,
    }
}

pub fn comparison_to_dto(comparison: &StrategyComparison) -> StrategyComparisonDto {
    StrategyComparisonDto {
        snowball: plan_to_dto(&comparison.snowball),
        avalanche: plan_to_dto(&comparison.avalanche),
        interest_saved_by_avalanche: comparison.interest_saved_by_avalanche(),
        recommended: comparison.recommended().map(|s| s.to_string()),
    }
}
