//! Builders shared by the unit tests of this crate.

use std::sync::atomic::{AtomicI32, Ordering};

use chrono::NaiveDate;
use model::entities::prelude::*;
use rust_decimal::Decimal;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn next_rule_id() -> i32 {
    static RULE_ID: AtomicI32 = AtomicI32::new(1);
    RULE_ID.fetch_add(1, Ordering::SeqCst)
}

pub fn monthly_rule(anchor_day: u32, start_date: NaiveDate) -> RecurringRule {
    RecurringRule {
        id: next_rule_id(),
        account_id: 1,
        description: "Monthly".to_string(),
        amount: Decimal::new(50000, 2),
        kind: TransactionKind::Expense,
        frequency: Frequency::Monthly,
        anchor_day,
        anchor_day_2: None,
        anchor_month: None,
        start_date,
        last_processed_date: None,
    }
}

pub fn semi_monthly_rule(anchor_day: u32, anchor_day_2: u32, start_date: NaiveDate) -> RecurringRule {
    RecurringRule {
        frequency: Frequency::SemiMonthly,
        anchor_day_2: Some(anchor_day_2),
        description: "Semi-monthly".to_string(),
        ..monthly_rule(anchor_day, start_date)
    }
}

pub fn annual_rule(anchor_month: u32, anchor_day: u32, start_date: NaiveDate) -> RecurringRule {
    RecurringRule {
        frequency: Frequency::Annual,
        anchor_month: Some(anchor_month),
        description: "Annual".to_string(),
        ..monthly_rule(anchor_day, start_date)
    }
}

/// Snapshot with whole-unit balance and minimum and a percent rate.
pub fn debt(name: &str, balance: i64, minimum_payment: i64, interest_rate: i64) -> DebtSnapshot {
    DebtSnapshot::new(
        name,
        Decimal::new(balance, 0),
        Decimal::new(minimum_payment, 0),
        Decimal::new(interest_rate, 0),
    )
}
