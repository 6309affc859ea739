use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use model::entities::recurring_rule::{Frequency, RecurringRule};
use rust_decimal::Decimal;
use tracing::{debug, instrument, trace};

use super::calendar::{clamped_date, next_month};
use crate::error::{ComputeError, Result};

/// Due dates of a recurring rule that elapsed up to an `as_of` date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionResult {
    /// Chronological, without duplicates. Every date is after the rule's
    /// previous cursor and not after `as_of`.
    pub due_dates: Vec<NaiveDate>,
    /// New value for the rule's `last_processed_date`: the last due date, or
    /// the previous value when nothing is due.
    pub cursor: Option<NaiveDate>,
}

impl ProjectionResult {
    pub fn is_empty(&self) -> bool {
        self.due_dates.is_empty()
    }

    /// Sum of `amount` over every due date.
    pub fn total_amount(&self, amount: Decimal) -> Result<Decimal> {
        amount
            .checked_mul(Decimal::from(self.due_dates.len()))
            .ok_or_else(|| {
                ComputeError::Overflow(format!(
                    "{} occurrences of {} exceed the decimal range",
                    self.due_dates.len(),
                    amount
                ))
            })
    }
}

/// Computes the due dates of `rule` that fall after its cursor and on or
/// before `as_of`.
///
/// Anchor days that do not exist in a month are clamped to the last day of
/// that month. Fails with [`ComputeError::Configuration`] when the rule lacks
/// a field its frequency needs or an anchor is out of range.
#[instrument(skip(rule), fields(rule_id = rule.id, frequency = ?rule.frequency, as_of = %as_of))]
pub fn project_due_dates(rule: &RecurringRule, as_of: NaiveDate) -> Result<ProjectionResult> {
    let anchor_day = checked_day(rule.id, "anchor_day", Some(rule.anchor_day))?;
    let cursor = rule.cursor();
    trace!("Projecting recurring rule {} from cursor {}", rule.id, cursor);

    let due_dates = match rule.frequency {
        Frequency::Monthly => monthly_due_dates(anchor_day, cursor, as_of)?,
        Frequency::SemiMonthly => {
            let second_day = checked_day(rule.id, "anchor_day_2", rule.anchor_day_2)?;
            let mut merged: BTreeSet<NaiveDate> =
                monthly_due_dates(anchor_day, cursor, as_of)?.into_iter().collect();
            merged.extend(monthly_due_dates(second_day, cursor, as_of)?);
            merged.into_iter().collect()
        }
        Frequency::Annual => {
            let anchor_month = match rule.anchor_month {
                Some(month) if (1..=12).contains(&month) => month,
                Some(month) => {
                    return Err(ComputeError::configuration(
                        rule.id,
                        format!("anchor_month {} is outside 1..=12", month),
                    ));
                }
                None => {
                    return Err(ComputeError::configuration(
                        rule.id,
                        "annual rule requires anchor_month",
                    ));
                }
            };
            annual_due_dates(anchor_month, anchor_day, cursor, as_of)?
        }
    };

    let cursor = due_dates.last().copied().or(rule.last_processed_date);
    debug!(
        "Recurring rule {} has {} due dates up to {}",
        rule.id,
        due_dates.len(),
        as_of
    );
    Ok(ProjectionResult { due_dates, cursor })
}

fn checked_day(rule_id: i32, field: &str, day: Option<u32>) -> Result<u32> {
    match day {
        Some(day) if (1..=31).contains(&day) => Ok(day),
        Some(day) => Err(ComputeError::configuration(
            rule_id,
            format!("{} {} is outside 1..=31", field, day),
        )),
        None => Err(ComputeError::configuration(
            rule_id,
            format!("semi-monthly rule requires {}", field),
        )),
    }
}

fn anchor_date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    clamped_date(year, month, day)
        .ok_or_else(|| ComputeError::Date(format!("Cannot build date {}-{}-{}", year, month, day)))
}

/// One date per calendar month on `anchor_day`, strictly after `cursor`.
fn monthly_due_dates(anchor_day: u32, cursor: NaiveDate, as_of: NaiveDate) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::new();
    let (mut year, mut month) = (cursor.year(), cursor.month());

    let mut candidate = anchor_date(year, month, anchor_day)?;
    if candidate <= cursor {
        (year, month) = next_month(year, month);
        candidate = anchor_date(year, month, anchor_day)?;
    }

    while candidate <= as_of {
        dates.push(candidate);
        (year, month) = next_month(year, month);
        candidate = anchor_date(year, month, anchor_day)?;
    }

    Ok(dates)
}

/// One date per year on `anchor_month`/`anchor_day`, strictly after `cursor`.
fn annual_due_dates(
    anchor_month: u32,
    anchor_day: u32,
    cursor: NaiveDate,
    as_of: NaiveDate,
) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::new();
    let mut year = cursor.year();

    let mut candidate = anchor_date(year, anchor_month, anchor_day)?;
    if candidate <= cursor {
        year += 1;
        candidate = anchor_date(year, anchor_month, anchor_day)?;
    }

    while candidate <= as_of {
        dates.push(candidate);
        year += 1;
        candidate = anchor_date(year, anchor_month, anchor_day)?;
    }

    Ok(dates)
}
