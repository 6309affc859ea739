use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Enum for recurrence frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Once a month on `anchor_day`.
    Monthly,
    /// Twice a month, on `anchor_day` and `anchor_day_2`.
    SemiMonthly,
    /// Once a year on `anchor_month`/`anchor_day`.
    Annual,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::SemiMonthly => "semi_monthly",
            Frequency::Annual => "annual",
        }
    }
}

/// Direction of the money flow of a recurring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// A transaction that repeats on a regular schedule.
/// Can be used for both income (salary) and expenses (rent, subscriptions).
///
/// The `last_processed_date` is the rule's cursor: the most recent due date
/// already materialized into a ledger entry. It only ever moves forward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringRule {
    pub id: i32,
    /// The account the realized transactions are booked against.
    pub account_id: i32,
    #[serde(default)]
    pub description: String,
    /// The value of each occurrence, always positive. The sign comes from `kind`.
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub frequency: Frequency,
    /// Day of month for Monthly/Annual, first day for SemiMonthly.
    pub anchor_day: u32,
    /// Second day of month, required for SemiMonthly.
    #[serde(default)]
    pub anchor_day_2: Option<u32>,
    /// Month of year, required for Annual.
    #[serde(default)]
    pub anchor_month: Option<u32>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub last_processed_date: Option<NaiveDate>,
}

impl RecurringRule {
    /// The date after which due dates are still outstanding.
    pub fn cursor(&self) -> NaiveDate {
        match self.last_processed_date {
            Some(last) if last > self.start_date => last,
            _ => self.start_date,
        }
    }

    /// Amount with the sign applied to an account balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Label used for realized ledger entries.
    pub fn label(&self) -> String {
        if self.description.is_empty() {
            format!("Recurring rule #{}", self.id)
        } else {
            self.description.clone()
        }
    }
}
