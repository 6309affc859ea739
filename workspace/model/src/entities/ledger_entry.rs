use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A transaction that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLedgerEntry {
    pub account_id: i32,
    /// The recurring rule this entry was materialized from, if any.
    pub recurring_rule_id: Option<i32>,
    pub date: NaiveDate,
    /// Signed amount. Positive for income, negative for expense.
    pub amount: Decimal,
    pub description: String,
}

/// A realized transaction as kept by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub account_id: i32,
    pub recurring_rule_id: Option<i32>,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
}

impl LedgerEntry {
    pub fn from_new(id: i64, entry: NewLedgerEntry) -> Self {
        Self {
            id,
            account_id: entry.account_id,
            recurring_rule_id: entry.recurring_rule_id,
            date: entry.date,
            amount: entry.amount,
            description: entry.description,
        }
    }
}
