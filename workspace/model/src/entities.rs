//! Plain value records for the finance tracking domain.
//!
//! These are snapshots: loading them never hands out live handles into the
//! store, so computations over them cannot mutate stored state. Changes go
//! back through [`crate::repository::LedgerRepository`].

pub mod account;
pub mod debt;
pub mod ledger_entry;
pub mod recurring_rule;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::account::Account;
    pub use super::debt::{Debt, DebtSnapshot};
    pub use super::ledger_entry::{LedgerEntry, NewLedgerEntry};
    pub use super::recurring_rule::{Frequency, RecurringRule, TransactionKind};
}
