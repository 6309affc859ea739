use chrono::NaiveDate;

use crate::entities::prelude::*;
use crate::store::StoreError;

/// Access to stored ledger data.
///
/// Readers get owned snapshots. The only write path is
/// [`LedgerRepository::record_occurrences`], which applies the outcome of a
/// recurring rule projection as a single unit.
pub trait LedgerRepository {
    fn accounts(&self) -> Vec<Account>;

    fn recurring_rules(&self) -> Vec<RecurringRule>;

    fn debts(&self) -> Vec<Debt>;

    fn ledger_entries(&self) -> Vec<LedgerEntry>;

    /// Stores the realized entries of one rule, applies their amounts to the
    /// owning account balance and advances the rule cursor to `new_cursor`.
    ///
    /// Either everything is applied or nothing is.
    fn record_occurrences(
        &mut self,
        rule_id: i32,
        entries: Vec<NewLedgerEntry>,
        new_cursor: NaiveDate,
    ) -> Result<Vec<LedgerEntry>, StoreError>;
}
