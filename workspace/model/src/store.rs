use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::entities::prelude::*;
use crate::repository::LedgerRepository;

/// Error types for the ledger store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Recurring rule with id {0} does not exist")]
    UnknownRule(i32),

    #[error("Account with id {0} does not exist")]
    UnknownAccount(i32),

    #[error("Cursor of recurring rule {rule_id} cannot move backwards from {current} to {requested}")]
    CursorRegression {
        rule_id: i32,
        current: NaiveDate,
        requested: NaiveDate,
    },

    #[error("Balance of account {0} would overflow")]
    BalanceOverflow(i32),

    #[error("Duplicate {kind} id {id} in ledger snapshot")]
    DuplicateId { kind: &'static str, id: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot format error: {0}")]
    Format(#[from] serde_yaml::Error),
}

/// Serializable form of the whole ledger, used for seed files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub recurring_rules: Vec<RecurringRule>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub ledger_entries: Vec<LedgerEntry>,
}

impl LedgerSnapshot {
    /// Parses a YAML or JSON document.
    pub fn parse(content: &str) -> Result<Self, StoreError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn to_yaml(&self) -> Result<String, StoreError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Ledger store held entirely in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLedger {
    accounts: BTreeMap<i32, Account>,
    rules: BTreeMap<i32, RecurringRule>,
    debts: BTreeMap<i32, Debt>,
    entries: Vec<LedgerEntry>,
    next_entry_id: i64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self, StoreError> {
        let mut ledger = Self::new();

        for account in snapshot.accounts {
            let id = account.id;
            if ledger.accounts.insert(id, account).is_some() {
                return Err(StoreError::DuplicateId { kind: "account", id });
            }
        }
        for rule in snapshot.recurring_rules {
            let id = rule.id;
            if ledger.rules.insert(id, rule).is_some() {
                return Err(StoreError::DuplicateId { kind: "recurring rule", id });
            }
        }
        for debt in snapshot.debts {
            let id = debt.id;
            if ledger.debts.insert(id, debt).is_some() {
                return Err(StoreError::DuplicateId { kind: "debt", id });
            }
        }

        ledger.next_entry_id = snapshot
            .ledger_entries
            .iter()
            .map(|e| e.id)
            .max()
            .unwrap_or(0)
            + 1;
        ledger.entries = snapshot.ledger_entries;

        debug!(
            "Loaded ledger with {} accounts, {} recurring rules, {} debts, {} entries",
            ledger.accounts.len(),
            ledger.rules.len(),
            ledger.debts.len(),
            ledger.entries.len()
        );
        Ok(ledger)
    }

    pub fn to_snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            accounts: self.accounts(),
            recurring_rules: self.recurring_rules(),
            debts: self.debts(),
            ledger_entries: self.ledger_entries(),
        }
    }

    pub fn insert_account(&mut self, account: Account) {
        self.accounts.insert(account.id, account);
    }

    pub fn insert_rule(&mut self, rule: RecurringRule) {
        self.rules.insert(rule.id, rule);
    }

    pub fn insert_debt(&mut self, debt: Debt) {
        self.debts.insert(debt.id, debt);
    }

    pub fn account(&self, id: i32) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn rule(&self, id: i32) -> Option<&RecurringRule> {
        self.rules.get(&id)
    }
}

impl LedgerRepository for InMemoryLedger {
    fn accounts(&self) -> Vec<Account> {
        self.accounts.values().cloned().collect()
    }

    fn recurring_rules(&self) -> Vec<RecurringRule> {
        self.rules.values().cloned().collect()
    }

    fn debts(&self) -> Vec<Debt> {
        self.debts.values().cloned().collect()
    }

    fn ledger_entries(&self) -> Vec<LedgerEntry> {
        self.entries.clone()
    }

    #[instrument(skip(self, entries), fields(entries = entries.len()))]
    fn record_occurrences(
        &mut self,
        rule_id: i32,
        entries: Vec<NewLedgerEntry>,
        new_cursor: NaiveDate,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let rule = self.rules.get(&rule_id).ok_or(StoreError::UnknownRule(rule_id))?;

        // Validate everything before touching any state.
        if let Some(current) = rule.last_processed_date {
            if new_cursor < current {
                return Err(StoreError::CursorRegression {
                    rule_id,
                    current,
                    requested: new_cursor,
                });
            }
        }
        let mut deltas: BTreeMap<i32, Decimal> = BTreeMap::new();
        for entry in &entries {
            if !self.accounts.contains_key(&entry.account_id) {
                return Err(StoreError::UnknownAccount(entry.account_id));
            }
            let delta = deltas.entry(entry.account_id).or_default();
            *delta = delta
                .checked_add(entry.amount)
                .ok_or(StoreError::BalanceOverflow(entry.account_id))?;
        }
        let mut balances = Vec::with_capacity(deltas.len());
        for (account_id, delta) in deltas {
            let balance = self
                .accounts
                .get(&account_id)
                .ok_or(StoreError::UnknownAccount(account_id))?
                .balance
                .checked_add(delta)
                .ok_or(StoreError::BalanceOverflow(account_id))?;
            trace!("Adjusting account {} balance by {}", account_id, delta);
            balances.push((account_id, balance));
        }

        for (account_id, balance) in balances {
            if let Some(account) = self.accounts.get_mut(&account_id) {
                account.balance = balance;
            }
        }

        let mut stored = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = self.next_entry_id;
            self.next_entry_id += 1;
            let entry = LedgerEntry::from_new(id, entry);
            self.entries.push(entry.clone());
            stored.push(entry);
        }

        if let Some(rule) = self.rules.get_mut(&rule_id) {
            rule.last_processed_date = Some(new_cursor);
        }

        debug!(
            "Recorded {} entries for recurring rule {}, cursor now {}",
            stored.len(),
            rule_id,
            new_cursor
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"
accounts:
  - id: 1
    name: Checking
    balance: "1000.00"
recurring_rules:
  - id: 10
    account_id: 1
    description: Rent
    amount: "800.00"
    kind: expense
    frequency: monthly
    anchor_day: 1
    start_date: 2024-01-01
debts:
  - id: 5
    name: Car loan
    current_balance: "4200"
    minimum_payment: "150"
    interest_rate: "6.5"
"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(amount: Decimal, d: NaiveDate) -> NewLedgerEntry {
        NewLedgerEntry {
            account_id: 1,
            recurring_rule_id: Some(10),
            date: d,
            amount,
            description: "Rent".to_string(),
        }
    }

    #[test]
    fn test_snapshot_from_yaml() {
        let snapshot = LedgerSnapshot::parse(SEED).unwrap();
        assert_eq!(snapshot.accounts.len(), 1);
        assert_eq!(snapshot.recurring_rules[0].frequency, Frequency::Monthly);
        assert_eq!(snapshot.recurring_rules[0].kind, TransactionKind::Expense);
        assert_eq!(snapshot.debts[0].interest_rate, Decimal::new(65, 1));
    }

    #[test]
    fn test_snapshot_rejects_duplicate_ids() {
        let mut snapshot = LedgerSnapshot::parse(SEED).unwrap();
        snapshot.accounts.push(snapshot.accounts[0].clone());
        let err = InMemoryLedger::from_snapshot(snapshot).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { id: 1, .. }));
    }

    #[test]
    fn test_record_occurrences_applies_balance_and_cursor() {
        let mut ledger = InMemoryLedger::from_snapshot(LedgerSnapshot::parse(SEED).unwrap()).unwrap();

        let stored = ledger
            .record_occurrences(
                10,
                vec![
                    entry(Decimal::new(-80000, 2), date(2024, 2, 1)),
                    entry(Decimal::new(-80000, 2), date(2024, 3, 1)),
                ],
                date(2024, 3, 1),
            )
            .unwrap();

        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, 1);
        assert_eq!(stored[1].id, 2);
        assert_eq!(ledger.account(1).unwrap().balance, Decimal::new(-60000, 2));
        assert_eq!(ledger.rule(10).unwrap().last_processed_date, Some(date(2024, 3, 1)));
        assert_eq!(ledger.ledger_entries().len(), 2);
    }

    #[test]
    fn test_record_occurrences_rejects_cursor_regression() {
        let mut ledger = InMemoryLedger::from_snapshot(LedgerSnapshot::parse(SEED).unwrap()).unwrap();
        ledger
            .record_occurrences(10, vec![], date(2024, 3, 1))
            .unwrap();

        let err = ledger
            .record_occurrences(
                10,
                vec![entry(Decimal::new(-80000, 2), date(2024, 2, 1))],
                date(2024, 2, 1),
            )
            .unwrap_err();

        assert!(matches!(err, StoreError::CursorRegression { rule_id: 10, .. }));
        // Nothing was applied
        assert_eq!(ledger.account(1).unwrap().balance, Decimal::new(100000, 2));
        assert!(ledger.ledger_entries().is_empty());
    }

    #[test]
    fn test_record_occurrences_is_atomic_on_unknown_account() {
        let mut ledger = InMemoryLedger::from_snapshot(LedgerSnapshot::parse(SEED).unwrap()).unwrap();
        let mut bad = entry(Decimal::new(-100, 0), date(2024, 2, 1));
        bad.account_id = 99;

        let err = ledger
            .record_occurrences(
                10,
                vec![entry(Decimal::new(-100, 0), date(2024, 2, 1)), bad],
                date(2024, 2, 1),
            )
            .unwrap_err();

        assert!(matches!(err, StoreError::UnknownAccount(99)));
        assert_eq!(ledger.account(1).unwrap().balance, Decimal::new(100000, 2));
        assert_eq!(ledger.rule(10).unwrap().last_processed_date, None);
    }

    #[test]
    fn test_record_occurrences_rejects_balance_overflow() {
        let mut ledger = InMemoryLedger::from_snapshot(LedgerSnapshot::parse(SEED).unwrap()).unwrap();

        let err = ledger
            .record_occurrences(
                10,
                vec![
                    entry(Decimal::MIN, date(2024, 2, 1)),
                    entry(Decimal::MIN, date(2024, 3, 1)),
                ],
                date(2024, 3, 1),
            )
            .unwrap_err();

        assert!(matches!(err, StoreError::BalanceOverflow(1)));
        assert_eq!(ledger.account(1).unwrap().balance, Decimal::new(100000, 2));
        assert_eq!(ledger.rule(10).unwrap().last_processed_date, None);
        assert!(ledger.ledger_entries().is_empty());

        let err = ledger
            .record_occurrences(10, vec![entry(Decimal::MAX, date(2024, 2, 1))], date(2024, 2, 1))
            .unwrap_err();
        assert!(matches!(err, StoreError::BalanceOverflow(1)));
        assert_eq!(ledger.account(1).unwrap().balance, Decimal::new(100000, 2));
    }

    #[test]
    fn test_unknown_rule() {
        let mut ledger = InMemoryLedger::new();
        let err = ledger.record_occurrences(1, vec![], date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, StoreError::UnknownRule(1)));
    }

    #[test]
    fn test_snapshot_round_trip_keeps_entry_ids_increasing() {
        let mut ledger = InMemoryLedger::from_snapshot(LedgerSnapshot::parse(SEED).unwrap()).unwrap();
        ledger
            .record_occurrences(
                10,
                vec![entry(Decimal::new(-80000, 2), date(2024, 2, 1))],
                date(2024, 2, 1),
            )
            .unwrap();

        let yaml = ledger.to_snapshot().to_yaml().unwrap();
        let mut reloaded = InMemoryLedger::from_snapshot(LedgerSnapshot::parse(&yaml).unwrap()).unwrap();
        let stored = reloaded
            .record_occurrences(
                10,
                vec![entry(Decimal::new(-80000, 2), date(2024, 3, 1))],
                date(2024, 3, 1),
            )
            .unwrap();

        assert_eq!(stored[0].id, 2);
        assert_eq!(reloaded.account(1).unwrap().balance, Decimal::new(-60000, 2));
    }
}
