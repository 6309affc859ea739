use anyhow::{Context, Result};
use chrono::NaiveDate;
use common::money::format_amount;
use compute::process_due_rules;
use model::{InMemoryLedger, LedgerRepository, LedgerSnapshot};
use std::fmt::Write;
use std::path::Path;
use tracing::{info, warn};

/// Books the due recurring occurrences of the ledger in `data_file`.
/// With `write`, the updated ledger replaces the file.
pub fn process(data_file: &Path, as_of: NaiveDate, write: bool, currency: &str) -> Result<String> {
    let snapshot = LedgerSnapshot::load(data_file)
        .with_context(|| format!("Failed to read ledger file {}", data_file.display()))?;
    let mut ledger = InMemoryLedger::from_snapshot(snapshot)?;

    let report = process_due_rules(&mut ledger, as_of)?;

    let mut out = String::new();
    writeln!(
        out,
        "Processed {} recurring rules up to {}",
        report.rules_processed, as_of
    )?;
    for entry in &report.recorded {
        writeln!(
            out,
            "  {}  account {}  {}  {}",
            entry.date,
            entry.account_id,
            format_amount(entry.amount, currency),
            entry.description
        )?;
    }
    for warning in &report.warnings {
        writeln!(out, "  skipped rule {}: {}", warning.rule_id, warning.message)?;
    }
    for account in ledger.accounts() {
        writeln!(out, "{}: {}", account.name, format_amount(account.balance, currency))?;
    }

    if write {
        let yaml = ledger.to_snapshot().to_yaml()?;
        std::fs::write(data_file, yaml)
            .with_context(|| format!("Failed to write ledger file {}", data_file.display()))?;
        info!("Wrote {} new entries to {}", report.recorded.len(), data_file.display());
    } else if !report.recorded.is_empty() {
        warn!("Dry run: {} entries were not saved, pass --write to keep them", report.recorded.len());
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write as _;

    const LEDGER: &str = r#"
accounts:
  - id: 1
    name: Checking
    balance: "1000.00"
recurring_rules:
  - id: 10
    account_id: 1
    description: Salary
    amount: "2000.00"
    kind: income
    frequency: semi_monthly
    anchor_day: 1
    anchor_day_2: 15
    start_date: 2024-01-01
  - id: 11
    account_id: 1
    description: Insurance
    amount: "300.00"
    kind: expense
    frequency: annual
    anchor_day: 10
    start_date: 2024-01-01
"#;

    fn ledger_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "{}", LEDGER).unwrap();
        file
    }

    #[test]
    fn test_process_dry_run_leaves_file_untouched() {
        let file = ledger_file();

        let output = process(file.path(), NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(), false, "USD").unwrap();

        assert!(output.contains("Processed 1 recurring rules"));
        assert!(output.contains("2024-01-15"));
        assert!(output.contains("2024-02-15"));
        assert!(output.contains("skipped rule 11"));
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), LEDGER);
    }

    #[test]
    fn test_process_write_is_idempotent() {
        let file = ledger_file();
        let as_of = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();

        process(file.path(), as_of, true, "USD").unwrap();
        let saved = LedgerSnapshot::load(file.path()).unwrap();
        assert_eq!(saved.ledger_entries.len(), 3);
        assert_eq!(saved.accounts[0].balance, Decimal::new(700000, 2));
        assert_eq!(
            saved.recurring_rules[0].last_processed_date,
            NaiveDate::from_ymd_opt(2024, 2, 15)
        );

        process(file.path(), as_of, true, "USD").unwrap();
        let again = LedgerSnapshot::load(file.path()).unwrap();
        assert_eq!(again, saved);
    }
}
