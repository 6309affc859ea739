use anyhow::{Context, Result};
use chrono::NaiveDate;
use common::money::format_amount;
use compute::project_due_dates;
use model::entities::recurring_rule::RecurringRule;
use std::fmt::Write;
use std::path::Path;
use tracing::{debug, info};

/// Projects the rule stored in `rule_file` and renders the due dates.
pub fn project(rule_file: &Path, as_of: NaiveDate, currency: &str) -> Result<String> {
    debug!("Reading recurring rule from {}", rule_file.display());
    let content = std::fs::read_to_string(rule_file)
        .with_context(|| format!("Failed to read {}", rule_file.display()))?;
    let rule: RecurringRule = serde_yaml::from_str(&content)
        .with_context(|| format!("Invalid recurring rule in {}", rule_file.display()))?;

    let projection = project_due_dates(&rule, as_of)?;
    info!("{} due dates for '{}' up to {}", projection.due_dates.len(), rule.label(), as_of);

    let mut out = String::new();
    writeln!(out, "{} ({}) up to {}", rule.label(), rule.frequency.as_str(), as_of)?;
    for date in &projection.due_dates {
        writeln!(out, "  {}  {}", date, format_amount(rule.signed_amount(), currency))?;
    }
    let total = projection.total_amount(rule.signed_amount())?;
    writeln!(
        out,
        "{} occurrences, total {}",
        projection.due_dates.len(),
        format_amount(total, currency)
    )?;
    match projection.cursor {
        Some(cursor) => writeln!(out, "last processed date: {}", cursor)?,
        None => writeln!(out, "last processed date: none")?,
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_project_rule_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            "id: 1\naccount_id: 1\ndescription: Rent\namount: \"1200\"\nkind: expense\n\
             frequency: monthly\nanchor_day: 31\nstart_date: 2024-01-01\n"
        )
        .unwrap();

        let output = project(file.path(), NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(), "USD").unwrap();

        assert!(output.contains("2024-01-31"));
        assert!(output.contains("2024-02-29"));
        assert!(output.contains("2024-04-30"));
        assert!(output.contains("4 occurrences"));
        assert!(output.contains("last processed date: 2024-04-30"));
    }

    #[test]
    fn test_misconfigured_rule_fails() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"id": 2, "account_id": 1, "amount": "10", "kind": "income", "frequency": "annual", "anchor_day": 1, "start_date": "2024-01-01"}}"#
        )
        .unwrap();

        let err = project(file.path(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), "USD").unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }
}
