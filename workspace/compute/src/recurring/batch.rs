use chrono::NaiveDate;
use model::LedgerRepository;
use model::entities::prelude::*;
use tracing::{debug, info, instrument, warn};

use super::projector::{ProjectionResult, project_due_dates};
use crate::error::Result;

/// A rule that was skipped during a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleWarning {
    pub rule_id: i32,
    pub message: String,
}

/// Projections of a set of rules. Rules that could not be projected are
/// listed in `warnings` instead.
#[derive(Debug, Clone, Default)]
pub struct BatchProjection {
    pub projections: Vec<(RecurringRule, ProjectionResult)>,
    pub warnings: Vec<RuleWarning>,
}

/// Outcome of [`process_due_rules`].
#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub as_of: NaiveDate,
    /// Number of rules whose projection succeeded, due or not.
    pub rules_processed: usize,
    /// Entries written to the repository, in rule order.
    pub recorded: Vec<LedgerEntry>,
    pub warnings: Vec<RuleWarning>,
}

/// Projects every rule up to `as_of`.
///
/// A misconfigured rule does not abort the batch: it is skipped and
/// reported as a warning. Any other failure is returned as an error.
#[instrument(skip(rules), fields(rules = rules.len(), as_of = %as_of))]
pub fn project_rules(rules: &[RecurringRule], as_of: NaiveDate) -> Result<BatchProjection> {
    let mut batch = BatchProjection::default();

    for rule in rules {
        match project_due_dates(rule, as_of) {
            Ok(projection) => batch.projections.push((rule.clone(), projection)),
            Err(e) if e.is_configuration() => {
                warn!("Skipping recurring rule {}: {}", rule.id, e);
                batch.warnings.push(RuleWarning {
                    rule_id: rule.id,
                    message: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(batch)
}

/// Turns the due dates of a projection into signed ledger entries for the
/// rule's account.
pub fn realize(rule: &RecurringRule, projection: &ProjectionResult) -> Vec<NewLedgerEntry> {
    let amount = rule.signed_amount();
    let description = rule.label();

    projection
        .due_dates
        .iter()
        .map(|date| NewLedgerEntry {
            account_id: rule.account_id,
            recurring_rule_id: Some(rule.id),
            date: *date,
            amount,
            description: description.clone(),
        })
        .collect()
}

/// Materializes every due occurrence of the stored recurring rules.
///
/// Rules are read as snapshots, projected, and each rule's entries and new
/// cursor are written back with one [`LedgerRepository::record_occurrences`]
/// call. A rule the store refuses is reported as a warning; the rules that
/// were already written stay written.
#[instrument(skip(repo), fields(as_of = %as_of))]
pub fn process_due_rules<R>(repo: &mut R, as_of: NaiveDate) -> Result<ProcessReport>
where
    R: LedgerRepository + ?Sized,
{
    let rules = repo.recurring_rules();
    debug!("Processing {} recurring rules", rules.len());

    let batch = project_rules(&rules, as_of)?;
    let mut report = ProcessReport {
        as_of,
        rules_processed: batch.projections.len(),
        recorded: Vec::new(),
        warnings: batch.warnings,
    };

    for (rule, projection) in batch.projections {
        let Some(cursor) = projection.cursor else {
            continue;
        };
        if projection.is_empty() {
            continue;
        }

        let entries = realize(&rule, &projection);
        match repo.record_occurrences(rule.id, entries, cursor) {
            Ok(stored) => report.recorded.extend(stored),
            Err(e) => {
                warn!("Failed to record occurrences of recurring rule {}: {}", rule.id, e);
                report.warnings.push(RuleWarning {
                    rule_id: rule.id,
                    message: e.to_string(),
                });
            }
        }
    }

    info!(
        "Recorded {} occurrences from {} rules ({} warnings)",
        report.recorded.len(),
        report.rules_processed,
        report.warnings.len()
    );
    Ok(report)
}
