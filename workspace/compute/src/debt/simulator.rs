use chrono::NaiveDate;
use model::entities::debt::DebtSnapshot;
use rust_decimal::Decimal;
use tracing::{debug, instrument, trace, warn};

use super::strategy::DebtStrategy;
use crate::error::{ComputeError, Result};
use crate::recurring::calendar::add_months;

/// Upper bound on simulated months (100 years).
pub const MAX_SIMULATION_MONTHS: u32 = 1200;

pub const NO_ACTIVE_DEBTS: &str = "no active debts";

pub const RUNAWAY_SUMMARY: &str = "calculation exceeded 100 years";

/// A month in which at least one debt reached zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// 1-based simulated month.
    pub month: u32,
    /// Calendar label of the month, counted from the simulation start date.
    pub date: NaiveDate,
    /// Debts cleared this month, in the order they were cleared.
    pub paid_off: Vec<String>,
    /// Sum of balances still outstanding after this month.
    pub remaining_balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    NoActiveDebts,
    Completed { months: u32 },
    /// The debts did not clear within [`MAX_SIMULATION_MONTHS`], typically
    /// because minimum payments do not cover the interest.
    Runaway { months: u32 },
}

/// Result of a payoff simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationPlan {
    pub strategy: DebtStrategy,
    pub start_date: NaiveDate,
    pub entries: Vec<PlanEntry>,
    pub outcome: PlanOutcome,
    pub total_interest: Decimal,
    pub total_paid: Decimal,
}

impl SimulationPlan {
    fn empty(strategy: DebtStrategy, start_date: NaiveDate, outcome: PlanOutcome) -> Self {
        Self {
            strategy,
            start_date,
            entries: Vec::new(),
            outcome,
            total_interest: Decimal::ZERO,
            total_paid: Decimal::ZERO,
        }
    }

    /// `"N years, M months"` for a completed plan, otherwise a fixed sentence.
    pub fn summary(&self) -> String {
        match self.outcome {
            PlanOutcome::NoActiveDebts => NO_ACTIVE_DEBTS.to_string(),
            PlanOutcome::Completed { months } => {
                format!("{} years, {} months", months / 12, months % 12)
            }
            PlanOutcome::Runaway { .. } => RUNAWAY_SUMMARY.to_string(),
        }
    }

    /// Months until every debt is cleared, for completed plans.
    pub fn months(&self) -> Option<u32> {
        match self.outcome {
            PlanOutcome::Completed { months } => Some(months),
            _ => None,
        }
    }

    pub fn is_runaway(&self) -> bool {
        matches!(self.outcome, PlanOutcome::Runaway { .. })
    }

    /// Month in which the named debt was cleared.
    pub fn payoff_month(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.paid_off.iter().any(|n| n == name))
            .map(|e| e.month)
    }
}

/// Private working copy of a debt.
#[derive(Debug, Clone)]
struct WorkingDebt {
    name: String,
    balance: Decimal,
    minimum_payment: Decimal,
    monthly_rate: Decimal,
}

impl WorkingDebt {
    fn from_snapshot(snapshot: &DebtSnapshot) -> Self {
        Self {
            name: snapshot.name.clone(),
            balance: snapshot.current_balance,
            minimum_payment: snapshot.minimum_payment,
            monthly_rate: snapshot.interest_rate / Decimal::ONE_HUNDRED / Decimal::from(12),
        }
    }

    fn is_active(&self) -> bool {
        self.balance > Decimal::ZERO
    }

    /// Adds one month of interest. Returns `None` on decimal overflow.
    fn accrue_interest(&mut self) -> Option<Decimal> {
        let interest = self.balance.checked_mul(self.monthly_rate)?;
        self.balance = self.balance.checked_add(interest)?;
        Some(interest)
    }

    /// Pays up to `amount` and returns what was actually paid.
    fn pay(&mut self, amount: Decimal) -> Decimal {
        let payment = self.balance.min(amount);
        self.balance -= payment;
        payment
    }
}

fn validate(debts: &[DebtSnapshot], extra_payment: Decimal) -> Result<()> {
    if extra_payment < Decimal::ZERO {
        return Err(ComputeError::InvalidInput(format!(
            "Extra payment must not be negative, got {}",
            extra_payment
        )));
    }
    for debt in debts {
        if debt.current_balance < Decimal::ZERO
            || debt.minimum_payment < Decimal::ZERO
            || debt.interest_rate < Decimal::ZERO
        {
            return Err(ComputeError::InvalidInput(format!(
                "Debt '{}' has a negative balance, minimum payment or interest rate",
                debt.name
            )));
        }
    }
    Ok(())
}

/// Simulates paying off `debts` month by month.
///
/// Each month every open debt accrues `rate / 100 / 12` interest, then
/// receives its minimum payment, then `extra_payment` is spent on the debts
/// in `strategy` order. When the extra payment clears a debt, that debt's
/// minimum payment is added to what is left for the rest of the month.
///
/// The simulation works on private copies of `debts`; the snapshots passed
/// in are never modified. Debts with a zero balance are ignored. When the
/// debts are not cleared within [`MAX_SIMULATION_MONTHS`] the plan has no
/// entries and a [`PlanOutcome::Runaway`] outcome.
#[instrument(skip(debts), fields(debts = debts.len(), extra_payment = %extra_payment, strategy = %strategy))]
pub fn simulate(
    debts: &[DebtSnapshot],
    extra_payment: Decimal,
    strategy: DebtStrategy,
    start_date: NaiveDate,
) -> Result<SimulationPlan> {
    validate(debts, extra_payment)?;

    let mut working: Vec<WorkingDebt> = debts
        .iter()
        .filter(|d| d.current_balance > Decimal::ZERO)
        .map(WorkingDebt::from_snapshot)
        .collect();

    if working.is_empty() {
        debug!("No active debts to simulate");
        return Ok(SimulationPlan::empty(strategy, start_date, PlanOutcome::NoActiveDebts));
    }

    strategy.prioritize(&mut working, |d| d.balance, |d| d.monthly_rate);
    trace!(
        "Priority order: {:?}",
        working.iter().map(|d| d.name.as_str()).collect::<Vec<_>>()
    );

    let runaway = |months: u32| {
        SimulationPlan::empty(strategy, start_date, PlanOutcome::Runaway { months })
    };

    let mut plan = SimulationPlan::empty(strategy, start_date, PlanOutcome::NoActiveDebts);
    let mut month: u32 = 0;

    while working.iter().any(WorkingDebt::is_active) {
        if month >= MAX_SIMULATION_MONTHS {
            warn!(
                "Debt simulation ({}) did not finish within {} months",
                strategy, MAX_SIMULATION_MONTHS
            );
            return Ok(runaway(month));
        }
        month += 1;
        let mut paid_off = Vec::new();

        for debt in working.iter_mut().filter(|d| d.is_active()) {
            let Some(interest) = debt.accrue_interest() else {
                warn!("Balance of debt '{}' overflowed in month {}", debt.name, month);
                return Ok(runaway(month));
            };
            let Some(total) = plan.total_interest.checked_add(interest) else {
                return Ok(runaway(month));
            };
            plan.total_interest = total;
        }

        for debt in working.iter_mut().filter(|d| d.is_active()) {
            let payment = debt.pay(debt.minimum_payment);
            let Some(total) = plan.total_paid.checked_add(payment) else {
                warn!("Total paid overflowed in month {}", month);
                return Ok(runaway(month));
            };
            plan.total_paid = total;
            if !debt.is_active() {
                paid_off.push(debt.name.clone());
            }
        }

        let mut available = extra_payment;
        for debt in working.iter_mut().filter(|d| d.is_active()) {
            let payment = debt.pay(available);
            available -= payment;
            let Some(total) = plan.total_paid.checked_add(payment) else {
                warn!("Total paid overflowed in month {}", month);
                return Ok(runaway(month));
            };
            plan.total_paid = total;
            if !debt.is_active() {
                // Freed minimum joins the rest of this month's cascade
                let Some(freed) = available.checked_add(debt.minimum_payment) else {
                    return Ok(runaway(month));
                };
                available = freed;
                paid_off.push(debt.name.clone());
            }
        }

        if !paid_off.is_empty() {
            let date = add_months(start_date, month - 1).ok_or_else(|| {
                ComputeError::Date(format!("Cannot label simulated month {} from {}", month, start_date))
            })?;
            let Some(remaining_balance) = working
                .iter()
                .filter(|d| d.is_active())
                .try_fold(Decimal::ZERO, |acc, d| acc.checked_add(d.balance))
            else {
                return Ok(runaway(month));
            };
            trace!("Month {}: paid off {:?}, {} remaining", month, paid_off, remaining_balance);
            plan.entries.push(PlanEntry {
                month,
                date,
                paid_off,
                remaining_balance,
            });
        }
    }

    plan.outcome = PlanOutcome::Completed { months: month };
    debug!("Debt simulation ({}) finished: {}", strategy, plan.summary());
    Ok(plan)
}
