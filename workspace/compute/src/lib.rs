pub mod debt;
pub mod error;
pub mod recurring;

#[cfg(test)]
pub(crate) mod testing;

pub use debt::{
    DebtStrategy, MAX_SIMULATION_MONTHS, PlanEntry, PlanOutcome, SimulationPlan,
    StrategyComparison, compare_strategies, simulate,
};
pub use error::{ComputeError, Result};
pub use recurring::{
    BatchProjection, ProcessReport, ProjectionResult, RuleWarning, process_due_rules,
    project_due_dates, project_rules, realize,
};
