//! Debt payoff simulation under Snowball and Avalanche ordering.

pub use self::comparison::{StrategyComparison, compare_strategies};
pub use self::simulator::{
    MAX_SIMULATION_MONTHS, NO_ACTIVE_DEBTS, PlanEntry, PlanOutcome, RUNAWAY_SUMMARY,
    SimulationPlan, simulate,
};
pub use self::strategy::DebtStrategy;

pub mod comparison;
pub mod simulator;
pub mod strategy;
