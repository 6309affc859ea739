use chrono::NaiveDate;
use model::entities::debt::DebtSnapshot;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::simulator::{SimulationPlan, simulate};
use super::strategy::DebtStrategy;
use crate::error::Result;

/// Both payoff plans for the same set of debts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyComparison {
    pub snowball: SimulationPlan,
    pub avalanche: SimulationPlan,
}

impl StrategyComparison {
    pub fn plan(&self, strategy: DebtStrategy) -> &SimulationPlan {
        match strategy {
            DebtStrategy::Snowball => &self.snowball,
            DebtStrategy::Avalanche => &self.avalanche,
        }
    }

    /// Interest avoided by choosing Avalanche over Snowball. Negative when
    /// Snowball is cheaper, `None` when either plan did not complete.
    pub fn interest_saved_by_avalanche(&self) -> Option<Decimal> {
        if self.snowball.months().is_none() || self.avalanche.months().is_none() {
            return None;
        }
        Some(self.snowball.total_interest - self.avalanche.total_interest)
    }

    /// The completed strategy that finishes first, preferring lower interest
    /// when both take the same number of months.
    pub fn recommended(&self) -> Option<DebtStrategy> {
        let snowball = self.snowball.months()?;
        let avalanche = self.avalanche.months()?;
        let pick = match avalanche.cmp(&snowball) {
            std::cmp::Ordering::Less => DebtStrategy::Avalanche,
            std::cmp::Ordering::Greater => DebtStrategy::Snowball,
            std::cmp::Ordering::Equal if self.avalanche.total_interest < self.snowball.total_interest => {
                DebtStrategy::Avalanche
            }
            std::cmp::Ordering::Equal => DebtStrategy::Snowball,
        };
        Some(pick)
    }
}

/// Runs both strategies over the same debts with the same extra payment.
#[instrument(skip(debts), fields(debts = debts.len(), extra_payment = %extra_payment))]
pub fn compare_strategies(
    debts: &[DebtSnapshot],
    extra_payment: Decimal,
    start_date: NaiveDate,
) -> Result<StrategyComparison> {
    let snowball = simulate(debts, extra_payment, DebtStrategy::Snowball, start_date)?;
    let avalanche = simulate(debts, extra_payment, DebtStrategy::Avalanche, start_date)?;
    debug!(
        "Snowball: {}, Avalanche: {}",
        snowball.summary(),
        avalanche.summary()
    );
    Ok(StrategyComparison { snowball, avalanche })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, debt};

    #[test]
    fn test_avalanche_saves_interest_on_expensive_debt() {
        let debts = [debt("Low", 1000, 30, 5), debt("High", 1000, 30, 20)];

        let comparison = compare_strategies(&debts, Decimal::new(200, 0), date(2024, 1, 1)).unwrap();

        let saved = comparison.interest_saved_by_avalanche().unwrap();
        assert!(saved > Decimal::ZERO);
        assert_eq!(comparison.snowball.months(), Some(9));
        assert_eq!(comparison.avalanche.months(), Some(9));
        assert_eq!(comparison.recommended(), Some(DebtStrategy::Avalanche));
        assert_eq!(comparison.plan(DebtStrategy::Snowball).strategy, DebtStrategy::Snowball);
    }

    #[test]
    fn test_identical_plans_recommend_snowball() {
        let debts = [debt("A", 1000, 50, 12), debt("B", 500, 25, 24)];

        let comparison = compare_strategies(&debts, Decimal::new(100, 0), date(2024, 1, 1)).unwrap();

        assert_eq!(comparison.snowball.entries, comparison.avalanche.entries);
        assert_eq!(comparison.interest_saved_by_avalanche(), Some(Decimal::ZERO));
        assert_eq!(comparison.recommended(), Some(DebtStrategy::Snowball));
    }

    #[test]
    fn test_runaway_has_no_recommendation() {
        let comparison =
            compare_strategies(&[debt("Card", 1000, 5, 24)], Decimal::ZERO, date(2024, 1, 1)).unwrap();

        assert!(comparison.snowball.is_runaway());
        assert!(comparison.avalanche.is_runaway());
        assert_eq!(comparison.interest_saved_by_avalanche(), None);
        assert_eq!(comparison.recommended(), None);
    }
}
