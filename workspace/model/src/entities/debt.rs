use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A debt as kept by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub id: i32,
    pub name: String,
    pub current_balance: Decimal,
    pub minimum_payment: Decimal,
    /// Nominal annual interest rate in percent (e.g. 19.99).
    pub interest_rate: Decimal,
}

impl Debt {
    /// Detached copy of the figures the payoff simulation needs.
    pub fn snapshot(&self) -> DebtSnapshot {
        DebtSnapshot {
            name: self.name.clone(),
            current_balance: self.current_balance,
            minimum_payment: self.minimum_payment,
            interest_rate: self.interest_rate,
        }
    }

    pub fn is_active(&self) -> bool {
        self.current_balance > Decimal::ZERO
    }
}

/// Value object handed to the debt payoff simulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtSnapshot {
    pub name: String,
    pub current_balance: Decimal,
    pub minimum_payment: Decimal,
    /// Nominal annual interest rate in percent.
    pub interest_rate: Decimal,
}

impl DebtSnapshot {
    pub fn new(
        name: impl Into<String>,
        current_balance: Decimal,
        minimum_payment: Decimal,
        interest_rate: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            current_balance,
            minimum_payment,
            interest_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_copies_figures() {
        let debt = Debt {
            id: 3,
            name: "Visa".to_string(),
            current_balance: Decimal::new(150000, 2),
            minimum_payment: Decimal::new(4500, 2),
            interest_rate: Decimal::new(1999, 2),
        };

        let snapshot = debt.snapshot();
        assert_eq!(snapshot.name, "Visa");
        assert_eq!(snapshot.current_balance, debt.current_balance);
        assert_eq!(snapshot.minimum_payment, debt.minimum_payment);
        assert_eq!(snapshot.interest_rate, debt.interest_rate);
        assert!(debt.is_active());
    }
}
