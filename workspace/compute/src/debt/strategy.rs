use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ComputeError;

/// Order in which debts receive the extra payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebtStrategy {
    /// Smallest balance first.
    Snowball,
    /// Highest interest rate first.
    Avalanche,
}

impl DebtStrategy {
    pub const ALL: [DebtStrategy; 2] = [DebtStrategy::Snowball, DebtStrategy::Avalanche];

    pub fn as_str(&self) -> &'static str {
        match self {
            DebtStrategy::Snowball => "snowball",
            DebtStrategy::Avalanche => "avalanche",
        }
    }

    /// Sorts `items` into priority order. The sort is stable, so items that
    /// tie keep their input order.
    pub fn prioritize<T>(
        &self,
        items: &mut [T],
        balance: impl Fn(&T) -> Decimal,
        interest_rate: impl Fn(&T) -> Decimal,
    ) {
        match self {
            DebtStrategy::Snowball => items.sort_by(|a, b| balance(a).cmp(&balance(b))),
            DebtStrategy::Avalanche => {
                items.sort_by(|a, b| interest_rate(b).cmp(&interest_rate(a)))
            }
        }
    }
}

impl fmt::Display for DebtStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DebtStrategy {
    type Err = ComputeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snowball" => Ok(DebtStrategy::Snowball),
            "avalanche" => Ok(DebtStrategy::Avalanche),
            other => Err(ComputeError::InvalidInput(format!(
                "Unknown debt strategy '{}'",
                other
            ))),
        }
    }
}
