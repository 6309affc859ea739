use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a financial account, like a bank account, credit card, or cash wallet.
/// Realized recurring transactions adjust `balance`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub balance: Decimal,
}
