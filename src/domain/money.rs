//! Merchant balance
//!
//! Domain primitive for the merchant's debitable balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::DomainError;

/// Balance represents a merchant balance (zero or positive).
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use pulsa_server::domain::Balance;
///
/// let balance = Balance::new(Decimal::new(100, 0)).unwrap();
/// assert!(balance.is_sufficient_for(Decimal::new(100, 0)));
/// assert!(!balance.is_sufficient_for(Decimal::new(101, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Balance(Decimal);

impl Balance {
    /// Create a new balance, rejecting negative values
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value < Decimal::ZERO {
            return Err(DomainError::InvalidAmount(format!(
                "balance cannot be negative (got {})",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Create a zero balance
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Check if the balance covers `required`
    pub fn is_sufficient_for(&self, required: Decimal) -> bool {
        self.0 >= required
    }

    /// Balance left after debiting `amount`
    pub fn debit(&self, amount: Decimal) -> Result<Balance, DomainError> {
        if !self.is_sufficient_for(amount) {
            return Err(DomainError::insufficient_funds(amount, self.0));
        }
        Balance::new(self.0 - amount)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Default for Balance {
    fn default() -> Self {
        Self::zero()
    }
}
