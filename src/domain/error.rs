//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use rust_decimal::Decimal;
use thiserror::Error;

/// Domain-specific errors
///
/// Validation failures are raised before the store is touched; business rule
/// rejections (insufficient funds) are raised inside the atomic unit, which
/// rolls back when the returning handler drops it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Transaction date is not in strict dd-mm-yyyy form
    #[error("Invalid date format. Please use dd-mm-yyyy format: {value}")]
    InvalidDate { value: String },

    /// Order has no product lines
    #[error("Order must contain at least one product")]
    EmptyOrder,

    /// Merchant balance does not cover the order's nominal total
    #[error("Insufficient merchant balance: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    /// Invalid monetary amount (e.g. a negative balance)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl DomainError {
    /// Create an invalid date error
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Create an insufficient funds error
    pub fn insufficient_funds(required: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }
}
