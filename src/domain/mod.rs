//! Domain module
//!
//! Core domain types and business rules.

pub mod context;
pub mod date;
pub mod error;
pub mod money;
pub mod order;

pub use context::OperationContext;
pub use date::{format_transaction_date, parse_transaction_date};
pub use error::DomainError;
pub use money::Balance;
pub use order::{Order, OrderLine};
