//! pulsa_server Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod projection;

mod error;

pub use config::Config;
pub use domain::{Balance, DomainError, OperationContext, Order, OrderLine};
pub use error::{AppError, AppResult, ErrorResponse};
