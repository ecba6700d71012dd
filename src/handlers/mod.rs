//! Command Handlers module
//!
//! Handlers that run state-changing operations against the store.

mod commands;
mod submit_handler;


pub use commands::*;
pub use submit_handler::SubmitOrderHandler;
