//! Projection module
//!
//! Read side: rebuilds nested orders from the normalized tables.

pub mod builder;
mod service;
pub mod view;

pub use builder::{OrderDetailBuilder, OrderHistoryBuilder};
pub use service::OrderHistoryService;
pub use view::{
    MerchantSummary, OrderAggregate, OrderLineView, OrderRow, ProductSummary, UserSummary,
};
