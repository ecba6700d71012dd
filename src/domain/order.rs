//! Order types
//!
//! The result of a successful submission: a header plus its priced lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted order (the `transactions` row and its lines)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub merchant_id: Uuid,
    pub user_id: Uuid,
    pub customer_name: String,
    pub destination_number: String,
    /// dd-mm-yyyy
    pub transaction_date: String,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Sum of the sell prices charged to the customer.
    ///
    /// Not the amount debited from the merchant, which is the nominal total.
    pub fn total_charged(&self) -> Decimal {
        self.lines.iter().map(|line| line.price).sum()
    }
}

/// One product within an order, priced from the catalog at insert time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub price: Decimal,
}
