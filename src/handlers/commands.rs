//! Command definitions
//!
//! Commands represent intentions to change the system state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Command to submit a customer order against a merchant balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOrderCommand {
    pub merchant_id: Uuid,
    pub user_id: Uuid,
    pub customer_name: String,
    pub destination_number: String,
    /// dd-mm-yyyy, parsed before the store is touched
    pub transaction_date: String,
    pub lines: Vec<OrderLineCommand>,
}

impl SubmitOrderCommand {
    pub fn new(
        merchant_id: Uuid,
        user_id: Uuid,
        customer_name: String,
        destination_number: String,
        transaction_date: String,
    ) -> Self {
        Self {
            merchant_id,
            user_id,
            customer_name,
            destination_number,
            transaction_date,
            lines: Vec::new(),
        }
    }

    /// Add a product line priced at the catalog sell price
    pub fn with_product(mut self, product_id: Uuid) -> Self {
        self.lines.push(OrderLineCommand {
            product_id,
            price: None,
        });
        self
    }

    /// Add a product line carrying a caller-quoted price
    pub fn with_quoted_product(mut self, product_id: Uuid, price: Decimal) -> Self {
        self.lines.push(OrderLineCommand {
            product_id,
            price: Some(price),
        });
        self
    }
}

/// One requested product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineCommand {
    pub product_id: Uuid,
    /// Caller-quoted price. Informational only; the line is charged the
    /// catalog sell price.
    #[serde(default)]
    pub price: Option<Decimal>,
}
