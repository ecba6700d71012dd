//! Read models
//!
//! Nested order shape returned by the history queries, and the flat joined
//! row they are rebuilt from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order with its user, merchant and lines embedded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderAggregate {
    pub id: Uuid,
    pub customer_name: String,
    pub destination_number: String,
    /// dd-mm-yyyy; empty on a zero-valued aggregate
    pub transaction_date: String,
    pub user: UserSummary,
    pub merchant: MerchantSummary,
    pub lines: Vec<OrderLineView>,
}

impl OrderAggregate {
    /// True when no rows were found for the requested order
    pub fn is_empty(&self) -> bool {
        self.id.is_nil() && self.lines.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MerchantSummary {
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineView {
    pub id: Uuid,
    pub order_id: Uuid,
    /// Price charged when the line was recorded
    pub price: Decimal,
    pub product: ProductSummary,
}

/// Product as it is in the catalog now
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: Uuid,
    pub provider_name: String,
    pub nominal: Decimal,
    pub price: Decimal,
}

/// One row of the order ⨝ user ⨝ merchant ⨝ line ⨝ product join
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct OrderRow {
    pub transaction_id: Uuid,
    pub customer_name: String,
    pub destination_number: String,
    pub transaction_date: NaiveDate,
    pub id_user: Uuid,
    pub username: String,
    pub role: String,
    pub id_merchant: Uuid,
    pub name_merchant: String,
    pub address: String,
    pub transaction_detail_id: Uuid,
    pub line_price: Decimal,
    pub id_product: Uuid,
    pub name_provider: String,
    pub nominal: Decimal,
    pub product_price: Decimal,
}
