//! Order History Service
//!
//! Read paths over recorded orders. Queries take no locks, so they may see a
//! balance or order that an in-flight submission is about to change.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

use super::builder::{OrderDetailBuilder, OrderHistoryBuilder};
use super::view::{OrderAggregate, OrderRow};

const ORDER_ROW_COLUMNS: &str = r#"
    t.transaction_id, t.customer_name, t.destination_number, t.transaction_date,
    u.id_user, u.username, u.role,
    m.id_merchant, m.name_merchant, m.address,
    td.transaction_detail_id, td.price AS line_price,
    p.id_product, p.name_provider, p.nominal, p.price AS product_price
FROM transactions t
JOIN mst_user u ON t.id_user = u.id_user
JOIN mst_merchant m ON t.id_merchant = m.id_merchant
JOIN transaction_detail td ON t.transaction_id = td.transaction_id
JOIN mst_product p ON td.id_product = p.id_product
"#;

/// Service answering order history queries
#[derive(Debug, Clone)]
pub struct OrderHistoryService {
    pool: PgPool,
}

impl OrderHistoryService {
    /// Create a new OrderHistoryService
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All orders of the merchants owned by `user_id`, newest transaction date first
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<OrderAggregate>, AppError> {
        tracing::info!(user_id = %user_id, "Retrieving order history");

        let query = format!(
            "SELECT {} WHERE m.id_user = $1 \
             ORDER BY t.transaction_date DESC, t.created_at DESC, t.transaction_id, td.line_seq",
            ORDER_ROW_COLUMNS
        );

        let rows: Vec<OrderRow> = sqlx::query_as(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user_id, "Failed to retrieve order history: {}", e);
                e
            })?;

        let orders = rows.into_iter().collect::<OrderHistoryBuilder>().build();

        tracing::info!(user_id = %user_id, orders = orders.len(), "Order history retrieved");
        Ok(orders)
    }

    /// One order with all its lines.
    ///
    /// An unknown id yields a zero-valued aggregate rather than an error.
    pub async fn get_by_id(&self, order_id: Uuid) -> Result<OrderAggregate, AppError> {
        tracing::info!(order_id = %order_id, "Retrieving order");

        let query = format!(
            "SELECT {} WHERE t.transaction_id = $1 ORDER BY td.line_seq",
            ORDER_ROW_COLUMNS
        );

        let rows: Vec<OrderRow> = sqlx::query_as(&query)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(order_id = %order_id, "Failed to retrieve order: {}", e);
                e
            })?;

        let mut builder = OrderDetailBuilder::new();
        for row in rows {
            builder.push(row);
        }
        let order = builder.build();

        if order.is_empty() {
            tracing::debug!(order_id = %order_id, "No rows for order");
        }
        Ok(order)
    }
}
