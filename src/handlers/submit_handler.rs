//! Submit Order Handler
//!
//! Records a customer order and debits the merchant balance in one database
//! transaction.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::{
    format_transaction_date, parse_transaction_date, Balance, DomainError, OperationContext,
    Order, OrderLine,
};
use crate::error::AppError;

use super::SubmitOrderCommand;

/// Handler for order submission
#[derive(Debug, Clone)]
pub struct SubmitOrderHandler {
    pool: PgPool,
}

impl SubmitOrderHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Execute the submit command.
    ///
    /// Steps, all inside one transaction:
    /// 1. lock the merchant row (`FOR UPDATE`) and read its balance
    /// 2. sum the catalog nominal of every line
    /// 3. reject with `InsufficientFunds` if the balance does not cover it
    /// 4. insert the order header
    /// 5. insert each line at the catalog sell price
    /// 6. debit the merchant by the nominal total
    /// 7. commit
    ///
    /// Any error before commit drops the transaction, which rolls it back.
    pub async fn execute(
        &self,
        command: SubmitOrderCommand,
        context: &OperationContext,
    ) -> Result<Order, AppError> {
        tracing::info!(
            merchant_id = %command.merchant_id,
            user_id = %command.user_id,
            lines = command.lines.len(),
            request_user_id = ?context.request_user_id,
            correlation_id = ?context.correlation_id,
            "Submitting order"
        );

        let transaction_date = parse_transaction_date(&command.transaction_date).map_err(|e| {
            tracing::error!(value = %command.transaction_date, "Invalid transaction date");
            e
        })?;

        if command.lines.is_empty() {
            return Err(DomainError::EmptyOrder.into());
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to start database transaction: {}", e);
            e
        })?;

        let balance = lock_merchant_balance(&mut tx, command.merchant_id).await?;

        let mut total_nominal = Decimal::ZERO;
        for line in &command.lines {
            total_nominal += product_nominal(&mut tx, line.product_id).await?;
        }

        let remaining = match balance.debit(total_nominal) {
            Ok(remaining) => remaining,
            Err(err) => {
                tracing::warn!(
                    merchant_id = %command.merchant_id,
                    required = %total_nominal,
                    available = %balance,
                    "Insufficient merchant balance"
                );
                return Err(err.into());
            }
        };

        let order_id = insert_order_header(&mut tx, &command, transaction_date).await?;

        let mut lines = Vec::with_capacity(command.lines.len());
        for line in &command.lines {
            let (line_id, price) = insert_order_line(&mut tx, order_id, line.product_id).await?;

            if let Some(quoted) = line.price.filter(|quoted| *quoted != price) {
                tracing::debug!(
                    product_id = %line.product_id,
                    quoted = %quoted,
                    charged = %price,
                    "Caller price replaced by catalog price"
                );
            }

            lines.push(OrderLine {
                id: line_id,
                order_id,
                product_id: line.product_id,
                price,
            });
        }

        let new_balance = debit_merchant(&mut tx, command.merchant_id, total_nominal).await?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit order transaction: {}", e);
            e
        })?;

        tracing::info!(
            order_id = %order_id,
            merchant_id = %command.merchant_id,
            debited = %total_nominal,
            new_balance = %new_balance,
            expected_balance = %remaining,
            "Order created with updated merchant balance"
        );

        Ok(Order {
            id: order_id,
            merchant_id: command.merchant_id,
            user_id: command.user_id,
            customer_name: command.customer_name,
            destination_number: command.destination_number,
            transaction_date: format_transaction_date(transaction_date),
            lines,
        })
    }
}

/// Lock the merchant row for the rest of the transaction and read its balance
async fn lock_merchant_balance(
    tx: &mut Transaction<'_, Postgres>,
    merchant_id: Uuid,
) -> Result<Balance, AppError> {
    let balance: Decimal = sqlx::query_scalar(
        "SELECT balance FROM mst_merchant WHERE id_merchant = $1 FOR UPDATE",
    )
    .bind(merchant_id)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| {
        tracing::error!(merchant_id = %merchant_id, "Failed to fetch merchant balance: {}", e);
        e
    })?;

    Ok(Balance::new(balance)?)
}

/// Face value of a product; this is what the merchant pays
async fn product_nominal(
    tx: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
) -> Result<Decimal, AppError> {
    let nominal: Decimal = sqlx::query_scalar("SELECT nominal FROM mst_product WHERE id_product = $1")
        .bind(product_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            tracing::error!(product_id = %product_id, "Failed to fetch product nominal: {}", e);
            e
        })?;

    Ok(nominal)
}

async fn insert_order_header(
    tx: &mut Transaction<'_, Postgres>,
    command: &SubmitOrderCommand,
    transaction_date: chrono::NaiveDate,
) -> Result<Uuid, AppError> {
    let order_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO transactions (id_merchant, id_user, customer_name, destination_number, transaction_date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING transaction_id
        "#,
    )
    .bind(command.merchant_id)
    .bind(command.user_id)
    .bind(&command.customer_name)
    .bind(&command.destination_number)
    .bind(transaction_date)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to insert into transactions table: {}", e);
        e
    })?;

    Ok(order_id)
}

/// Insert one line, snapshotting the product's current sell price.
///
/// The price is read from `mst_product` by the INSERT itself, so the stored
/// and returned price are always the catalog price. A missing product yields
/// no row and surfaces as `RowNotFound`.
async fn insert_order_line(
    tx: &mut Transaction<'_, Postgres>,
    order_id: Uuid,
    product_id: Uuid,
) -> Result<(Uuid, Decimal), AppError> {
    let line: (Uuid, Decimal) = sqlx::query_as(
        r#"
        INSERT INTO transaction_detail (transaction_id, id_product, price)
        SELECT $1, p.id_product, p.price
        FROM mst_product p
        WHERE p.id_product = $2
        RETURNING transaction_detail_id, price
        "#,
    )
    .bind(order_id)
    .bind(product_id)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| {
        tracing::error!(product_id = %product_id, "Failed to insert into transaction detail table: {}", e);
        e
    })?;

    Ok(line)
}

/// Subtract the nominal total; returns the new balance
async fn debit_merchant(
    tx: &mut Transaction<'_, Postgres>,
    merchant_id: Uuid,
    amount: Decimal,
) -> Result<Decimal, AppError> {
    let new_balance: Decimal = sqlx::query_scalar(
        r#"
        UPDATE mst_merchant
        SET balance = balance - $1
        WHERE id_merchant = $2
        RETURNING balance
        "#,
    )
    .bind(amount)
    .bind(merchant_id)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| {
        tracing::error!(merchant_id = %merchant_id, "Failed to update merchant balance: {}", e);
        e
    })?;

    Ok(new_balance)
}
