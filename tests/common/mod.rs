//! Common test utilities
//!
//! Database tests are `#[ignore]`d by default; run them against PostgreSQL 13+
//! with `DATABASE_URL=... cargo test -- --ignored`. Each test seeds its own
//! user, merchant and products under fresh ids, so tests can share a database
//! and run in parallel without truncating anything.

#![allow(dead_code)]

use std::time::Duration;

use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

/// Connect and apply the schema
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    pulsa_server::db::apply_schema(&pool)
        .await
        .expect("Failed to apply schema");

    pool
}

/// A pool that never connects, for paths that must not touch the store
pub fn unreachable_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgres://pulsa@127.0.0.1:1/unreachable")
        .expect("Failed to build lazy pool")
}

/// A user owning one merchant
#[derive(Debug, Clone, Copy)]
pub struct SeededMerchant {
    pub user_id: Uuid,
    pub merchant_id: Uuid,
}

/// Insert a user and a merchant it owns, holding `balance`
pub async fn seed_merchant(pool: &PgPool, balance: Decimal) -> SeededMerchant {
    let user_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO mst_user (username, password, role)
        VALUES ($1, 'not-a-real-hash', 'user')
        RETURNING id_user
        "#,
    )
    .bind(format!("counter_{}", Uuid::new_v4().simple()))
    .fetch_one(pool)
    .await
    .expect("Failed to seed user");

    let merchant_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO mst_merchant (id_user, name_merchant, address, balance)
        VALUES ($1, 'Konter Pulsa Jaya', 'Jl. Merdeka 1', $2)
        RETURNING id_merchant
        "#,
    )
    .bind(user_id)
    .bind(balance)
    .fetch_one(pool)
    .await
    .expect("Failed to seed merchant");

    SeededMerchant {
        user_id,
        merchant_id,
    }
}

/// Insert a catalog product
pub async fn seed_product(pool: &PgPool, provider: &str, nominal: Decimal, price: Decimal) -> Uuid {
    sqlx::query_scalar(
        r#"
        INSERT INTO mst_product (name_provider, nominal, price)
        VALUES ($1, $2, $3)
        RETURNING id_product
        "#,
    )
    .bind(provider)
    .bind(nominal)
    .bind(price)
    .fetch_one(pool)
    .await
    .expect("Failed to seed product")
}

pub async fn set_product_price(pool: &PgPool, product_id: Uuid, price: Decimal) {
    sqlx::query("UPDATE mst_product SET price = $1 WHERE id_product = $2")
        .bind(price)
        .bind(product_id)
        .execute(pool)
        .await
        .expect("Failed to update product price");
}

pub async fn merchant_balance(pool: &PgPool, merchant_id: Uuid) -> Decimal {
    sqlx::query_scalar("SELECT balance FROM mst_merchant WHERE id_merchant = $1")
        .bind(merchant_id)
        .fetch_one(pool)
        .await
        .expect("Failed to read merchant balance")
}

pub async fn count_orders(pool: &PgPool, merchant_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE id_merchant = $1")
        .bind(merchant_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count orders")
}

pub async fn count_lines(pool: &PgPool, merchant_id: Uuid) -> i64 {
    sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM transaction_detail td
        JOIN transactions t ON t.transaction_id = td.transaction_id
        WHERE t.id_merchant = $1
        "#,
    )
    .bind(merchant_id)
    .fetch_one(pool)
    .await
    .expect("Failed to count order lines")
}

/// Stored line prices of one order, in insertion order
pub async fn stored_line_prices(pool: &PgPool, order_id: Uuid) -> Vec<Decimal> {
    sqlx::query_scalar(
        "SELECT price FROM transaction_detail WHERE transaction_id = $1 ORDER BY line_seq",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
    .expect("Failed to read line prices")
}
