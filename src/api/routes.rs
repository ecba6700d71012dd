//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{rejection::PathRejection, Extension, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{OperationContext, Order};
use crate::error::AppError;
use crate::handlers::{OrderLineCommand, SubmitOrderCommand, SubmitOrderHandler};
use crate::projection::{OrderAggregate, OrderHistoryService};

use super::middleware::RequestUser;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub merchant_id: Uuid,
    pub customer_name: String,
    pub destination_number: String,
    /// dd-mm-yyyy
    pub transaction_date: String,
    pub details: Vec<TransactionDetailRequest>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionDetailRequest {
    pub product_id: Uuid,
    #[serde(default)]
    pub price: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<OrderAggregate>,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<PgPool> {
    Router::new()
        .route("/transaction", post(create_transaction))
        .route("/transactions/history", get(list_transactions))
        .route("/transaction/history/:id", get(get_transaction))
}

// =========================================================================
// POST /transaction
// =========================================================================

/// Submit an order for the requesting user
async fn create_transaction(
    State(pool): State<PgPool>,
    Extension(context): Extension<OperationContext>,
    request_user: Option<Extension<RequestUser>>,
    Json(request): Json<TransactionRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let request_user = request_user
        .ok_or_else(|| AppError::MissingHeader("X-Request-User-Id".to_string()))?;

    let context = context.with_request_user(request_user.user_id);

    let mut command = SubmitOrderCommand::new(
        request.merchant_id,
        request_user.user_id,
        request.customer_name,
        request.destination_number,
        request.transaction_date,
    );
    command.lines = request
        .details
        .into_iter()
        .map(|detail| OrderLineCommand {
            product_id: detail.product_id,
            price: detail.price,
        })
        .collect();

    let order = SubmitOrderHandler::new(pool).execute(command, &context).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

// =========================================================================
// GET /transactions/history
// =========================================================================

/// Order history of the requesting user's merchant
async fn list_transactions(
    State(pool): State<PgPool>,
    request_user: Option<Extension<RequestUser>>,
) -> Result<Json<TransactionListResponse>, AppError> {
    let request_user = request_user
        .ok_or_else(|| AppError::MissingHeader("X-Request-User-Id".to_string()))?;

    let transactions = OrderHistoryService::new(pool)
        .list_by_user(request_user.user_id)
        .await?;

    Ok(Json(TransactionListResponse { transactions }))
}

// =========================================================================
// GET /transaction/history/:id
// =========================================================================

/// Single order by id
async fn get_transaction(
    State(pool): State<PgPool>,
    order_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<OrderAggregate>, AppError> {
    let Path(order_id) =
        order_id.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;

    let order = OrderHistoryService::new(pool).get_by_id(order_id).await?;
    Ok(Json(order))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_request_deserialize() {
        let json = r#"{
            "merchant_id": "550e8400-e29b-41d4-a716-446655440000",
            "customer_name": "Budi",
            "destination_number": "081234567890",
            "transaction_date": "15-01-2024",
            "details": [
                {"product_id": "550e8400-e29b-41d4-a716-446655440001", "price": "1"},
                {"product_id": "550e8400-e29b-41d4-a716-446655440002"}
            ]
        }"#;

        let request: TransactionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.transaction_date, "15-01-2024");
        assert_eq!(request.details.len(), 2);
        assert_eq!(request.details[0].price, Some(Decimal::ONE));
        assert!(request.details[1].price.is_none());
    }

    #[test]
    fn test_transaction_request_requires_details() {
        let json = r#"{
            "merchant_id": "550e8400-e29b-41d4-a716-446655440000",
            "customer_name": "Budi",
            "destination_number": "081234567890",
            "transaction_date": "15-01-2024"
        }"#;

        assert!(serde_json::from_str::<TransactionRequest>(json).is_err());
    }
}
