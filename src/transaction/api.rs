//! Transaction service HTTP surface
//!
//! POST answers 201 when the transaction settled SUCCESS, 422 when it
//! settled FAILED: a failed settlement is a recorded business outcome, not
//! a server fault, so 5xx is reserved for the service's own storage.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::{ApiResponse, error_codes};

use super::error::TransactionError;
use super::orchestrator::TransactionOrchestrator;
use super::types::{SettlementRequest, TransactionType};

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub account_id: i64,
    /// "DEPOSIT", "WITHDRAWAL" or "TRANSFER"
    #[serde(rename = "type")]
    pub tx_type: String,
    pub amount: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AmendTransactionRequest {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    pub account_id: i64,
}

/// Map TransactionError to (StatusCode, error envelope)
fn map_error(e: &TransactionError) -> (StatusCode, ApiResponse<()>) {
    let status = StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let code = match e.code() {
        "INVALID_AMOUNT" => error_codes::INVALID_AMOUNT,
        "TRANSACTION_NOT_FOUND" => error_codes::TRANSACTION_NOT_FOUND,
        "INVALID_STATE_TRANSITION" => error_codes::INVALID_STATE_TRANSITION,
        "SETTLEMENT_FAILED" => error_codes::SETTLEMENT_FAILED,
        _ => error_codes::INTERNAL_ERROR,
    };

    (status, ApiResponse::error(code, e))
}

/// POST /api/transactions
async fn create_transaction(
    Extension(orchestrator): Extension<Arc<TransactionOrchestrator>>,
    Json(req): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    let tx_type = match TransactionType::parse(&req.tx_type) {
        Some(t) => t,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(
                    error_codes::INVALID_PARAMETER,
                    format!("Unknown transaction type: {}", req.tx_type),
                )),
            )
                .into_response();
        }
    };

    let settlement = SettlementRequest {
        account_id: req.account_id,
        tx_type,
        amount: req.amount,
        description: req.description,
    };

    match orchestrator.create(settlement).await {
        Ok(record) => (StatusCode::CREATED, Json(ApiResponse::success(record))).into_response(),
        Err(e) => {
            let (status, body) = map_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// GET /api/transactions/{id}
async fn get_transaction(
    Extension(orchestrator): Extension<Arc<TransactionOrchestrator>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match orchestrator.get(id).await {
        Ok(record) => (StatusCode::OK, Json(ApiResponse::success(record))).into_response(),
        Err(e) => {
            let (status, body) = map_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// GET /api/transactions/reference/{reference}
async fn get_by_reference(
    Extension(orchestrator): Extension<Arc<TransactionOrchestrator>>,
    Path(reference): Path<String>,
) -> impl IntoResponse {
    match orchestrator.get_by_reference(&reference).await {
        Ok(record) => (StatusCode::OK, Json(ApiResponse::success(record))).into_response(),
        Err(e) => {
            let (status, body) = map_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// GET /api/transactions?account_id=
async fn list_transactions(
    Extension(orchestrator): Extension<Arc<TransactionOrchestrator>>,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    match orchestrator.list_by_account(query.account_id).await {
        Ok(records) => (StatusCode::OK, Json(ApiResponse::success(records))).into_response(),
        Err(e) => {
            let (status, body) = map_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// POST /api/transactions/{id}/cancel
async fn cancel_transaction(
    Extension(orchestrator): Extension<Arc<TransactionOrchestrator>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match orchestrator.cancel(id).await {
        Ok(record) => (StatusCode::OK, Json(ApiResponse::success(record))).into_response(),
        Err(e) => {
            let (status, body) = map_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// PUT /api/transactions/{id}
async fn amend_transaction(
    Extension(orchestrator): Extension<Arc<TransactionOrchestrator>>,
    Path(id): Path<i64>,
    Json(req): Json<AmendTransactionRequest>,
) -> impl IntoResponse {
    match orchestrator.amend(id, req.amount, req.description).await {
        Ok(record) => (StatusCode::OK, Json(ApiResponse::success(record))).into_response(),
        Err(e) => {
            let (status, body) = map_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// Build the transaction service router
pub fn router(orchestrator: Arc<TransactionOrchestrator>) -> Router {
    Router::new()
        .route(
            "/api/transactions",
            post(create_transaction).get(list_transactions),
        )
        .route(
            "/api/transactions/{id}",
            get(get_transaction).put(amend_transaction),
        )
        .route("/api/transactions/reference/{reference}", get(get_by_reference))
        .route("/api/transactions/{id}/cancel", post(cancel_transaction))
        .layer(Extension(orchestrator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::SettlementFailure;
    use crate::transaction::types::TransactionStatus;

    #[test]
    fn test_map_error_statuses() {
        let (status, body) = map_error(&TransactionError::NotFound(9));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, error_codes::TRANSACTION_NOT_FOUND);

        let (status, body) = map_error(&TransactionError::SettlementFailed {
            reference: "r".to_string(),
            cause: SettlementFailure::AccountNotActive,
        });
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.code, error_codes::SETTLEMENT_FAILED);

        let (status, body) = map_error(&TransactionError::InvalidStateTransition {
            current: TransactionStatus::Cancelled,
        });
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.code, error_codes::INVALID_STATE_TRANSITION);
    }

    #[test]
    fn test_create_request_parses_type_alias() {
        let req: CreateTransactionRequest = serde_json::from_str(
            r#"{"account_id": 1, "type": "WITHDRAWAL", "amount": "25.50"}"#,
        )
        .unwrap();
        assert_eq!(req.tx_type, "WITHDRAWAL");
        assert_eq!(req.amount, Decimal::new(2_550, 2));
        assert!(req.description.is_none());
    }

    #[test]
    fn test_amend_request_fields_optional() {
        let req: AmendTransactionRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(req.amount.is_none());
        assert!(req.description.is_none());
    }
}
