//! Account service HTTP surface
//!
//! The exists endpoint is permit-all; balance mutation is reserved for the
//! authenticated service channel. Authentication enforcement itself lives in
//! the gateway/authorization collaborators, not here.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use crate::api::{ApiResponse, error_codes};

use super::error::LedgerError;
use super::ledger::AccountLedger;
use super::models::{Account, AccountType};

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub customer_id: i64,
    /// "SAVINGS" or "CURRENT"
    pub account_type: String,
}

/// Signed balance change: positive=credit, negative=debit
#[derive(Debug, Deserialize)]
pub struct BalanceDeltaRequest {
    pub delta: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    pub customer_id: i64,
}

/// Map LedgerError to (StatusCode, error envelope)
fn map_error(e: &LedgerError) -> (StatusCode, ApiResponse<()>) {
    let status = StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let code = match e.code() {
        "ACCOUNT_NOT_FOUND" => error_codes::ACCOUNT_NOT_FOUND,
        "ACCOUNT_NOT_ACTIVE" => error_codes::ACCOUNT_NOT_ACTIVE,
        "INSUFFICIENT_FUNDS" => error_codes::INSUFFICIENT_FUNDS,
        "BUSINESS_RULE_VIOLATION" => error_codes::BUSINESS_RULE_VIOLATION,
        "DUPLICATE_ACCOUNT_NUMBER" => error_codes::DUPLICATE_RESOURCE,
        "INVALID_ACCOUNT_TYPE" => error_codes::INVALID_ACCOUNT_TYPE,
        "INVALID_DELTA" => error_codes::INVALID_PARAMETER,
        _ => error_codes::INTERNAL_ERROR,
    };

    (status, ApiResponse::error(code, e))
}

/// POST /api/accounts
async fn create_account(
    Extension(ledger): Extension<Arc<AccountLedger>>,
    Json(req): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    let account_type = match AccountType::parse(&req.account_type) {
        Some(t) => t,
        None => {
            let e = LedgerError::InvalidAccountType(req.account_type);
            let (status, body) = map_error(&e);
            return (status, Json(body)).into_response();
        }
    };

    match ledger.create(req.customer_id, account_type).await {
        Ok(account) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(account)),
        )
            .into_response(),
        Err(e) => {
            let (status, body) = map_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// GET /api/accounts/exists/{id}
///
/// Never errors toward the caller: an absent account is `data: false`.
/// Storage failures still surface as 500 so an unhealthy ledger is not
/// mistaken for a missing account.
async fn account_exists(
    Extension(ledger): Extension<Arc<AccountLedger>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match ledger.exists(id).await {
        Ok(found) => (StatusCode::OK, Json(ApiResponse::success(found))).into_response(),
        Err(e) => {
            warn!(account_id = id, error = %e, "Existence check failed");
            let (status, body) = map_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// GET /api/accounts/{id}
async fn get_account(
    Extension(ledger): Extension<Arc<AccountLedger>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match ledger.get(id).await {
        Ok(Some(account)) => (StatusCode::OK, Json(ApiResponse::success(account))).into_response(),
        Ok(None) => not_found(id),
        Err(e) => {
            let (status, body) = map_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// GET /api/accounts/number/{number}
async fn get_account_by_number(
    Extension(ledger): Extension<Arc<AccountLedger>>,
    Path(number): Path<String>,
) -> impl IntoResponse {
    match ledger.get_by_number(&number).await {
        Ok(Some(account)) => (StatusCode::OK, Json(ApiResponse::success(account))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(
                error_codes::ACCOUNT_NOT_FOUND,
                format!("Account not found with number: {}", number),
            )),
        )
            .into_response(),
        Err(e) => {
            let (status, body) = map_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// GET /api/accounts?customer_id=
async fn list_accounts(
    Extension(ledger): Extension<Arc<AccountLedger>>,
    Query(query): Query<ListAccountsQuery>,
) -> impl IntoResponse {
    match ledger.list_by_customer(query.customer_id).await {
        Ok(accounts) => (StatusCode::OK, Json(ApiResponse::success(accounts))).into_response(),
        Err(e) => {
            let (status, body) = map_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// PATCH /api/accounts/{id}/balance
async fn apply_delta(
    Extension(ledger): Extension<Arc<AccountLedger>>,
    Path(id): Path<i64>,
    Json(req): Json<BalanceDeltaRequest>,
) -> impl IntoResponse {
    match ledger.apply_delta(id, req.delta).await {
        Ok(account) => (StatusCode::OK, Json(ApiResponse::success(account))).into_response(),
        Err(e) => {
            let (status, body) = map_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// POST /api/accounts/{id}/close
async fn close_account(
    Extension(ledger): Extension<Arc<AccountLedger>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match ledger.close(id).await {
        Ok(account) => (StatusCode::OK, Json(ApiResponse::success(account))).into_response(),
        Err(e) => {
            let (status, body) = map_error(&e);
            (status, Json(body)).into_response()
        }
    }
}

fn not_found(id: i64) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<Account>::error(
            error_codes::ACCOUNT_NOT_FOUND,
            format!("Account not found with id: {}", id),
        )),
    )
        .into_response()
}

/// Build the account service router
pub fn router(ledger: Arc<AccountLedger>) -> Router {
    Router::new()
        .route("/api/accounts", post(create_account).get(list_accounts))
        .route("/api/accounts/exists/{id}", get(account_exists))
        .route("/api/accounts/{id}", get(get_account))
        .route("/api/accounts/number/{number}", get(get_account_by_number))
        .route("/api/accounts/{id}/balance", patch(apply_delta))
        .route("/api/accounts/{id}/close", post(close_account))
        .layer(Extension(ledger))
}
