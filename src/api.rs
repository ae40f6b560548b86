//! Shared API envelope
//!
//! Both services answer with the same `{ code, data?, msg? }` wrapper;
//! `code` 0 means success, negative codes identify the rejection.

use serde::Serialize;

/// Standard response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            data: Some(data),
            msg: None,
        }
    }

    pub fn error(code: i32, msg: impl ToString) -> Self {
        Self {
            code,
            data: None,
            msg: Some(msg.to_string()),
        }
    }
}

/// Numeric error codes, stable across both services
pub mod error_codes {
    pub const INVALID_PARAMETER: i32 = -1001;
    pub const INVALID_AMOUNT: i32 = -1002;
    pub const INVALID_ACCOUNT_TYPE: i32 = -1003;
    pub const INSUFFICIENT_FUNDS: i32 = -2001;
    pub const ACCOUNT_NOT_FOUND: i32 = -2002;
    pub const ACCOUNT_NOT_ACTIVE: i32 = -2003;
    pub const BUSINESS_RULE_VIOLATION: i32 = -2004;
    pub const DUPLICATE_RESOURCE: i32 = -3001;
    pub const INTERNAL_ERROR: i32 = -5000;
    pub const SERVICE_UNAVAILABLE: i32 = -5001;
    pub const TRANSACTION_NOT_FOUND: i32 = -6001;
    pub const SETTLEMENT_FAILED: i32 = -6002;
    pub const INVALID_STATE_TRANSITION: i32 = -6003;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(true);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"], true);
        assert!(json.get("msg").is_none());
    }

    #[test]
    fn test_error_envelope() {
        let resp: ApiResponse<()> = ApiResponse::error(error_codes::ACCOUNT_NOT_FOUND, "nope");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], -2002);
        assert_eq!(json["msg"], "nope");
        assert!(json.get("data").is_none());
    }
}
