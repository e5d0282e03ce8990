use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error types for ledger and request-lifecycle operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum LedgerError {
    #[error("missing required field: {0}")]
    MissingFields(&'static str),

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("insufficient balance: have {available}, need {required}")]
    InsufficientBalance { available: u64, required: u64 },

    #[error("wallet has no balance to withdraw")]
    NoBalance,

    #[error("unknown item: {0}")]
    ItemNotFound(String),

    #[error("no request with id {0}")]
    NotFound(String),

    #[error("request is {current}, expected {expected}")]
    InvalidTransition {
        current: &'static str,
        expected: &'static str,
    },

    #[error("admin authorization failed")]
    Unauthorized,
}

impl LedgerError {
    /// Stable machine-readable kind reported alongside the message
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            LedgerError::MissingFields(_) => "MissingFields",
            LedgerError::InvalidAmount => "InvalidAmount",
            LedgerError::InsufficientBalance { .. } => "InsufficientBalance",
            LedgerError::NoBalance => "NoBalance",
            LedgerError::ItemNotFound(_) => "ItemNotFound",
            LedgerError::NotFound(_) => "NotFound",
            LedgerError::InvalidTransition { .. } => "InvalidTransition",
            LedgerError::Unauthorized => "Unauthorized",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::MissingFields(_)
            | LedgerError::InvalidAmount
            | LedgerError::InsufficientBalance { .. }
            | LedgerError::NoBalance => StatusCode::BAD_REQUEST,
            LedgerError::ItemNotFound(_) | LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::InvalidTransition { .. } => StatusCode::CONFLICT,
            LedgerError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

/// JSON error body returned to callers
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_stable() {
        let err = LedgerError::InsufficientBalance {
            available: 50,
            required: 80,
        };
        assert_eq!(err.kind(), "InsufficientBalance");
        assert_eq!(err.to_string(), "insufficient balance: have 50, need 80");

        let err = LedgerError::InvalidTransition {
            current: "pending",
            expected: "approved",
        };
        assert_eq!(err.kind(), "InvalidTransition");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            LedgerError::NoBalance.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LedgerError::NotFound("wd-1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LedgerError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
