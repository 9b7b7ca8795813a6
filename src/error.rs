//! Error handling module
//!
//! Provides unified error types and handling for the entire application.

use crate::clarity::ValueError;
use crate::contract::{AbiError, ContractError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The contract aborted the call
    #[error("Contract error: {0}")]
    Contract(#[from] ContractError),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Bad arguments: {0}")]
    BadArguments(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<AbiError> for AppError {
    fn from(err: AbiError) -> Self {
        match err {
            AbiError::UnknownFunction(name) => AppError::UnknownFunction(name),
            other @ AbiError::BadArguments { .. } => AppError::BadArguments(other.to_string()),
        }
    }
}

impl From<ValueError> for AppError {
    fn from(err: ValueError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl AppError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Contract(e) => match e {
                ContractError::NotFound(_) => StatusCode::NOT_FOUND,
                ContractError::Unauthorized { .. } => StatusCode::FORBIDDEN,
                ContractError::AlreadyVoted { .. } | ContractError::AlreadyFinalized(_) => {
                    StatusCode::CONFLICT
                }
                ContractError::ThresholdNotMet { .. }
                | ContractError::InsufficientShare { .. }
                | ContractError::InvalidPercent(_)
                | ContractError::InvalidContent(_) => StatusCode::UNPROCESSABLE_ENTITY,
            },
            AppError::UnknownFunction(_) | AppError::BadArguments(_) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_code, message, details) = match &self {
            AppError::Contract(e) => (
                e.kind(),
                e.to_string(),
                Some(format!("(err u{})", e.code())),
            ),
            AppError::UnknownFunction(name) => (
                "UNKNOWN_FUNCTION",
                format!("Contract has no callable function '{}'", name),
                None,
            ),
            AppError::BadArguments(msg) => ("BAD_ARGUMENTS", msg.clone(), None),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone(), None),
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone(), None),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::Config(msg) => {
                error!("Configuration error: {}", msg);
                (
                    "CONFIG_ERROR",
                    "A configuration error occurred".to_string(),
                    Some(msg.clone()),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            error: details,
            code: Some(error_code.to_string()),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper function to create a validation error
pub fn validation_error(msg: impl Into<String>) -> AppError {
    AppError::Validation(msg.into())
}
