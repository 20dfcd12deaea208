//! Response types for the payroll engine API.
//!
//! This module defines the error response structures, the mapping from
//! engine errors to HTTP statuses, and the NSS response bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{NssBreakdown, NssValidation};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidBracketTable { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::RatesNotFound { date } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "RATES_NOT_FOUND",
                    message,
                    format!("No tax tables are configured for dates on or before {}", date),
                ),
            ),
            EngineError::IncomeOutOfRange { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INCOME_OUT_OF_RANGE", message))
            }
            EngineError::UnknownVatRate { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "UNKNOWN_VAT_RATE",
                    message,
                    "Accepted rates are listed in the active rate configuration",
                ),
            ),
            EngineError::InvalidRegion { code } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_REGION",
                    message,
                    format!("'{}' is not one of the configured region codes", code),
                ),
            ),
            EngineError::InvalidNssComponent { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_NSS_COMPONENT", message))
            }
        }
    }
}

/// Response body for `POST /nss/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NssValidationResponse {
    /// Diagnostics for the number.
    #[serde(flatten)]
    pub validation: NssValidation,
    /// Decoded fields, present when the number is 11 digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<NssBreakdown>,
    /// The number rendered as `RR-YYYY-MM-DD-C`, present when it is 11 digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

/// Response body for `POST /nss/check-digit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDigitResponse {
    /// The ten-digit base as supplied.
    pub base: String,
    /// The computed check digit.
    pub check_digit: u8,
    /// The base followed by its check digit.
    pub nss: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_unknown_vat_rate_is_bad_request() {
        let api_error: ApiErrorResponse = EngineError::UnknownVatRate {
            rate: Decimal::new(21, 2),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "UNKNOWN_VAT_RATE");
        assert_eq!(api_error.error.message, "Unknown VAT rate: 0.21");
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::InvalidBracketTable {
            index: 2,
            message: "gap".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_validation_response_flattens_diagnostics() {
        let response = NssValidationResponse {
            validation: NssValidation {
                is_valid: false,
                errors: vec!["Unknown region code: 99".to_string()],
                warnings: vec![],
            },
            breakdown: None,
            formatted: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["errors"][0], "Unknown region code: 99");
        assert!(json.get("breakdown").is_none());
    }
}
