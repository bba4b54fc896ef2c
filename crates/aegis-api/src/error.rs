//! API error handling
//!
//! Author: hephaex@gmail.com

use aegis_core::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Failure body for 401 and 500 responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false` on failures
    pub status: bool,
    /// Human-readable message
    pub message: String,
}

/// Failure body for 400 validation responses, carrying per-field messages
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// HTTP status code, mirrored into the body
    pub status: u16,
    /// Human-readable message
    pub message: String,
    /// Field name to problem descriptions
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Application error type
///
/// Every failure in the authentication core is recovered into one of these
/// variants at the service boundary and translated to a structured response;
/// none are fatal to the process.
#[derive(Debug)]
pub enum AppError {
    /// Client-fixable field errors (HTTP 400)
    Validation(BTreeMap<String, Vec<String>>),
    /// Email already registered (HTTP 400, reported as a field error)
    DuplicateEmail,
    /// Login failed; the message never says which part was wrong (HTTP 401)
    InvalidCredentials,
    /// Missing, malformed, forged, or expired token (HTTP 401)
    Unauthorized,
    /// Token subject without a record; answered as 401 so it cannot be
    /// distinguished from any other unauthorized request
    NotFound,
    /// Unexpected failure; details are logged, never sent (HTTP 500)
    Internal(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, field_errors)| {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{field} is invalid"))
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        AppError::Validation(fields)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AppError::DuplicateEmail,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => validation_failure(errors),
            AppError::DuplicateEmail => {
                let mut errors = BTreeMap::new();
                errors.insert(
                    "email".to_string(),
                    vec!["email has already been taken".to_string()],
                );
                validation_failure(errors)
            }
            AppError::InvalidCredentials => {
                failure(StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            AppError::Unauthorized | AppError::NotFound => {
                failure(StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            AppError::Internal(details) => {
                tracing::error!(%details, "internal error");
                failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

fn validation_failure(errors: BTreeMap<String, Vec<String>>) -> Response {
    let body = ValidationErrorResponse {
        status: StatusCode::BAD_REQUEST.as_u16(),
        message: "Validation error".to_string(),
        errors,
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn failure(status: StatusCode, message: &str) -> Response {
    let body = ErrorResponse {
        status: false,
        message: message.to_string(),
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(email(message = "email must be a valid address"))]
        email: String,
    }

    #[test]
    fn test_validation_errors_become_field_messages() {
        let probe = Probe {
            email: "nope".to_string(),
        };
        let err: AppError = probe.validate().unwrap_err().into();

        let AppError::Validation(fields) = err else {
            panic!("expected validation variant");
        };
        assert_eq!(
            fields.get("email").unwrap(),
            &vec!["email must be a valid address".to_string()]
        );
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                AppError::Validation(BTreeMap::new()),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::DuplicateEmail, StatusCode::BAD_REQUEST),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::NotFound, StatusCode::UNAUTHORIZED),
            (
                AppError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_renders_as_email_field_error() {
        let response = AppError::DuplicateEmail.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["status"], 400);
        assert!(json["errors"]["email"][0]
            .as_str()
            .unwrap()
            .contains("already been taken"));
    }

    #[tokio::test]
    async fn test_internal_error_does_not_leak_details() {
        let response = AppError::Internal("secret database path".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(!body.contains("secret database path"));
    }
}
