//! Auth Error Types
//!
//! Bridge-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Bad email/password; user-correctable
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Session expired, forged, or unknown to the credential store
    #[error("Session not found or expired")]
    SessionInvalid,

    /// The credential store would not mint a token; retried on the next request
    #[error("Token refresh failed")]
    TokenRefreshFailed,

    /// The credential store or resource API could not be reached or answered garbage
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Input rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::TokenRefreshFailed | AuthError::UpstreamUnavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::TokenRefreshFailed | AuthError::UpstreamUnavailable(_) => {
                ErrorKind::BadGateway
            }
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Upstream and internal details stay in the logs; the user sees a
    /// generic message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::UpstreamUnavailable(_) | AuthError::TokenRefreshFailed => {
                AppError::new(self.kind(), "Authentication service is unavailable")
                    .with_action("Please try again in a moment")
            }
            AuthError::Internal(_) => AppError::internal("An unexpected error occurred"),
            AuthError::InvalidCredentials => AppError::new(self.kind(), self.to_string())
                .with_action("Check your email and password"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::UpstreamUnavailable(msg) => {
                tracing::warn!(message = %msg, "Credential store unavailable");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.kind() == ErrorKind::BadRequest {
            AuthError::Validation(err.message().to_string())
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(rejection.body_text())
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AuthError::UpstreamUnavailable(format!("malformed upstream response: {err}"))
        } else {
            AuthError::UpstreamUnavailable(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::SessionInvalid, StatusCode::UNAUTHORIZED),
            (AuthError::TokenRefreshFailed, StatusCode::BAD_GATEWAY),
            (
                AuthError::UpstreamUnavailable("connection refused".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AuthError::Validation("Invalid email format".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AuthError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_upstream_detail_is_not_exposed() {
        let app_err = AuthError::UpstreamUnavailable("10.0.0.7:8787 refused".into()).to_app_error();
        assert!(!app_err.message().contains("10.0.0.7"));
    }

    #[test]
    fn test_bad_request_app_error_becomes_validation() {
        let err: AuthError = AppError::bad_request("Email cannot be empty").into();
        assert!(matches!(err, AuthError::Validation(msg) if msg == "Email cannot be empty"));

        let err: AuthError = AppError::internal("x").into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
