//! Error conversions - HTTP rendering of [`AppError`]
//!
//! Rendering lives behind the `axum` feature so the kernel itself stays
//! framework-free.

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details, plus the `error` member browser clients read
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "error": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    #[test]
    fn test_into_response_status() {
        let response = AppError::bad_gateway("upstream down").into_response();
        assert_eq!(response.status().as_u16(), 502);
    }

    #[tokio::test]
    async fn test_problem_body_carries_error_member() {
        let response = AppError::unauthorized("Invalid email or password")
            .with_action("Check your email and password")
            .into_response();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["status"], 401);
        assert_eq!(body["title"], "Unauthorized");
        assert_eq!(body["error"], "Invalid email or password");
        assert_eq!(body["action"], "Check your email and password");
    }
}
