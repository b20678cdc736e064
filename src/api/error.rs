use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::types::ErrorBody;

/// Error responses for the HTTP boundary.
///
/// A rejected session token is deliberately absent here: the validator
/// reports it as `authenticated: false` with a cookie-clearing side effect,
/// not as an error status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Callback hit without an authorization code.
    #[error("No authorization code provided")]
    MissingCode,

    /// Provider rejected the code or credentials. Not retried: the one-time
    /// code is consumed whether or not the exchange succeeded.
    #[error("Failed to exchange authorization code for token")]
    TokenExchange(#[source] crate::Error),

    /// Session-gated endpoint called without a session cookie.
    #[error("No access token found")]
    NoSession,

    /// Theme request without a mood.
    #[error("Mood is required")]
    MissingMood,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MissingCode | Self::MissingMood => StatusCode::BAD_REQUEST,
            Self::NoSession => StatusCode::UNAUTHORIZED,
            Self::TokenExchange(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
