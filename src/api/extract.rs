use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use super::error::ApiError;
use crate::session;

/// Access token extracted from the session cookie.
///
/// Use as an Axum extractor in session-gated handlers. Rejects with
/// `401 Unauthorized` when no session cookie is present; the token is not
/// validated against the provider here — validity stays lazy.
///
/// # Example
///
/// ```rust,ignore
/// async fn gated(SessionToken(token): SessionToken) -> impl IntoResponse {
///     // call the provider with `token` as a bearer credential
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NoSession)?;

        session::access_token(&jar)
            .map(SessionToken)
            .ok_or(ApiError::NoSession)
    }
}
