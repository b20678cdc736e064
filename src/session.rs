//! Session cookie construction and parsing.
//!
//! The session is the binding between a browser and its Spotify access
//! token: one http-only cookie whose `Max-Age` mirrors the token expiry.
//! Every cookie the server reads or writes goes through this module.

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

/// Name of the cookie carrying the Spotify access token.
pub const SESSION_COOKIE_NAME: &str = "spotify_access_token";

/// Create the session cookie for a freshly exchanged access token.
///
/// `Max-Age` equals the provider-reported expiry so the cookie dies with
/// the token. `Secure` is set only for production deployments.
#[must_use]
pub fn session_cookie(access_token: &str, expires_in_secs: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, access_token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(expires_in_secs as i64))
        .build()
}

/// Create the removal cookie: `Max-Age=0` plus an `Expires` in the past,
/// so both cookie-age interpretations drop the session immediately.
#[must_use]
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

/// Get the access token from the request cookie jar, if a session exists.
#[must_use]
pub fn access_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME).map(|c| c.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_flags() {
        let cookie = session_cookie("T", 3600, false);
        let rendered = cookie.to_string();

        assert!(rendered.starts_with("spotify_access_token=T"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=3600"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn session_cookie_secure_in_production() {
        let rendered = session_cookie("T", 60, true).to_string();
        assert!(rendered.contains("Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let rendered = clear_session_cookie().to_string();

        assert!(rendered.starts_with("spotify_access_token=;"));
        assert!(rendered.contains("Max-Age=0"));
        assert!(rendered.contains("Expires=Thu, 01 Jan 1970"));
    }

    #[test]
    fn access_token_from_jar() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE_NAME, "T"));
        assert_eq!(access_token(&jar).as_deref(), Some("T"));
    }

    #[test]
    fn access_token_absent_without_session() {
        let jar = CookieJar::new().add(Cookie::new("unrelated", "x"));
        assert_eq!(access_token(&jar), None);
    }
}
