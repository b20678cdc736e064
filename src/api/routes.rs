use axum::Router;
use axum::extract::{Query, State};
use axum::response::{Json, Redirect};
use axum::routing::{get, post};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::config::AppConfig;
use super::error::ApiError;
use super::extract::SessionToken;
use super::state::AppState;
use super::types::{AuthStatus, Health, MessageBody, MoodRequest, MoodResponse, ThemeRequest, TokenBody};
use crate::labeling::DEFAULT_MOOD;
use crate::session;
use crate::theme::{Palette, default_palette};

/// Create the MoodMatch API router.
pub fn router(config: AppConfig) -> Router {
    let state = AppState::new(config);

    Router::new()
        .route("/api/callback", get(callback))
        .route("/api/auth-status", get(auth_status))
        .route("/api/spotify-token", get(spotify_token))
        .route("/api/logout", post(logout))
        .route("/api/mood", post(mood))
        .route("/api/theme-utils", post(theme))
        .route("/api/health", get(health))
        .with_state(state)
}

// ── Callback ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CallbackParams {
    code: Option<String>,
}

async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let code = params.code.ok_or_else(|| {
        tracing::warn!("Callback hit without an authorization code");
        ApiError::MissingCode
    })?;

    let token = state.spotify.exchange_code(&code).await.map_err(|e| {
        tracing::error!(error = %e, "Token exchange failed");
        ApiError::TokenExchange(e)
    })?;

    tracing::info!(expires_in = token.expires_in, "Access token issued");

    let cookie = session::session_cookie(
        &token.access_token,
        token.expires_in,
        state.settings.secure_cookies,
    );

    Ok((jar.add(cookie), Redirect::to(&state.settings.login_redirect)))
}

// ── Session validator ──────────────────────────────────────────────

async fn auth_status(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<AuthStatus>) {
    // No cookie: pure local short-circuit, no provider call.
    let Some(token) = session::access_token(&jar) else {
        return (jar, Json(AuthStatus::unauthenticated("No access token found")));
    };

    match state.spotify.current_user(&token).await {
        Ok(user) => (jar, Json(AuthStatus::authenticated(user))),
        Err(e) => {
            // The only path that proactively destroys a session.
            tracing::warn!(error = %e, "Stored token rejected by provider, clearing session");
            (
                jar.add(session::clear_session_cookie()),
                Json(AuthStatus::unauthenticated("Invalid or expired token")),
            )
        }
    }
}

// ── Session-gated token proxy ──────────────────────────────────────

async fn spotify_token(SessionToken(token): SessionToken) -> Json<TokenBody> {
    Json(TokenBody {
        access_token: token,
    })
}

// ── Logout ─────────────────────────────────────────────────────────

async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageBody>) {
    tracing::info!("Session cookie cleared on logout");
    (
        jar.add(session::clear_session_cookie()),
        Json(MessageBody {
            message: "Logged out successfully".into(),
        }),
    )
}

// ── Mood labeling ──────────────────────────────────────────────────

async fn mood(State(state): State<AppState>, Json(req): Json<MoodRequest>) -> Json<MoodResponse> {
    let mood = match state.labeler.label_mood(&req.message).await {
        Ok(mood) => mood,
        Err(e) => {
            tracing::error!(error = %e, "Mood labeling failed, using default label");
            DEFAULT_MOOD.to_string()
        }
    };

    tracing::info!(mood = %mood, "Detected mood");
    Json(MoodResponse { mood })
}

// ── Theme colors ───────────────────────────────────────────────────

async fn theme(
    State(state): State<AppState>,
    Json(req): Json<ThemeRequest>,
) -> Result<Json<Palette>, ApiError> {
    let mood = req
        .mood
        .filter(|m| !m.is_empty())
        .ok_or(ApiError::MissingMood)?;

    let palette = match state.labeler.palette_for(&mood).await {
        Ok(palette) => palette,
        Err(e) => {
            tracing::warn!(error = %e, mood = %mood, "Palette lookup failed, using fallback table");
            default_palette(&mood)
        }
    };

    Ok(Json(palette))
}

// ── Health ─────────────────────────────────────────────────────────

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health::for_config(state.spotify.config()))
}
