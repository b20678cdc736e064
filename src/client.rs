//! Browser-side auth orchestration, expressed as a typed state machine.
//!
//! This is the page-load logic: wait briefly for a just-set cookie to become
//! visible, validate the session once, and render either the dashboard or
//! the login entry point. One validation per page load; no retry, no
//! cancellation.

use std::time::Duration;

use url::Url;

use crate::api::{AuthStatus, TokenBody};
use crate::error::{Error, ensure_success};
use crate::spotify::{PlayHistory, Playlist, SpotifyClient, UserProfile};

/// Fixed settling delay before the first validation, so a cookie set by the
/// callback redirect is visible to the server on the next request.
const COOKIE_SETTLE_DELAY: Duration = Duration::from_millis(400);

/// Authentication phase of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthPhase {
    /// Session validity not yet known.
    Checking,
    /// Validator confirmed the session; identity attached.
    Authenticated(UserProfile),
    /// No session, or the provider rejected the stored token.
    Unauthenticated,
}

/// Drives the server's auth endpoints the way the page does: settle,
/// validate, login redirect, logout, and the token-gated provider calls
/// behind the dashboard widgets.
pub struct AuthOrchestrator {
    base_url: Url,
    spotify: SpotifyClient,
    http: reqwest::Client,
    phase: AuthPhase,
    settle_delay: Duration,
}

impl AuthOrchestrator {
    /// Create an orchestrator for the application at `base_url`.
    ///
    /// `spotify` carries the public configuration only (client id, redirect
    /// URI, scopes); the client secret never reaches this side.
    #[must_use]
    pub fn new(base_url: Url, spotify: SpotifyClient) -> Self {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("HTTP client construction");

        Self {
            base_url,
            spotify,
            http,
            phase: AuthPhase::Checking,
            settle_delay: COOKIE_SETTLE_DELAY,
        }
    }

    /// Use a custom HTTP client. The default keeps a cookie store, standing
    /// in for the browser's cookie jar.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Override the settling delay (tests use zero).
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    #[must_use]
    pub fn phase(&self) -> &AuthPhase {
        &self.phase
    }

    /// The full-page authorization redirect URL for the login entry point.
    #[must_use]
    pub fn login_url(&self) -> String {
        self.spotify.authorization_url()
    }

    /// Page-load entry point: settle, then validate the session once.
    pub async fn initialize(&mut self) -> &AuthPhase {
        tokio::time::sleep(self.settle_delay).await;
        self.validate().await
    }

    /// Single-shot validator call; transitions out of [`AuthPhase::Checking`].
    ///
    /// A validator failure is indistinguishable from a logged-out state for
    /// the page: both land in [`AuthPhase::Unauthenticated`].
    pub async fn validate(&mut self) -> &AuthPhase {
        self.phase = match self.fetch_status().await {
            Ok(status) => match (status.authenticated, status.user) {
                (true, Some(user)) => AuthPhase::Authenticated(user),
                _ => AuthPhase::Unauthenticated,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Auth status check failed");
                AuthPhase::Unauthenticated
            }
        };
        &self.phase
    }

    /// Clear the session server-side, then re-enter [`AuthPhase::Checking`]
    /// and re-validate — the full-page-reload analogue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Upstream`]
    /// if the logout endpoint rejects the request.
    pub async fn logout(&mut self) -> Result<&AuthPhase, Error> {
        let response = self
            .http
            .post(self.endpoint("api/logout"))
            .send()
            .await?;
        ensure_success(response, "logout").await?;

        self.phase = AuthPhase::Checking;
        Ok(self.validate().await)
    }

    /// Fetch the raw access token through the session-gated proxy, for
    /// widgets that call the provider's data APIs directly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upstream`] when no session exists (the proxy
    /// answers `401`), or [`Error::Http`] on network failure.
    pub async fn access_token(&self) -> Result<String, Error> {
        let response = self
            .http
            .get(self.endpoint("api/spotify-token"))
            .send()
            .await?;
        let response = ensure_success(response, "token request").await?;
        let body: TokenBody = response.json().await?;
        Ok(body.access_token)
    }

    /// Recently-played tracks for the dashboard widget.
    ///
    /// # Errors
    ///
    /// Returns an error when no session exists or the provider call fails.
    pub async fn recent_tracks(&self) -> Result<PlayHistory, Error> {
        let token = self.access_token().await?;
        self.spotify.recently_played(&token).await
    }

    /// Playlists matching the detected mood, for the recommendations widget.
    ///
    /// # Errors
    ///
    /// Returns an error when no session exists or the provider call fails.
    pub async fn recommendations(&self, mood: &str) -> Result<Vec<Playlist>, Error> {
        let token = self.access_token().await?;
        self.spotify.search_playlists(&token, mood).await
    }

    async fn fetch_status(&self) -> Result<AuthStatus, Error> {
        let response = self
            .http
            .get(self.endpoint("api/auth-status"))
            .send()
            .await?;
        let response = ensure_success(response, "auth status request").await?;
        response.json().await.map_err(Into::into)
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("application base URL can host path segments")
            .pop_if_empty()
            .extend(path.split('/'));
        url
    }
}
