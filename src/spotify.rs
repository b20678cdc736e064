use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, ensure_success};

/// Spotify `OAuth2` and Web API configuration.
///
/// Required fields are constructor parameters — no runtime "missing field"
/// errors for the public half of the configuration.
///
/// ```rust,ignore
/// use moodmatch::SpotifyConfig;
///
/// let config = SpotifyConfig::new("my-client-id", "https://my-app.com/api/callback".parse()?)
///     .with_client_secret(secret);
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SpotifyConfig {
    pub(crate) client_id: String,
    pub(crate) client_secret: Option<String>,
    pub(crate) redirect_uri: Url,
    pub(crate) auth_url: Url,
    pub(crate) token_url: Url,
    pub(crate) api_base: Url,
    pub(crate) scopes: Vec<String>,
}

impl SpotifyConfig {
    /// Create a new configuration from the public client identifier and
    /// registered redirect URI.
    ///
    /// The client secret is server-held only; browser-side callers (the auth
    /// orchestrator) never set it.
    #[must_use]
    pub fn new(client_id: impl Into<String>, redirect_uri: Url) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            redirect_uri,
            auth_url: "https://accounts.spotify.com/authorize"
                .parse()
                .expect("valid default URL"),
            token_url: "https://accounts.spotify.com/api/token"
                .parse()
                .expect("valid default URL"),
            api_base: "https://api.spotify.com/v1"
                .parse()
                .expect("valid default URL"),
            scopes: vec![
                "user-read-recently-played".into(),
                "user-read-email".into(),
                "user-read-private".into(),
            ],
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// # Required env vars
    /// - `SPOTIFY_CLIENT_ID`: public client identifier
    /// - `SPOTIFY_REDIRECT_URI`: registered callback URI (must be a valid URL)
    ///
    /// # Optional env vars
    /// - `SPOTIFY_AUTH_URL`, `SPOTIFY_TOKEN_URL`, `SPOTIFY_API_BASE`: endpoint overrides
    /// - `SPOTIFY_SCOPES`: comma-separated scope list
    ///
    /// The client secret is deliberately not read here; see
    /// [`AppConfig::from_env`](crate::api::AppConfig::from_env) for the
    /// server-side configuration that adds it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required variable is missing or a URL
    /// does not parse.
    pub fn from_env() -> Result<Self, Error> {
        let client_id = std::env::var("SPOTIFY_CLIENT_ID")
            .map_err(|_| Error::Config("SPOTIFY_CLIENT_ID is required".into()))?;
        let redirect_uri_str = std::env::var("SPOTIFY_REDIRECT_URI")
            .map_err(|_| Error::Config("SPOTIFY_REDIRECT_URI is required".into()))?;
        let redirect_uri: Url = redirect_uri_str
            .parse()
            .map_err(|e| Error::Config(format!("SPOTIFY_REDIRECT_URI: {e}")))?;

        let mut config = Self::new(client_id, redirect_uri);

        if let Ok(url_str) = std::env::var("SPOTIFY_AUTH_URL") {
            let url: Url = url_str
                .parse()
                .map_err(|e| Error::Config(format!("SPOTIFY_AUTH_URL: {e}")))?;
            config = config.with_auth_url(url);
        }
        if let Ok(url_str) = std::env::var("SPOTIFY_TOKEN_URL") {
            let url: Url = url_str
                .parse()
                .map_err(|e| Error::Config(format!("SPOTIFY_TOKEN_URL: {e}")))?;
            config = config.with_token_url(url);
        }
        if let Ok(url_str) = std::env::var("SPOTIFY_API_BASE") {
            let url: Url = url_str
                .parse()
                .map_err(|e| Error::Config(format!("SPOTIFY_API_BASE: {e}")))?;
            config = config.with_api_base(url);
        }
        if let Ok(scopes) = std::env::var("SPOTIFY_SCOPES") {
            config = config.with_scopes(scopes.split(',').map(|s| s.trim().to_string()).collect());
        }

        Ok(config)
    }

    /// Set the client secret (server-side only).
    #[must_use]
    pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Override the authorization endpoint.
    #[must_use]
    pub fn with_auth_url(mut self, url: Url) -> Self {
        self.auth_url = url;
        self
    }

    /// Override the token exchange endpoint.
    #[must_use]
    pub fn with_token_url(mut self, url: Url) -> Self {
        self.token_url = url;
        self
    }

    /// Override the Web API base URL.
    #[must_use]
    pub fn with_api_base(mut self, url: Url) -> Self {
        self.api_base = url;
        self
    }

    /// Override the requested scopes (default: recently-played, email, private).
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Public client identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Registered redirect URI.
    #[must_use]
    pub fn redirect_uri(&self) -> &Url {
        &self.redirect_uri
    }

    /// Requested scopes.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Whether the server-held client secret is configured.
    #[must_use]
    pub fn has_client_secret(&self) -> bool {
        self.client_secret.is_some()
    }

    /// Build a Web API endpoint URL under the configured base.
    pub(crate) fn api_endpoint(&self, path: &str) -> Url {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .expect("API base URL can host path segments")
            .pop_if_empty()
            .extend(path.split('/'));
        url
    }
}

/// Token response from the Spotify token endpoint.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Token lifetime in seconds; becomes the session cookie `Max-Age`.
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Minimal profile projection from Spotify's `/me` endpoint.
///
/// Transient per validation call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// One entry of the recently-played history.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct PlayedItem {
    pub track: Track,
    #[serde(default)]
    pub played_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct PlayHistory {
    #[serde(default)]
    pub items: Vec<PlayedItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[non_exhaustive]
pub struct Track {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[non_exhaustive]
pub struct Playlist {
    pub id: String,
    pub name: String,
}

/// One page of search results.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PlaylistSearchResponse {
    #[serde(default)]
    playlists: Page<Playlist>,
}

#[derive(Debug, Clone, Deserialize)]
struct TrackSearchResponse {
    #[serde(default)]
    tracks: Page<Track>,
}

/// Spotify client: authorization-code exchange plus the bearer-token data
/// calls made on the user's behalf.
pub struct SpotifyClient {
    config: SpotifyConfig,
    http: reqwest::Client,
}

impl SpotifyClient {
    /// Create a new Spotify client.
    #[must_use]
    pub fn new(config: SpotifyConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    /// Build the full-page authorization redirect URL.
    #[must_use]
    pub fn authorization_url(&self) -> String {
        let scope = self.config.scopes.join(" ");

        let mut url = self.config.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", self.config.redirect_uri.as_str())
            .append_pair("scope", &scope);

        url.into()
    }

    /// Exchange a one-time authorization code for an access token.
    ///
    /// No retry on failure: the code is consumed by the attempt whether or
    /// not it succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no client secret is configured,
    /// [`Error::Http`] on network failure, or [`Error::Upstream`] if the
    /// token endpoint rejects the exchange.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, Error> {
        let client_secret = self
            .config
            .client_secret
            .as_deref()
            .ok_or_else(|| Error::Config("client secret is required for token exchange".into()))?;

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", client_secret),
        ];

        let response = self
            .http
            .post(self.config.token_url.clone())
            .form(&params)
            .send()
            .await?;

        let response = ensure_success(response, "token exchange").await?;
        response.json::<TokenResponse>().await.map_err(Into::into)
    }

    /// Fetch the authenticated user's profile. A non-2xx here means the
    /// stored token is no longer accepted by Spotify.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Upstream`]
    /// if the profile endpoint rejects the token.
    pub async fn current_user(&self, access_token: &str) -> Result<UserProfile, Error> {
        let response = self
            .http
            .get(self.config.api_endpoint("me"))
            .bearer_auth(access_token)
            .send()
            .await?;

        let response = ensure_success(response, "profile request").await?;
        response.json::<UserProfile>().await.map_err(Into::into)
    }

    /// Fetch the user's recently-played tracks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Upstream`]
    /// if the endpoint rejects the token.
    pub async fn recently_played(&self, access_token: &str) -> Result<PlayHistory, Error> {
        let response = self
            .http
            .get(self.config.api_endpoint("me/player/recently-played"))
            .bearer_auth(access_token)
            .send()
            .await?;

        let response = ensure_success(response, "recently-played request").await?;
        response.json::<PlayHistory>().await.map_err(Into::into)
    }

    /// Search playlists matching a mood or genre query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Upstream`]
    /// if the search endpoint rejects the request.
    pub async fn search_playlists(
        &self,
        access_token: &str,
        query: &str,
    ) -> Result<Vec<Playlist>, Error> {
        let response: PlaylistSearchResponse = self.search(access_token, query, "playlist").await?;
        Ok(response.playlists.items)
    }

    /// Search tracks matching a mood or genre query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Upstream`]
    /// if the search endpoint rejects the request.
    pub async fn search_tracks(&self, access_token: &str, query: &str) -> Result<Vec<Track>, Error> {
        let response: TrackSearchResponse = self.search(access_token, query, "track").await?;
        Ok(response.tracks.items)
    }

    async fn search<T: serde::de::DeserializeOwned>(
        &self,
        access_token: &str,
        query: &str,
        kind: &str,
    ) -> Result<T, Error> {
        let mut url = self.config.api_endpoint("search");
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("type", kind);

        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let response = ensure_success(response, "search request").await?;
        response.json::<T>().await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SpotifyConfig {
        SpotifyConfig::new(
            "test-client",
            "https://example.com/api/callback".parse().unwrap(),
        )
    }

    #[test]
    fn test_authorization_url_contains_code_flow_params() {
        let client = SpotifyClient::new(test_config());
        let url = client.authorization_url();

        assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
        assert!(url.contains("client_id=test-client"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fapi%2Fcallback"));
        assert!(url.contains("scope=user-read-recently-played+user-read-email+user-read-private"));
    }

    #[test]
    fn test_config_constructor_defaults() {
        let config = test_config();

        assert_eq!(config.client_id(), "test-client");
        assert_eq!(
            config.redirect_uri().as_str(),
            "https://example.com/api/callback"
        );
        assert!(!config.has_client_secret());
        assert_eq!(config.scopes().len(), 3);
    }

    #[test]
    fn test_config_with_overrides() {
        let config = test_config()
            .with_client_secret("shh")
            .with_auth_url("https://auth.example.com/authorize".parse().unwrap())
            .with_scopes(vec!["user-read-email".into()]);

        assert!(config.has_client_secret());
        assert_eq!(config.scopes(), &["user-read-email"]);

        let url = SpotifyClient::new(config).authorization_url();
        assert!(url.starts_with("https://auth.example.com/authorize?"));
        assert!(url.contains("scope=user-read-email"));
    }

    #[test]
    fn test_api_endpoint_joins_under_base_path() {
        let config = test_config();
        assert_eq!(
            config.api_endpoint("me").as_str(),
            "https://api.spotify.com/v1/me"
        );
        assert_eq!(
            config.api_endpoint("me/player/recently-played").as_str(),
            "https://api.spotify.com/v1/me/player/recently-played"
        );

        // A bare host (wiremock-style base) gains the path directly.
        let config = test_config().with_api_base("http://127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.api_endpoint("me").as_str(), "http://127.0.0.1:9000/me");
    }

    #[tokio::test]
    async fn test_exchange_code_requires_client_secret() {
        let client = SpotifyClient::new(test_config());
        let err = client.exchange_code("abc123").await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_search_tracks_parses_result_page() {
        use wiremock::matchers::{bearer_token, method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "dance"))
            .and(query_param("type", "track"))
            .and(bearer_token("T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tracks": {
                    "items": [{ "name": "Song", "artists": [{ "name": "Artist" }] }],
                },
            })))
            .mount(&server)
            .await;

        let config = test_config().with_api_base(server.uri().parse().unwrap());
        let tracks = SpotifyClient::new(config)
            .search_tracks("T", "dance")
            .await
            .unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "Song");
        assert_eq!(tracks[0].artists[0].name, "Artist");
    }
}
