use crate::error::Error;
use crate::labeling::LabelerConfig;
use crate::spotify::SpotifyConfig;

/// Shared server settings used by both config and runtime state.
#[derive(Clone)]
pub(crate) struct AppSettings {
    pub(crate) secure_cookies: bool,
    pub(crate) login_redirect: String,
    pub(crate) bind_addr: String,
}

impl AppSettings {
    fn defaults() -> Self {
        Self {
            secure_cookies: false,
            login_redirect: "/".into(),
            bind_addr: "0.0.0.0:3000".into(),
        }
    }
}

/// MoodMatch server configuration.
///
/// Required collaborator configs are constructor parameters.
/// Use [`from_env()`](AppConfig::from_env) for convention-based setup,
/// or [`new()`](AppConfig::new) with `with_*` methods for full control.
pub struct AppConfig {
    pub(crate) spotify: SpotifyConfig,
    pub(crate) labeler: LabelerConfig,
    pub(crate) settings: AppSettings,
}

impl AppConfig {
    /// Create config from the two collaborator configurations.
    ///
    /// All optional fields use development defaults (`Secure` cookie flag
    /// off). Override with `with_*` methods.
    #[must_use]
    pub fn new(spotify: SpotifyConfig, labeler: LabelerConfig) -> Self {
        Self {
            spotify,
            labeler,
            settings: AppSettings::defaults(),
        }
    }

    /// Create config from environment variables.
    ///
    /// # Required env vars
    /// - `SPOTIFY_CLIENT_ID`, `SPOTIFY_REDIRECT_URI`: public OAuth2 settings
    /// - `SPOTIFY_CLIENT_SECRET`: server-only client secret
    /// - `OPENAI_API_KEY`: server-only language-model key
    ///
    /// # Optional env vars
    /// - `APP_ENV`: set to `production` to mark the session cookie `Secure`
    /// - `BIND_ADDR`: listen address (default `0.0.0.0:3000`)
    /// - `OPENAI_API_BASE`: override the completions endpoint base
    /// - plus the `SPOTIFY_*` overrides read by [`SpotifyConfig::from_env`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if required env vars are missing or URLs
    /// are invalid.
    pub fn from_env() -> Result<Self, Error> {
        let client_secret = std::env::var("SPOTIFY_CLIENT_SECRET")
            .map_err(|_| Error::Config("SPOTIFY_CLIENT_SECRET is required".into()))?;
        let spotify = SpotifyConfig::from_env()?.with_client_secret(client_secret);

        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| Error::Config("OPENAI_API_KEY is required".into()))?;
        let mut labeler = LabelerConfig::new(api_key);
        if let Ok(url_str) = std::env::var("OPENAI_API_BASE") {
            let url = url_str
                .parse()
                .map_err(|e| Error::Config(format!("OPENAI_API_BASE: {e}")))?;
            labeler = labeler.with_api_base(url);
        }

        let production = matches!(std::env::var("APP_ENV").as_deref(), Ok("production"));

        let mut config = Self::new(spotify, labeler).with_secure_cookies(production);
        if let Ok(addr) = std::env::var("BIND_ADDR") {
            config = config.with_bind_addr(addr);
        }

        Ok(config)
    }

    /// Mark the session cookie `Secure` (production deployments).
    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.settings.secure_cookies = secure;
        self
    }

    /// Where the callback redirects after a successful exchange.
    #[must_use]
    pub fn with_login_redirect(mut self, path: impl Into<String>) -> Self {
        self.settings.login_redirect = path.into();
        self
    }

    /// Listen address for the server binary.
    #[must_use]
    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.settings.bind_addr = addr.into();
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> &str {
        &self.settings.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        let spotify = SpotifyConfig::new(
            "test-client",
            "https://example.com/api/callback".parse().unwrap(),
        );
        AppConfig::new(spotify, LabelerConfig::new("sk-test"))
    }

    #[test]
    fn defaults_are_development_friendly() {
        let config = test_config();
        assert!(!config.settings.secure_cookies);
        assert_eq!(config.settings.login_redirect, "/");
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn builder_overrides() {
        let config = test_config()
            .with_secure_cookies(true)
            .with_login_redirect("/home")
            .with_bind_addr("127.0.0.1:8080");

        assert!(config.settings.secure_cookies);
        assert_eq!(config.settings.login_redirect, "/home");
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }
}
