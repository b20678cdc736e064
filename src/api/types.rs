use serde::{Deserialize, Serialize};

use crate::spotify::{SpotifyConfig, UserProfile};

/// Body of `GET /api/auth-status`.
///
/// Always `200`; an invalid or absent session is data, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct AuthStatus {
    pub authenticated: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl AuthStatus {
    pub(crate) fn authenticated(user: UserProfile) -> Self {
        Self {
            authenticated: true,
            message: "User is authenticated".into(),
            user: Some(user),
        }
    }

    pub(crate) fn unauthenticated(message: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            message: message.into(),
            user: None,
        }
    }
}

/// Body of `GET /api/spotify-token`: the raw token, scoped to this single
/// same-origin response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct TokenBody {
    pub access_token: String,
}

/// Generic `{"message": ...}` response body (logout).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct MessageBody {
    pub message: String,
}

/// `{"error": ...}` body used by every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// Body of `POST /api/mood`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct MoodResponse {
    pub mood: String,
}

/// Body of `POST /api/theme-utils`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeRequest {
    #[serde(default)]
    pub mood: Option<String>,
}

/// Body of `GET /api/health`: configuration presence report, no secret
/// values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Health {
    pub status: String,
    pub environment: HealthEnvironment,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct HealthEnvironment {
    pub has_client_id: bool,
    pub has_client_secret: bool,
    pub has_redirect_uri: bool,
    pub redirect_uri: String,
}

impl Health {
    pub(crate) fn for_config(spotify: &SpotifyConfig) -> Self {
        Self {
            status: "ok".into(),
            environment: HealthEnvironment {
                has_client_id: !spotify.client_id().is_empty(),
                has_client_secret: spotify.has_client_secret(),
                has_redirect_uri: true,
                redirect_uri: spotify.redirect_uri().to_string(),
            },
            message: "API routes are working correctly".into(),
        }
    }
}
