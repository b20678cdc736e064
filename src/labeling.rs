//! Mood labeling and palette generation via the OpenAI completions API.
//!
//! Both lookups return `Result` so the caller decides the fallback; the
//! HTTP boundary maps failures to [`DEFAULT_MOOD`] and the fixed color
//! table instead of propagating them.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, ensure_success};
use crate::theme::Palette;

/// Mood label used when the language model cannot be reached.
pub const DEFAULT_MOOD: &str = "Relaxed";

const COMPLETION_MODEL: &str = "gpt-3.5-turbo-instruct";
const COMPLETION_TEMPERATURE: f32 = 0.7;

/// OpenAI API configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct LabelerConfig {
    pub(crate) api_key: String,
    pub(crate) api_base: Url,
}

impl LabelerConfig {
    /// Create a configuration with the server-held API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: "https://api.openai.com/v1"
                .parse()
                .expect("valid default URL"),
        }
    }

    /// Override the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, url: Url) -> Self {
        self.api_base = url;
        self
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .expect("API base URL can host path segments")
            .pop_if_empty()
            .extend(path.split('/'));
        url
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}

/// Maps free-text mood descriptions to genre labels and color palettes.
pub struct MoodLabeler {
    config: LabelerConfig,
    http: reqwest::Client,
}

impl MoodLabeler {
    /// Create a new labeler.
    #[must_use]
    pub fn new(config: LabelerConfig) -> Self {
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

    /// Map a free-text mood description to a short genre label.
    ///
    /// An empty completion degrades to [`DEFAULT_MOOD`] rather than an
    /// empty label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Upstream`]
    /// if the completions endpoint rejects the request.
    pub async fn label_mood(&self, message: &str) -> Result<String, Error> {
        let prompt = format!(
            "The user described their current mood as:\n\"{message}\"\n\n\
             What Spotify music genre best matches this mood? Respond with only \
             the genre (e.g., pop, chill, acoustic, metal, edm, lo-fi, dance, ambient, etc)."
        );

        let text = self.complete(prompt, 5).await?;
        let mood = text.trim();
        if mood.is_empty() {
            Ok(DEFAULT_MOOD.to_string())
        } else {
            Ok(mood.to_string())
        }
    }

    /// Ask the model for a primary/secondary color pair matching a mood.
    ///
    /// The completion text must parse as a JSON object with valid hex
    /// `primary` and `secondary` members; anything else is an error so the
    /// boundary can fall back to the fixed table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Upstream`]
    /// if the endpoint rejects the request or the completion is not a
    /// usable palette.
    pub async fn palette_for(&self, mood: &str) -> Result<Palette, Error> {
        let prompt = format!(
            "The user described their mood as \"{mood}\".\n\n\
             Provide a primary and secondary hex color scheme that best matches \
             this mood. Respond with a JSON object containing \"primary\" and \
             \"secondary\" keys."
        );

        let text = self.complete(prompt, 100).await?;
        serde_json::from_str::<Palette>(text.trim()).map_err(|e| Error::Upstream {
            operation: "palette completion",
            status: None,
            detail: format!("unusable completion ({e}): {text}"),
        })
    }

    async fn complete(&self, prompt: String, max_tokens: u32) -> Result<String, Error> {
        let request = CompletionRequest {
            model: COMPLETION_MODEL,
            prompt,
            max_tokens,
            temperature: COMPLETION_TEMPERATURE,
        };

        let response = self
            .http
            .post(self.config.endpoint("completions"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let response = ensure_success(response, "completion request").await?;
        let completion: CompletionResponse = response.json().await?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion_body(text: &str) -> serde_json::Value {
        serde_json::json!({ "choices": [{ "text": text }] })
    }

    fn labeler_for(server: &MockServer) -> MoodLabeler {
        let config = LabelerConfig::new("sk-test").with_api_base(server.uri().parse().unwrap());
        MoodLabeler::new(config)
    }

    #[tokio::test]
    async fn label_mood_trims_completion_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/completions"))
            .and(body_string_contains("feeling nostalgic"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("\n\nlo-fi ")))
            .mount(&server)
            .await;

        let labeler = labeler_for(&server);
        let mood = labeler.label_mood("feeling nostalgic").await.unwrap();
        assert_eq!(mood, "lo-fi");
    }

    #[tokio::test]
    async fn label_mood_empty_completion_degrades_to_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("  ")))
            .mount(&server)
            .await;

        let labeler = labeler_for(&server);
        assert_eq!(labeler.label_mood("meh").await.unwrap(), DEFAULT_MOOD);
    }

    #[tokio::test]
    async fn label_mood_surfaces_upstream_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let labeler = labeler_for(&server);
        let err = labeler.label_mood("meh").await.unwrap_err();
        assert!(matches!(err, Error::Upstream { status: Some(500), .. }));
    }

    #[tokio::test]
    async fn palette_for_parses_json_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
                "\n{\"primary\":\"#112233\",\"secondary\":\"#445566\"}",
            )))
            .mount(&server)
            .await;

        let labeler = labeler_for(&server);
        let palette = labeler.palette_for("sad").await.unwrap();
        assert_eq!(palette.primary.as_str(), "#112233");
        assert_eq!(palette.secondary.as_str(), "#445566");
    }

    #[tokio::test]
    async fn palette_for_rejects_non_json_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_body("a calming blue")),
            )
            .mount(&server)
            .await;

        let labeler = labeler_for(&server);
        let err = labeler.palette_for("sad").await.unwrap_err();
        assert!(matches!(err, Error::Upstream { status: None, .. }));
    }

    #[tokio::test]
    async fn palette_for_rejects_invalid_hex_members() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
                "{\"primary\":\"blue\",\"secondary\":\"#445566\"}",
            )))
            .mount(&server)
            .await;

        let labeler = labeler_for(&server);
        assert!(labeler.palette_for("sad").await.is_err());
    }
}
