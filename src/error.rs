#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An upstream service rejected the request or returned a malformed payload.
    #[error("{operation} failed: {detail}")]
    Upstream {
        operation: &'static str,
        status: Option<u16>,
        detail: String,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid hex color: {0}")]
    InvalidColor(String),
}

/// Checks an upstream HTTP response status; returns the response on success
/// or an [`Error::Upstream`] carrying the status and body.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
    operation: &'static str,
) -> Result<reqwest::Response, Error> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let detail = response.text().await.unwrap_or_default();
    Err(Error::Upstream {
        operation,
        status: Some(status),
        detail,
    })
}
