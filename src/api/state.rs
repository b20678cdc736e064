use std::sync::Arc;

use super::config::{AppConfig, AppSettings};
use crate::labeling::MoodLabeler;
use crate::spotify::SpotifyClient;

/// Shared state for route handlers. Cheap to clone per request; the server
/// itself holds nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub(crate) spotify: Arc<SpotifyClient>,
    pub(crate) labeler: Arc<MoodLabeler>,
    pub(crate) settings: AppSettings,
}

impl AppState {
    pub(crate) fn new(config: AppConfig) -> Self {
        Self {
            spotify: Arc::new(SpotifyClient::new(config.spotify)),
            labeler: Arc::new(MoodLabeler::new(config.labeler)),
            settings: config.settings,
        }
    }
}
