#![doc = include_str!("../README.md")]

pub mod api;
pub mod client;
pub mod error;
pub mod labeling;
pub mod session;
pub mod spotify;
pub mod theme;

// Re-exports for convenient access
pub use api::{ApiError, AppConfig, router};
pub use client::{AuthOrchestrator, AuthPhase};
pub use error::Error;
pub use labeling::{DEFAULT_MOOD, LabelerConfig, MoodLabeler};
pub use session::SESSION_COOKIE_NAME;
pub use spotify::{SpotifyClient, SpotifyConfig, TokenResponse, UserProfile};
pub use theme::{HexColor, Palette, default_palette};
