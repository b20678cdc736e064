//! HTTP boundary for the MoodMatch server.
//!
//! Every provider failure is converted into a defined response shape here;
//! nothing throws past a handler.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use moodmatch::api::{AppConfig, router};
//!
//! let config = AppConfig::from_env()?;
//! let app = router(config);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

mod config;
mod error;
mod extract;
mod routes;
mod state;
mod types;

pub use config::AppConfig;
pub use error::ApiError;
pub use extract::SessionToken;
pub use routes::router;
pub use state::AppState;
pub use types::{AuthStatus, Health, HealthEnvironment, MessageBody, MoodRequest, MoodResponse, ThemeRequest, TokenBody};
