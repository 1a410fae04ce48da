//! HTTP boundary for the meeting summarizer.
//!
//! This layer owns request parsing, presence validation of required fields
//! and the translation of `domain` failures into HTTP responses. It never
//! calls providers directly.

use log::info;
use service::config::Config;

pub(crate) mod controller;
pub mod error;
pub(crate) mod params;
pub mod router;

pub use error::{Error, Result};

/// Application state passed into every request handler.
/// Holds the immutable configuration assembled once at process start;
/// provider clients are constructed from it per call.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

/// Binds the configured interface/port and serves the API router until shutdown.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let listen_address = format!(
        "{}:{}",
        app_state.config.interface.as_deref().unwrap_or("127.0.0.1"),
        app_state.config.port
    );

    let router = router::define_routes(app_state);
    let listener = tokio::net::TcpListener::bind(&listen_address).await?;

    info!("Server running on {listen_address}");

    axum::serve(listener, router).await
}
