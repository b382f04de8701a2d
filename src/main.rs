use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod backend;
mod config;
mod demo;
mod domain;
mod errors;
mod handlers;
mod models;
mod repositories;
mod routes;
mod validator;

use crate::backend::AnthropicBackend;
use crate::config::{Config, GenerationMode};
use crate::domain::{GenerativeBackend, IdeaRepository};
use crate::errors::AppError;
use crate::repositories::InMemoryIdeaRepository;

/// AppState holds shared resources for the web server.
pub struct AppState {
    pub idea_repo: Arc<dyn IdeaRepository>,
    /// `None` in demo mode; the template generator answers instead.
    pub backend: Option<Arc<dyn GenerativeBackend>>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing (logging)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "trend_generator_api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Mode is resolved exactly once here; everything downstream gets it
    // through the state, never from ad-hoc environment lookups.
    let config = Config::load()?;

    let backend: Option<Arc<dyn GenerativeBackend>> = match &config.mode {
        GenerationMode::Demo => {
            tracing::info!("Demo mode: serving template-generated ideas");
            None
        }
        GenerationMode::Live(anthropic) => {
            tracing::info!(model = %anthropic.model, "Live mode: generative backend configured");
            Some(Arc::new(AnthropicBackend::new(anthropic.clone())))
        }
    };

    let state = Arc::new(AppState {
        idea_repo: Arc::new(InMemoryIdeaRepository::new()),
        backend,
    });

    let app = routes::create_router(state);

    tracing::info!("Server listening on http://{}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
