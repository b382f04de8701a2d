use std::{env, fmt, net::SocketAddr, str::FromStr};
use thiserror::Error;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid environment variable format for {0}: {1}")]
    InvalidVar(String, String),
}

/// Connection parameters for the generative backend.
#[derive(Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

// Keep the API key out of logs.
impl fmt::Debug for AnthropicConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// How ideas get generated. Resolved once at startup and threaded explicitly
/// through the app; nothing re-reads the environment after `Config::load`.
#[derive(Clone, Debug)]
pub enum GenerationMode {
    /// No generative backend configured; ideas come from the template pool.
    Demo,
    /// Prompt the generative backend and validate its raw output.
    Live(AnthropicConfig),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub mode: GenerationMode,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignores errors, relies on env vars otherwise)
        dotenvy::dotenv().ok();

        let bind_address_str =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = SocketAddr::from_str(&bind_address_str)
            .map_err(|e| ConfigError::InvalidVar("BIND_ADDRESS".into(), e.to_string()))?;

        let demo_flag = env::var("DEMO_MODE").map(|v| v == "true").unwrap_or(false);
        let mode = resolve_mode(
            demo_flag,
            env::var("ANTHROPIC_API_KEY").ok(),
            env::var("ANTHROPIC_MODEL").ok(),
            env::var("ANTHROPIC_BASE_URL").ok(),
        );

        Ok(Config { bind_address, mode })
    }
}

/// Demo wins when forced or when no API key is configured; anything else runs
/// live against the backend.
fn resolve_mode(
    demo_flag: bool,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
) -> GenerationMode {
    if demo_flag {
        return GenerationMode::Demo;
    }
    match api_key {
        Some(api_key) if !api_key.trim().is_empty() => GenerationMode::Live(AnthropicConfig {
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }),
        _ => GenerationMode::Demo,
    }
}
