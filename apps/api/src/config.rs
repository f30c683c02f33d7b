use anyhow::{bail, Context, Result};

use crate::llm_client::models::{is_known_model, DEFAULT_MODEL};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Application configuration loaded from environment variables.
/// Built once at startup and passed explicitly to everything that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: String,
    pub openrouter_base_url: String,
    pub default_model: String,
    /// Sent as `HTTP-Referer` so the provider can attribute traffic.
    pub app_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_model = optional_env("AI_DEFAULT_MODEL", DEFAULT_MODEL);
        if !is_known_model(&default_model) {
            bail!("AI_DEFAULT_MODEL '{default_model}' is not a supported model");
        }

        Ok(Config {
            openrouter_api_key: require_env("OPENROUTER_API_KEY")?,
            openrouter_base_url: optional_env("OPENROUTER_BASE_URL", DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            default_model,
            app_url: optional_env("APP_URL", DEFAULT_APP_URL),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for tests; never touches the process environment.
    pub fn for_tests() -> Self {
        Config {
            openrouter_api_key: "test-key".to_string(),
            openrouter_base_url: "http://127.0.0.1:9".to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
