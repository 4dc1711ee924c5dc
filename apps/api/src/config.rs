use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Keyword-count bounds passed to the keyword source.
    pub min_keywords: usize,
    pub max_keywords: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let min_keywords = optional_usize("MIN_KEYWORDS", 3)?;
        let max_keywords = optional_usize("MAX_KEYWORDS", 5)?;
        if min_keywords == 0 || max_keywords < min_keywords {
            anyhow::bail!(
                "invalid keyword bounds: MIN_KEYWORDS={min_keywords}, MAX_KEYWORDS={max_keywords}"
            );
        }

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            min_keywords,
            max_keywords,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_usize(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("'{key}' must be a non-negative integer")),
        Err(_) => Ok(default),
    }
}
