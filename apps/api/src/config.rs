use anyhow::{Context, Result};

/// Default upper bound on accepted description length, in characters.
pub const DEFAULT_MAX_DESCRIPTION_CHARS: usize = 20_000;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numbers abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Requests whose description exceeds this many characters are rejected.
    pub max_description_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_description_chars: DEFAULT_MAX_DESCRIPTION_CHARS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_description_chars: optional_env("MAX_DESCRIPTION_CHARS")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_DESCRIPTION_CHARS must be a non-negative integer")?
                .unwrap_or(DEFAULT_MAX_DESCRIPTION_CHARS),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
