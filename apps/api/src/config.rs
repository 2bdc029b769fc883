use anyhow::{Context, Result};

/// Default scoring-provider endpoint; override with SCORING_API_URL.
const DEFAULT_BASE_URL: &str = "https://api.cvscore.io";

/// Immutable scoring-provider settings: loaded once at startup, passed into
/// the client by value, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    /// May be empty: the engine then runs on the heuristic fallback until a
    /// key is provisioned.
    pub api_key: String,
    /// Per-call timeout wrapped around the HTTP request.
    pub timeout_secs: u64,
    /// Total attempt budget, including the first try.
    pub retry_count: u32,
    /// Fixed delay between attempts. Not exponential.
    pub retry_delay_ms: u64,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    /// Bound on in-flight provider calls during bulk scoring.
    pub bulk_concurrency: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            provider: ProviderConfig {
                base_url: env_or("SCORING_API_URL", DEFAULT_BASE_URL),
                api_key: std::env::var("SCORING_API_KEY").unwrap_or_default(),
                timeout_secs: parse_env("SCORING_TIMEOUT_SECS", 30)?,
                retry_count: parse_env("SCORING_MAX_RETRIES", 3)?,
                retry_delay_ms: parse_env("SCORING_RETRY_DELAY_MS", 1000)?,
            },
            bulk_concurrency: parse_env("BULK_SCORING_CONCURRENCY", 5)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
