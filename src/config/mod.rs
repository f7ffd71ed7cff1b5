//! Environment-based configuration.
//!
//! All settings come from environment variables (a `.env` file is honored via
//! `dotenvy`). Required keys are validated at startup so a misconfigured
//! deployment fails fast instead of at the first query.

use crate::error::{PitchsideError, Result};

/// Default football-data.org v4 base URL.
const DEFAULT_FOOTBALL_API_BASE: &str = "http://api.football-data.org/v4/";

/// Competition code for the Premier League in football-data.org.
const DEFAULT_COMPETITION: &str = "PL";

/// Azure OpenAI connection settings.
#[derive(Clone)]
pub struct AzureConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`.
    pub endpoint: String,
    /// Model label used for logging.
    pub model_name: String,
    /// Deployment name routed in the URL path.
    pub deployment: String,
    /// Subscription key sent as the `api-key` header.
    pub api_key: String,
    /// `api-version` query parameter.
    pub api_version: String,
}

impl std::fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureConfig")
            .field("endpoint", &self.endpoint)
            .field("model_name", &self.model_name)
            .field("deployment", &self.deployment)
            .field("api_key", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// football-data.org connection settings.
#[derive(Clone)]
pub struct FootballApiConfig {
    pub base_url: String,
    /// Sent as the `X-Auth-Token` header.
    pub api_key: String,
    /// Competition code in the teams endpoint path.
    pub competition: String,
}

impl std::fmt::Debug for FootballApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FootballApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("competition", &self.competition)
            .finish()
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub azure: AzureConfig,
    pub football: FootballApiConfig,
    /// Teams cache freshness window.
    pub cache_ttl_hours: u64,
    /// Completion token cap per LLM request.
    pub max_completion_tokens: u32,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Reads a `.env` file first when present. Fails with
    /// [`PitchsideError::Config`] when a required key is missing or a numeric
    /// value does not parse.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable source.
    ///
    /// The seam exists so tests can supply variables without mutating the
    /// process environment.
    pub fn load_with(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let azure = AzureConfig {
            endpoint: require(&get, "AZURE_OPENAI_ENDPOINT")?,
            model_name: var_or(&get, "AZURE_MODEL_NAME", "gpt-5-mini"),
            deployment: var_or(&get, "AZURE_DEPLOYMENT", "gpt-5-mini"),
            api_key: require(&get, "AZURE_OPENAI_API_KEY")?,
            api_version: var_or(&get, "OPENAI_API_VERSION", "2024-12-01-preview"),
        };

        let football = FootballApiConfig {
            base_url: var_or(&get, "FOOTBALL_API_BASE", DEFAULT_FOOTBALL_API_BASE),
            api_key: require(&get, "FOOTBALL_API_KEY")?,
            competition: var_or(&get, "PL_COMPETITION", DEFAULT_COMPETITION),
        };

        Ok(Self {
            azure,
            football,
            cache_ttl_hours: parse_var(&get, "CACHE_TTL_HOURS", 24)?,
            max_completion_tokens: parse_var(&get, "MAX_COMPLETION_TOKENS", 2048)?,
        })
    }
}

fn var_or(get: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get(key)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn require(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    get(key)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PitchsideError::Config(format!("{key} is required")))
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get(key).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse()
            .map_err(|e| PitchsideError::Config(format!("{key} is not a valid number: {e}"))),
        None => Ok(default),
    }
}
