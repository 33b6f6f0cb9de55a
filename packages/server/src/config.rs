use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3699;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CLOUD_FUNCTIONS_URL: &str =
    "https://us-central1-pentra-claude-gcp.cloudfunctions.net";

/// gpt-4o-mini: planning
pub const DEFAULT_PLANNER_MODEL: &str = "gpt-4o-mini-2024-07-18";
/// gpt-4o: final schema-constrained formatting
pub const DEFAULT_FORMATTER_MODEL: &str = "gpt-4o-2024-08-06";
/// Claude 3 Haiku behind the cloud-function wrapper: enrichment
pub const DEFAULT_ENRICHMENT_MODEL: &str = "claude-3-haiku-20240307";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;
const REQUIRED_ENV_VARS: &[&str] = &["OPENAI_API_KEY"];

/// Models used by each orchestrator step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub planner: String,
    pub enrichment: String,
    pub formatter: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            planner: DEFAULT_PLANNER_MODEL.to_string(),
            enrichment: DEFAULT_ENRICHMENT_MODEL.to_string(),
            formatter: DEFAULT_FORMATTER_MODEL.to_string(),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub cloud_functions_url: String,
    pub models: ModelConfig,
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        validate_environment(|key| env::var(key).ok())?;

        let defaults = ModelConfig::default();

        Ok(Self {
            port: match env::var("PORT") {
                Ok(port) => port.parse().context("PORT must be a valid number")?,
                Err(_) => DEFAULT_PORT,
            },
            openai_api_key: env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            cloud_functions_url: env::var("CLOUD_FUNCTIONS_URL")
                .unwrap_or_else(|_| DEFAULT_CLOUD_FUNCTIONS_URL.to_string()),
            models: ModelConfig {
                planner: env::var("ORCHID_PLANNER_MODEL").unwrap_or(defaults.planner),
                enrichment: env::var("ORCHID_ENRICHMENT_MODEL").unwrap_or(defaults.enrichment),
                formatter: env::var("ORCHID_FORMATTER_MODEL").unwrap_or(defaults.formatter),
            },
            http_timeout: Duration::from_secs(match env::var("ORCHID_HTTP_TIMEOUT_SECS") {
                Ok(secs) => secs
                    .parse()
                    .context("ORCHID_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
                Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
            }),
        })
    }
}

/// Fails with every missing required variable named, so startup can abort
/// with one descriptive error.
pub fn validate_environment(lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
    let missing: Vec<&str> = REQUIRED_ENV_VARS
        .iter()
        .copied()
        .filter(|key| lookup(key).map_or(true, |v| v.trim().is_empty()))
        .collect();

    if !missing.is_empty() {
        bail!(
            "Missing required environment variables: {}",
            missing.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_named_in_error() {
        let err = validate_environment(|_| None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: OPENAI_API_KEY"
        );
    }

    #[test]
    fn blank_key_counts_as_missing() {
        assert!(validate_environment(|_| Some("  ".to_string())).is_err());
    }

    #[test]
    fn present_key_passes() {
        assert!(validate_environment(|_| Some("sk-test".to_string())).is_ok());
    }

    #[test]
    fn default_models_match_pipeline_roles() {
        let models = ModelConfig::default();
        assert_eq!(models.planner, "gpt-4o-mini-2024-07-18");
        assert_eq!(models.formatter, "gpt-4o-2024-08-06");
        assert_eq!(models.enrichment, "claude-3-haiku-20240307");
    }
}
