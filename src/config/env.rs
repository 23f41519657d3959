//! Environment variable configuration
//!
//! Provides environment variable overrides for scenario files and CLI
//! defaults.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "PAYMENT_PROBE";

/// Configuration taken from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Payment service base URL from PAYMENT_PROBE_BASE_URL
    pub base_url: Option<String>,
    /// Full health endpoint URL from PAYMENT_PROBE_HEALTH_URL
    pub health_url: Option<String>,
    /// API key from PAYMENT_PROBE_API_KEY
    pub api_key: Option<String>,
    /// Secret key from PAYMENT_PROBE_SECRET_KEY
    pub secret_key: Option<String>,
    /// Iterations from PAYMENT_PROBE_ITERATIONS
    pub iterations: Option<u32>,
    /// Pause between iterations from PAYMENT_PROBE_PAUSE_MS
    pub pause_ms: Option<u64>,
    /// Output format from PAYMENT_PROBE_FORMAT
    pub format: Option<String>,
    /// Log level from PAYMENT_PROBE_LOG
    pub log_level: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            base_url: get_env("BASE_URL"),
            health_url: get_env("HEALTH_URL"),
            api_key: get_env("API_KEY"),
            secret_key: get_env("SECRET_KEY"),
            iterations: get_env_parse("ITERATIONS"),
            pause_ms: get_env_parse("PAUSE_MS"),
            format: get_env("FORMAT"),
            log_level: get_env("LOG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.base_url.is_some()
            || self.health_url.is_some()
            || self.api_key.is_some()
            || self.secret_key.is_some()
            || self.iterations.is_some()
            || self.pause_ms.is_some()
            || self.format.is_some()
            || self.log_level.is_some()
    }

    /// Print current environment configuration. Secrets are masked.
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_BASE_URL:   {:?}", ENV_PREFIX, self.base_url);
        println!("  {}_HEALTH_URL: {:?}", ENV_PREFIX, self.health_url);
        println!("  {}_API_KEY:    {}", ENV_PREFIX, mask(&self.api_key));
        println!("  {}_SECRET_KEY: {}", ENV_PREFIX, mask(&self.secret_key));
        println!("  {}_ITERATIONS: {:?}", ENV_PREFIX, self.iterations);
        println!("  {}_PAUSE_MS:   {:?}", ENV_PREFIX, self.pause_ms);
        println!("  {}_FORMAT:     {:?}", ENV_PREFIX, self.format);
        println!("  {}_LOG:        {:?}", ENV_PREFIX, self.log_level);
    }
}

fn mask(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "<set>",
        None => "None",
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}"))
        .ok()
        .filter(|v| !v.is_empty())
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_nothing() {
        assert!(!EnvConfig::default().has_any());
    }

    #[test]
    fn test_has_any() {
        let env = EnvConfig {
            pause_ms: Some(10),
            ..Default::default()
        };
        assert!(env.has_any());
    }

    #[test]
    fn test_health_url_counts_as_set() {
        let env = EnvConfig {
            health_url: Some("http://svc/health".to_string()),
            ..Default::default()
        };
        assert!(env.has_any());
    }

    #[test]
    fn test_mask_hides_secrets() {
        assert_eq!(mask(&Some("s3cret".to_string())), "<set>");
        assert_eq!(mask(&None), "None");
    }
}
