//! Configuration loading from environment variables.

use serde::Deserialize;
use std::env;

/// Default HTTP port for the mdforge server.
pub const DEFAULT_PORT: u16 = 38520;

/// Default OpenAI-compatible upstream base URL.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.groq.com/openai/v1";

/// Default generation model identifier.
pub const DEFAULT_MODEL: &str = "mixtral-8x7b-32768";

/// Runtime configuration for mdforge.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Upstream API key. Requests fail with a configuration error when unset.
    pub api_key: Option<String>,
    pub upstream_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    /// Sliding-window length for admission control, in seconds.
    pub rate_limit_window_secs: u64,
    /// Admitted requests per identity per window.
    pub rate_limit_max_requests: usize,
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
///
/// # Arguments
/// - `name`: Environment variable name.
///
/// # Returns
/// `true` when the value is a recognized truthy value.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            api_key: env::var("GROQ_API_KEY").ok().and_then(non_empty),
            upstream_url: env::var("GROQ_BASE_URL")
                .ok()
                .and_then(non_empty)
                .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
            model: env::var("GENERATION_MODEL")
                .ok()
                .and_then(non_empty)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: env::var("GENERATION_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.7),
            max_tokens: env::var("GENERATION_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4096),
            top_p: env::var("GENERATION_TOP_P")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.9),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            rate_limit_max_requests: env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{non_empty, parse_env_flag};

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_accepts_falsy_values() {
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_rejects_unknown_values() {
        assert_eq!(parse_env_flag("maybe"), None);
        assert_eq!(parse_env_flag("enabled"), None);
    }

    #[test]
    fn non_empty_filters_whitespace_only_values() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty(" key ".to_string()), Some("key".to_string()));
    }
}
