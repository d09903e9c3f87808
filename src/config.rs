//! Session configuration.
//!
//! Every session receives its configuration explicitly at construction.
//! There is no process-wide provider state: two sessions built from
//! different configs never influence each other.

use crate::error::ConfigError;
use crate::extract::{default_hook_phrases, HookPhrase};

/// Default backend URL when `HOOKSTREAM_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default output size used to scale progress estimates.
pub const DEFAULT_EXPECTED_OUTPUT_CHARS: usize = 4000;

pub const ENV_BASE_URL: &str = "HOOKSTREAM_BASE_URL";
pub const ENV_MODEL: &str = "HOOKSTREAM_MODEL";
pub const ENV_API_KEY: &str = "HOOKSTREAM_API_KEY";
pub const ENV_TEMPERATURE: &str = "HOOKSTREAM_TEMPERATURE";
pub const ENV_EXPECTED_CHARS: &str = "HOOKSTREAM_EXPECTED_CHARS";
pub const ENV_JSON_FALLBACK: &str = "HOOKSTREAM_JSON_FALLBACK";

/// Where generation requests go and which model they ask for.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// Backend base URL, without trailing slash
    pub base_url: String,
    /// Model name forwarded to the backend (backend default when unset)
    pub model: Option<String>,
    /// Sampling temperature forwarded to the backend
    pub temperature: Option<f32>,
    /// Bearer token for the backend, if it requires one
    pub api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: None,
            temperature: None,
            api_key: None,
        }
    }
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Configuration for one streaming session.
///
/// # Example
///
/// ```ignore
/// use hookstream::config::{ProviderConfig, SessionConfig};
///
/// let config = SessionConfig::default()
///     .with_provider(ProviderConfig::new("http://localhost:8000"))
///     .with_json_fallback(false);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub provider: ProviderConfig,
    /// Output length treated as "nearly done" by the progress estimate
    pub expected_output_chars: usize,
    /// Ordered phrase table for hook-type inference (first match wins)
    pub hook_phrases: Vec<HookPhrase>,
    /// Whether untagged, JSON-shaped output is parsed as a record
    pub json_fallback: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            expected_output_chars: DEFAULT_EXPECTED_OUTPUT_CHARS,
            hook_phrases: default_hook_phrases(),
            json_fallback: true,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = provider;
        self
    }

    /// Set the expected output size. Zero is clamped to one.
    pub fn with_expected_output_chars(mut self, chars: usize) -> Self {
        self.expected_output_chars = chars.max(1);
        self
    }

    pub fn with_hook_phrases(mut self, phrases: Vec<HookPhrase>) -> Self {
        self.hook_phrases = phrases;
        self
    }

    pub fn with_json_fallback(mut self, enabled: bool) -> Self {
        self.json_fallback = enabled;
        self
    }

    /// Build a config from `HOOKSTREAM_*` environment variables.
    ///
    /// Unset variables keep their defaults; set but invalid values are
    /// reported rather than ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut provider = match get(ENV_BASE_URL) {
            Some(url) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ConfigError::invalid(
                        ENV_BASE_URL,
                        &url,
                        "expected an http:// or https:// URL",
                    ));
                }
                ProviderConfig::new(url)
            }
            None => ProviderConfig::default(),
        };
        if let Some(model) = get(ENV_MODEL) {
            provider = provider.with_model(model);
        }
        if let Some(key) = get(ENV_API_KEY) {
            provider = provider.with_api_key(key);
        }
        if let Some(raw) = get(ENV_TEMPERATURE) {
            let temperature: f32 = raw
                .parse()
                .map_err(|_| ConfigError::invalid(ENV_TEMPERATURE, &raw, "not a number"))?;
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigError::invalid(
                    ENV_TEMPERATURE,
                    &raw,
                    "must be between 0 and 2",
                ));
            }
            provider = provider.with_temperature(temperature);
        }

        let mut config = Self::default().with_provider(provider);

        if let Some(raw) = get(ENV_EXPECTED_CHARS) {
            let chars: usize = raw.parse().map_err(|_| {
                ConfigError::invalid(ENV_EXPECTED_CHARS, &raw, "not a positive integer")
            })?;
            if chars == 0 {
                return Err(ConfigError::invalid(
                    ENV_EXPECTED_CHARS,
                    &raw,
                    "not a positive integer",
                ));
            }
            config = config.with_expected_output_chars(chars);
        }
        if let Some(raw) = get(ENV_JSON_FALLBACK) {
            config = config.with_json_fallback(parse_bool(ENV_JSON_FALLBACK, &raw)?);
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, raw, "expected true or false")),
    }
}
