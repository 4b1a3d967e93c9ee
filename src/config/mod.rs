//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `DAYBOOK` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use daybook::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod prompts;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use prompts::PromptsConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Collaborator call configuration (timeout, retries)
    #[serde(default)]
    pub ai: AiConfig,

    /// Fallback prompt overrides for the degraded question flow
    #[serde(default)]
    pub prompts: PromptsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `DAYBOOK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DAYBOOK__AI__TIMEOUT_SECS=20` -> `ai.timeout_secs = 20`
    /// - `DAYBOOK__PROMPTS__MORNING_QUESTION=...` -> `prompts.morning_question = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DAYBOOK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.prompts.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("DAYBOOK__AI__TIMEOUT_SECS");
        env::remove_var("DAYBOOK__AI__MAX_RETRIES");
        env::remove_var("DAYBOOK__PROMPTS__MORNING_QUESTION");
    }

    #[test]
    fn test_load_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ai.timeout_secs, 30);
        assert_eq!(config.ai.max_retries, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("DAYBOOK__AI__TIMEOUT_SECS", "15");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.timeout_secs, 15);
    }

    #[test]
    fn test_prompt_override_reaches_fallbacks() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var(
            "DAYBOOK__PROMPTS__MORNING_QUESTION",
            "How did your day begin?",
        );
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        let prompts = config.prompts.to_fallback_prompts();
        assert_eq!(prompts.morning_question, "How did your day begin?");
        // Unset prompts keep their defaults
        assert_eq!(
            prompts.afternoon_question,
            "What did you do in the afternoon?"
        );
    }
}
