//! Fallback prompt overrides
//!
//! The degraded-mode question texts ship with sensible defaults; each can
//! be overridden individually through the environment.

use serde::Deserialize;

use crate::domain::diary::FallbackPrompts;

use super::error::ValidationError;

/// Optional overrides for the engine's fallback prompts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptsConfig {
    /// Override for the morning fallback question
    pub morning_question: Option<String>,

    /// Override for the afternoon fallback question
    pub afternoon_question: Option<String>,

    /// Override for the evening fallback question
    pub evening_question: Option<String>,

    /// Override for the reflective fallback question
    pub reflective_question: Option<String>,

    /// Override for the completion acknowledgment
    pub completion_ack: Option<String>,
}

impl PromptsConfig {
    /// Merges the overrides over the default prompt texts.
    pub fn to_fallback_prompts(&self) -> FallbackPrompts {
        let defaults = FallbackPrompts::default();
        FallbackPrompts {
            morning_question: self
                .morning_question
                .clone()
                .unwrap_or(defaults.morning_question),
            afternoon_question: self
                .afternoon_question
                .clone()
                .unwrap_or(defaults.afternoon_question),
            evening_question: self
                .evening_question
                .clone()
                .unwrap_or(defaults.evening_question),
            reflective_question: self
                .reflective_question
                .clone()
                .unwrap_or(defaults.reflective_question),
            completion_ack: self
                .completion_ack
                .clone()
                .unwrap_or(defaults.completion_ack),
        }
    }

    /// Validate that set overrides are not blank
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("morning_question", &self.morning_question),
            ("afternoon_question", &self.afternoon_question),
            ("evening_question", &self.evening_question),
            ("reflective_question", &self.reflective_question),
            ("completion_ack", &self.completion_ack),
        ];
        for (name, value) in fields {
            if let Some(text) = value {
                if text.trim().is_empty() {
                    return Err(ValidationError::BlankPrompt(name));
                }
            }
        }
        Ok(())
    }
}
