//! Conversation log entries for diary records.
//!
//! Entries are immutable records of user/assistant exchanges during the
//! completion flow. The log is append-only; insertion order is meaningful
//! because it reconstructs the dialogue context handed to collaborators.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Timestamp};

/// Who produced a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The diary owner.
    User,
    /// The guiding assistant.
    Assistant,
}

impl Speaker {
    /// Returns true if this is the diary owner.
    pub fn is_user(&self) -> bool {
        matches!(self, Speaker::User)
    }
}

/// An immutable utterance within a diary conversation.
///
/// # Invariants
///
/// - `text` is non-empty (validated at construction)
/// - `created_at` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    speaker: Speaker,
    text: String,
    created_at: Timestamp,
}

impl ConversationEntry {
    /// Creates a new entry with the given speaker and text.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if text is empty or whitespace-only
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::validation(
                "text",
                "Conversation entry text cannot be empty",
            ));
        }

        Ok(Self {
            speaker,
            text,
            created_at: Timestamp::now(),
        })
    }

    /// Creates a user entry.
    pub fn user(text: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Speaker::User, text)
    }

    /// Creates an assistant entry.
    pub fn assistant(text: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Speaker::Assistant, text)
    }

    /// Reconstitutes an entry from persistence (no validation).
    pub fn reconstitute(speaker: Speaker, text: String, created_at: Timestamp) -> Self {
        Self {
            speaker,
            text,
            created_at,
        }
    }

    /// Returns the speaker.
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    /// Returns the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the entry was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns true if this entry is from the user.
    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }
}

/// Append-only ordered log of conversation entries.
///
/// The wrapper exposes appends and read access only; entries are never
/// mutated or removed once recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstitutes a log from persisted entries, preserving order.
    pub fn from_entries(entries: Vec<ConversationEntry>) -> Self {
        Self { entries }
    }

    /// Appends an entry to the log.
    pub fn append(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
    }

    /// Returns the entries in insertion order.
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the log has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the most recent entry, if any.
    pub fn last(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    /// Iterates over the user's utterances only, in order.
    pub fn user_entries(&self) -> impl Iterator<Item = &ConversationEntry> {
        self.entries.iter().filter(|e| e.is_user())
    }
}
