//! Command infrastructure for handlers.
//!
//! `CommandMetadata` is the context that flows through every command handler
//! and ends up on the events it publishes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Source of this command (e.g., "http", "scheduler").
    source: String,

    /// Person executing the command, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    actor_id: Option<String>,

    /// Links related operations across a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandMetadata {
    /// Creates metadata for a command from the given source.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            actor_id: None,
            correlation_id: None,
        }
    }

    /// Metadata for commands issued by the completion sweep.
    pub fn scheduler() -> Self {
        Self::new("scheduler").with_correlation_id(Uuid::new_v4().to_string())
    }

    /// Sets the acting person.
    pub fn with_actor(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    /// Sets the correlation ID.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}
