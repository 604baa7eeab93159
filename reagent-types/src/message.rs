//! A single turn in the running conversation.

/// Who produced a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The system prompt.
    System,
    /// The end user's query.
    User,
    /// The model's own output for a turn.
    Assistant,
    /// A tool result fed back to the model.
    Observation,
}

/// One turn in a [`crate::SessionState`]'s message buffer.
///
/// The buffer is append-only within a session — nothing ever edits or
/// removes a past `Message` in place; compression replaces ranges of them
/// wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Who produced this turn.
    pub role: Role,
    /// The turn's text content.
    pub content: String,
}

impl Message {
    /// Construct a new message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Shorthand for a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Shorthand for a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Shorthand for an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Shorthand for an observation message.
    pub fn observation(content: impl Into<String>) -> Self {
        Self::new(Role::Observation, content)
    }
}
