//! Outcome of an edit-handler invocation

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A human-readable diagnostic accumulated during a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub body: String,
    pub level: MessageLevel,
}

impl Message {
    pub fn new(body: impl Into<String>, level: MessageLevel) -> Self {
        Self {
            body: body.into(),
            level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Success {
        /// Whether the domain graph was (potentially) modified
        semantic_change: bool,
        messages: Vec<Message>,
    },
    Failure {
        /// Fixed, call-site-specific technical message
        message: String,
        messages: Vec<Message>,
    },
}

impl Status {
    /// Success after the operation executor ran
    pub fn changed(messages: Vec<Message>) -> Self {
        Status::Success {
            semantic_change: true,
            messages,
        }
    }

    /// Success without running anything
    pub fn neutral(messages: Vec<Message>) -> Self {
        Status::Success {
            semantic_change: false,
            messages,
        }
    }

    pub fn failure(message: impl Into<String>, messages: Vec<Message>) -> Self {
        Status::Failure {
            message: message.into(),
            messages,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success { .. })
    }

    pub fn is_semantic_change(&self) -> bool {
        matches!(
            self,
            Status::Success {
                semantic_change: true,
                ..
            }
        )
    }

    pub fn messages(&self) -> &[Message] {
        match self {
            Status::Success { messages, .. } | Status::Failure { messages, .. } => messages,
        }
    }
}
