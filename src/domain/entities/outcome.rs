//! Result of one outbound notification attempt.

/// Outcome of a single ping against a directory or a discovered pingback
/// receiver. Ephemeral: collected per batch and consumed for logging only.
#[derive(Debug, Clone)]
pub struct NotificationOutcome {
    /// Endpoint or resource the attempt was made against.
    pub server: String,
    pub success: bool,
    /// Raw reply on success, synthesized description on failure.
    pub message: String,
}

impl NotificationOutcome {
    pub fn success(server: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(server: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            success: false,
            message: message.into(),
        }
    }
}
