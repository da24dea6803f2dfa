//! Error types for model loading and diagram rendering

use thiserror::Error;

/// Errors surfaced while loading an object model or writing a diagram
#[derive(Error, Debug)]
pub enum ModelError {
    /// The object-model input could not be deserialized. Carries one or
    /// more human-readable diagnostic messages; the process boundary
    /// prints each on its own line.
    #[error("{}", .messages.join("\n"))]
    Syntax { messages: Vec<String> },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ModelError {
    /// Create a syntax error from a single diagnostic message
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            messages: vec![message.into()],
        }
    }

    /// Diagnostic messages for a syntax error, empty otherwise
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Syntax { messages } => messages,
            _ => &[],
        }
    }
}
