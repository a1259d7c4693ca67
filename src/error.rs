use thiserror::Error;

/// Errors that can occur when converting external records into a [`Funnel`](crate::funnel::Funnel).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Failed to parse funnel JSON: {0}")]
    JsonParseError(String),

    #[error("Unknown step category '{0}'")]
    UnknownCategory(String),

    #[error("Step at position {position} has an empty id")]
    MissingId { position: usize },

    #[error("Unknown funnel template '{0}'")]
    UnknownTemplate(String),
}

impl From<serde_json::Error> for ConversionError {
    fn from(err: serde_json::Error) -> Self {
        ConversionError::JsonParseError(err.to_string())
    }
}

/// Errors raised when an edit command cannot be applied to a funnel snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Step '{0}' not found")]
    StepNotFound(String),

    #[error("A step with id '{0}' already exists")]
    DuplicateId(String),

    #[error("Position {index} is out of range for a funnel of {len} steps")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Step '{0}' cannot connect to itself")]
    SelfConnection(String),

    #[error("Step '{from}' is not connected to '{to}'")]
    NotConnected { from: String, to: String },
}
