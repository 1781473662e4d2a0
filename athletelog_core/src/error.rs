//! Error types for the athletelog_core library.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// The user-supplied field a validation failure refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Date,
    Exercise,
    Weight,
    Reps,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Date => "date",
            Field::Exercise => "exercise",
            Field::Weight => "weight",
            Field::Reps => "reps",
        };
        f.write_str(name)
    }
}

/// Core error type for athletelog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field given to `add` was rejected
    #[error("Invalid {field}: {reason}")]
    Validation { field: Field, reason: String },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The store file exists but does not decode as a workout log
    #[error("Workout log at {} is corrupt: {source}", .path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory log could not be encoded
    #[error("Failed to encode workout log: {0}")]
    Encode(#[source] serde_json::Error),

    /// An external stats/report program failed to launch or exited non-zero
    #[error("Failed to run {name}: {reason}")]
    Delegate { name: String, reason: String },

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn validation(field: Field, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// The offending field, for validation failures
    pub fn field(&self) -> Option<Field> {
        match self {
            Error::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}
