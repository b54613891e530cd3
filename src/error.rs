//! Error types for sugerir operations.
//!
//! Every fallible core operation returns a structured error carrying the
//! offending identifier, so callers can report a precise message.

use std::fmt;

/// Main error type for sugerir operations.
///
/// # Examples
///
/// ```
/// use sugerir::error::SugerirError;
///
/// let err = SugerirError::UserNotFound { index: 7, n_users: 3 };
/// assert!(err.to_string().contains("user 7"));
/// ```
#[derive(Debug)]
pub enum SugerirError {
    /// Malformed or degenerate input (interaction matrix shape, N parameter).
    InvalidInput {
        /// What was wrong with the input.
        message: String,
    },

    /// User index outside the interaction matrix's current row range.
    UserNotFound {
        /// Requested user index.
        index: usize,
        /// Number of users currently in the matrix.
        n_users: usize,
    },

    /// Item name absent from the top-N table / similarity matrix.
    ItemNotFound {
        /// Requested item name (as given by the caller).
        name: String,
    },

    /// `add_user` referenced an item name that is not an item column.
    UnknownItem {
        /// Offending item name.
        name: String,
    },

    /// No model has been computed or loaded yet.
    NotReady,

    /// Serialization/deserialization error.
    Serialization(String),

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),
}

impl fmt::Display for SugerirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SugerirError::InvalidInput { message } => {
                write!(f, "Invalid input: {message}")
            }
            SugerirError::UserNotFound { index, n_users } => {
                write!(f, "user {index} not found ({n_users} users known)")
            }
            SugerirError::ItemNotFound { name } => {
                write!(f, "item '{name}' not found")
            }
            SugerirError::UnknownItem { name } => {
                write!(f, "unknown item '{name}'")
            }
            SugerirError::NotReady => {
                write!(f, "no model available: run a recompute or load one first")
            }
            SugerirError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            SugerirError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SugerirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SugerirError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SugerirError {
    fn from(err: std::io::Error) -> Self {
        SugerirError::Io(err)
    }
}

impl From<serde_json::Error> for SugerirError {
    fn from(err: serde_json::Error) -> Self {
        SugerirError::Serialization(err.to_string())
    }
}

impl SugerirError {
    /// Create an invalid-input error with a formatted message.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for SugerirError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SugerirError>;
