//! Error types for handler-map generation and payload decoding.

use std::fmt;

use casegen_types::DuplicatePath;

/// Error from [`generate`](crate::generate::generate) or option loading.
#[derive(Debug)]
pub enum GenerateError {
    /// Two leaves flattened to the same action type under [`Collision::Reject`](casegen_types::Collision::Reject).
    DuplicateType { action_type: String },
    Config(toml::de::Error),
}

impl From<DuplicatePath> for GenerateError {
    fn from(e: DuplicatePath) -> Self {
        Self::DuplicateType { action_type: e.0 }
    }
}

impl From<toml::de::Error> for GenerateError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e)
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateType { action_type } => {
                write!(f, "action type {} is declared by more than one handler", action_type)
            }
            Self::Config(e) => write!(f, "invalid generate options: {}", e),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DuplicateType { .. } => None,
            Self::Config(e) => Some(e),
        }
    }
}

/// A payload that does not fit the handler it was dispatched to.
///
/// Never surfaced from a reducer; the case is logged and the state is left
/// unchanged.
#[derive(Debug)]
pub enum PayloadError {
    /// A variadic handler received a payload that is not an array.
    NotASequence { arity: usize },
    /// Argument `index` did not decode into the handler's parameter type.
    Decode {
        index: usize,
        source: serde_json::Error,
    },
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotASequence { arity } => {
                write!(f, "expected an array payload for a {}-argument handler", arity)
            }
            Self::Decode { index, source } => write!(f, "argument {}: {}", index, source),
        }
    }
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotASequence { .. } => None,
            Self::Decode { source, .. } => Some(source),
        }
    }
}
