//! Error types for the selection engine crate.
//!
//! Every variant here signals a misconfiguration and is raised while the
//! catalog is populated or a pipeline is built, never while events are
//! evaluated. Legitimately absent data (no truth match, no candidate
//! particle) is represented by sentinels instead; see
//! [`crate::registry::NO_MATCH_VALUE`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SelectionError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("Function {0} is already registered")]
    DuplicateRegistration(String),
    #[error("Function {0} is not registered")]
    NotRegistered(String),
    #[error("Illegal category '{category}' for {context}")]
    UnknownCategory { category: String, context: String },
    /// Carries the offending item, e.g. `cut fiducial_cut`.
    #[error("{0} does not have a category field")]
    MissingCategory(String),
    #[error("Illegal mode '{mode}' for variable {variable}")]
    InvalidMode { mode: String, variable: String },
    #[error("{name} accepts {expected} parameters, got {got}")]
    ParameterCount {
        name: String,
        expected: String,
        got: usize,
    },
    #[error("IO error: {0}")]
    IoError(String),
    #[error("YAML parsing error: {0}")]
    YamlError(String),
    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl From<std::io::Error> for SelectionError {
    fn from(err: std::io::Error) -> Self {
        SelectionError::IoError(err.to_string())
    }
}

impl From<serde_yaml::Error> for SelectionError {
    fn from(err: serde_yaml::Error) -> Self {
        SelectionError::YamlError(err.to_string())
    }
}

impl From<serde_json::Error> for SelectionError {
    fn from(err: serde_json::Error) -> Self {
        SelectionError::JsonError(err.to_string())
    }
}
