//! Error hierarchy for cover construction, group theory and the
//! Lyapunov orchestration.

use thiserror::Error;

/// Root error type for all fallible operations of the crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoverError {
    /// The cover data is inconsistent (reducible base, wrong monodromy
    /// count, a monodromy of the wrong size).
    #[error("invalid cover: {0}")]
    InvalidCover(String),

    /// A caller supplied argument is out of range or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A permutation or base-permutation string could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The group-theory collaborator failed.
    #[error("group theory error: {0}")]
    GroupTheory(String),

    /// The numeric Lyapunov engine failed.
    #[error("engine error: {0}")]
    Engine(String),

    /// Configuration could not be read or is invalid.
    #[error("config error: {0}")]
    Config(String),
}

pub type CoverResult<T> = Result<T, CoverError>;

impl From<serde_json::Error> for CoverError {
    fn from(err: serde_json::Error) -> Self {
        CoverError::Config(err.to_string())
    }
}
