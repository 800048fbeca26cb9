//! Action-level error types for the intake engine.
//!
//! Per-file validation failures are not errors in this sense: they are
//! captured as rejections by the rule evaluator and surfaced through the
//! `error` event. `IntakeError` covers misuse of the exposed actions and
//! configuration problems only.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntakeError>;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Index {index} out of range (collection has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<config::ConfigError> for IntakeError {
    fn from(err: config::ConfigError) -> Self {
        IntakeError::InvalidConfig(err.to_string())
    }
}
