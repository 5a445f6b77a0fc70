use std::path::PathBuf;

use crate::engine::Phase;
use crate::game::MoveError;

/// Errors reported by engine calls. All are recoverable: a failed call
/// leaves the game state and board untouched.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid move in column {column}: {reason}")]
    InvalidMove { column: usize, reason: MoveError },

    #[error("{op} is not valid in the {phase} phase")]
    InvalidTransition { op: &'static str, phase: Phase },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors from the result sink. Never fatal to gameplay; the engine keeps
/// the most recent one for the caller to collect.
#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    #[error("failed to open result file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write results to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no game is open in the result sink")]
    NoOpenGame,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
