//! # Connect Four Match
//!
//! A Connect Four match between a human and a tiered computer opponent:
//! games run over a fixed number of rounds with cumulative scoring, and
//! every game appends its rounds and final result to its own result file.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, players, win detection
//! - [`ai`] — Opponent trait and the three-tier computer policy
//! - [`engine`] — Round and game lifecycle state machine
//! - [`results`] — Result-file writing behind the sink abstraction
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod results;
