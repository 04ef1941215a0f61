//! Unified error type for `TariffKeeper`.
//!
//! The transition engine itself is pure and surfaces no errors of its own;
//! everything here comes from the boundaries: configuration loading,
//! persistence, and write-time validation of user-supplied values.

use thiserror::Error;

/// Top-level error type covering all fallible operations in the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Database error from the SeaORM layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A rate value failed write-time validation (rates are cents/kWh, >= 0)
    #[error("Invalid rate value: {amount}")]
    InvalidRate {
        /// The offending rate value
        amount: f64,
    },

    /// A scheduled date failed write-time validation (must be ISO `YYYY-MM-DD`)
    #[error("Invalid scheduled date: {value:?}")]
    InvalidDate {
        /// The string that did not parse as a calendar date
        value: String,
    },

    /// I/O error, typically from reading `config.toml`
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
