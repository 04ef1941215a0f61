//! `TariffKeeper` - scheduled electricity tariff configuration
//!
//! This crate manages a small piece of user-editable configuration (on-peak
//! and off-peak electricity rates plus an optional time-of-use schedule name)
//! with deferred activation: new values can be staged against a future
//! calendar date and are promoted to "current" by a daily check, while the
//! active values stay in force until then.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::float_cmp,
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::must_use_candidate,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,
    future_incompatible,
    rust_2018_idioms
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
)]

/// Configuration management for the database and the initial tariff seed
pub mod config;
/// Core business logic - overrides overlay, resolution, transition engine, daily check
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
