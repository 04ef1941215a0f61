//! Core business logic - framework-agnostic tariff configuration operations.
//!
//! The modules here are layered leaves-first: `overrides` is the data model,
//! `resolver` computes effective values, `transition` is the pure promotion
//! state machine, `tariff` owns all reads and writes of the persisted rows,
//! and `daily` ties them together under the once-a-day trigger.

/// Daily check orchestration and the midnight scheduler loop
pub mod daily;
/// Reload notification for downstream readers of effective values
pub mod notify;
/// The current + pending configuration overlay data model
pub mod overrides;
/// Effective value resolution (override, then base, then default)
pub mod resolver;
/// Store operations over the persisted configuration rows
pub mod tariff;
/// The scheduled transition engine
pub mod transition;
