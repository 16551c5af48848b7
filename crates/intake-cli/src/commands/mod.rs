//! CLI subcommand implementations.
//!
//! Each command performs one action against an open [`intake_store::Tracker`]
//! and then writes the resulting state, so the caller never has to re-read
//! the store to show what changed.

pub mod entries;
pub mod log;
pub mod plot;
pub mod remove;
pub mod summary;
pub mod util;
