//! Elo rating engine
//!
//! The pure core of the leaderboard: an expected-score model, a pairwise
//! rating-update kernel, and a full-history replay that produces the
//! ranked standings. No I/O, no async, no shared state - callers hand it
//! a snapshot of the outcome history and get back an independent table.

pub mod elo;
pub mod standings;

pub use elo::DEFAULT_K_FACTOR;
pub use standings::{replay, Standing};
