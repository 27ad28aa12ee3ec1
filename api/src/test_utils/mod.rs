//! Shared test utilities
//!
//! In-memory implementations of the ports plus fixture builders. Hand
//! rolled rather than generated so the mocks can carry the little bits
//! of behavior the tests care about (recorded calls, toggled failures).

pub mod fixtures;
pub mod mocks;

pub use fixtures::{test_batch, test_member, test_outcome};
pub use mocks::{InMemoryMemberRepository, InMemoryResultStore, MockGitHubClient, MockMailer};
