//! Adapters for domain ports
//!
//! Concrete implementations: SQLite for members, an append-only JSON
//! file for match results, reqwest clients for GitHub and the mail
//! gateway.

pub mod email;
pub mod github;
pub mod jsonstore;
pub mod sqlite;
