//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod auth;
pub mod members;
pub mod results;

pub use auth::{login, oauth_callback};
pub use members::get_member;
pub use results::{get_leaderboard, submit_results};
