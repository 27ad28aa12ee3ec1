//! GitHub API adapter

pub mod client;

pub use client::GitHubClientImpl;
