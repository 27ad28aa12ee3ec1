//! Fixture builders

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::{MatchOutcome, Member, ResultBatch};

pub fn test_member(username: &str) -> Member {
    Member {
        id: Uuid::new_v4(),
        github_username: username.to_string(),
        email: None,
        name: None,
        created_at: Utc::now(),
        joined_org_at: None,
        repo_provisioned_at: None,
        notified_at: None,
    }
}

pub fn test_outcome(bot_a: &str, bot_b: &str, wins_a: u32, wins_b: u32) -> MatchOutcome {
    MatchOutcome {
        bot_a: bot_a.to_string(),
        bot_b: bot_b.to_string(),
        wins_a,
        wins_b,
    }
}

pub fn test_batch(results: Vec<MatchOutcome>) -> ResultBatch {
    ResultBatch {
        date: Utc::now(),
        results,
    }
}
