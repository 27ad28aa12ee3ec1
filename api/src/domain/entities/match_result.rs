use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One aggregated head-to-head series between two bots.
///
/// Field names follow the wire format the match runner submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    #[serde(rename = "BotA")]
    pub bot_a: String,
    #[serde(rename = "BotB")]
    pub bot_b: String,
    #[serde(rename = "BotAWins")]
    pub wins_a: u32,
    #[serde(rename = "BotBWins")]
    pub wins_b: u32,
}

/// A dated batch of outcomes, submitted together by the match runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBatch {
    #[serde(rename = "Date")]
    pub date: DateTime<Utc>,
    #[serde(rename = "Results")]
    pub results: Vec<MatchOutcome>,
}
