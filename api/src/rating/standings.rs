//! Leaderboard aggregation
//!
//! The rating table is a derived view: it is rebuilt by folding every
//! stored outcome, in submission order, through the update kernel. There
//! is no persisted incremental rating state, so the leaderboard can never
//! drift from the append-only history.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::elo::{update_ratings, INITIAL_RATING};
use crate::domain::entities::{MatchOutcome, ResultBatch};

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub bot: String,
    pub rating: f64,
}

/// Mapping from competitor name to current rating, with lazy
/// default-initialization on first appearance.
#[derive(Debug, Default)]
pub struct RatingTable {
    ratings: HashMap<String, f64>,
    first_seen: Vec<String>,
}

impl RatingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rating for `bot`, inserting the default on first sight.
    pub fn get_or_default(&mut self, bot: &str) -> f64 {
        if let Some(rating) = self.ratings.get(bot) {
            return *rating;
        }
        self.ratings.insert(bot.to_string(), INITIAL_RATING);
        self.first_seen.push(bot.to_string());
        INITIAL_RATING
    }

    /// Rating for `bot`, if it has appeared in any outcome.
    pub fn rating(&self, bot: &str) -> Option<f64> {
        self.ratings.get(bot).copied()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Fold one outcome into the table.
    ///
    /// Both reads happen before the update, and the writes are applied in
    /// order; for a self-paired outcome the second write wins.
    pub fn apply(&mut self, outcome: &MatchOutcome, k: f64) {
        let ra = self.get_or_default(&outcome.bot_a);
        let rb = self.get_or_default(&outcome.bot_b);

        let (ra_new, rb_new) = update_ratings(ra, rb, outcome.wins_a, outcome.wins_b, k);

        self.ratings.insert(outcome.bot_a.clone(), ra_new);
        self.ratings.insert(outcome.bot_b.clone(), rb_new);
    }

    /// Standings sorted by rating descending. Ties keep first-seen order
    /// (stable sort over the insertion sequence).
    pub fn standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = self
            .first_seen
            .iter()
            .map(|bot| Standing {
                bot: bot.clone(),
                rating: self.ratings[bot],
            })
            .collect();

        rows.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows
    }
}

/// Replay the full outcome history into a fresh leaderboard.
///
/// Batches are folded in the order given; outcomes within a batch in list
/// order. The fold is path-dependent, so the same outcomes in a different
/// order generally produce different ratings.
pub fn replay<'a, I>(batches: I, k: f64) -> Vec<Standing>
where
    I: IntoIterator<Item = &'a ResultBatch>,
{
    let mut table = RatingTable::new();
    for batch in batches {
        for outcome in &batch.results {
            table.apply(outcome, k);
        }
    }
    table.standings()
}
