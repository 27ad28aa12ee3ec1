//! Elo expected-score model and rating-update kernel

/// Rating assigned to a competitor on first appearance
pub const INITIAL_RATING: f64 = 1500.0;

/// Sensitivity constant: how much a single aggregated outcome shifts ratings
pub const DEFAULT_K_FACTOR: f64 = 20.0;

/// Probability that the first competitor scores against the second.
///
/// Logistic curve `1 / (1 + 10^((rb - ra)/400))`. Total over all finite
/// inputs; range is (0, 1) exclusive and `expected_score(r, r) == 0.5`.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// Apply one aggregated head-to-head outcome to a pair of ratings.
///
/// `wins_a + wins_b` is the weight of the outcome; a zero-weight outcome
/// carries no information and returns the ratings unchanged. With the
/// same `k` on both sides the update is a zero-sum transfer:
/// `(ra' - ra) == -(rb' - rb)`. Ratings are never clamped.
pub fn update_ratings(ra: f64, rb: f64, wins_a: u32, wins_b: u32, k: f64) -> (f64, f64) {
    // Summed in u64 so a pair of huge counts cannot overflow.
    let total = u64::from(wins_a) + u64::from(wins_b);
    if total == 0 {
        return (ra, rb);
    }

    let actual_a = f64::from(wins_a) / total as f64;
    let actual_b = f64::from(wins_b) / total as f64;

    let expected_a = expected_score(ra, rb);
    let expected_b = 1.0 - expected_a;

    (
        ra + k * (actual_a - expected_a),
        rb + k * (actual_b - expected_b),
    )
}
