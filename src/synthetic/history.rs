//! Simulated week-by-week trend series.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_SCORE;
use crate::scores::clamp_score;
use crate::virtues::{Virtue, VirtueScore};

/// Weekly gain applied to priority virtues in the simulated ramp.
pub const PRIORITY_WEEKLY_GAIN: f64 = 2.0;

/// Half-width of the random perturbation applied to non-priority virtues.
pub const FLUCTUATION: f64 = 5.0;

/// One simulated week bucket: a date label plus a virtue-id -> score map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalVirtueScore {
    /// Short label for the bucket, e.g. "Jan 05".
    pub date: String,
    /// Scores keyed by virtue id.
    #[serde(flatten)]
    pub scores: BTreeMap<String, f64>,
}

/// Simulate a trend series from the current score vector.
///
/// Returns exactly `max(week_count, 1)` buckets, oldest first, the most
/// recent bucket representing now. Per virtue:
/// - priority virtues ramp up monotonically by [`PRIORITY_WEEKLY_GAIN`] per
///   week, reaching the current score exactly at the most recent bucket.
///   The ramp carries no random term, so it is monotonic by construction;
/// - custom virtues that are neither priority nor scored stay flat at 0;
/// - everything else gets a symmetric random perturbation of at most
///   [`FLUCTUATION`] points around its current score.
///
/// Scores are rounded to whole points and never leave [0,100]. Empty inputs
/// still produce the full bucket count. Output is randomized, not
/// reproducible, and not a measured history.
pub fn synthesize(
    virtues: &[Virtue],
    current_scores: &[VirtueScore],
    priority_ids: &[String],
    week_count: usize,
) -> Vec<HistoricalVirtueScore> {
    let week_count = week_count.max(1);
    let now = Utc::now();
    let mut rng = rand::thread_rng();

    let mut series = Vec::with_capacity(week_count);
    // age counts buckets back from now: the oldest bucket comes first.
    for age in (0..week_count).rev() {
        let date = (now - Duration::weeks(age as i64)).format("%b %d").to_string();

        let mut scores = BTreeMap::new();
        for virtue in virtues {
            let base = current_scores
                .iter()
                .find(|entry| entry.virtue_id == virtue.id)
                .map(|entry| entry.score)
                .filter(|score| !score.is_nan())
                .map(clamp_score)
                .unwrap_or(DEFAULT_SCORE);
            let is_priority = priority_ids.iter().any(|id| id == &virtue.id);

            let value = if is_priority {
                clamp_score(base - age as f64 * PRIORITY_WEEKLY_GAIN)
            } else if virtue.is_custom && base == DEFAULT_SCORE {
                DEFAULT_SCORE
            } else {
                clamp_score(base + rng.gen_range(-FLUCTUATION..=FLUCTUATION))
            };

            scores.insert(virtue.id.clone(), value.round());
        }

        series.push(HistoricalVirtueScore { date, scores });
    }

    series
}
