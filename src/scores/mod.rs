//! Score vector normalization.
//!
//! Raw score payloads from the backend are sparse: they cover whatever the
//! latest assessment measured, which may miss newly created custom virtues
//! and may still carry rows for virtues deleted since. [`normalize`] turns
//! such a payload into a complete score vector aligned with the registry.

use tracing::{debug, warn};

use crate::config::{DEFAULT_SCORE, SCORE_MAX, SCORE_MIN};
use crate::virtues::{Virtue, VirtueScore};

/// Clamp a score to the [`SCORE_MIN`]..=[`SCORE_MAX`] scale.
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(SCORE_MIN, SCORE_MAX)
}

/// Produce a complete score vector covering every virtue in `registry`.
///
/// Output is aligned 1:1 with `registry` order, one entry per virtue:
/// - a matching raw entry (first by id) supplies the score, clamped into
///   [0,100]; out-of-range input is a data-integrity warning, not an error;
/// - a NaN score is treated as absent data;
/// - virtues with no raw entry default to [`DEFAULT_SCORE`];
/// - raw entries whose id is not in the registry are dropped (stale rows
///   from deleted custom virtues).
///
/// Pure and deterministic: same inputs, same output.
pub fn normalize(raw: &[VirtueScore], registry: &[Virtue]) -> Vec<VirtueScore> {
    let dropped = raw
        .iter()
        .filter(|entry| !registry.iter().any(|v| v.id == entry.virtue_id))
        .count();
    if dropped > 0 {
        debug!(dropped, "Dropping score rows for unknown virtue ids");
    }

    registry
        .iter()
        .map(|virtue| {
            let score = match raw.iter().find(|entry| entry.virtue_id == virtue.id) {
                Some(entry) if entry.score.is_nan() => {
                    warn!(virtue_id = %virtue.id, "Score is NaN, treating as missing");
                    DEFAULT_SCORE
                }
                Some(entry) => {
                    if !(SCORE_MIN..=SCORE_MAX).contains(&entry.score) {
                        warn!(
                            virtue_id = %virtue.id,
                            score = entry.score,
                            "Score out of range, clamping"
                        );
                    }
                    clamp_score(entry.score)
                }
                None => DEFAULT_SCORE,
            };
            VirtueScore::new(virtue.id.clone(), score)
        })
        .collect()
}
