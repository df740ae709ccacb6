//! Feedback-driven recalibration of exercise difficulty.
//!
//! A single 1..=10 score rescales every exercise's `1s_max` by
//! `sqrt(feedback / 8)`, so 8 leaves the workout unchanged.

use crate::{Error, Result, WorkoutDefinition};

/// Lowest accepted feedback score
pub const MIN_FEEDBACK: i64 = 1;
/// Highest accepted feedback score
pub const MAX_FEEDBACK: i64 = 10;
/// Score at which the multiplier is exactly 1
pub const NEUTRAL_FEEDBACK: i64 = 8;

/// Recompute a single baseline: `ceil(max(1, old * sqrt(feedback / 8)))`
///
/// The score's direction is applied literally: scores below 8 shrink the
/// baseline even though the feedback prompt labels them "too easy".
pub fn calibrated_max(old_max: u32, feedback: i64) -> u32 {
    let multiplier = (feedback as f64 / NEUTRAL_FEEDBACK as f64).sqrt();
    (f64::from(old_max) * multiplier).max(1.0).ceil() as u32
}

/// Return a copy of `def` with every exercise recalibrated from `feedback`
///
/// Scores outside 1..=10 are rejected rather than clamped.
pub fn calibrate(def: &WorkoutDefinition, feedback: i64) -> Result<WorkoutDefinition> {
    if !(MIN_FEEDBACK..=MAX_FEEDBACK).contains(&feedback) {
        return Err(Error::InvalidFeedback(feedback));
    }

    let updated = def.with_exercise_max(|exercise| calibrated_max(exercise.one_second_max, feedback));

    for (before, after) in def.exercises.iter().zip(&updated.exercises) {
        tracing::debug!(
            "Calibrated '{}': 1s_max {} -> {}",
            before.name,
            before.one_second_max,
            after.one_second_max
        );
    }
    tracing::info!(
        "Calibrated workout '{}' with feedback {}/{}",
        def.id,
        feedback,
        MAX_FEEDBACK
    );

    Ok(updated)
}
