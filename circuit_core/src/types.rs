//! Core domain types for the Circuit system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercises and workout definitions (the persisted shape)
//! - Timed steps (the generated, ephemeral playback sequence)
//! - Path summaries for navigation

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Definition Types
// ============================================================================

/// One movement within a workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSpec {
    pub name: String,
    /// Baseline rep capacity, the center of the randomized rep range
    #[serde(rename = "1s_max")]
    pub one_second_max: u32,
    pub seconds_per_rep: f64,
    /// Fraction of `one_second_max` the rep range may drop below the baseline
    pub lower: f64,
    /// Fraction of `one_second_max` the rep range may rise above the baseline
    pub upper: f64,
}

impl ExerciseSpec {
    pub const DEFAULT_ONE_SECOND_MAX: u32 = 10;
    pub const DEFAULT_SECONDS_PER_REP: f64 = 2.0;
    pub const DEFAULT_BAND: f64 = 0.2;

    /// Exercise with the default rep parameters used by the create flow
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            one_second_max: Self::DEFAULT_ONE_SECOND_MAX,
            seconds_per_rep: Self::DEFAULT_SECONDS_PER_REP,
            lower: Self::DEFAULT_BAND,
            upper: Self::DEFAULT_BAND,
        }
    }
}

/// A named, pathed collection of exercises plus scheduling parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutDefinition {
    #[serde(rename = "_id")]
    pub id: String,
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "warmup", default = "default_warmup_minutes")]
    pub warmup_minutes: f64,
    pub sets: u32,
    #[serde(rename = "rest_between_sets")]
    pub rest_between_sets_minutes: f64,
    #[serde(rename = "rest_between_exercises")]
    pub rest_between_exercises_seconds: f64,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    #[serde(default = "default_freq_factor")]
    pub freq_factor: u32,
    #[serde(rename = "workout")]
    pub exercises: Vec<ExerciseSpec>,
}

pub(crate) fn default_warmup_minutes() -> f64 {
    5.0
}

pub(crate) fn default_shuffle() -> bool {
    true
}

pub(crate) fn default_freq_factor() -> u32 {
    1
}

// ============================================================================
// Generated Sequence Types
// ============================================================================

/// Label carried by rest steps
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RestLabel {
    #[serde(rename = "Rest")]
    Rest,
    #[serde(rename = "Rest Between Sets")]
    RestBetweenSets,
}

impl fmt::Display for RestLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestLabel::Rest => f.write_str("Rest"),
            RestLabel::RestBetweenSets => f.write_str("Rest Between Sets"),
        }
    }
}

/// One item in a generated playback sequence
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimedStep {
    Warmup {
        duration_seconds: u32,
    },
    Exercise {
        exercise_name: String,
        reps: u32,
        duration_seconds: u32,
        set_number: u32,
        exercise_index_in_set: usize,
    },
    Rest {
        duration_seconds: u32,
        label: RestLabel,
        set_number: Option<u32>,
    },
}

impl TimedStep {
    /// Duration of this step in whole seconds
    pub fn duration_seconds(&self) -> u32 {
        match self {
            TimedStep::Warmup { duration_seconds }
            | TimedStep::Exercise {
                duration_seconds, ..
            }
            | TimedStep::Rest {
                duration_seconds, ..
            } => *duration_seconds,
        }
    }

    /// Short display title ("Warmup", the exercise name, or the rest label)
    pub fn title(&self) -> String {
        match self {
            TimedStep::Warmup { .. } => "Warmup".to_string(),
            TimedStep::Exercise { exercise_name, .. } => exercise_name.clone(),
            TimedStep::Rest { label, .. } => label.to_string(),
        }
    }

    pub fn is_exercise(&self) -> bool {
        matches!(self, TimedStep::Exercise { .. })
    }
}

impl fmt::Display for TimedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimedStep::Warmup { duration_seconds } => {
                write!(f, "Warmup ({}s)", duration_seconds)
            }
            TimedStep::Exercise {
                exercise_name,
                reps,
                duration_seconds,
                set_number,
                ..
            } => write!(
                f,
                "{} x{} ({}s) | Set {}",
                exercise_name, reps, duration_seconds, set_number
            ),
            TimedStep::Rest {
                duration_seconds,
                label,
                ..
            } => write!(f, "{} ({}s)", label, duration_seconds),
        }
    }
}

// ============================================================================
// Navigation Types
// ============================================================================

/// A path name with the number of workouts grouped under it
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathSummary {
    pub path: String,
    pub count: usize,
}
