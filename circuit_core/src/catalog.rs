//! Default catalog of seed workouts.
//!
//! This module provides the built-in paths and workouts shipped with the
//! system as typed definitions, already normalized. User edits never touch
//! these values; the store layers them on top.

use crate::types::*;
use once_cell::sync::Lazy;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Vec<WorkoutDefinition>> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static [WorkoutDefinition] {
    &DEFAULT_CATALOG
}

fn exercise(name: &str, one_second_max: u32, seconds_per_rep: f64, lower: f64, upper: f64) -> ExerciseSpec {
    ExerciseSpec {
        name: name.into(),
        one_second_max,
        seconds_per_rep,
        lower,
        upper,
    }
}

/// Builds the default catalog of seed workouts
///
/// Prefer `get_default_catalog()` outside of tests.
pub fn build_default_catalog() -> Vec<WorkoutDefinition> {
    vec![
        // ====================================================================
        // Animal Flow
        // ====================================================================
        WorkoutDefinition {
            id: "seed_animal_flow_crawls_1".into(),
            path: "Animal Flow".into(),
            title: "Crawls #1".into(),
            tags: vec!["crawl".into(), "bodyweight".into()],
            warmup_minutes: 5.0,
            sets: 3,
            rest_between_sets_minutes: 1.0,
            rest_between_exercises_seconds: 15.0,
            shuffle: true,
            freq_factor: 1,
            exercises: vec![
                exercise("Bear Crawl", 12, 2.0, 0.25, 0.25),
                exercise("Crab Walk", 10, 2.0, 0.2, 0.2),
                exercise("Ape Walk", 8, 2.5, 0.25, 0.25),
            ],
        },
        WorkoutDefinition {
            id: "seed_animal_flow_switches_1".into(),
            path: "Animal Flow".into(),
            title: "Switches #1".into(),
            tags: vec!["switch".into(), "bodyweight".into()],
            warmup_minutes: 5.0,
            sets: 4,
            rest_between_sets_minutes: 1.0,
            rest_between_exercises_seconds: 10.0,
            shuffle: false,
            freq_factor: 1,
            exercises: vec![
                exercise("Underswitch", 8, 3.0, 0.25, 0.25),
                exercise("Side Kickthrough", 10, 2.5, 0.2, 0.2),
            ],
        },
        // ====================================================================
        // Calisthenics
        // ====================================================================
        WorkoutDefinition {
            id: "seed_calisthenics_push_1".into(),
            path: "Calisthenics".into(),
            title: "Push #1".into(),
            tags: vec!["push".into(), "upper_body".into()],
            warmup_minutes: 5.0,
            sets: 4,
            rest_between_sets_minutes: 1.5,
            rest_between_exercises_seconds: 20.0,
            shuffle: true,
            freq_factor: 1,
            exercises: vec![
                exercise("Push Ups", 15, 2.0, 0.2, 0.2),
                exercise("Pike Push Ups", 8, 3.0, 0.25, 0.25),
                exercise("Dips", 10, 2.5, 0.2, 0.2),
            ],
        },
        WorkoutDefinition {
            id: "seed_calisthenics_legs_1".into(),
            path: "Calisthenics".into(),
            title: "Legs #1".into(),
            tags: vec!["legs".into(), "lower_body".into()],
            warmup_minutes: 5.0,
            sets: 3,
            rest_between_sets_minutes: 2.0,
            rest_between_exercises_seconds: 30.0,
            shuffle: false,
            freq_factor: 1,
            exercises: vec![
                exercise("Squats", 20, 2.0, 0.2, 0.2),
                exercise("Lunges", 12, 2.5, 0.25, 0.25),
                exercise("Glute Bridges", 15, 2.0, 0.2, 0.2),
            ],
        },
        // ====================================================================
        // Mobility
        // ====================================================================
        WorkoutDefinition {
            id: "seed_mobility_hips_1".into(),
            path: "Mobility".into(),
            title: "Hips #1".into(),
            tags: vec!["mobility".into(), "hip".into()],
            warmup_minutes: 2.0,
            sets: 2,
            rest_between_sets_minutes: 0.5,
            rest_between_exercises_seconds: 10.0,
            shuffle: false,
            freq_factor: 1,
            exercises: vec![
                exercise("Hip CARs", 5, 6.0, 0.2, 0.2),
                exercise("90/90 Switches", 10, 3.0, 0.2, 0.2),
            ],
        },
    ]
}
