//! Validation and copy-with updates for workout definitions.
//!
//! Definitions are never mutated in place: configure, calibrate and create
//! all produce a fresh `WorkoutDefinition` value that the store persists.

use crate::{Error, ExerciseSpec, Result, WorkoutDefinition};
use uuid::Uuid;

impl ExerciseSpec {
    /// Check this exercise's invariants, returning one message per violation
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let label = if self.name.trim().is_empty() {
            errors.push("Exercise name must not be empty".to_string());
            "<unnamed>"
        } else {
            self.name.as_str()
        };

        if self.one_second_max < 1 {
            errors.push(format!("Exercise '{}': 1s_max must be at least 1", label));
        }
        if !(self.seconds_per_rep >= 0.0) {
            errors.push(format!(
                "Exercise '{}': seconds_per_rep must be non-negative",
                label
            ));
        }
        for (field, value) in [("lower", self.lower), ("upper", self.upper)] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(format!(
                    "Exercise '{}': {} must be within [0, 1], got {}",
                    label, field, value
                ));
            }
        }

        errors
    }
}

impl WorkoutDefinition {
    /// Validate the definition
    ///
    /// Returns a list of validation errors (empty if valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.path.trim().is_empty() {
            errors.push("Path must not be empty".to_string());
        }
        if self.title.trim().is_empty() {
            errors.push("Title must not be empty".to_string());
        }
        if self.sets < 1 {
            errors.push("Sets must be at least 1".to_string());
        }
        if !(self.warmup_minutes >= 0.0) {
            errors.push("Warmup minutes must be non-negative".to_string());
        }
        if !(self.rest_between_sets_minutes >= 0.0) {
            errors.push("Rest between sets must be non-negative".to_string());
        }
        if !(self.rest_between_exercises_seconds >= 0.0) {
            errors.push("Rest between exercises must be non-negative".to_string());
        }
        if self.exercises.is_empty() {
            errors.push("Workout must contain at least one exercise".to_string());
        }
        for exercise in &self.exercises {
            errors.extend(exercise.validate());
        }

        errors
    }

    /// Fail with `InvalidDefinition` if any invariant is violated
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidDefinition(errors.join("; ")))
        }
    }

    /// Playback needs at least one exercise to produce exercise steps
    pub fn ensure_playable(&self) -> Result<()> {
        if self.exercises.is_empty() {
            return Err(Error::InvalidDefinition(format!(
                "Workout '{}' has no exercises to play",
                self.id
            )));
        }
        Ok(())
    }

    /// Copy of this definition with the given overrides applied
    ///
    /// A given exercise list replaces the current one wholesale.
    pub fn with_settings(&self, settings: &WorkoutSettings) -> Self {
        Self {
            exercises: settings
                .exercises
                .clone()
                .unwrap_or_else(|| self.exercises.clone()),
            warmup_minutes: settings.warmup_minutes.unwrap_or(self.warmup_minutes),
            sets: settings.sets.unwrap_or(self.sets),
            rest_between_sets_minutes: settings
                .rest_between_sets_minutes
                .unwrap_or(self.rest_between_sets_minutes),
            rest_between_exercises_seconds: settings
                .rest_between_exercises_seconds
                .unwrap_or(self.rest_between_exercises_seconds),
            shuffle: settings.shuffle.unwrap_or(self.shuffle),
            ..self.clone()
        }
    }

    /// Copy of this definition with a replaced exercise list
    pub fn with_exercises(&self, exercises: Vec<ExerciseSpec>) -> Self {
        Self {
            exercises,
            ..self.clone()
        }
    }

    /// Copy of this definition with each exercise's `1s_max` recomputed
    pub fn with_exercise_max<F>(&self, f: F) -> Self
    where
        F: Fn(&ExerciseSpec) -> u32,
    {
        let exercises = self
            .exercises
            .iter()
            .map(|exercise| ExerciseSpec {
                one_second_max: f(exercise),
                ..exercise.clone()
            })
            .collect();
        self.with_exercises(exercises)
    }
}

/// Partial update, as submitted by the configure flow
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkoutSettings {
    pub warmup_minutes: Option<f64>,
    pub sets: Option<u32>,
    pub rest_between_sets_minutes: Option<f64>,
    pub rest_between_exercises_seconds: Option<f64>,
    pub shuffle: Option<bool>,
    pub exercises: Option<Vec<ExerciseSpec>>,
}

impl WorkoutSettings {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Builder for brand-new workouts
#[derive(Clone, Debug)]
pub struct WorkoutDraft {
    pub path: String,
    pub title: String,
    pub tags: Vec<String>,
    pub warmup_minutes: f64,
    pub sets: u32,
    pub rest_between_sets_minutes: f64,
    pub rest_between_exercises_seconds: f64,
    pub shuffle: bool,
    pub exercises: Vec<ExerciseSpec>,
}

impl WorkoutDraft {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            tags: Vec::new(),
            warmup_minutes: crate::types::default_warmup_minutes(),
            sets: 1,
            rest_between_sets_minutes: 1.0,
            rest_between_exercises_seconds: 10.0,
            shuffle: crate::types::default_shuffle(),
            exercises: Vec::new(),
        }
    }

    /// Start a draft whose scheduling values come from configured defaults
    pub fn with_defaults(
        path: impl Into<String>,
        title: impl Into<String>,
        defaults: &crate::config::DefaultsConfig,
    ) -> Self {
        Self::new(path, title).settings(&defaults.as_settings())
    }

    /// Apply scheduling overrides to the draft
    pub fn settings(mut self, settings: &WorkoutSettings) -> Self {
        if let Some(warmup) = settings.warmup_minutes {
            self.warmup_minutes = warmup;
        }
        if let Some(sets) = settings.sets {
            self.sets = sets;
        }
        if let Some(rest) = settings.rest_between_sets_minutes {
            self.rest_between_sets_minutes = rest;
        }
        if let Some(rest) = settings.rest_between_exercises_seconds {
            self.rest_between_exercises_seconds = rest;
        }
        if let Some(shuffle) = settings.shuffle {
            self.shuffle = shuffle;
        }
        if let Some(exercises) = &settings.exercises {
            self.exercises = exercises.clone();
        }
        self
    }

    pub fn exercise(mut self, exercise: ExerciseSpec) -> Self {
        self.exercises.push(exercise);
        self
    }

    /// Assign a fresh id and validate the result
    pub fn build(self) -> Result<WorkoutDefinition> {
        let definition = WorkoutDefinition {
            id: format!("new_{}", Uuid::new_v4().simple()),
            path: self.path,
            title: self.title,
            tags: self.tags,
            warmup_minutes: self.warmup_minutes,
            sets: self.sets,
            rest_between_sets_minutes: self.rest_between_sets_minutes,
            rest_between_exercises_seconds: self.rest_between_exercises_seconds,
            shuffle: self.shuffle,
            freq_factor: crate::types::default_freq_factor(),
            exercises: self.exercises,
        };
        definition.ensure_valid()?;
        tracing::debug!("Built new workout {} ({})", definition.id, definition.title);
        Ok(definition)
    }
}
