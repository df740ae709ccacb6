//! Normalization of persisted workout documents.
//!
//! Seed workouts are exported from MongoDB, so ids may arrive as
//! `{"$oid": ".."}` and numbers as `{"$numberInt": "3"}`,
//! `{"$numberDouble": "0.2"}` or `{"$numberLong": ".."}` next to plain JSON
//! numbers. Everything is coerced into a plain [`WorkoutDefinition`] here so
//! the expander and calibrator never see wire representations.

use crate::types::{default_freq_factor, default_shuffle, default_warmup_minutes};
use crate::{Error, ExerciseSpec, Result, WorkoutDefinition};
use serde::Deserialize;

/// A number in plain or extended-JSON form
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    Plain(f64),
    Int {
        #[serde(rename = "$numberInt")]
        value: String,
    },
    Double {
        #[serde(rename = "$numberDouble")]
        value: String,
    },
    Long {
        #[serde(rename = "$numberLong")]
        value: String,
    },
    Text(String),
}

impl WireNumber {
    pub fn to_f64(&self, field: &str) -> Result<f64> {
        let text = match self {
            WireNumber::Plain(value) => return Ok(*value),
            WireNumber::Int { value }
            | WireNumber::Double { value }
            | WireNumber::Long { value }
            | WireNumber::Text(value) => value,
        };
        text.trim()
            .parse::<f64>()
            .map_err(|e| Error::Wire(format!("{}: cannot parse '{}': {}", field, text, e)))
    }

    /// Integer fields truncate like a lenient integer parse would
    pub fn to_u32(&self, field: &str) -> Result<u32> {
        let value = self.to_f64(field)?;
        if !value.is_finite() || value < 0.0 {
            return Err(Error::Wire(format!(
                "{}: expected a non-negative integer, got {}",
                field, value
            )));
        }
        Ok(value.trunc() as u32)
    }
}

/// An id in plain or `$oid` form
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Oid {
        #[serde(rename = "$oid")]
        oid: String,
    },
    Plain(String),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Oid { oid } => oid,
            WireId::Plain(id) => id,
        }
    }
}

/// Exercise as stored in a seed document
#[derive(Clone, Debug, Deserialize)]
pub struct WireExercise {
    pub name: String,
    #[serde(rename = "1s_max")]
    pub one_second_max: WireNumber,
    pub seconds_per_rep: WireNumber,
    pub lower: WireNumber,
    pub upper: WireNumber,
}

/// Workout as stored in a seed document
#[derive(Clone, Debug, Deserialize)]
pub struct WireWorkout {
    #[serde(rename = "_id")]
    pub id: WireId,
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub warmup: Option<WireNumber>,
    pub sets: WireNumber,
    pub rest_between_sets: WireNumber,
    pub rest_between_exercises: WireNumber,
    #[serde(default)]
    pub freq_factor: Option<WireNumber>,
    #[serde(default)]
    pub shuffle: Option<bool>,
    pub workout: Vec<WireExercise>,
}

impl TryFrom<WireExercise> for ExerciseSpec {
    type Error = Error;

    fn try_from(wire: WireExercise) -> Result<Self> {
        Ok(ExerciseSpec {
            one_second_max: wire.one_second_max.to_u32("1s_max")?,
            seconds_per_rep: wire.seconds_per_rep.to_f64("seconds_per_rep")?,
            lower: wire.lower.to_f64("lower")?,
            upper: wire.upper.to_f64("upper")?,
            name: wire.name,
        })
    }
}

impl TryFrom<WireWorkout> for WorkoutDefinition {
    type Error = Error;

    fn try_from(wire: WireWorkout) -> Result<Self> {
        let warmup_minutes = match wire.warmup {
            Some(warmup) => warmup.to_f64("warmup")?,
            None => default_warmup_minutes(),
        };
        let freq_factor = match wire.freq_factor {
            Some(freq) => freq.to_u32("freq_factor")?,
            None => default_freq_factor(),
        };
        let exercises = wire
            .workout
            .into_iter()
            .map(ExerciseSpec::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(WorkoutDefinition {
            id: wire.id.into(),
            path: wire.path,
            title: wire.title,
            tags: wire.tags.unwrap_or_default(),
            warmup_minutes,
            sets: wire.sets.to_u32("sets")?,
            rest_between_sets_minutes: wire.rest_between_sets.to_f64("rest_between_sets")?,
            rest_between_exercises_seconds: wire
                .rest_between_exercises
                .to_f64("rest_between_exercises")?,
            shuffle: wire.shuffle.unwrap_or_else(default_shuffle),
            freq_factor,
            exercises,
        })
    }
}

/// Parse and normalize a JSON array of seed workouts
pub fn parse_workouts(json: &str) -> Result<Vec<WorkoutDefinition>> {
    let raw: Vec<WireWorkout> = serde_json::from_str(json)?;
    let workouts = raw
        .into_iter()
        .map(WorkoutDefinition::try_from)
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!("Normalized {} seed workouts", workouts.len());
    Ok(workouts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONGO_DOC: &str = r#"[
        {
            "_id": {"$oid": "65a1f0c2e4b0a1b2c3d4e5f6"},
            "path": "Animal Flow",
            "title": "Crawls #1",
            "tags": ["crawl"],
            "sets": {"$numberInt": "3"},
            "rest_between_sets": {"$numberDouble": "1.5"},
            "rest_between_exercises": {"$numberInt": "15"},
            "freq_factor": {"$numberInt": "2"},
            "workout": [
                {
                    "name": "Bear Crawl",
                    "1s_max": {"$numberInt": "12"},
                    "seconds_per_rep": {"$numberDouble": "2.5"},
                    "lower": {"$numberDouble": "0.25"},
                    "upper": {"$numberDouble": "0.1"}
                }
            ]
        }
    ]"#;

    #[test]
    fn test_parse_extended_json() {
        let workouts = parse_workouts(MONGO_DOC).unwrap();
        assert_eq!(workouts.len(), 1);

        let w = &workouts[0];
        assert_eq!(w.id, "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(w.sets, 3);
        assert_eq!(w.rest_between_sets_minutes, 1.5);
        assert_eq!(w.rest_between_exercises_seconds, 15.0);
        assert_eq!(w.freq_factor, 2);
        assert_eq!(w.exercises[0].one_second_max, 12);
        assert_eq!(w.exercises[0].seconds_per_rep, 2.5);
        assert_eq!(w.exercises[0].lower, 0.25);
        assert_eq!(w.exercises[0].upper, 0.1);
    }

    #[test]
    fn test_defaults_applied_when_absent() {
        let workouts = parse_workouts(MONGO_DOC).unwrap();
        assert_eq!(workouts[0].warmup_minutes, 5.0);
        assert!(workouts[0].shuffle);
    }

    #[test]
    fn test_plain_and_extended_forms_agree() {
        let plain = r#"[{
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "path": "Animal Flow",
            "title": "Crawls #1",
            "tags": ["crawl"],
            "sets": 3,
            "rest_between_sets": 1.5,
            "rest_between_exercises": 15,
            "freq_factor": 2,
            "workout": [{
                "name": "Bear Crawl",
                "1s_max": 12,
                "seconds_per_rep": 2.5,
                "lower": 0.25,
                "upper": 0.1
            }]
        }]"#;

        assert_eq!(
            parse_workouts(plain).unwrap(),
            parse_workouts(MONGO_DOC).unwrap()
        );
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let doc = r#"[{
            "_id": "x",
            "path": "P",
            "title": "T",
            "warmup": {"$numberInt": "0"},
            "shuffle": false,
            "sets": {"$numberLong": "2"},
            "rest_between_sets": 1,
            "rest_between_exercises": 10,
            "workout": []
        }]"#;
        let w = &parse_workouts(doc).unwrap()[0];
        assert_eq!(w.warmup_minutes, 0.0);
        assert!(!w.shuffle);
        assert_eq!(w.sets, 2);
        assert!(w.tags.is_empty());
        assert_eq!(w.freq_factor, 1);
    }

    #[test]
    fn test_unparseable_number_is_wire_error() {
        let doc = r#"[{
            "_id": "x",
            "path": "P",
            "title": "T",
            "sets": {"$numberInt": "three"},
            "rest_between_sets": 1,
            "rest_between_exercises": 10,
            "workout": []
        }]"#;
        assert!(matches!(parse_workouts(doc), Err(Error::Wire(_))));
    }
}
