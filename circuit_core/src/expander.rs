//! Workout expansion: definition in, timed step sequence out.
//!
//! Sequence layout:
//! 1. One warmup step
//! 2. For each set: every exercise (shuffled per set if enabled), separated
//!    by short rests
//! 3. A longer "Rest Between Sets" after every set but the last, scaled by a
//!    half-sine envelope over the set index

use crate::random::RandomSource;
use crate::{ExerciseSpec, RestLabel, TimedStep, WorkoutDefinition};
use std::f64::consts::PI;

/// Inclusive rep range derived from an exercise's baseline and bands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepRange {
    pub min: u32,
    pub max: u32,
}

impl RepRange {
    /// `max < min` happens only when the bands push the upper bound below one rep
    pub fn is_degenerate(&self) -> bool {
        self.max < self.min
    }

    pub fn contains(&self, reps: u32) -> bool {
        reps >= self.min && reps <= self.max
    }
}

/// Compute the rep range for an exercise
///
/// `min = max(1, floor(1s_max - lower*1s_max))`,
/// `max = floor(1s_max + upper*1s_max)`.
pub fn rep_range(exercise: &ExerciseSpec) -> RepRange {
    let baseline = f64::from(exercise.one_second_max);
    let min = (baseline - exercise.lower * baseline).floor().max(1.0);
    let max = (baseline + exercise.upper * baseline).floor().max(0.0);
    RepRange {
        min: min as u32,
        max: max as u32,
    }
}

/// Round a non-negative second count up to whole seconds
fn whole_seconds(seconds: f64) -> u32 {
    seconds.ceil().max(0.0) as u32
}

/// Warmup length in seconds
pub fn warmup_seconds(warmup_minutes: f64) -> u32 {
    whole_seconds(warmup_minutes * 60.0)
}

/// Rest after set `set_number` (1-based) of `sets`
///
/// `ceil(base * (1 + |sin(180° * set_number / sets)|) * 60)`. The angle is
/// computed in degrees first and converted left to right, which keeps results
/// such as 150° landing on exactly 90 s. Only evaluated for `set_number < sets`,
/// so the angle never reaches 180°.
pub fn rest_between_sets_seconds(base_minutes: f64, set_number: u32, sets: u32) -> u32 {
    let degrees = 180.0 * f64::from(set_number) / f64::from(sets);
    let phase = degrees * PI / 180.0;
    let rest_minutes = base_minutes * (1.0 + phase.sin().abs());
    whole_seconds(rest_minutes * 60.0)
}

/// Draw a rep count, clamping a degenerate range to its minimum
fn draw_reps<S: RandomSource + ?Sized>(exercise: &ExerciseSpec, rng: &mut S) -> u32 {
    let range = rep_range(exercise);
    if range.is_degenerate() {
        tracing::warn!(
            "Degenerate rep range for '{}' ({}..={}), using {} reps",
            exercise.name,
            range.min,
            range.max,
            range.min
        );
        return range.min;
    }
    rng.reps_between(range.min, range.max)
}

/// Exercise order for one set
///
/// A shuffled order must be a permutation of `0..len`; anything else from the
/// random source is logged and replaced by the declared order.
fn set_order<S: RandomSource + ?Sized>(def: &WorkoutDefinition, rng: &mut S) -> Vec<usize> {
    let len = def.exercises.len();
    if !def.shuffle {
        return (0..len).collect();
    }

    let order = rng.permutation(len);
    let mut sorted = order.clone();
    sorted.sort_unstable();
    if sorted.into_iter().eq(0..len) {
        order
    } else {
        tracing::warn!(
            "Random source returned {:?} for {} exercises in '{}', using declared order",
            order,
            len,
            def.id
        );
        (0..len).collect()
    }
}

/// Expand a workout definition into its timed step sequence
///
/// Always starts with a warmup. A definition without exercises yields only
/// the warmup step.
pub fn expand<S: RandomSource + ?Sized>(def: &WorkoutDefinition, rng: &mut S) -> Vec<TimedStep> {
    let mut steps = vec![TimedStep::Warmup {
        duration_seconds: warmup_seconds(def.warmup_minutes),
    }];

    if def.exercises.is_empty() {
        tracing::warn!("Workout '{}' has no exercises, warmup only", def.id);
        return steps;
    }

    let exercise_rest = whole_seconds(def.rest_between_exercises_seconds);

    for set_number in 1..=def.sets {
        let order = set_order(def, rng);

        let last = order.len() - 1;
        for (position, &exercise_idx) in order.iter().enumerate() {
            let exercise = &def.exercises[exercise_idx];
            let reps = draw_reps(exercise, rng);

            steps.push(TimedStep::Exercise {
                exercise_name: exercise.name.clone(),
                reps,
                duration_seconds: whole_seconds(f64::from(reps) * exercise.seconds_per_rep),
                set_number,
                exercise_index_in_set: position,
            });

            if position < last {
                steps.push(TimedStep::Rest {
                    duration_seconds: exercise_rest,
                    label: RestLabel::Rest,
                    set_number: Some(set_number),
                });
            }
        }

        if set_number < def.sets {
            steps.push(TimedStep::Rest {
                duration_seconds: rest_between_sets_seconds(
                    def.rest_between_sets_minutes,
                    set_number,
                    def.sets,
                ),
                label: RestLabel::RestBetweenSets,
                set_number: Some(set_number),
            });
        }
    }

    tracing::debug!(
        "Expanded workout '{}' into {} steps ({}s total)",
        def.id,
        steps.len(),
        total_duration_seconds(&steps)
    );

    steps
}

/// Sum of all step durations
pub fn total_duration_seconds(steps: &[TimedStep]) -> u64 {
    steps.iter().map(|s| u64::from(s.duration_seconds())).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::tests::sample_definition;
    use crate::random::tests::ScriptedSource;
    use crate::random::RngSource;

    fn exercise_steps(steps: &[TimedStep]) -> Vec<(String, u32, u32, usize)> {
        steps
            .iter()
            .filter_map(|s| match s {
                TimedStep::Exercise {
                    exercise_name,
                    reps,
                    set_number,
                    exercise_index_in_set,
                    ..
                } => Some((
                    exercise_name.clone(),
                    *reps,
                    *set_number,
                    *exercise_index_in_set,
                )),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_rep_range_example() {
        let exercise = ExerciseSpec {
            name: "Squat".into(),
            one_second_max: 10,
            seconds_per_rep: 2.0,
            lower: 0.2,
            upper: 0.2,
        };
        assert_eq!(rep_range(&exercise), RepRange { min: 8, max: 12 });
    }

    #[test]
    fn test_rep_range_min_floor_is_one() {
        let exercise = ExerciseSpec {
            name: "Muscle Up".into(),
            one_second_max: 1,
            seconds_per_rep: 4.0,
            lower: 1.0,
            upper: 0.0,
        };
        assert_eq!(rep_range(&exercise), RepRange { min: 1, max: 1 });
    }

    #[test]
    fn test_degenerate_range_clamps_to_min() {
        crate::logging::init_test();
        let mut def = sample_definition();
        def.exercises.truncate(1);
        def.sets = 1;
        def.exercises[0].one_second_max = 0;

        let range = rep_range(&def.exercises[0]);
        assert!(range.is_degenerate());

        let mut rng = ScriptedSource::default();
        let steps = expand(&def, &mut rng);
        assert_eq!(exercise_steps(&steps)[0].1, 1);
        // The random source is never asked for an invalid range
        assert!(rng.rep_ranges.is_empty());
    }

    #[test]
    fn test_rest_between_sets_example() {
        assert_eq!(rest_between_sets_seconds(1.0, 2, 4), 120);
        assert_eq!(rest_between_sets_seconds(1.0, 1, 4), 103);
        assert_eq!(rest_between_sets_seconds(1.0, 3, 4), 103);
        assert_eq!(rest_between_sets_seconds(1.0, 1, 3), 112);
        assert_eq!(rest_between_sets_seconds(0.0, 1, 3), 0);
    }

    #[test]
    fn test_rest_between_sets_exact_half_angle() {
        // 180 * 15 / 18 = 150 degrees, sin = 0.5, 1.5 minutes
        assert_eq!(rest_between_sets_seconds(1.0, 15, 18), 90);
        assert_eq!(rest_between_sets_seconds(1.0, 3, 18), 90);
        assert_eq!(rest_between_sets_seconds(2.0, 1, 6), 180);
    }

    #[test]
    fn test_warmup_seconds() {
        assert_eq!(warmup_seconds(5.0), 300);
        assert_eq!(warmup_seconds(0.5), 30);
        assert_eq!(warmup_seconds(0.0), 0);
    }

    #[test]
    fn test_exact_sequence_without_shuffle() {
        let mut def = sample_definition();
        def.sets = 2;
        let mut rng = ScriptedSource {
            reps: vec![9, 7, 4, 12, 6, 3].into(),
            ..Default::default()
        };

        let steps = expand(&def, &mut rng);

        let expected = vec![
            TimedStep::Warmup {
                duration_seconds: 300,
            },
            TimedStep::Exercise {
                exercise_name: "Push Ups".into(),
                reps: 9,
                duration_seconds: 18,
                set_number: 1,
                exercise_index_in_set: 0,
            },
            TimedStep::Rest {
                duration_seconds: 10,
                label: RestLabel::Rest,
                set_number: Some(1),
            },
            TimedStep::Exercise {
                exercise_name: "Dips".into(),
                reps: 7,
                duration_seconds: 18,
                set_number: 1,
                exercise_index_in_set: 1,
            },
            TimedStep::Rest {
                duration_seconds: 10,
                label: RestLabel::Rest,
                set_number: Some(1),
            },
            TimedStep::Exercise {
                exercise_name: "Pike Push Ups".into(),
                reps: 4,
                duration_seconds: 12,
                set_number: 1,
                exercise_index_in_set: 2,
            },
            TimedStep::Rest {
                duration_seconds: 120,
                label: RestLabel::RestBetweenSets,
                set_number: Some(1),
            },
            TimedStep::Exercise {
                exercise_name: "Push Ups".into(),
                reps: 12,
                duration_seconds: 24,
                set_number: 2,
                exercise_index_in_set: 0,
            },
            TimedStep::Rest {
                duration_seconds: 10,
                label: RestLabel::Rest,
                set_number: Some(2),
            },
            TimedStep::Exercise {
                exercise_name: "Dips".into(),
                reps: 6,
                duration_seconds: 15,
                set_number: 2,
                exercise_index_in_set: 1,
            },
            TimedStep::Rest {
                duration_seconds: 10,
                label: RestLabel::Rest,
                set_number: Some(2),
            },
            TimedStep::Exercise {
                exercise_name: "Pike Push Ups".into(),
                reps: 3,
                duration_seconds: 9,
                set_number: 2,
                exercise_index_in_set: 2,
            },
        ];

        assert_eq!(steps, expected);
        assert_eq!(rng.permutation_calls, 0);
        assert_eq!(rng.rep_ranges, vec![(8, 12), (6, 10), (3, 6), (8, 12), (6, 10), (3, 6)]);
    }

    #[test]
    fn test_shuffle_draws_independent_order_per_set() {
        let mut def = sample_definition();
        def.shuffle = true;
        let mut rng = ScriptedSource {
            orders: vec![vec![2, 0, 1], vec![1, 2, 0], vec![0, 1, 2]].into(),
            ..Default::default()
        };

        let steps = expand(&def, &mut rng);
        let names: Vec<_> = exercise_steps(&steps)
            .into_iter()
            .map(|(name, _, set, idx)| (name, set, idx))
            .collect();

        assert_eq!(rng.permutation_calls, 3);
        assert_eq!(names[0], ("Pike Push Ups".to_string(), 1, 0));
        assert_eq!(names[1], ("Push Ups".to_string(), 1, 1));
        assert_eq!(names[2], ("Dips".to_string(), 1, 2));
        assert_eq!(names[3], ("Dips".to_string(), 2, 0));
        assert_eq!(names[5], ("Push Ups".to_string(), 2, 2));
        assert_eq!(names[6], ("Push Ups".to_string(), 3, 0));
    }

    #[test]
    fn test_invalid_permutation_falls_back_to_declared_order() {
        crate::logging::init_test();
        let mut def = sample_definition();
        def.shuffle = true;
        let mut rng = ScriptedSource {
            // too short, out of bounds, duplicated
            orders: vec![vec![1], vec![0, 5, 1], vec![2, 2, 0]].into(),
            ..Default::default()
        };

        let steps = expand(&def, &mut rng);
        let exercises = exercise_steps(&steps);

        assert_eq!(rng.permutation_calls, 3);
        assert_eq!(exercises.len(), 9);
        for (i, (name, _, set, idx)) in exercises.into_iter().enumerate() {
            assert_eq!(set as usize, i / 3 + 1);
            assert_eq!(idx, i % 3);
            assert_eq!(name, def.exercises[idx].name);
        }
    }

    #[test]
    fn test_sequence_properties_with_real_rng() {
        let mut def = sample_definition();
        def.shuffle = true;
        def.sets = 5;

        for seed in 0..20 {
            let mut rng = RngSource::seeded(seed);
            let steps = expand(&def, &mut rng);

            // Exactly one warmup, and it comes first
            assert!(matches!(steps[0], TimedStep::Warmup { .. }));
            assert_eq!(
                steps
                    .iter()
                    .filter(|s| matches!(s, TimedStep::Warmup { .. }))
                    .count(),
                1
            );

            // sets * exercises exercise steps
            let exercises = exercise_steps(&steps);
            assert_eq!(exercises.len(), 5 * def.exercises.len());

            // Reps within range, durations exact
            for step in &steps {
                if let TimedStep::Exercise {
                    exercise_name,
                    reps,
                    duration_seconds,
                    ..
                } = step
                {
                    let spec = def
                        .exercises
                        .iter()
                        .find(|e| &e.name == exercise_name)
                        .unwrap();
                    assert!(rep_range(spec).contains(*reps));
                    assert_eq!(
                        *duration_seconds,
                        (f64::from(*reps) * spec.seconds_per_rep).ceil() as u32
                    );
                }
            }

            // Rest between sets occurs sets - 1 times, never after the last set
            let set_rests: Vec<_> = steps
                .iter()
                .filter_map(|s| match s {
                    TimedStep::Rest {
                        label: RestLabel::RestBetweenSets,
                        set_number,
                        ..
                    } => *set_number,
                    _ => None,
                })
                .collect();
            assert_eq!(set_rests, vec![1, 2, 3, 4]);
            assert!(steps.last().unwrap().is_exercise());
        }
    }

    #[test]
    fn test_declared_order_kept_without_shuffle() {
        let def = sample_definition();
        let mut rng = RngSource::seeded(11);
        let steps = expand(&def, &mut rng);

        for (i, (name, _, _, idx)) in exercise_steps(&steps).into_iter().enumerate() {
            assert_eq!(idx, i % 3);
            assert_eq!(name, def.exercises[idx].name);
        }
    }

    #[test]
    fn test_single_set_has_no_set_rest() {
        let mut def = sample_definition();
        def.sets = 1;
        let steps = expand(&def, &mut ScriptedSource::default());

        // warmup + 3 exercises + 2 short rests
        assert_eq!(steps.len(), 6);
        assert!(!steps.iter().any(|s| matches!(
            s,
            TimedStep::Rest {
                label: RestLabel::RestBetweenSets,
                ..
            }
        )));
    }

    #[test]
    fn test_empty_exercises_yields_warmup_only() {
        let def = sample_definition().with_exercises(vec![]);
        let steps = expand(&def, &mut ScriptedSource::default());
        assert_eq!(
            steps,
            vec![TimedStep::Warmup {
                duration_seconds: 300
            }]
        );
    }

    #[test]
    fn test_total_duration() {
        let mut def = sample_definition();
        def.sets = 1;
        let mut rng = ScriptedSource {
            reps: vec![10, 8, 5].into(),
            ..Default::default()
        };
        let steps = expand(&def, &mut rng);
        // 300 warmup + 20 + 10 + 20 + 10 + 15
        assert_eq!(total_duration_seconds(&steps), 375);
    }
}
