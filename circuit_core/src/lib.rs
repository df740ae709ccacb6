#![forbid(unsafe_code)]

//! Core domain model and business logic for the Circuit workout system.
//!
//! This crate provides:
//! - Domain types (exercises, workout definitions, timed steps)
//! - Workout expansion into timed sequences
//! - Feedback-driven calibration
//! - Persistence (seed catalog, wire normalization, user store)
//! - Playback state

pub mod types;
pub mod error;
pub mod definition;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod wire;
pub mod random;
pub mod expander;
pub mod calibrator;
pub mod store;
pub mod playback;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use definition::{WorkoutDraft, WorkoutSettings};
pub use catalog::get_default_catalog;
pub use config::Config;
pub use random::{RandomSource, RngSource};
pub use expander::{expand, rep_range, total_duration_seconds, RepRange};
pub use calibrator::calibrate;
pub use store::{load_seed, WorkoutStore};
pub use playback::{format_clock, Player};
