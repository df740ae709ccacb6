//! Workout persistence with file locking.
//!
//! The store layers user workouts (`user_workouts.json` in the data
//! directory) over the seed catalog. A user copy replaces the seed workout
//! with the same id; user-only workouts follow the seed list in saved order.
//! Seed workouts themselves are never written.

use crate::calibrator::calibrate;
use crate::catalog::get_default_catalog;
use crate::definition::{WorkoutDraft, WorkoutSettings};
use crate::{Error, PathSummary, Result, WorkoutDefinition};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File holding user-created and user-modified workouts
pub const USER_WORKOUTS_FILE: &str = "user_workouts.json";

/// Load seed workouts from an extended-JSON file, or the built-in catalog
pub fn load_seed(seed_file: Option<&Path>) -> Result<Vec<WorkoutDefinition>> {
    match seed_file {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            let workouts = crate::wire::parse_workouts(&contents)?;
            tracing::info!("Loaded {} seed workouts from {:?}", workouts.len(), path);
            Ok(workouts)
        }
        None => Ok(get_default_catalog().to_vec()),
    }
}

/// Seed catalog plus the user's saved workouts
#[derive(Clone, Debug)]
pub struct WorkoutStore {
    seed: Vec<WorkoutDefinition>,
    user_path: PathBuf,
}

impl WorkoutStore {
    /// Open the store rooted at `data_dir` over the given seed workouts
    pub fn open(data_dir: &Path, seed: Vec<WorkoutDefinition>) -> Self {
        Self {
            seed,
            user_path: data_dir.join(USER_WORKOUTS_FILE),
        }
    }

    pub fn user_path(&self) -> &Path {
        &self.user_path
    }

    /// Load user workouts with shared locking
    ///
    /// Returns an empty list if the file doesn't exist.
    /// If the file is unreadable or corrupted, logs a warning and returns an
    /// empty list. Only the read paths use this; `save` refuses to run over a
    /// file it cannot parse.
    pub fn load_user(&self) -> Result<Vec<WorkoutDefinition>> {
        match self.read_user() {
            Ok(workouts) => Ok(workouts),
            Err(e) => {
                tracing::warn!(
                    "Unable to load user workouts {:?}: {}. Ignoring user edits.",
                    self.user_path,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Read the user file under a shared lock, propagating every failure
    ///
    /// A missing file is the only case that yields an empty list.
    fn read_user(&self) -> Result<Vec<WorkoutDefinition>> {
        let path = &self.user_path;
        if !path.exists() {
            tracing::debug!("No user workouts at {:?}", path);
            return Ok(Vec::new());
        }

        let file = File::open(path)?;

        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        let workouts: Vec<WorkoutDefinition> = serde_json::from_str(&contents)?;
        tracing::debug!("Loaded {} user workouts from {:?}", workouts.len(), path);
        Ok(workouts)
    }

    /// Write the full user workout list with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn write_user(&self, workouts: &[WorkoutDefinition]) -> Result<()> {
        let parent = self.user_path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "user workouts path missing parent")
        })?;
        std::fs::create_dir_all(parent)?;

        // Unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(workouts)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.user_path)
            .map_err(|e| Error::Io(e.error))?;

        tracing::debug!(
            "Saved {} user workouts to {:?}",
            workouts.len(),
            self.user_path
        );
        Ok(())
    }

    /// All workouts: seed entries overridden by user copies, then user-only ones
    pub fn load_all(&self) -> Result<Vec<WorkoutDefinition>> {
        let user = self.load_user()?;
        let mut all = self.seed.clone();

        for workout in user {
            match all.iter_mut().find(|w| w.id == workout.id) {
                Some(existing) => *existing = workout,
                None => all.push(workout),
            }
        }

        Ok(all)
    }

    /// Upsert a workout into the user file by id
    ///
    /// Fails without touching the file if the existing user file cannot be
    /// read or parsed, so other saved workouts are never dropped.
    pub fn save(&self, workout: &WorkoutDefinition) -> Result<()> {
        let mut user = self.read_user()?;
        match user.iter_mut().find(|w| w.id == workout.id) {
            Some(existing) => *existing = workout.clone(),
            None => user.push(workout.clone()),
        }
        self.write_user(&user)?;
        tracing::info!("Saved workout '{}' ({})", workout.id, workout.title);
        Ok(())
    }

    /// Find a workout by id
    pub fn find(&self, id: &str) -> Result<WorkoutDefinition> {
        self.load_all()?
            .into_iter()
            .find(|w| w.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Path names with workout counts, in first-seen order
    pub fn paths(&self) -> Result<Vec<PathSummary>> {
        let mut summaries: Vec<PathSummary> = Vec::new();
        for workout in self.load_all()? {
            match summaries.iter_mut().find(|s| s.path == workout.path) {
                Some(summary) => summary.count += 1,
                None => summaries.push(PathSummary {
                    path: workout.path,
                    count: 1,
                }),
            }
        }
        Ok(summaries)
    }

    /// Workouts grouped under `path`
    pub fn workouts_by_path(&self, path: &str) -> Result<Vec<WorkoutDefinition>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|w| w.path == path)
            .collect())
    }

    /// Load a workout, derive a new version from it, and save that back
    pub fn update<F>(&self, id: &str, f: F) -> Result<WorkoutDefinition>
    where
        F: FnOnce(&WorkoutDefinition) -> Result<WorkoutDefinition>,
    {
        let current = self.find(id)?;
        let updated = f(&current)?;
        if updated.id != current.id {
            return Err(Error::InvalidDefinition(format!(
                "Workout id is immutable ({} -> {})",
                current.id, updated.id
            )));
        }
        self.save(&updated)?;
        Ok(updated)
    }

    /// Build and persist a new workout
    pub fn create(&self, draft: WorkoutDraft) -> Result<WorkoutDefinition> {
        let workout = draft.build()?;
        self.save(&workout)?;
        Ok(workout)
    }

    /// Apply scheduling or exercise changes to a stored workout
    pub fn configure(&self, id: &str, settings: &WorkoutSettings) -> Result<WorkoutDefinition> {
        self.update(id, |current| {
            let updated = current.with_settings(settings);
            updated.ensure_valid()?;
            Ok(updated)
        })
    }

    /// Recalibrate a stored workout from a feedback score and persist it
    pub fn calibrate(&self, id: &str, feedback: i64) -> Result<WorkoutDefinition> {
        self.update(id, |current| calibrate(current, feedback))
    }
}
