//! Flat-file JSON persistence for the four application documents.
//!
//! Each document lives in its own file under the store's base directory and
//! is rewritten in full on every save. Single-writer model: no locking, no
//! atomic-rename guarantee. A missing file reads as the document's default;
//! a malformed file is a recoverable error the caller handles by substituting
//! the default.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::models::{FoodLog, Profile, ProgressData, WorkoutPlan};

/// ---------------------------------------------------------------------------
/// Document Files
/// ---------------------------------------------------------------------------

const PROFILE_FILE: &str = "user_profile.json";
const FOOD_LOG_FILE: &str = "food_log.json";
const WORKOUT_PLAN_FILE: &str = "workout_plan.json";
const PROGRESS_FILE: &str = "progress_data.json";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("Failed to read {0}: {1}")]
  Read(&'static str, String),

  #[error("Failed to write {0}: {1}")]
  Write(&'static str, String),

  #[error("Malformed JSON in {0}: {1}")]
  Malformed(&'static str, String),
}

/// ---------------------------------------------------------------------------
/// Store
/// ---------------------------------------------------------------------------

pub struct Store {
  dir: PathBuf,
}

impl Store {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  /// Store rooted at the process working directory, matching where the
  /// original installation kept its files
  pub fn current_dir() -> Self {
    Self::new(".")
  }

  pub fn path_of(&self, file: &str) -> PathBuf {
    self.dir.join(file)
  }

  pub fn load_profile(&self) -> Result<Profile, StoreError> {
    self.read(PROFILE_FILE)
  }

  pub fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
    self.write(PROFILE_FILE, profile)
  }

  pub fn load_food_log(&self) -> Result<FoodLog, StoreError> {
    self.read(FOOD_LOG_FILE)
  }

  pub fn save_food_log(&self, log: &FoodLog) -> Result<(), StoreError> {
    self.write(FOOD_LOG_FILE, log)
  }

  pub fn load_workout_plan(&self) -> Result<WorkoutPlan, StoreError> {
    self.read(WORKOUT_PLAN_FILE)
  }

  pub fn save_workout_plan(&self, plan: &WorkoutPlan) -> Result<(), StoreError> {
    self.write(WORKOUT_PLAN_FILE, plan)
  }

  pub fn load_progress(&self) -> Result<ProgressData, StoreError> {
    self.read(PROGRESS_FILE)
  }

  pub fn save_progress(&self, progress: &ProgressData) -> Result<(), StoreError> {
    self.write(PROGRESS_FILE, progress)
  }

  fn read<T>(&self, file: &'static str) -> Result<T, StoreError>
  where
    T: DeserializeOwned + Default,
  {
    let text = match fs::read_to_string(self.path_of(file)) {
      Ok(text) => text,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
      Err(e) => return Err(StoreError::Read(file, e.to_string())),
    };

    serde_json::from_str(&text).map_err(|e| StoreError::Malformed(file, e.to_string()))
  }

  fn write<T: Serialize>(&self, file: &'static str, value: &T) -> Result<(), StoreError> {
    let json =
      serde_json::to_string(value).map_err(|e| StoreError::Write(file, e.to_string()))?;
    fs::write(self.path_of(file), json).map_err(|e| StoreError::Write(file, e.to_string()))
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
