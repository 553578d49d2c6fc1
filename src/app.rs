//! Application state: the in-memory model the interactive shell works
//! against.
//!
//! One `App` per process, constructed at startup from the store and flushed
//! at shutdown. All mutation happens on the owning thread; workers hand
//! results back through the dispatch bridge and the shell applies them here.

use chrono::NaiveDate;

use crate::models::{
  food, FoodEntry, FoodLog, MacroTotals, Meal, Profile, ProgressData, UserStats, WorkoutPlan,
};
use crate::nutritionix::{FoodCandidate, NutrientInfo};
use crate::store::{Store, StoreError};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  /// User input rejected before any network or file call
  #[error("{0}")]
  Validation(String),

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// ---------------------------------------------------------------------------
/// Input Validation
/// ---------------------------------------------------------------------------

/// Parse a quantity field from the add/edit dialog
pub fn parse_quantity(input: &str) -> Result<f64, AppError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(AppError::Validation("Please enter a valid quantity".into()));
  }
  trimmed
    .parse::<f64>()
    .ok()
    .filter(|q| *q > 0.0)
    .ok_or_else(|| AppError::Validation("Please enter a valid quantity".into()))
}

/// Reject empty coach questions before dispatching
pub fn validate_question(input: &str) -> Result<&str, AppError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(AppError::Validation("Please enter a question".into()));
  }
  Ok(trimmed)
}

/// ---------------------------------------------------------------------------
/// App State
/// ---------------------------------------------------------------------------

pub struct App {
  store: Store,
  pub profile: Profile,
  pub food_log: FoodLog,
  pub workout_plan: WorkoutPlan,
  pub progress: ProgressData,
  /// Non-fatal load problems (malformed files replaced by defaults),
  /// retained for the shell to display
  pub load_warnings: Vec<String>,
}

impl App {
  /// Load `.env` secrets and all persisted documents from `dir`.
  /// An unreadable or malformed document is reported as a warning and its
  /// default substituted.
  pub fn bootstrap(dir: impl Into<std::path::PathBuf>) -> Result<Self, AppError> {
    dotenvy::dotenv().ok();
    Self::load(Store::new(dir))
  }

  pub fn load(store: Store) -> Result<Self, AppError> {
    let mut warnings = Vec::new();

    let profile = Self::recover(store.load_profile(), &mut warnings);
    let food_log = Self::recover(store.load_food_log(), &mut warnings);
    let workout_plan = Self::recover(store.load_workout_plan(), &mut warnings);
    let progress = Self::recover(store.load_progress(), &mut warnings);

    println!("Loaded {} food log entries", food_log.len());

    Ok(Self {
      store,
      profile,
      food_log,
      workout_plan,
      progress,
      load_warnings: warnings,
    })
  }

  /// Reading a document never stops startup: unreadable and malformed files
  /// alike are reported as warnings and replaced by the empty default
  fn recover<T: Default>(result: Result<T, StoreError>, warnings: &mut Vec<String>) -> T {
    match result {
      Ok(value) => value,
      Err(e) => {
        eprintln!("{}", e);
        warnings.push(e.to_string());
        T::default()
      }
    }
  }

  /// First-run check: setup must run until the profile validates
  pub fn needs_setup(&self) -> bool {
    !self.profile.validate()
  }

  /// Commit the setup form. The profile must be complete.
  pub fn set_profile(&mut self, profile: Profile) -> Result<(), AppError> {
    if !profile.validate() {
      return Err(AppError::Validation("Please fill in all fields".into()));
    }
    self.store.save_profile(&profile)?;
    self.profile = profile;
    Ok(())
  }

  pub fn stats(&self) -> UserStats {
    self.profile.stats()
  }

  /// ------------------------------------------------------------------------
  /// Food log operations
  /// ------------------------------------------------------------------------

  /// Record a successful nutrient lookup as a new entry dated today.
  /// Returns the id of the created entry.
  pub fn log_food(
    &mut self,
    candidate: &FoodCandidate,
    quantity: f64,
    meal: Meal,
    notes: &str,
    nutrients: &NutrientInfo,
  ) -> Result<String, AppError> {
    let entry = FoodEntry::new(
      candidate.food_name.clone(),
      quantity,
      meal,
      notes,
      nutrients,
      candidate.photo_thumb.clone(),
    );
    let id = entry.id.clone();
    self.food_log.add(entry);
    self.store.save_food_log(&self.food_log)?;
    Ok(id)
  }

  /// Rewrite an entry's editable fields from a fresh lookup.
  /// Unknown ids leave the log untouched.
  pub fn update_entry(
    &mut self,
    id: &str,
    quantity: f64,
    meal: Meal,
    notes: &str,
    nutrients: &NutrientInfo,
  ) -> Result<bool, AppError> {
    match self.food_log.get_mut(id) {
      Some(entry) => entry.apply_update(quantity, meal, notes, nutrients),
      None => return Ok(false),
    }
    self.store.save_food_log(&self.food_log)?;
    Ok(true)
  }

  /// Delete an entry by id; deleting an unknown id is a no-op
  pub fn delete_entry(&mut self, id: &str) -> Result<bool, AppError> {
    if !self.food_log.remove(id) {
      return Ok(false);
    }
    self.store.save_food_log(&self.food_log)?;
    Ok(true)
  }

  pub fn todays_entries(&self) -> Vec<&FoodEntry> {
    self.food_log.entries_on(food::today())
  }

  pub fn todays_totals(&self) -> MacroTotals {
    self.food_log.totals_on(food::today())
  }

  pub fn meal_totals(&self) -> [(Meal, MacroTotals); 4] {
    self.food_log.meal_totals_on(food::today())
  }

  pub fn entries_on(&self, date: NaiveDate) -> Vec<&FoodEntry> {
    self.food_log.entries_on(date)
  }

  /// Daily macro targets from the profile, with the stock defaults
  pub fn macro_targets(&self) -> MacroTotals {
    MacroTotals {
      calories: self.profile.daily_calories() as i64,
      protein: self.profile.daily_protein() as i64,
      carbs: self.profile.daily_carbs() as i64,
      fats: self.profile.daily_fats() as i64,
    }
  }

  /// ------------------------------------------------------------------------
  /// Workout plan
  /// ------------------------------------------------------------------------

  /// Replace the stored plan with a freshly generated one
  pub fn set_workout_plan(&mut self, plan: String) -> Result<(), AppError> {
    self.workout_plan = WorkoutPlan { plan };
    self.store.save_workout_plan(&self.workout_plan)?;
    Ok(())
  }

  /// ------------------------------------------------------------------------
  /// Shutdown
  /// ------------------------------------------------------------------------

  /// Write every document back out
  pub fn flush(&self) -> Result<(), AppError> {
    self.store.save_profile(&self.profile)?;
    self.store.save_food_log(&self.food_log)?;
    self.store.save_workout_plan(&self.workout_plan)?;
    self.store.save_progress(&self.progress)?;
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
