//! User profile: body stats, training goal, and daily macro targets.
//!
//! There is exactly one profile per installation. It is created by the
//! first-run setup flow and only ever replaced wholesale by re-running setup.

use serde::{Deserialize, Serialize};

/// Default daily macro targets used when the profile does not set its own.
pub const DEFAULT_DAILY_CALORIES: f64 = 2000.0;
pub const DEFAULT_DAILY_PROTEIN: f64 = 150.0;
pub const DEFAULT_DAILY_CARBS: f64 = 250.0;
pub const DEFAULT_DAILY_FATS: f64 = 65.0;

/// Training goal selected during setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
  #[serde(rename = "Weight Loss")]
  WeightLoss,
  #[serde(rename = "Muscle Gain")]
  MuscleGain,
  #[serde(rename = "General Fitness")]
  GeneralFitness,
}

impl Goal {
  pub fn as_str(&self) -> &'static str {
    match self {
      Goal::WeightLoss => "Weight Loss",
      Goal::MuscleGain => "Muscle Gain",
      Goal::GeneralFitness => "General Fitness",
    }
  }
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
  Sedentary,
  Light,
  Moderate,
  #[serde(rename = "Very Active")]
  VeryActive,
  #[serde(rename = "Extra Active")]
  ExtraActive,
}

impl ActivityLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      ActivityLevel::Sedentary => "Sedentary",
      ActivityLevel::Light => "Light",
      ActivityLevel::Moderate => "Moderate",
      ActivityLevel::VeryActive => "Very Active",
      ActivityLevel::ExtraActive => "Extra Active",
    }
  }
}

/// The single user profile, persisted as `user_profile.json`.
///
/// Most fields are optional because the backing file may be absent or partial
/// on first run; `validate` decides whether setup is complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub weight: Option<f64>, // kg
  #[serde(default)]
  pub height: Option<f64>, // cm
  #[serde(default)]
  pub goal: Option<Goal>,
  #[serde(default)]
  pub activity_level: Option<ActivityLevel>,
  /// Free-text training experience, fed into the workout-plan prompt
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub experience: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub daily_calories: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub daily_protein: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub daily_carbs: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub daily_fats: Option<f64>,
}

/// Stats snapshot used to fill the workout-plan prompt
#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
  pub weight: f64,
  pub height: f64,
  pub goal: String,
  pub experience: String,
  pub activity_level: String,
}

impl Profile {
  /// A profile is complete when weight, height, and goal are all set
  /// (and the numeric fields are non-zero).
  pub fn validate(&self) -> bool {
    self.weight.is_some_and(|w| w > 0.0)
      && self.height.is_some_and(|h| h > 0.0)
      && self.goal.is_some()
  }

  /// Prompt inputs, with fallbacks for missing fields
  pub fn stats(&self) -> UserStats {
    UserStats {
      weight: self.weight.unwrap_or(0.0),
      height: self.height.unwrap_or(0.0),
      goal: self
        .goal
        .map(|g| g.as_str().to_string())
        .unwrap_or_else(|| "general fitness".to_string()),
      experience: self
        .experience
        .clone()
        .unwrap_or_else(|| "Intermediate".to_string()),
      activity_level: self
        .activity_level
        .map(|a| a.as_str().to_string())
        .unwrap_or_else(|| "Moderate".to_string()),
    }
  }

  pub fn daily_calories(&self) -> f64 {
    self.daily_calories.unwrap_or(DEFAULT_DAILY_CALORIES)
  }

  pub fn daily_protein(&self) -> f64 {
    self.daily_protein.unwrap_or(DEFAULT_DAILY_PROTEIN)
  }

  pub fn daily_carbs(&self) -> f64 {
    self.daily_carbs.unwrap_or(DEFAULT_DAILY_CARBS)
  }

  pub fn daily_fats(&self) -> f64 {
    self.daily_fats.unwrap_or(DEFAULT_DAILY_FATS)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
