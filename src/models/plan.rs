//! Workout plan and progress data documents.

use serde::{Deserialize, Serialize};

/// The AI-generated workout plan, persisted as `workout_plan.json`.
/// Replaced wholesale on every generation; no history is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
  #[serde(default)]
  pub plan: String,
}

impl WorkoutPlan {
  pub fn is_empty(&self) -> bool {
    self.plan.is_empty()
  }
}

/// Opaque progress data, persisted as `progress_data.json`.
/// Loaded and flushed untouched; reserved for future tracking features.
pub type ProgressData = serde_json::Map<String, serde_json::Value>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_plan_round_trips_as_single_field_object() {
    let plan = WorkoutPlan {
      plan: "Day 1: Push".to_string(),
    };
    let json = serde_json::to_string(&plan).unwrap();
    assert_eq!(json, r#"{"plan":"Day 1: Push"}"#);

    let back: WorkoutPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(back, plan);
  }

  #[test]
  fn test_plan_defaults_to_empty() {
    let plan: WorkoutPlan = serde_json::from_str("{}").unwrap();
    assert!(plan.is_empty());
  }
}
