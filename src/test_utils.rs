//! Mock data factories shared across module tests.

use chrono::NaiveDate;

use crate::models::{ActivityLevel, FoodEntry, Goal, Meal, Profile};
use crate::nutritionix::{FoodCandidate, NutrientInfo};

/// A complete profile that passes validation
pub fn mock_profile() -> Profile {
  Profile {
    name: "Aziz".to_string(),
    weight: Some(80.0),
    height: Some(180.0),
    goal: Some(Goal::MuscleGain),
    activity_level: Some(ActivityLevel::Moderate),
    ..Profile::default()
  }
}

/// A nutrient record with plausible non-zero macros
pub fn mock_nutrients() -> NutrientInfo {
  NutrientInfo {
    calories: 130,
    protein: 3,
    carbs: 28,
    fats: 0,
    saturated_fat: 0,
    cholesterol: 0,
    sodium: 1,
    fiber: 0,
    sugars: 0,
  }
}

/// A search candidate without a thumbnail
pub fn mock_candidate(name: &str) -> FoodCandidate {
  FoodCandidate {
    food_name: name.to_string(),
    photo_thumb: None,
  }
}

/// An entry with a fresh id on the given date
pub fn mock_entry(food: &str, meal: Meal, date: NaiveDate) -> FoodEntry {
  let mut entry = FoodEntry::new(food, 100.0, meal, "", &mock_nutrients(), None);
  entry.date = date;
  entry
}
