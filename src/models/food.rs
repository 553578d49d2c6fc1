//! Food log data model: entries, meals, and macro totals.
//!
//! The log is a flat collection of entries persisted as one JSON array
//! (`food_log.json`) and rewritten in full on every mutation. Entry ids are
//! timestamp-derived strings, strictly increasing process-wide.

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::nutritionix::NutrientInfo;

/// ---------------------------------------------------------------------------
/// Meals
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Meal {
  Breakfast,
  Lunch,
  Dinner,
  Snacks,
}

impl Meal {
  pub const ALL: [Meal; 4] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner, Meal::Snacks];

  pub fn as_str(&self) -> &'static str {
    match self {
      Meal::Breakfast => "Breakfast",
      Meal::Lunch => "Lunch",
      Meal::Dinner => "Dinner",
      Meal::Snacks => "Snacks",
    }
  }
}

impl Default for Meal {
  // The add-food dialog defaults to Snacks
  fn default() -> Self {
    Meal::Snacks
  }
}

/// ---------------------------------------------------------------------------
/// Entry Ids
/// ---------------------------------------------------------------------------

static LAST_ENTRY_ID: AtomicI64 = AtomicI64::new(0);

/// Generate a unique entry id from the current timestamp (microseconds).
///
/// Strictly increasing even when two entries are created within the same
/// microsecond, so ids stay unique across any sequence of adds.
fn next_entry_id() -> String {
  let now = Utc::now().timestamp_micros();
  let mut prev = LAST_ENTRY_ID.load(Ordering::Relaxed);
  loop {
    let candidate = now.max(prev + 1);
    match LAST_ENTRY_ID.compare_exchange_weak(
      prev,
      candidate,
      Ordering::Relaxed,
      Ordering::Relaxed,
    ) {
      Ok(_) => return candidate.to_string(),
      Err(observed) => prev = observed,
    }
  }
}

/// Today's date on the local calendar, the date new entries are logged under
pub fn today() -> NaiveDate {
  Local::now().date_naive()
}

/// ---------------------------------------------------------------------------
/// Food Entries
/// ---------------------------------------------------------------------------

/// One logged food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
  pub id: String,
  pub food: String,
  pub quantity: f64, // grams
  pub meal: Meal,
  #[serde(default)]
  pub notes: String,
  pub calories: i64,
  pub protein: i64,
  pub carbs: i64,
  pub fats: i64,
  pub date: NaiveDate,
  /// Thumbnail URL carried over from the search candidate, if any
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "deserialize_photo"
  )]
  pub photo: Option<String>,
}

/// Older logs persisted `photo` as the full API object (`{"thumb": …, …}`);
/// newer ones store just the thumbnail URL. Accept both.
fn deserialize_photo<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: serde::Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum PhotoField {
    Thumb(String),
    Object {
      #[serde(default)]
      thumb: Option<String>,
    },
    Other(serde_json::Value),
  }

  Ok(match Option::<PhotoField>::deserialize(deserializer)? {
    Some(PhotoField::Thumb(url)) => Some(url),
    Some(PhotoField::Object { thumb }) => thumb,
    Some(PhotoField::Other(_)) | None => None,
  })
}

impl FoodEntry {
  /// Build a new entry from a nutrient lookup result, dated today with a
  /// freshly generated id.
  pub fn new(
    food: impl Into<String>,
    quantity: f64,
    meal: Meal,
    notes: impl Into<String>,
    nutrients: &NutrientInfo,
    photo: Option<String>,
  ) -> Self {
    Self {
      id: next_entry_id(),
      food: food.into(),
      quantity,
      meal,
      notes: notes.into(),
      calories: nutrients.calories,
      protein: nutrients.protein,
      carbs: nutrients.carbs,
      fats: nutrients.fats,
      date: today(),
      photo,
    }
  }

  /// Overwrite the editable fields from a fresh nutrient lookup.
  /// Id, food name, date, and photo are untouched.
  pub fn apply_update(
    &mut self,
    quantity: f64,
    meal: Meal,
    notes: impl Into<String>,
    nutrients: &NutrientInfo,
  ) {
    self.quantity = quantity;
    self.meal = meal;
    self.notes = notes.into();
    self.calories = nutrients.calories;
    self.protein = nutrients.protein;
    self.carbs = nutrients.carbs;
    self.fats = nutrients.fats;
  }
}

/// ---------------------------------------------------------------------------
/// Macro Totals
/// ---------------------------------------------------------------------------

/// Summed macros over a set of entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTotals {
  pub calories: i64,
  pub protein: i64,
  pub carbs: i64,
  pub fats: i64,
}

impl MacroTotals {
  pub fn add(&mut self, entry: &FoodEntry) {
    self.calories += entry.calories;
    self.protein += entry.protein;
    self.carbs += entry.carbs;
    self.fats += entry.fats;
  }
}

/// Fraction of a daily target reached, clamped to [0, 1].
/// Non-positive targets yield 0 rather than dividing by zero.
pub fn progress_ratio(current: f64, target: f64) -> f64 {
  if target > 0.0 {
    (current / target).min(1.0)
  } else {
    0.0
  }
}

/// ---------------------------------------------------------------------------
/// Food Log
/// ---------------------------------------------------------------------------

/// The full food log, persisted as a single JSON array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodLog {
  pub entries: Vec<FoodEntry>,
}

impl FoodLog {
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn add(&mut self, entry: FoodEntry) {
    self.entries.push(entry);
  }

  pub fn get(&self, id: &str) -> Option<&FoodEntry> {
    self.entries.iter().find(|e| e.id == id)
  }

  pub fn get_mut(&mut self, id: &str) -> Option<&mut FoodEntry> {
    self.entries.iter_mut().find(|e| e.id == id)
  }

  /// Remove all entries with the given id. Returns false when nothing
  /// matched (deleting an unknown id is a no-op).
  pub fn remove(&mut self, id: &str) -> bool {
    let before = self.entries.len();
    self.entries.retain(|e| e.id != id);
    self.entries.len() != before
  }

  /// Entries logged on the given date, in stored order
  pub fn entries_on(&self, date: NaiveDate) -> Vec<&FoodEntry> {
    self.entries.iter().filter(|e| e.date == date).collect()
  }

  /// Macro totals over the entries logged on the given date
  pub fn totals_on(&self, date: NaiveDate) -> MacroTotals {
    let mut totals = MacroTotals::default();
    for entry in self.entries.iter().filter(|e| e.date == date) {
      totals.add(entry);
    }
    totals
  }

  /// Per-meal macro totals for the given date
  pub fn meal_totals_on(&self, date: NaiveDate) -> [(Meal, MacroTotals); 4] {
    let mut totals = Meal::ALL.map(|meal| (meal, MacroTotals::default()));
    for entry in self.entries.iter().filter(|e| e.date == date) {
      for (meal, sum) in totals.iter_mut() {
        if *meal == entry.meal {
          sum.add(entry);
        }
      }
    }
    totals
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
