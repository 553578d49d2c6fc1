//! Headless core for a single-user food logging and workout planning app.
//!
//! Covers the data model, flat-file JSON persistence, the Nutritionix and
//! Gemini API clients, and the dispatch bridge that runs slow calls off the
//! interactive thread. Rendering is the shell's job; everything here is
//! driven through [`App`] and [`Dispatcher`].

pub mod app;
pub mod dispatch;
pub mod gemini;
pub mod models;
pub mod nutritionix;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use app::{App, AppError};
pub use dispatch::{Dispatcher, Outcome};
pub use gemini::{GeminiClient, GeminiError};
pub use models::{FoodEntry, FoodLog, MacroTotals, Meal, Profile, WorkoutPlan};
pub use nutritionix::{NutritionError, NutritionixClient};
pub use store::{Store, StoreError};
