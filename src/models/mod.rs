pub mod food;
pub mod plan;
pub mod profile;

pub use food::{FoodEntry, FoodLog, MacroTotals, Meal};
pub use plan::{ProgressData, WorkoutPlan};
pub use profile::{ActivityLevel, Goal, Profile, UserStats};
