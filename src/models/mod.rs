//! Data models
//!
//! Rust structs representing catalog entities.

mod ingredient;
mod nutrients;
mod standard;

pub use ingredient::{Ingredient, IngredientCreate, Scope, WeightCategory};
pub use nutrients::NutrientProfile;
pub use standard::{NutrientStandard, NutrientStandardCreate};
