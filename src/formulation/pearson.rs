//! Pearson square
//!
//! Two-ingredient mix that hits a crude protein target.

use serde::Serialize;

use super::error::{FormulationResult, RationError};
use super::rounding::{round_to, PERCENT_DP};
use crate::models::Ingredient;

pub const DISCLAIMER: &str = "This is a basic Pearson Square calculation for Crude Protein. \
Always consult a nutritionist for complete vitamin/mineral balancing.";

#[derive(Debug, Clone, Serialize)]
pub struct PearsonShare {
    pub ingredient_id: String,
    pub name: String,
    pub percentage: f64,
    pub required_parts: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PearsonSolution {
    pub target_protein: f64,
    pub result: [PearsonShare; 2],
    pub total_parts: f64,
    pub disclaimer: &'static str,
}

/// Solve the square for `a` and `b`.
///
/// The target must lie strictly between the two protein levels; there is no
/// clamping to 0/100.
pub fn solve(a: &Ingredient, b: &Ingredient, target_protein: f64) -> FormulationResult<PearsonSolution> {
    let pk_a = a.nutrients.crude_protein;
    let pk_b = b.nutrients.crude_protein;

    if !target_protein.is_finite()
        || target_protein <= pk_a.min(pk_b)
        || target_protein >= pk_a.max(pk_b)
    {
        return Err(RationError::InvalidInput(format!(
            "target protein {} must be strictly between the protein levels of the two ingredients ({} and {})",
            target_protein, pk_a, pk_b
        )));
    }

    let parts_a = (pk_b - target_protein).abs();
    let parts_b = (pk_a - target_protein).abs();
    let total_parts = parts_a + parts_b;

    let share = |ingredient: &Ingredient, parts: f64| PearsonShare {
        ingredient_id: ingredient.id.clone(),
        name: ingredient.name.clone(),
        percentage: round_to(parts / total_parts * 100.0, PERCENT_DP),
        required_parts: parts,
    };

    Ok(PearsonSolution {
        target_protein,
        result: [share(a, parts_a), share(b, parts_b)],
        total_parts,
        disclaimer: DISCLAIMER,
    })
}
