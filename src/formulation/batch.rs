//! Batch planning
//!
//! Scales a formulated ration to a batch weight and checks stock on hand.

use serde::Serialize;

use super::error::{FormulationResult, RationError};
use super::ration::{RationResult, ResolvedLine};
use super::rounding::{round_to, CURRENCY_DP, PERCENT_DP};
use crate::measure::kg_to_liters;
use crate::models::WeightCategory;

#[derive(Debug, Clone, Serialize)]
pub struct BatchLine {
    pub ingredient_id: String,
    pub name: String,
    pub percentage: f64,
    pub kg: f64,
    pub liters: f64,
    pub category: WeightCategory,
    pub cost: f64,
    pub stock: f64,
    pub stock_sufficient: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchPlan {
    pub batch_kg: f64,
    pub lines: Vec<BatchLine>,
    pub total_cost: f64,
    pub all_stock_sufficient: bool,
}

/// Build a plan for `batch_kg` of a ration formulated from `lines`
pub fn plan(
    lines: &[ResolvedLine<'_>],
    ration: &RationResult,
    batch_kg: f64,
) -> FormulationResult<BatchPlan> {
    if !batch_kg.is_finite() || batch_kg <= 0.0 {
        return Err(RationError::InvalidInput(format!(
            "batch size must be a positive number of kg, got {}",
            batch_kg
        )));
    }

    let lines: Vec<BatchLine> = lines
        .iter()
        .map(|line| {
            let ingredient = line.ingredient;
            let kg = batch_kg * line.percentage / 100.0;
            BatchLine {
                ingredient_id: ingredient.id.clone(),
                name: ingredient.name.clone(),
                percentage: line.percentage,
                kg: round_to(kg, PERCENT_DP),
                liters: round_to(kg_to_liters(kg, ingredient.category), PERCENT_DP),
                category: ingredient.category,
                cost: round_to(kg * ingredient.price_per_kg, CURRENCY_DP),
                stock: ingredient.stock,
                stock_sufficient: ingredient.stock >= kg,
            }
        })
        .collect();

    let all_stock_sufficient = lines.iter().all(|l| l.stock_sufficient);

    Ok(BatchPlan {
        batch_kg,
        total_cost: round_to(ration.cost.cost_per_kg_ration * batch_kg, CURRENCY_DP),
        lines,
        all_stock_sufficient,
    })
}
