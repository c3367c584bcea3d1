//! Ration MCP Tools
//!
//! Thin wrappers that run the formulator against the SQLite catalog.

use serde::Serialize;

use crate::catalog::SqliteCatalog;
use crate::db::Database;
use crate::formulation::{
    BatchPlan, FormulationResult, PearsonSolution, RationFormulator, RationItem, RationResult,
};
use crate::measure::{self, bulk_density};
use crate::models::WeightCategory;

use super::ingredients::get_feed_ingredient;

fn formulator(db: &Database) -> RationFormulator<SqliteCatalog> {
    RationFormulator::new(SqliteCatalog::new(db.clone()))
}

pub fn calculate_ration(
    db: &Database,
    tenant_id: &str,
    items: &[RationItem],
    standard_id: Option<&str>,
) -> FormulationResult<RationResult> {
    formulator(db).compute_ration(tenant_id, items, standard_id)
}

pub fn calculate_pearson_square(
    db: &Database,
    tenant_id: &str,
    ingredient_a_id: &str,
    ingredient_b_id: &str,
    target_protein: f64,
) -> FormulationResult<PearsonSolution> {
    formulator(db).pearson_square(tenant_id, ingredient_a_id, ingredient_b_id, target_protein)
}

pub fn plan_ration_batch(
    db: &Database,
    tenant_id: &str,
    items: &[RationItem],
    batch_kg: f64,
) -> FormulationResult<BatchPlan> {
    formulator(db).plan_batch(tenant_id, items, batch_kg)
}

/// Response for convert_feed_quantity
#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    pub ingredient_id: String,
    pub name: String,
    pub category: WeightCategory,
    pub bulk_density_kg_per_liter: f64,
    pub quantity: f64,
    pub from_unit: String,
    pub converted: f64,
    pub to_unit: String,
}

/// Convert a quantity of a specific ingredient between units
pub fn convert_feed_quantity(
    db: &Database,
    tenant_id: &str,
    ingredient_id: &str,
    quantity: f64,
    from_unit: &str,
    to_unit: &str,
) -> FormulationResult<ConversionResponse> {
    let ingredient = get_feed_ingredient(db, tenant_id, ingredient_id)?;
    let converted = measure::convert(quantity, from_unit, to_unit, ingredient.category)?;

    Ok(ConversionResponse {
        ingredient_id: ingredient.id,
        name: ingredient.name,
        category: ingredient.category,
        bulk_density_kg_per_liter: bulk_density(ingredient.category),
        quantity,
        from_unit: from_unit.to_string(),
        converted,
        to_unit: to_unit.to_string(),
    })
}
