//! Nutrient Standard MCP Tools

use serde::Serialize;

use crate::db::Database;
use crate::formulation::FormulationResult;
use crate::models::NutrientStandard;

#[derive(Debug, Serialize)]
pub struct ListStandardsResponse {
    pub standards: Vec<NutrientStandard>,
    pub total: usize,
}

/// All NRC standards, optionally for one species
pub fn list_nutrient_standards(
    db: &Database,
    species: Option<&str>,
) -> FormulationResult<ListStandardsResponse> {
    let species = species.map(str::trim).filter(|s| !s.is_empty());
    let standards = db.with_conn(|conn| NutrientStandard::list(conn, species))?;

    Ok(ListStandardsResponse {
        total: standards.len(),
        standards,
    })
}
