//! Ration formulator service
//!
//! Resolves request ids through a [`NutrientCatalog`] and hands the resolved
//! records to the pure functions in this module.

use super::batch::{self, BatchPlan};
use super::error::{FormulationResult, RationError};
use super::pearson::{self, PearsonSolution};
use super::ration::{formulate, validate_percentages, RationItem, RationResult, ResolvedLine};
use crate::catalog::NutrientCatalog;
use crate::models::{Ingredient, NutrientStandard};

pub struct RationFormulator<C> {
    catalog: C,
}

impl<C: NutrientCatalog> RationFormulator<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Weighted nutrient profile, cost and optional standard comparison
    pub fn compute_ration(
        &self,
        tenant_id: &str,
        items: &[RationItem],
        standard_id: Option<&str>,
    ) -> FormulationResult<RationResult> {
        let ingredients = self.resolve_items(tenant_id, items)?;
        let standard = standard_id.map(|id| self.resolve_standard(id)).transpose()?;

        let lines = pair_lines(items, &ingredients);
        let result = formulate(&lines, standard.as_ref())?;

        tracing::debug!(
            tenant = tenant_id,
            lines = items.len(),
            crude_protein = result.aggregate.crude_protein,
            cost_per_kg = result.cost.cost_per_kg_ration,
            "ration computed"
        );

        Ok(result)
    }

    /// Two-ingredient mix hitting `target_protein`
    pub fn pearson_square(
        &self,
        tenant_id: &str,
        ingredient_a_id: &str,
        ingredient_b_id: &str,
        target_protein: f64,
    ) -> FormulationResult<PearsonSolution> {
        let a = self.catalog.find_ingredient(ingredient_a_id, tenant_id)?;
        let b = self.catalog.find_ingredient(ingredient_b_id, tenant_id)?;

        match (a, b) {
            (Some(a), Some(b)) => pearson::solve(&a, &b, target_protein),
            (a, b) => {
                let missing: Vec<&str> = [(a.is_none(), ingredient_a_id), (b.is_none(), ingredient_b_id)]
                    .into_iter()
                    .filter(|(is_missing, _)| *is_missing)
                    .map(|(_, id)| id)
                    .collect();
                Err(not_found_ingredients(&missing))
            }
        }
    }

    /// Scale a ration to `batch_kg` and check stock on hand
    pub fn plan_batch(
        &self,
        tenant_id: &str,
        items: &[RationItem],
        batch_kg: f64,
    ) -> FormulationResult<BatchPlan> {
        let ingredients = self.resolve_items(tenant_id, items)?;
        let lines = pair_lines(items, &ingredients);
        let ration = formulate(&lines, None)?;
        batch::plan(&lines, &ration, batch_kg)
    }

    /// Validate the request, then resolve every id. All unresolved ids are
    /// reported together and nothing is computed.
    fn resolve_items(&self, tenant_id: &str, items: &[RationItem]) -> FormulationResult<Vec<Ingredient>> {
        if let Err(err) = validate_percentages(items.iter().map(|i| i.percentage)) {
            tracing::warn!(tenant = tenant_id, error = %err, "ration request rejected");
            return Err(err);
        }

        let mut resolved = Vec::with_capacity(items.len());
        let mut missing = Vec::new();
        for item in items {
            match self.catalog.find_ingredient(&item.ingredient_id, tenant_id)? {
                Some(ingredient) => resolved.push(ingredient),
                None => {
                    if !missing.contains(&item.ingredient_id.as_str()) {
                        missing.push(item.ingredient_id.as_str());
                    }
                }
            }
        }

        if !missing.is_empty() {
            tracing::warn!(tenant = tenant_id, missing = ?missing, "unresolved ingredients");
            return Err(not_found_ingredients(&missing));
        }

        Ok(resolved)
    }

    fn resolve_standard(&self, id: &str) -> FormulationResult<NutrientStandard> {
        self.catalog
            .find_standard(id)?
            .ok_or_else(|| RationError::NotFound(format!("nutrient standard {}", id)))
    }
}

fn pair_lines<'a>(items: &[RationItem], ingredients: &'a [Ingredient]) -> Vec<ResolvedLine<'a>> {
    items
        .iter()
        .zip(ingredients)
        .map(|(item, ingredient)| ResolvedLine {
            ingredient,
            percentage: item.percentage,
        })
        .collect()
}

fn not_found_ingredients(ids: &[&str]) -> RationError {
    RationError::NotFound(format!("feed ingredient(s) {}", ids.join(", ")))
}
