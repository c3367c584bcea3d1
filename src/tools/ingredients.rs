//! Feed Ingredient MCP Tools
//!
//! Tenant-scoped listing and creation of feed ingredients.

use serde::Serialize;

use crate::catalog::{NutrientCatalog, SqliteCatalog};
use crate::db::Database;
use crate::formulation::{FormulationResult, RationError};
use crate::models::{Ingredient, IngredientCreate, Scope, WeightCategory};

/// Summary of an ingredient for list results
#[derive(Debug, Serialize)]
pub struct IngredientSummary {
    pub id: String,
    pub name: String,
    pub scope: Scope,
    pub crude_protein: f64,
    pub metabolizable_energy: f64,
    pub price_per_kg: f64,
    pub stock: f64,
    pub category: WeightCategory,
}

impl From<&Ingredient> for IngredientSummary {
    fn from(item: &Ingredient) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            scope: item.scope.clone(),
            crude_protein: item.nutrients.crude_protein,
            metabolizable_energy: item.nutrients.metabolizable_energy,
            price_per_kg: item.price_per_kg,
            stock: item.stock,
            category: item.category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListIngredientsResponse {
    pub items: Vec<IngredientSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct AddIngredientResponse {
    pub id: String,
    pub name: String,
    pub tenant_id: String,
    pub created_at: String,
}

/// Reject names and values that cannot describe a feed
pub fn validate_ingredient(data: &IngredientCreate) -> FormulationResult<()> {
    if data.name.trim().is_empty() {
        return Err(RationError::InvalidInput(
            "ingredient name cannot be empty".to_string(),
        ));
    }

    for (field, value) in data.nutrients().percent_fields() {
        let Some(value) = value else { continue };
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(RationError::InvalidInput(format!(
                "{} must be between 0 and 100, got {}",
                field, value
            )));
        }
    }

    let non_negative = [
        ("metabolizable_energy", data.metabolizable_energy),
        ("price_per_kg", data.price_per_kg),
        ("stock", data.stock),
        ("tdn", data.tdn.unwrap_or(0.0)),
    ];
    for (field, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(RationError::InvalidInput(format!(
                "{} cannot be negative, got {}",
                field, value
            )));
        }
    }

    Ok(())
}

/// Create a tenant-private ingredient
pub fn add_feed_ingredient(
    db: &Database,
    tenant_id: &str,
    data: IngredientCreate,
) -> FormulationResult<AddIngredientResponse> {
    // Stored verbatim: every lookup compares tenant ids exactly
    if tenant_id.trim().is_empty() {
        return Err(RationError::InvalidInput("tenant_id cannot be empty".to_string()));
    }
    validate_ingredient(&data)?;

    let scope = Scope::Tenant(tenant_id.to_string());
    let item = db.with_conn(|conn| Ingredient::create(conn, &scope, &data))?;

    tracing::info!(tenant = tenant_id, id = %item.id, name = %item.name, "feed ingredient created");

    Ok(AddIngredientResponse {
        id: item.id,
        name: item.name,
        tenant_id: tenant_id.to_string(),
        created_at: item.created_at,
    })
}

/// Global presets plus the tenant's own feeds
pub fn list_feed_ingredients(db: &Database, tenant_id: &str) -> FormulationResult<ListIngredientsResponse> {
    let items: Vec<IngredientSummary> = SqliteCatalog::new(db.clone())
        .list_ingredients(tenant_id)?
        .iter()
        .map(IngredientSummary::from)
        .collect();

    Ok(ListIngredientsResponse {
        total: items.len(),
        items,
    })
}

/// Full ingredient record, if visible to the tenant
pub fn get_feed_ingredient(db: &Database, tenant_id: &str, id: &str) -> FormulationResult<Ingredient> {
    SqliteCatalog::new(db.clone())
        .find_ingredient(id, tenant_id)?
        .ok_or_else(|| RationError::NotFound(format!("feed ingredient {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IngredientCreate {
        IngredientCreate {
            name: "Farm silage".to_string(),
            dry_matter: 30.0,
            crude_protein: 8.0,
            crude_fiber: 25.0,
            crude_fat: 3.0,
            ash: 6.0,
            calcium: 0.3,
            phosphorus: 0.2,
            metabolizable_energy: 2200.0,
            tdn: Some(60.0),
            ndf: None,
            price_per_kg: 800.0,
            stock: 1200.0,
            category: WeightCategory::Light,
        }
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(validate_ingredient(&sample()).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut blank = sample();
        blank.name = "  ".to_string();
        assert!(validate_ingredient(&blank).is_err());

        let mut protein = sample();
        protein.crude_protein = 120.0;
        assert!(validate_ingredient(&protein).is_err());

        let mut price = sample();
        price.price_per_kg = -1.0;
        assert!(validate_ingredient(&price).is_err());

        let mut tdn = sample();
        tdn.tdn = Some(f64::NAN);
        assert!(validate_ingredient(&tdn).is_err());

        let mut fat = sample();
        fat.tdn = Some(190.0);
        assert!(validate_ingredient(&fat).is_ok());
    }

    #[test]
    fn test_created_feed_resolves_under_the_same_tenant_id() {
        let db = Database::in_memory().unwrap();

        let spaced = add_feed_ingredient(&db, " farm-a", sample()).unwrap();
        assert_eq!(spaced.tenant_id, " farm-a");
        assert!(get_feed_ingredient(&db, " farm-a", &spaced.id).is_ok());
        assert_eq!(list_feed_ingredients(&db, " farm-a").unwrap().total, 1);
        assert!(get_feed_ingredient(&db, "farm-a", &spaced.id).is_err());

        assert!(matches!(
            add_feed_ingredient(&db, "   ", sample()),
            Err(RationError::InvalidInput(_))
        ));
    }
}
