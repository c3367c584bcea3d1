//! Nutrient catalog
//!
//! Read-only lookup of ingredients and standards for the formulator. Every
//! implementation resolves ingredients through [`visible`].

use std::collections::HashMap;

use crate::db::{Database, DbResult};
use crate::models::{Ingredient, NutrientStandard, Scope};

/// Global entries are visible to everyone, tenant entries only to their owner.
pub fn visible(ingredient: &Ingredient, tenant_id: &str) -> bool {
    match &ingredient.scope {
        Scope::Global => true,
        Scope::Tenant(owner) => owner == tenant_id,
    }
}

pub trait NutrientCatalog {
    /// An ingredient visible to `tenant_id`, or `None`
    fn find_ingredient(&self, id: &str, tenant_id: &str) -> DbResult<Option<Ingredient>>;

    /// Standards are global
    fn find_standard(&self, id: &str) -> DbResult<Option<NutrientStandard>>;
}

impl<C: NutrientCatalog + ?Sized> NutrientCatalog for &C {
    fn find_ingredient(&self, id: &str, tenant_id: &str) -> DbResult<Option<Ingredient>> {
        (**self).find_ingredient(id, tenant_id)
    }

    fn find_standard(&self, id: &str) -> DbResult<Option<NutrientStandard>> {
        (**self).find_standard(id)
    }
}

/// Catalog backed by the SQLite database
#[derive(Clone)]
pub struct SqliteCatalog {
    database: Database,
}

impl SqliteCatalog {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Every ingredient the tenant can see, ordered by name
    pub fn list_ingredients(&self, tenant_id: &str) -> DbResult<Vec<Ingredient>> {
        self.database.with_conn(|conn| {
            Ok(Ingredient::list_for_tenant(conn, tenant_id)?
                .into_iter()
                .filter(|i| visible(i, tenant_id))
                .collect())
        })
    }
}

impl NutrientCatalog for SqliteCatalog {
    fn find_ingredient(&self, id: &str, tenant_id: &str) -> DbResult<Option<Ingredient>> {
        self.database.with_conn(|conn| {
            Ok(Ingredient::get_by_id(conn, id)?.filter(|i| visible(i, tenant_id)))
        })
    }

    fn find_standard(&self, id: &str) -> DbResult<Option<NutrientStandard>> {
        self.database
            .with_conn(|conn| NutrientStandard::get_by_id(conn, id))
    }
}

/// Catalog over preloaded records
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    ingredients: HashMap<String, Ingredient>,
    standards: HashMap<String, NutrientStandard>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.insert_ingredient(ingredient);
        self
    }

    pub fn with_standard(mut self, standard: NutrientStandard) -> Self {
        self.insert_standard(standard);
        self
    }

    pub fn insert_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.insert(ingredient.id.clone(), ingredient);
    }

    pub fn insert_standard(&mut self, standard: NutrientStandard) {
        self.standards.insert(standard.id.clone(), standard);
    }
}

impl NutrientCatalog for MemoryCatalog {
    fn find_ingredient(&self, id: &str, tenant_id: &str) -> DbResult<Option<Ingredient>> {
        Ok(self
            .ingredients
            .get(id)
            .filter(|i| visible(i, tenant_id))
            .cloned())
    }

    fn find_standard(&self, id: &str) -> DbResult<Option<NutrientStandard>> {
        Ok(self.standards.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NutrientProfile, WeightCategory};

    fn ingredient(id: &str, scope: Scope) -> Ingredient {
        Ingredient {
            id: id.to_string(),
            name: id.to_string(),
            scope,
            nutrients: NutrientProfile::zero(),
            price_per_kg: 0.0,
            stock: 0.0,
            category: WeightCategory::Medium,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_visible() {
        let global = ingredient("g", Scope::Global);
        let private = ingredient("p", Scope::Tenant("farm-a".to_string()));

        assert!(visible(&global, "farm-a"));
        assert!(visible(&global, "farm-b"));
        assert!(visible(&private, "farm-a"));
        assert!(!visible(&private, "farm-b"));
    }

    #[test]
    fn test_memory_catalog_applies_visibility() {
        let catalog = MemoryCatalog::new()
            .with_ingredient(ingredient("g", Scope::Global))
            .with_ingredient(ingredient("p", Scope::Tenant("farm-a".to_string())));

        assert!(catalog.find_ingredient("g", "farm-b").unwrap().is_some());
        assert!(catalog.find_ingredient("p", "farm-a").unwrap().is_some());
        assert!(catalog.find_ingredient("p", "farm-b").unwrap().is_none());
        assert!(catalog.find_ingredient("missing", "farm-a").unwrap().is_none());
    }

    #[test]
    fn test_sqlite_catalog_lists_only_visible_rows() {
        use crate::models::IngredientCreate;

        let db = Database::in_memory().unwrap();
        let data = |name: &str| IngredientCreate {
            name: name.to_string(),
            dry_matter: 90.0,
            crude_protein: 10.0,
            crude_fiber: 0.0,
            crude_fat: 0.0,
            ash: 0.0,
            calcium: 0.0,
            phosphorus: 0.0,
            metabolizable_energy: 3000.0,
            tdn: None,
            ndf: None,
            price_per_kg: 1000.0,
            stock: 0.0,
            category: WeightCategory::Heavy,
        };
        db.with_conn(|conn| {
            Ingredient::create(conn, &Scope::Global, &data("Barley"))?;
            Ingredient::create(conn, &Scope::Tenant("farm-a".to_string()), &data("A mash"))?;
            Ingredient::create(conn, &Scope::Tenant("farm-b".to_string()), &data("B mash"))?;
            Ok(())
        })
        .unwrap();

        let catalog = SqliteCatalog::new(db);
        let names = |tenant: &str| -> Vec<String> {
            catalog
                .list_ingredients(tenant)
                .unwrap()
                .into_iter()
                .map(|i| i.name)
                .collect()
        };
        assert_eq!(names("farm-a"), vec!["A mash", "Barley"]);
        assert_eq!(names("farm-b"), vec!["B mash", "Barley"]);
        assert_eq!(names("farm-c"), vec!["Barley"]);
    }
}
