//! Feed ingredient model
//!
//! A feed ingredient with its nutrient vector, price and stock.

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use super::NutrientProfile;
use crate::db::{DbError, DbResult};

/// Who owns a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "tenant_id", rename_all = "lowercase")]
pub enum Scope {
    /// Master data shared by every tenant
    Global,
    /// Private to one tenant
    Tenant(String),
}

impl Scope {
    fn from_column(tenant_id: Option<String>) -> Self {
        match tenant_id {
            Some(id) => Scope::Tenant(id),
            None => Scope::Global,
        }
    }

    fn tenant_id(&self) -> Option<&str> {
        match self {
            Scope::Global => None,
            Scope::Tenant(id) => Some(id),
        }
    }
}

/// Bulk class of a feed, used for volume measuring only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightCategory {
    /// Roughage and forage: bulky, low density
    Light,
    #[default]
    Medium,
    /// Grains, meals and minerals
    Heavy,
}

impl WeightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightCategory::Light => "light",
            WeightCategory::Medium => "medium",
            WeightCategory::Heavy => "heavy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(WeightCategory::Light),
            "medium" => Some(WeightCategory::Medium),
            "heavy" => Some(WeightCategory::Heavy),
            _ => None,
        }
    }
}

/// A feed ingredient as stored in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub scope: Scope,
    pub nutrients: NutrientProfile,
    pub price_per_kg: f64,
    pub stock: f64,
    pub category: WeightCategory,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new ingredient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
    pub dry_matter: f64,
    pub crude_protein: f64,
    #[serde(default)]
    pub crude_fiber: f64,
    #[serde(default)]
    pub crude_fat: f64,
    #[serde(default)]
    pub ash: f64,
    #[serde(default)]
    pub calcium: f64,
    #[serde(default)]
    pub phosphorus: f64,
    pub metabolizable_energy: f64,
    pub tdn: Option<f64>,
    pub ndf: Option<f64>,
    pub price_per_kg: f64,
    #[serde(default)]
    pub stock: f64,
    #[serde(default)]
    pub category: WeightCategory,
}

impl IngredientCreate {
    pub fn nutrients(&self) -> NutrientProfile {
        NutrientProfile {
            dry_matter: self.dry_matter,
            crude_protein: self.crude_protein,
            crude_fiber: self.crude_fiber,
            crude_fat: self.crude_fat,
            ash: self.ash,
            calcium: self.calcium,
            phosphorus: self.phosphorus,
            metabolizable_energy: self.metabolizable_energy,
            tdn: self.tdn,
            ndf: self.ndf,
        }
    }
}

impl Ingredient {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            scope: Scope::from_column(row.get("tenant_id")?),
            nutrients: NutrientProfile {
                dry_matter: row.get("dry_matter")?,
                crude_protein: row.get("crude_protein")?,
                crude_fiber: row.get("crude_fiber")?,
                crude_fat: row.get("crude_fat")?,
                ash: row.get("ash")?,
                calcium: row.get("calcium")?,
                phosphorus: row.get("phosphorus")?,
                metabolizable_energy: row.get("metabolizable_energy")?,
                tdn: row.get("tdn")?,
                ndf: row.get("ndf")?,
            },
            price_per_kg: row.get("price_per_kg")?,
            stock: row.get("stock")?,
            category: WeightCategory::parse(&row.get::<_, String>("category")?)
                .unwrap_or_default(),
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert a new ingredient under the given scope
    pub fn create(conn: &Connection, scope: &Scope, data: &IngredientCreate) -> DbResult<Self> {
        let id = uuid::Uuid::new_v4().to_string();
        conn.execute(
            r#"
            INSERT INTO feed_ingredients (
                id, tenant_id, name,
                dry_matter, crude_protein, crude_fiber, crude_fat, ash, calcium, phosphorus,
                metabolizable_energy, tdn, ndf,
                price_per_kg, stock, category
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
            params![
                id,
                scope.tenant_id(),
                data.name.trim(),
                data.dry_matter,
                data.crude_protein,
                data.crude_fiber,
                data.crude_fat,
                data.ash,
                data.calcium,
                data.phosphorus,
                data.metabolizable_energy,
                data.tdn,
                data.ndf,
                data.price_per_kg,
                data.stock,
                data.category.as_str(),
            ],
        )?;

        Self::get_by_id(conn, &id)?
            .ok_or_else(|| DbError::CorruptRow(format!("ingredient {} missing after insert", id)))
    }

    /// Fetch by id regardless of scope. Callers apply visibility.
    pub fn get_by_id(conn: &Connection, id: &str) -> DbResult<Option<Self>> {
        let item = conn
            .query_row(
                "SELECT * FROM feed_ingredients WHERE id = ?1",
                [id],
                Self::from_row,
            )
            .optional()?;
        Ok(item)
    }

    /// Global entries plus those owned by `tenant_id`, ordered by name
    pub fn list_for_tenant(conn: &Connection, tenant_id: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM feed_ingredients
             WHERE tenant_id IS NULL OR tenant_id = ?1
             ORDER BY name, id",
        )?;
        let rows = stmt.query_map([tenant_id], Self::from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Look up a master entry by exact name
    pub fn find_global_by_name(conn: &Connection, name: &str) -> DbResult<Option<Self>> {
        let item = conn
            .query_row(
                "SELECT * FROM feed_ingredients WHERE name = ?1 AND tenant_id IS NULL",
                [name],
                Self::from_row,
            )
            .optional()?;
        Ok(item)
    }

    /// Refresh the fields master seeding owns on an existing entry
    pub fn refresh_master_fields(
        conn: &Connection,
        id: &str,
        category: WeightCategory,
        tdn: Option<f64>,
        ndf: Option<f64>,
    ) -> DbResult<()> {
        conn.execute(
            "UPDATE feed_ingredients
             SET category = ?1, tdn = ?2, ndf = ?3, updated_at = datetime('now')
             WHERE id = ?4",
            params![category.as_str(), tdn, ndf, id],
        )?;
        Ok(())
    }
}
