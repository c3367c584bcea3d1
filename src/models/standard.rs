//! Nutrient standard model
//!
//! NRC requirement profiles keyed by species, life stage and weight range.

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientStandard {
    pub id: String,
    pub species: String,
    pub stage: String,
    pub weight_range: String,
    pub req_dry_matter: f64,
    pub req_crude_protein: f64,
    pub req_energy: f64, // kcal/kg
    pub req_calcium: f64,
    pub req_phosphorus: f64,
}

/// Data for creating a standard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientStandardCreate {
    pub species: String,
    pub stage: String,
    pub weight_range: String,
    pub req_dry_matter: f64,
    pub req_crude_protein: f64,
    pub req_energy: f64,
    pub req_calcium: f64,
    pub req_phosphorus: f64,
}

impl NutrientStandard {
    /// Human readable label, e.g. "BOVINE / GROWTH / 200-300"
    pub fn label(&self) -> String {
        format!("{} / {} / {}", self.species, self.stage, self.weight_range)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            species: row.get("species")?,
            stage: row.get("stage")?,
            weight_range: row.get("weight_range")?,
            req_dry_matter: row.get("req_dry_matter")?,
            req_crude_protein: row.get("req_crude_protein")?,
            req_energy: row.get("req_energy")?,
            req_calcium: row.get("req_calcium")?,
            req_phosphorus: row.get("req_phosphorus")?,
        })
    }

    pub fn create(conn: &Connection, data: &NutrientStandardCreate) -> DbResult<Self> {
        let id = uuid::Uuid::new_v4().to_string();
        conn.execute(
            r#"
            INSERT INTO nutrient_standards (
                id, species, stage, weight_range,
                req_dry_matter, req_crude_protein, req_energy, req_calcium, req_phosphorus
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                id,
                data.species,
                data.stage,
                data.weight_range,
                data.req_dry_matter,
                data.req_crude_protein,
                data.req_energy,
                data.req_calcium,
                data.req_phosphorus,
            ],
        )?;

        Ok(Self {
            id,
            species: data.species.clone(),
            stage: data.stage.clone(),
            weight_range: data.weight_range.clone(),
            req_dry_matter: data.req_dry_matter,
            req_crude_protein: data.req_crude_protein,
            req_energy: data.req_energy,
            req_calcium: data.req_calcium,
            req_phosphorus: data.req_phosphorus,
        })
    }

    pub fn get_by_id(conn: &Connection, id: &str) -> DbResult<Option<Self>> {
        let standard = conn
            .query_row(
                "SELECT * FROM nutrient_standards WHERE id = ?1",
                [id],
                Self::from_row,
            )
            .optional()?;
        Ok(standard)
    }

    pub fn find_by_key(
        conn: &Connection,
        species: &str,
        stage: &str,
        weight_range: &str,
    ) -> DbResult<Option<Self>> {
        let standard = conn
            .query_row(
                "SELECT * FROM nutrient_standards
                 WHERE species = ?1 AND stage = ?2 AND weight_range = ?3",
                params![species, stage, weight_range],
                Self::from_row,
            )
            .optional()?;
        Ok(standard)
    }

    /// List standards, optionally for a single species (case-insensitive)
    pub fn list(conn: &Connection, species: Option<&str>) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM nutrient_standards
             WHERE ?1 IS NULL OR UPPER(species) = UPPER(?1)
             ORDER BY species, stage, weight_range",
        )?;
        let rows = stmt.query_map([species], Self::from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
