//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!("applied catalog schema migration v1");
    }

    Ok(())
}

/// Migration v1: feed ingredients and nutrient standards
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- FEED INGREDIENTS
        -- tenant_id NULL = global master entry
        -- ============================================
        CREATE TABLE feed_ingredients (
            id TEXT PRIMARY KEY,
            tenant_id TEXT,
            name TEXT NOT NULL,

            -- Nutrient vector (percent unless noted)
            dry_matter REAL NOT NULL DEFAULT 0,
            crude_protein REAL NOT NULL DEFAULT 0,
            crude_fiber REAL NOT NULL DEFAULT 0,
            crude_fat REAL NOT NULL DEFAULT 0,
            ash REAL NOT NULL DEFAULT 0,
            calcium REAL NOT NULL DEFAULT 0,
            phosphorus REAL NOT NULL DEFAULT 0,
            metabolizable_energy REAL NOT NULL DEFAULT 0,  -- kcal/kg
            tdn REAL,
            ndf REAL,

            price_per_kg REAL NOT NULL DEFAULT 0,
            stock REAL NOT NULL DEFAULT 0,                 -- kg on hand
            category TEXT NOT NULL DEFAULT 'medium'
                CHECK(category IN ('light', 'medium', 'heavy')),

            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_feed_ingredients_tenant ON feed_ingredients(tenant_id);
        CREATE INDEX idx_feed_ingredients_name ON feed_ingredients(name);

        -- ============================================
        -- NUTRIENT STANDARDS
        -- Global NRC requirement profiles
        -- ============================================
        CREATE TABLE nutrient_standards (
            id TEXT PRIMARY KEY,
            species TEXT NOT NULL,
            stage TEXT NOT NULL,
            weight_range TEXT NOT NULL,

            req_dry_matter REAL NOT NULL,
            req_crude_protein REAL NOT NULL,
            req_energy REAL NOT NULL,                      -- kcal/kg
            req_calcium REAL NOT NULL,
            req_phosphorus REAL NOT NULL,

            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(species, stage, weight_range)
        );
        "#,
    )?;

    Ok(())
}

pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
