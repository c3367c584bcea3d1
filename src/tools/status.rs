//! Feedmix Status Tool
//!
//! Runtime, catalog and process information for the status tool.

use std::path::PathBuf;
use std::time::Instant;

use rusqlite::Connection;
use serde::Serialize;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::{migrations, Database, DbResult};

/// Row counts of the catalog tables
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogCounts {
    pub global_ingredients: i64,
    pub tenant_ingredients: i64,
    pub tenants: i64,
    pub standards: i64,
}

impl CatalogCounts {
    fn load(conn: &Connection) -> DbResult<Self> {
        Ok(conn.query_row(
            "SELECT
                (SELECT COUNT(*) FROM feed_ingredients WHERE tenant_id IS NULL),
                (SELECT COUNT(*) FROM feed_ingredients WHERE tenant_id IS NOT NULL),
                (SELECT COUNT(DISTINCT tenant_id) FROM feed_ingredients),
                (SELECT COUNT(*) FROM nutrient_standards)",
            [],
            |row| {
                Ok(Self {
                    global_ingredients: row.get(0)?,
                    tenant_ingredients: row.get(1)?,
                    tenants: row.get(2)?,
                    standards: row.get(3)?,
                })
            },
        )?)
    }
}

/// Runtime status of the Feedmix service
#[derive(Debug, Clone, Serialize)]
pub struct FeedmixStatus {
    pub build: BuildInfo,

    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub schema_version: Option<i32>,
    pub migration_pending: Option<bool>,
    pub catalog: Option<CatalogCounts>,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Database problems are logged and reported as missing fields
    pub fn get_status(&self, database: &Database) -> FeedmixStatus {
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let catalog = database.with_conn(|conn| {
            Ok((
                migrations::get_schema_version(conn)?,
                migrations::needs_migration(conn)?,
                CatalogCounts::load(conn)?,
            ))
        });
        let (schema_version, migration_pending, catalog) = match catalog {
            Ok((version, pending, counts)) => (Some(version), Some(pending), Some(counts)),
            Err(e) => {
                tracing::warn!(error = %e, "status: catalog unavailable");
                (None, None, None)
            }
        };

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));
        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FeedmixStatus {
            build: BuildInfo::current(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            schema_version,
            migration_pending,
            catalog,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed;

    #[test]
    fn test_status_counts_seeded_catalog() {
        let db = Database::in_memory().unwrap();
        db.with_conn_mut(seed::seed_master_catalog).unwrap();

        let status = StatusTracker::new(PathBuf::from(":memory:")).get_status(&db);
        assert_eq!(status.schema_version, Some(migrations::SCHEMA_VERSION));
        assert_eq!(status.migration_pending, Some(false));
        assert!(status.database_size_bytes.is_none());

        let catalog = status.catalog.unwrap();
        assert_eq!(catalog.global_ingredients, 30);
        assert_eq!(catalog.tenant_ingredients, 0);
        assert_eq!(catalog.tenants, 0);
        assert_eq!(catalog.standards, 4);
    }
}
