//! Feedmix
//!
//! An MCP server for livestock ration formulation.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use feedmix::build_info;
use feedmix::config::Config;
use feedmix::db;
use feedmix::mcp::FeedmixService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    // Logging goes to stderr to not interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config.log_directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let db_path = config.database_path.clone();
    tracing::info!(path = %db_path.display(), "opening catalog database");

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::open_migrated(&db_path, config.pool_size)?;

    // First start on an empty database gets the master catalog
    database.with_conn_mut(|conn| {
        let version = db::migrations::get_schema_version(conn)?;
        let empty: bool = conn.query_row(
            "SELECT NOT EXISTS (SELECT 1 FROM feed_ingredients WHERE tenant_id IS NULL)",
            [],
            |row| row.get(0),
        )?;
        if empty {
            db::seed::seed_master_catalog(conn)?;
        }
        tracing::info!(schema_version = version, "catalog ready");
        Ok(())
    })?;

    let service = FeedmixService::new(db_path, database);

    tracing::info!("starting MCP server on stdio");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
