//! Utility to create the catalog database and seed the master data

use feedmix::config::Config;
use feedmix::db::{seed, Database};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    let db_path = config.database_path;
    println!("Database path: {}", db_path.display());

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = Database::open_migrated(&db_path, config.pool_size)?;
    let report = database.with_conn_mut(seed::seed_master_catalog)?;

    println!("Master catalog seeded:");
    println!("  Ingredients created:   {}", report.ingredients_created);
    println!("  Ingredients refreshed: {}", report.ingredients_refreshed);
    println!("  Standards created:     {}", report.standards_created);

    Ok(())
}
