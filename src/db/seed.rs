//! Master catalog seeding
//!
//! Global feed ingredients and NRC requirement profiles shipped with every install.
//! Seeding is idempotent: existing master ingredients only get their category,
//! TDN and NDF refreshed, existing standards are left alone.

use rusqlite::Connection;
use serde::Serialize;

use super::connection::DbResult;
use crate::models::{
    Ingredient, IngredientCreate, NutrientStandard, NutrientStandardCreate, Scope,
    WeightCategory::{self, Heavy, Light, Medium},
};

struct MasterFeed {
    name: &'static str,
    dm: f64,
    cp: f64,
    me: f64,
    cf: f64,
    fat: f64,
    ash: f64,
    ca: f64,
    p: f64,
    price: f64,
    category: WeightCategory,
    tdn: f64,
    ndf: f64,
}

const fn feed(name: &'static str, v: [f64; 11], category: WeightCategory) -> MasterFeed {
    MasterFeed {
        name,
        dm: v[0],
        cp: v[1],
        me: v[2],
        cf: v[3],
        fat: v[4],
        ash: v[5],
        ca: v[6],
        p: v[7],
        price: v[8],
        category,
        tdn: v[9],
        ndf: v[10],
    }
}

/// Number of global feeds a seeded catalog carries
pub const MASTER_FEED_COUNT: usize = MASTER_FEEDS.len();

// [dry matter, crude protein, ME kcal/kg, crude fiber, crude fat, ash, Ca, P, price/kg, TDN, NDF]
#[rustfmt::skip]
const MASTER_FEEDS: [MasterFeed; 30] = [
    // Energy sources (grains)
    feed("Jagung Kuning / Corn Grain",          [88.0,  8.5, 3300.0,  2.2,  3.8,   1.5,  0.02,  0.28,  6500.0,  88.0, 10.0], Heavy),
    feed("Sorgum / Grain Sorghum",              [89.0,  9.0, 3150.0,  2.5,  3.0,   1.8,  0.03,  0.30,  5000.0,  82.0, 19.0], Heavy),
    feed("Gandum / Wheat",                      [88.0, 11.5, 3050.0,  2.8,  1.8,   1.7,  0.05,  0.35,  5500.0,  85.0, 13.0], Heavy),
    feed("Ubi Kayu / Cassava",                  [85.0,  2.5, 3200.0,  3.5,  0.5,   2.5,  0.12,  0.12,  2000.0,  82.0,  9.0], Medium),
    feed("Tepung Tapioka",                      [88.0,  1.8, 3450.0,  0.5,  0.2,   0.3,  0.02,  0.05,  7000.0,  88.0,  2.0], Heavy),
    feed("Pollard / Wheat Bran",                [88.0, 15.5, 1800.0,  9.5,  4.2,   5.5,  0.12,  1.05,  4000.0,  65.0, 42.0], Medium),
    // Plant protein
    feed("Bungkil Kedelai / SBM 44%",           [89.0, 44.0, 2800.0,  7.0,  1.5,   6.0,  0.25,  0.60, 10500.0,  82.0, 16.0], Heavy),
    feed("Bungkil Kedelai / SBM 48%",           [89.0, 48.0, 2900.0,  3.5,  1.2,   6.5,  0.28,  0.65, 11500.0,  85.0,  8.0], Heavy),
    feed("Bungkil Kelapa / Copra Meal",         [90.0, 21.0, 1900.0, 12.0,  6.0,   6.5,  0.20,  0.55,  4500.0,  72.0, 65.0], Medium),
    feed("Bungkil Sawit / Palm Kernel Cake",    [90.0, 16.0, 2100.0, 18.0,  8.0,   4.5,  0.25,  0.55,  2500.0,  70.0, 55.0], Medium),
    feed("Bungkil Kacang Tanah / Peanut Meal",  [90.0, 48.5, 2800.0,  7.5,  1.8,   5.5,  0.16,  0.55,  8000.0,  79.0, 16.0], Medium),
    // Animal protein
    feed("Tepung Ikan / Fish Meal 55%",         [92.0, 55.0, 2800.0,  1.0,  8.0,  18.0,  5.00,  3.00, 15000.0,  72.0,  0.0], Heavy),
    feed("Tepung Ikan / Fish Meal 65%",         [92.0, 65.0, 3000.0,  0.5,  6.0,  16.0,  4.50,  2.80, 18000.0,  76.0,  0.0], Heavy),
    feed("Tepung Darah / Blood Meal",           [91.0, 82.0, 2850.0,  0.8,  1.5,   4.5,  0.28,  0.22, 12000.0,  88.0,  0.0], Heavy),
    feed("Tepung Daging Tulang / MBM",          [92.0, 50.0, 2150.0,  2.5,  9.0,  27.0,  9.40,  4.50,  9500.0,  57.0,  0.0], Heavy),
    // Forage and roughage
    feed("Rumput Gajah / Napier",               [20.0, 10.0, 1800.0, 30.0,  2.0,  10.0,  0.40,  0.20,   500.0,  58.0, 65.0], Light),
    feed("Rumput Raja / King Grass",            [18.0,  9.5, 1750.0, 32.0,  1.8,   9.5,  0.35,  0.18,   450.0,  57.0, 68.0], Light),
    feed("Jerami Padi / Rice Straw",            [88.0,  4.5, 1400.0, 35.0,  1.5,  17.0,  0.20,  0.07,   300.0,  40.0, 72.0], Light),
    feed("Tumpi Jagung / Corn Husk",            [80.0,  6.0, 1500.0, 30.0,  1.0,   7.0,  0.25,  0.15,   350.0,  50.0, 65.0], Light),
    feed("Daun Singkong / Cassava Leaf",        [25.0, 24.0, 1900.0, 18.0,  5.0,   9.0,  1.70,  0.38,   400.0,  62.0, 38.0], Light),
    feed("Daun Lamtoro / Leucaena Leaf",        [25.0, 26.0, 2100.0, 15.0,  4.5,   7.5,  1.60,  0.22,   350.0,  65.0, 35.0], Light),
    // Agro-industrial by-products
    feed("Dedak Padi / Rice Bran",              [90.0, 12.0, 2100.0, 13.0, 12.0,  11.0,  0.05,  1.50,  3500.0,  65.0, 28.0], Medium),
    feed("Ampas Tahu / Tofu By-product",        [15.0, 26.0, 2450.0, 20.0, 12.0,   3.5,  0.40,  0.35,  1000.0,  76.0, 42.0], Medium),
    feed("Onggok / Cassava Pulp",               [85.0,  2.5, 3100.0, 14.0,  0.5,   2.0,  0.16,  0.03,  1500.0,  78.0, 12.0], Medium),
    feed("Molasses / Tetes Tebu",               [75.0,  4.2, 2450.0,  0.0,  0.1,   9.5,  1.00,  0.09,  2200.0,  75.0,  0.0], Heavy),
    feed("Ampas Bir / Brewery Grain",           [22.0, 24.0, 2000.0, 16.5,  7.0,   4.5,  0.28,  0.60,  1800.0,  63.0, 52.0], Medium),
    // Mineral and fat supplements
    feed("Tepung Kapur / Limestone",            [99.0,  0.0,    0.0,  0.0,  0.0,  96.0, 36.00,  0.02,  1500.0,   0.0,  0.0], Heavy),
    feed("Dicalcium Phosphate (DCP)",           [96.0,  0.0,    0.0,  0.0,  0.0,  95.0, 22.00, 18.00, 12000.0,   0.0,  0.0], Heavy),
    feed("Garam Dapur / Salt (NaCl)",           [100.0, 0.0,    0.0,  0.0,  0.0, 100.0,  0.00,  0.00,  2000.0,   0.0,  0.0], Heavy),
    feed("Minyak Sawit / Palm Oil (CPO)",       [100.0, 0.0, 8600.0,  0.0, 99.0,   0.0,  0.00,  0.00, 14000.0, 190.0,  0.0], Heavy),
];

// (species, stage, weight range, DM, CP, energy kcal/kg, Ca, P)
const MASTER_STANDARDS: [(&str, &str, &str, f64, f64, f64, f64, f64); 4] = [
    ("BOVINE", "GROWTH", "200-300", 6.5, 13.0, 2400.0, 0.45, 0.25),
    ("BOVINE", "LACTATION", "400-500", 14.5, 16.0, 2600.0, 0.60, 0.35),
    ("CAPRINE", "GROWTH", "20-30", 0.8, 14.0, 2400.0, 0.50, 0.30),
    ("POULTRY", "GROWTH", "0.1-1.0", 0.0, 21.0, 3100.0, 1.0, 0.45),
];

/// Outcome of a seeding run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub ingredients_created: usize,
    pub ingredients_refreshed: usize,
    pub standards_created: usize,
}

/// Seed global ingredients and standards inside one transaction
pub fn seed_master_catalog(conn: &mut Connection) -> DbResult<SeedReport> {
    let tx = conn.transaction()?;
    let mut report = SeedReport::default();

    for master in &MASTER_FEEDS {
        let tdn = Some(master.tdn);
        let ndf = Some(master.ndf);
        match Ingredient::find_global_by_name(&tx, master.name)? {
            Some(existing) => {
                Ingredient::refresh_master_fields(&tx, &existing.id, master.category, tdn, ndf)?;
                report.ingredients_refreshed += 1;
            }
            None => {
                let data = IngredientCreate {
                    name: master.name.to_string(),
                    dry_matter: master.dm,
                    crude_protein: master.cp,
                    crude_fiber: master.cf,
                    crude_fat: master.fat,
                    ash: master.ash,
                    calcium: master.ca,
                    phosphorus: master.p,
                    metabolizable_energy: master.me,
                    tdn,
                    ndf,
                    price_per_kg: master.price,
                    stock: 0.0,
                    category: master.category,
                };
                Ingredient::create(&tx, &Scope::Global, &data)?;
                report.ingredients_created += 1;
            }
        }
    }

    for (species, stage, weight_range, dm, cp, energy, ca, p) in MASTER_STANDARDS {
        if NutrientStandard::find_by_key(&tx, species, stage, weight_range)?.is_none() {
            NutrientStandard::create(
                &tx,
                &NutrientStandardCreate {
                    species: species.to_string(),
                    stage: stage.to_string(),
                    weight_range: weight_range.to_string(),
                    req_dry_matter: dm,
                    req_crude_protein: cp,
                    req_energy: energy,
                    req_calcium: ca,
                    req_phosphorus: p,
                },
            )?;
            report.standards_created += 1;
        }
    }

    tx.commit()?;

    tracing::info!(
        created = report.ingredients_created,
        refreshed = report.ingredients_refreshed,
        standards = report.standards_created,
        "master catalog seeded"
    );

    Ok(report)
}
