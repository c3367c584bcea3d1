//! Unit types and conversion constants
//!
//! Mass units normalise to kilograms, volume units to liters.

use serde::Serialize;

use crate::models::WeightCategory;

/// Kind of a recognised unit and its factor to the base unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "factor", rename_all = "lowercase")]
pub enum FeedUnit {
    /// Factor to kilograms
    Mass(f64),
    /// Factor to liters
    Volume(f64),
}

// ============================================================================
// Mass Conversion Constants (to kilograms)
// ============================================================================

pub const KG_PER_G: f64 = 0.001;
pub const KG_PER_TON: f64 = 1000.0;
pub const KG_PER_LB: f64 = 0.453592;
pub const KG_PER_OZ: f64 = 0.0283495;

// ============================================================================
// Volume Conversion Constants (to liters)
// ============================================================================

pub const L_PER_ML: f64 = 0.001;
/// Standard 10 liter feed bucket
pub const L_PER_BUCKET: f64 = 10.0;
pub const L_PER_M3: f64 = 1000.0;

// ============================================================================
// Bulk Density (kg per liter, loose)
// ============================================================================

pub const BULK_DENSITY_HEAVY: f64 = 0.70;
pub const BULK_DENSITY_MEDIUM: f64 = 0.45;
pub const BULK_DENSITY_LIGHT: f64 = 0.15;

pub fn bulk_density(category: WeightCategory) -> f64 {
    match category {
        WeightCategory::Heavy => BULK_DENSITY_HEAVY,
        WeightCategory::Medium => BULK_DENSITY_MEDIUM,
        WeightCategory::Light => BULK_DENSITY_LIGHT,
    }
}

/// Recognise a unit string
pub fn parse_unit(unit: &str) -> Option<FeedUnit> {
    let lower = unit.to_lowercase();

    match lower.trim() {
        "kg" | "kilogram" | "kilograms" => Some(FeedUnit::Mass(1.0)),
        "g" | "gram" | "grams" => Some(FeedUnit::Mass(KG_PER_G)),
        "t" | "ton" | "tons" | "tonne" | "tonnes" => Some(FeedUnit::Mass(KG_PER_TON)),
        "lb" | "lbs" | "pound" | "pounds" => Some(FeedUnit::Mass(KG_PER_LB)),
        "oz" | "ounce" | "ounces" => Some(FeedUnit::Mass(KG_PER_OZ)),
        "l" | "liter" | "liters" | "litre" | "litres" => Some(FeedUnit::Volume(1.0)),
        "ml" | "milliliter" | "milliliters" => Some(FeedUnit::Volume(L_PER_ML)),
        "bucket" | "buckets" => Some(FeedUnit::Volume(L_PER_BUCKET)),
        "m3" | "cubic meter" | "cubic meters" => Some(FeedUnit::Volume(L_PER_M3)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit() {
        assert_eq!(parse_unit("kg"), Some(FeedUnit::Mass(1.0)));
        assert_eq!(parse_unit(" Ton "), Some(FeedUnit::Mass(1000.0)));
        assert_eq!(parse_unit("bucket"), Some(FeedUnit::Volume(10.0)));
        assert_eq!(parse_unit("scoop"), None);
    }

    #[test]
    fn test_bulk_density_ordering() {
        assert!(bulk_density(WeightCategory::Heavy) > bulk_density(WeightCategory::Medium));
        assert!(bulk_density(WeightCategory::Medium) > bulk_density(WeightCategory::Light));
    }
}
