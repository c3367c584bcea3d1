//! Feed quantity conversion
//!
//! Mass <-> volume goes through the bulk density of the ingredient's weight category.

use super::units::{bulk_density, parse_unit, FeedUnit};
use crate::formulation::{FormulationResult, RationError};
use crate::models::WeightCategory;

fn unit_or_err(unit: &str) -> FormulationResult<FeedUnit> {
    parse_unit(unit).ok_or_else(|| RationError::InvalidInput(format!("unknown unit '{}'", unit)))
}

/// Kilograms in `liters` of a feed of the given category
pub fn liters_to_kg(liters: f64, category: WeightCategory) -> f64 {
    liters * bulk_density(category)
}

/// Liters occupied by `kg` of a feed of the given category
pub fn kg_to_liters(kg: f64, category: WeightCategory) -> f64 {
    kg / bulk_density(category)
}

/// Convert `quantity` from one unit to another
pub fn convert(
    quantity: f64,
    from_unit: &str,
    to_unit: &str,
    category: WeightCategory,
) -> FormulationResult<f64> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(RationError::InvalidInput(format!(
            "quantity must be a non-negative number, got {}",
            quantity
        )));
    }

    let from = unit_or_err(from_unit)?;
    let to = unit_or_err(to_unit)?;

    let converted = match (from, to) {
        (FeedUnit::Mass(f), FeedUnit::Mass(t)) | (FeedUnit::Volume(f), FeedUnit::Volume(t)) => {
            quantity * f / t
        }
        (FeedUnit::Mass(f), FeedUnit::Volume(t)) => kg_to_liters(quantity * f, category) / t,
        (FeedUnit::Volume(f), FeedUnit::Mass(t)) => liters_to_kg(quantity * f, category) / t,
    };

    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_kind_ignores_category() {
        let kg = convert(2.5, "t", "kg", WeightCategory::Light).unwrap();
        assert!((kg - 2500.0).abs() < 1e-9);
        let l = convert(3.0, "bucket", "l", WeightCategory::Heavy).unwrap();
        assert!((l - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_bucket_of_heavy_feed() {
        let kg = convert(1.0, "bucket", "kg", WeightCategory::Heavy).unwrap();
        assert!((kg - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_mass_to_volume_roundtrip_through_density() {
        let liters = convert(15.0, "kg", "l", WeightCategory::Light).unwrap();
        assert!((liters - 100.0).abs() < 1e-9);
        let kg = convert(liters, "l", "kg", WeightCategory::Light).unwrap();
        assert!((kg - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_unknown_unit_and_negative_quantity() {
        assert!(matches!(
            convert(1.0, "scoop", "kg", WeightCategory::Medium),
            Err(RationError::InvalidInput(_))
        ));
        assert!(matches!(
            convert(-1.0, "kg", "g", WeightCategory::Medium),
            Err(RationError::InvalidInput(_))
        ));
    }
}
