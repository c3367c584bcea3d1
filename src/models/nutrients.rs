//! Shared nutrient vector
//!
//! Used for ingredient composition, per-ingredient contributions and ration aggregates.

use serde::{Deserialize, Serialize};

use crate::formulation::rounding::{round_to, ENERGY_DP, MINERAL_DP, PERCENT_DP};

/// Nutrient composition on an as-fed basis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub dry_matter: f64,          // %
    pub crude_protein: f64,       // %
    pub crude_fiber: f64,         // %
    pub crude_fat: f64,           // %
    pub ash: f64,                 // %
    pub calcium: f64,             // %
    pub phosphorus: f64,          // %
    pub metabolizable_energy: f64, // kcal/kg
    pub tdn: Option<f64>,         // %
    pub ndf: Option<f64>,         // %
}

impl NutrientProfile {
    /// Additive identity. TDN/NDF start known so that a sum stays known
    /// until an ingredient without them is added.
    pub fn zero() -> Self {
        Self {
            dry_matter: 0.0,
            crude_protein: 0.0,
            crude_fiber: 0.0,
            crude_fat: 0.0,
            ash: 0.0,
            calcium: 0.0,
            phosphorus: 0.0,
            metabolizable_energy: 0.0,
            tdn: Some(0.0),
            ndf: Some(0.0),
        }
    }

    /// Share of this profile carried by `percentage` % of a mix. Each value
    /// is evaluated as `value * percentage / 100`.
    pub fn weighted(&self, percentage: f64) -> Self {
        let w = |v: f64| v * percentage / 100.0;
        Self {
            dry_matter: w(self.dry_matter),
            crude_protein: w(self.crude_protein),
            crude_fiber: w(self.crude_fiber),
            crude_fat: w(self.crude_fat),
            ash: w(self.ash),
            calcium: w(self.calcium),
            phosphorus: w(self.phosphorus),
            metabolizable_energy: w(self.metabolizable_energy),
            tdn: self.tdn.map(w),
            ndf: self.ndf.map(w),
        }
    }

    pub fn add(&self, other: &NutrientProfile) -> Self {
        Self {
            dry_matter: self.dry_matter + other.dry_matter,
            crude_protein: self.crude_protein + other.crude_protein,
            crude_fiber: self.crude_fiber + other.crude_fiber,
            crude_fat: self.crude_fat + other.crude_fat,
            ash: self.ash + other.ash,
            calcium: self.calcium + other.calcium,
            phosphorus: self.phosphorus + other.phosphorus,
            metabolizable_energy: self.metabolizable_energy + other.metabolizable_energy,
            tdn: self.tdn.zip(other.tdn).map(|(a, b)| a + b),
            ndf: self.ndf.zip(other.ndf).map(|(a, b)| a + b),
        }
    }

    /// Apply the reporting precision of each field
    pub fn rounded(&self) -> Self {
        Self {
            dry_matter: round_to(self.dry_matter, PERCENT_DP),
            crude_protein: round_to(self.crude_protein, PERCENT_DP),
            crude_fiber: round_to(self.crude_fiber, PERCENT_DP),
            crude_fat: round_to(self.crude_fat, PERCENT_DP),
            ash: round_to(self.ash, PERCENT_DP),
            calcium: round_to(self.calcium, MINERAL_DP),
            phosphorus: round_to(self.phosphorus, MINERAL_DP),
            metabolizable_energy: round_to(self.metabolizable_energy, ENERGY_DP),
            tdn: self.tdn.map(|v| round_to(v, PERCENT_DP)),
            ndf: self.ndf.map(|v| round_to(v, PERCENT_DP)),
        }
    }

    /// Fields bounded by 0..=100. TDN is excluded: fats exceed 100.
    pub fn percent_fields(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("dry_matter", Some(self.dry_matter)),
            ("crude_protein", Some(self.crude_protein)),
            ("crude_fiber", Some(self.crude_fiber)),
            ("crude_fat", Some(self.crude_fat)),
            ("ash", Some(self.ash)),
            ("calcium", Some(self.calcium)),
            ("phosphorus", Some(self.phosphorus)),
            ("ndf", self.ndf),
        ]
    }
}

impl std::ops::Add for NutrientProfile {
    type Output = NutrientProfile;

    fn add(self, other: NutrientProfile) -> NutrientProfile {
        NutrientProfile::add(&self, &other)
    }
}

impl std::iter::Sum for NutrientProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutrientProfile::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(protein: f64, tdn: Option<f64>) -> NutrientProfile {
        NutrientProfile {
            crude_protein: protein,
            tdn,
            ..NutrientProfile::zero()
        }
    }

    #[test]
    fn test_sum_keeps_optional_fields_when_all_known() {
        let total: NutrientProfile = vec![profile(10.0, Some(80.0)), profile(20.0, Some(60.0))]
            .into_iter()
            .sum();
        assert!((total.crude_protein - 30.0).abs() < 1e-9);
        assert_eq!(total.tdn, Some(140.0));
        assert_eq!(total.ndf, Some(0.0));
    }

    #[test]
    fn test_sum_drops_optional_field_when_any_unknown() {
        let total: NutrientProfile = vec![profile(10.0, Some(80.0)), profile(20.0, None)]
            .into_iter()
            .sum();
        assert_eq!(total.tdn, None);
    }

    #[test]
    fn test_weighted_divides_after_multiplying() {
        let p = NutrientProfile {
            crude_protein: 44.0,
            tdn: Some(80.0),
            ndf: None,
            ..NutrientProfile::zero()
        }
        .weighted(1.3);
        assert_eq!(p.crude_protein, 44.0 * 1.3 / 100.0);
        assert_eq!(p.tdn, Some(80.0 * 1.3 / 100.0));
        assert_eq!(p.ndf, None);
    }

    #[test]
    fn test_rounded_uses_field_precision() {
        let p = NutrientProfile {
            crude_protein: 19.1549,
            calcium: 0.12345,
            metabolizable_energy: 3150.04,
            ..NutrientProfile::zero()
        }
        .rounded();
        assert_eq!(p.crude_protein, 19.15);
        assert_eq!(p.calcium, 0.123);
        assert_eq!(p.metabolizable_energy, 3150.0);
    }
}
