//! Ration vs. nutrient standard
//!
//! Minimums-only check: any surplus over the requirement counts as met.

use serde::Serialize;

use super::rounding::{round_to, ENERGY_DP, MINERAL_DP, PERCENT_DP};
use crate::models::{NutrientProfile, NutrientStandard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Satisfied,
    NotSatisfied,
}

/// One checked field
#[derive(Debug, Clone, Serialize)]
pub struct FieldCheck {
    pub field: &'static str,
    pub actual: f64,
    pub required: f64,
    /// actual - required; negative means short
    pub gap: f64,
    pub met: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StandardComparison {
    pub standard_id: String,
    pub standard_label: String,
    pub checks: Vec<FieldCheck>,
    pub overall_status: ComplianceStatus,
}

impl StandardComparison {
    pub fn check(&self, field: &str) -> Option<&FieldCheck> {
        self.checks.iter().find(|c| c.field == field)
    }

    pub fn is_satisfied(&self) -> bool {
        self.overall_status == ComplianceStatus::Satisfied
    }
}

fn field_check(field: &'static str, actual: f64, required: f64, places: u32) -> FieldCheck {
    FieldCheck {
        field,
        actual,
        required,
        gap: round_to(actual - required, places),
        met: actual >= required,
    }
}

/// Compare an already-rounded aggregate against a standard
pub fn compare(aggregate: &NutrientProfile, standard: &NutrientStandard) -> StandardComparison {
    let checks = vec![
        field_check("dry_matter", aggregate.dry_matter, standard.req_dry_matter, PERCENT_DP),
        field_check("crude_protein", aggregate.crude_protein, standard.req_crude_protein, PERCENT_DP),
        field_check(
            "metabolizable_energy",
            aggregate.metabolizable_energy,
            standard.req_energy,
            ENERGY_DP,
        ),
        field_check("calcium", aggregate.calcium, standard.req_calcium, MINERAL_DP),
        field_check("phosphorus", aggregate.phosphorus, standard.req_phosphorus, MINERAL_DP),
    ];

    let overall_status = if checks.iter().all(|c| c.met) {
        ComplianceStatus::Satisfied
    } else {
        ComplianceStatus::NotSatisfied
    };

    StandardComparison {
        standard_id: standard.id.clone(),
        standard_label: standard.label(),
        checks,
        overall_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> NutrientStandard {
        NutrientStandard {
            id: "bov-growth".to_string(),
            species: "BOVINE".to_string(),
            stage: "GROWTH".to_string(),
            weight_range: "200-300".to_string(),
            req_dry_matter: 6.5,
            req_crude_protein: 13.0,
            req_energy: 2400.0,
            req_calcium: 0.45,
            req_phosphorus: 0.25,
        }
    }

    fn meets_everything() -> NutrientProfile {
        NutrientProfile {
            dry_matter: 88.0,
            crude_protein: 19.15,
            metabolizable_energy: 3150.0,
            calcium: 0.5,
            phosphorus: 0.376,
            ..NutrientProfile::zero()
        }
    }

    #[test]
    fn test_all_minimums_met_is_satisfied() {
        let result = compare(&meets_everything(), &standard());
        assert_eq!(result.overall_status, ComplianceStatus::Satisfied);
        assert_eq!(result.checks.len(), 5);
        assert!(result.checks.iter().all(|c| c.met));
        assert_eq!(result.check("crude_protein").unwrap().gap, 6.15);
    }

    #[test]
    fn test_any_single_shortfall_flips_verdict() {
        let setters: [fn(&mut NutrientProfile); 5] = [
            |p| p.dry_matter = 6.0,
            |p| p.crude_protein = 12.99,
            |p| p.metabolizable_energy = 2399.9,
            |p| p.calcium = 0.449,
            |p| p.phosphorus = 0.2,
        ];

        for set in setters {
            let mut profile = meets_everything();
            set(&mut profile);
            let result = compare(&profile, &standard());
            assert_eq!(result.overall_status, ComplianceStatus::NotSatisfied);
            assert_eq!(result.checks.iter().filter(|c| !c.met).count(), 1);
        }
    }

    #[test]
    fn test_exact_requirement_counts_as_met() {
        let profile = NutrientProfile {
            dry_matter: 6.5,
            crude_protein: 13.0,
            metabolizable_energy: 2400.0,
            calcium: 0.45,
            phosphorus: 0.25,
            ..NutrientProfile::zero()
        };
        let result = compare(&profile, &standard());
        assert!(result.is_satisfied());
        assert_eq!(result.check("calcium").unwrap().gap, 0.0);
    }

    #[test]
    fn test_surplus_is_never_flagged() {
        let mut profile = meets_everything();
        profile.calcium = 12.0;
        assert!(compare(&profile, &standard()).is_satisfied());
    }
}
