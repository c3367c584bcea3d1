//! Weighted ration formulation
//!
//! Pure arithmetic over already-resolved ingredients. Percentages are caller
//! asserted and must sum to 100; they are never normalized.

use serde::{Deserialize, Serialize};

use super::compare::{compare, StandardComparison};
use super::error::{FormulationResult, RationError};
use super::rounding::{round_to, CURRENCY_DP};
use crate::models::{Ingredient, NutrientProfile, NutrientStandard};

/// Allowed distance of the percentage total from 100
pub const SUM_TOLERANCE: f64 = 0.01;

/// Absorbs binary representation error in the total, so that a sum landing
/// exactly on 100 ± SUM_TOLERANCE in decimal is accepted
const SUM_EPSILON: f64 = 1e-9;

/// One line of a ration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RationItem {
    pub ingredient_id: String,
    pub percentage: f64,
}

impl RationItem {
    pub fn new(ingredient_id: impl Into<String>, percentage: f64) -> Self {
        Self {
            ingredient_id: ingredient_id.into(),
            percentage,
        }
    }
}

/// A request line whose ingredient has been looked up
#[derive(Debug, Clone, Copy)]
pub struct ResolvedLine<'a> {
    pub ingredient: &'a Ingredient,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngredientContribution {
    pub ingredient_id: String,
    pub name: String,
    pub percentage: f64,
    pub nutrients: NutrientProfile,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RationCost {
    pub cost_per_kg_ration: f64,
    pub cost_per_100kg: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RationResult {
    pub contributions: Vec<IngredientContribution>,
    pub aggregate: NutrientProfile,
    pub cost: RationCost,
    pub standard_comparison: Option<StandardComparison>,
}

/// Check a list of percentages and return their total
pub fn validate_percentages<I>(percentages: I) -> FormulationResult<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut count = 0usize;
    let mut total = 0.0;
    for percentage in percentages {
        if !percentage.is_finite() || percentage < 0.0 {
            return Err(RationError::InvalidInput(format!(
                "percentage must be a non-negative number, got {}",
                percentage
            )));
        }
        total += percentage;
        count += 1;
    }

    if count == 0 {
        return Err(RationError::InvalidInput(
            "at least one ingredient required".to_string(),
        ));
    }

    if (total - 100.0).abs() > SUM_TOLERANCE + SUM_EPSILON {
        return Err(RationError::InvalidInput(format!(
            "ingredient percentages must total 100 (±{}), got {}",
            SUM_TOLERANCE,
            round_to(total, 4)
        )));
    }

    Ok(total)
}

/// Blend resolved ingredients and optionally grade the blend against a standard
pub fn formulate(
    lines: &[ResolvedLine<'_>],
    standard: Option<&NutrientStandard>,
) -> FormulationResult<RationResult> {
    validate_percentages(lines.iter().map(|l| l.percentage))?;

    let mut weighted = Vec::with_capacity(lines.len());
    let mut cost = 0.0;
    let mut contributions = Vec::with_capacity(lines.len());

    for line in lines {
        let nutrients = line.ingredient.nutrients.weighted(line.percentage);
        let line_cost = line.ingredient.price_per_kg * line.percentage / 100.0;
        cost += line_cost;

        contributions.push(IngredientContribution {
            ingredient_id: line.ingredient.id.clone(),
            name: line.ingredient.name.clone(),
            percentage: line.percentage,
            nutrients: nutrients.rounded(),
            cost: round_to(line_cost, CURRENCY_DP),
        });
        weighted.push(nutrients);
    }

    let aggregate: NutrientProfile = weighted.into_iter().sum();
    let aggregate = aggregate.rounded();
    let cost_per_kg_ration = round_to(cost, CURRENCY_DP);
    let standard_comparison = standard.map(|s| compare(&aggregate, s));

    Ok(RationResult {
        contributions,
        aggregate,
        cost: RationCost {
            cost_per_kg_ration,
            cost_per_100kg: cost_per_kg_ration * 100.0,
        },
        standard_comparison,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Scope, WeightCategory};

    pub(crate) fn ingredient(id: &str, protein: f64, energy: f64, price: f64) -> Ingredient {
        Ingredient {
            id: id.to_string(),
            name: id.to_string(),
            scope: Scope::Global,
            nutrients: NutrientProfile {
                dry_matter: 88.0,
                crude_protein: protein,
                metabolizable_energy: energy,
                calcium: 0.1,
                phosphorus: 0.3,
                ..NutrientProfile::zero()
            },
            price_per_kg: price,
            stock: 0.0,
            category: WeightCategory::Heavy,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn line(ingredient: &Ingredient, percentage: f64) -> ResolvedLine<'_> {
        ResolvedLine {
            ingredient,
            percentage,
        }
    }

    #[test]
    fn test_corn_soybean_meal_blend() {
        let corn = ingredient("C", 8.5, 3300.0, 6500.0);
        let sbm = ingredient("S", 44.0, 2800.0, 10500.0);

        let result = formulate(&[line(&corn, 70.0), line(&sbm, 30.0)], None).unwrap();

        assert_eq!(result.aggregate.crude_protein, 19.15);
        assert_eq!(result.aggregate.metabolizable_energy, 3150.0);
        assert_eq!(result.cost.cost_per_kg_ration, 7700.0);
        assert_eq!(result.cost.cost_per_100kg, 770000.0);
        assert!(result.standard_comparison.is_none());

        assert_eq!(result.contributions.len(), 2);
        assert_eq!(result.contributions[0].nutrients.crude_protein, 5.95);
        assert_eq!(result.contributions[0].cost, 4550.0);
        assert_eq!(result.contributions[1].nutrients.crude_protein, 13.2);
        assert_eq!(result.contributions[1].cost, 3150.0);
    }

    #[test]
    fn test_two_ingredient_protein_weighting() {
        let a = ingredient("A", 44.0, 0.0, 0.0);
        let b = ingredient("B", 9.0, 0.0, 0.0);

        for p in [0.0, 12.5, 25.0, 50.0, 62.5, 90.0, 100.0] {
            let result = formulate(&[line(&a, p), line(&b, 100.0 - p)], None).unwrap();
            let expected = round_to(44.0 * p / 100.0 + 9.0 * (100.0 - p) / 100.0, 2);
            assert_eq!(result.aggregate.crude_protein, expected, "p = {}", p);
        }
    }

    #[test]
    fn test_protein_weighting_on_hundredth_steps() {
        let a = ingredient("A", 44.0, 0.0, 0.0);
        let b = ingredient("B", 9.0, 0.0, 0.0);

        for step in 0..=10_000u32 {
            let p = step as f64 / 100.0;
            let q = 100.0 - p;
            let result = formulate(&[line(&a, p), line(&b, q)], None).unwrap();
            let expected = round_to(44.0 * p / 100.0 + 9.0 * q / 100.0, 2);
            assert_eq!(result.aggregate.crude_protein, expected, "p = {}", p);
        }

        // 44 * 1.3 / 100 + 9 * 98.7 / 100 lands on the 9.455 tie
        let result = formulate(&[line(&a, 1.3), line(&b, 98.7)], None).unwrap();
        assert_eq!(result.aggregate.crude_protein, 9.46);
    }

    #[test]
    fn test_cost_per_100kg_is_exact_multiple() {
        let a = ingredient("A", 10.0, 0.0, 3333.0);
        let b = ingredient("B", 10.0, 0.0, 1234.0);
        let c = ingredient("C", 10.0, 0.0, 777.0);

        let result =
            formulate(&[line(&a, 33.33), line(&b, 33.33), line(&c, 33.34)], None).unwrap();
        assert_eq!(result.cost.cost_per_100kg, result.cost.cost_per_kg_ration * 100.0);
        assert_eq!(result.cost.cost_per_kg_ration.fract(), 0.0);
    }

    #[test]
    fn test_sum_within_tolerance_is_accepted() {
        let a = ingredient("A", 10.0, 0.0, 0.0);
        let b = ingredient("B", 20.0, 0.0, 0.0);
        assert!(formulate(&[line(&a, 60.005), line(&b, 40.0)], None).is_ok());
        assert!(formulate(&[line(&a, 59.995), line(&b, 40.0)], None).is_ok());
    }

    #[test]
    fn test_sum_exactly_on_tolerance_edge_is_accepted() {
        assert_eq!(validate_percentages([100.01]).unwrap(), 100.01);
        assert_eq!(validate_percentages([99.99]).unwrap(), 99.99);
        assert!(validate_percentages([33.33, 33.33, 33.33]).is_ok());
        assert!(validate_percentages([60.01, 40.0]).is_ok());

        assert!(validate_percentages([100.011]).is_err());
        assert!(validate_percentages([99.989]).is_err());
        assert!(validate_percentages([33.33, 33.33, 33.32]).is_err());
    }

    #[test]
    fn test_sum_outside_tolerance_is_rejected_not_normalized() {
        let a = ingredient("A", 10.0, 0.0, 0.0);
        let b = ingredient("B", 20.0, 0.0, 0.0);

        let err = formulate(&[line(&a, 60.0), line(&b, 30.0)], None).unwrap_err();
        match err {
            RationError::InvalidInput(msg) => assert!(msg.contains("90"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }

        let err = formulate(&[line(&a, 60.02), line(&b, 40.0)], None).unwrap_err();
        assert!(matches!(err, RationError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_request_is_rejected() {
        let err = formulate(&[], None).unwrap_err();
        match err {
            RationError::InvalidInput(msg) => assert!(msg.contains("at least one ingredient")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_negative_percentage_is_rejected() {
        let a = ingredient("A", 10.0, 0.0, 0.0);
        let b = ingredient("B", 20.0, 0.0, 0.0);
        let err = formulate(&[line(&a, 110.0), line(&b, -10.0)], None).unwrap_err();
        assert!(matches!(err, RationError::InvalidInput(_)));

        let err = validate_percentages([f64::NAN, 100.0]).unwrap_err();
        assert!(matches!(err, RationError::InvalidInput(_)));
    }

    #[test]
    fn test_optional_fields_unknown_when_any_line_lacks_them() {
        let mut a = ingredient("A", 10.0, 0.0, 0.0);
        a.nutrients.tdn = Some(80.0);
        a.nutrients.ndf = Some(20.0);
        let mut b = ingredient("B", 20.0, 0.0, 0.0);
        b.nutrients.tdn = Some(60.0);
        b.nutrients.ndf = None;

        let result = formulate(&[line(&a, 50.0), line(&b, 50.0)], None).unwrap();
        assert_eq!(result.aggregate.tdn, Some(70.0));
        assert_eq!(result.aggregate.ndf, None);
    }

    #[test]
    fn test_standard_comparison_attached() {
        let corn = ingredient("C", 8.5, 3300.0, 6500.0);
        let sbm = ingredient("S", 44.0, 2800.0, 10500.0);
        let standard = NutrientStandard {
            id: "std".to_string(),
            species: "POULTRY".to_string(),
            stage: "GROWTH".to_string(),
            weight_range: "0.1-1.0".to_string(),
            req_dry_matter: 0.0,
            req_crude_protein: 21.0,
            req_energy: 3100.0,
            req_calcium: 0.1,
            req_phosphorus: 0.3,
        };

        let result = formulate(&[line(&corn, 70.0), line(&sbm, 30.0)], Some(&standard)).unwrap();
        let comparison = result.standard_comparison.unwrap();
        assert!(!comparison.is_satisfied());
        let protein = comparison.check("crude_protein").unwrap();
        assert!(!protein.met);
        assert_eq!(protein.gap, -1.85);
        assert!(comparison.check("metabolizable_energy").unwrap().met);
    }
}
