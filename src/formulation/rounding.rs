//! Reporting precision for ration outputs

/// Percent nutrients (DM, CP, CF, fat, ash, TDN, NDF)
pub const PERCENT_DP: u32 = 2;
/// Metabolizable energy, kcal/kg
pub const ENERGY_DP: u32 = 1;
/// Calcium and phosphorus
pub const MINERAL_DP: u32 = 3;
/// Money is reported in whole currency units
pub const CURRENCY_DP: u32 = 0;

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(19.154, PERCENT_DP), 19.15);
        assert_eq!(round_to(3149.96, ENERGY_DP), 3150.0);
        assert_eq!(round_to(0.26451, MINERAL_DP), 0.265);
        assert_eq!(round_to(7699.999999, CURRENCY_DP), 7700.0);
        assert_eq!(round_to(-1.005, 0), -1.0);
    }
}
