//! # Sizing & Quote Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> *Result` - Pure calculation function
//!
//! The estimators are deliberately infallible: unknown coefficient tiers
//! fall back to neutral defaults and empty dimensions yield zero power.
//! Validation belongs to the draft finalization flow, not here.
//!
//! ## Available Calculations
//!
//! - [`air_to_water`] - Air-to-water heat pump load and SCOP estimate
//! - [`air_to_air`] - Air-to-air cooling/heating load (two strategies)
//! - [`covering`] - Floor/wall tiling quantities with waste allowance
//! - [`quote`] - Labor + material HT/TTC totalization

pub mod air_to_air;
pub mod air_to_water;
pub mod covering;
pub mod quote;

use serde::{Deserialize, Serialize};

pub use air_to_air::{AirToAirInput, AirToAirResult, SizingStrategy};
pub use air_to_water::{AirToWaterInput, AirToWaterResult};
pub use covering::{CoveringEstimate, CoveringSpec, RoomDimensions};
pub use quote::QuoteTotals;

/// Equivalent full-load heating hours per year (air/water consumption estimate)
const FULL_LOAD_HEATING_HOURS: f64 = 2000.0;

/// Equivalent full-load cooling hours per year (air/air consumption estimate)
const COOLING_HOURS: f64 = 500.0;

/// Equivalent full-load heating hours per year for air/air systems
const AIR_TO_AIR_HEATING_HOURS: f64 = 1500.0;

/// Assumed seasonal efficiency of an air-to-air installation
const AIR_TO_AIR_SCOP: f64 = 4.2;

/// Conservative SCOP reported when no sizing data is available
const FALLBACK_SCOP: f64 = 3.5;

/// Installed cost estimate in € per watt of required power
const INSTALL_COST_EUR_PER_W: f64 = 8.0;

/// Flat annual-savings estimate in € against the replaced fuel
const ANNUAL_SAVINGS_EUR: f64 = 800.0;

/// Flat payback estimate in years
const PAYBACK_YEARS: f64 = 8.0;

/// Supplementary works recommended with every installation
pub const RECOMMENDED_WORKS: [&str; 3] = [
    "Vérification isolation toiture",
    "Optimisation régulation",
    "Calorifugeage tuyauteries",
];

/// Options recommended with every installation
pub const RECOMMENDED_OPTIONS: [&str; 3] = [
    "Régulation connectée",
    "Appoint électrique",
    "Monitoring consommation",
];

/// Heat pump family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacKind {
    #[serde(rename = "Air_Eau")]
    AirToWater,
    #[serde(rename = "Air_Air")]
    AirToAir,
}

impl PacKind {
    /// Get display name (e.g., "Air/Eau")
    pub fn display_name(&self) -> &'static str {
        match self {
            PacKind::AirToWater => "Air/Eau",
            PacKind::AirToAir => "Air/Air",
        }
    }
}

impl std::fmt::Display for PacKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Sizing summary and economics attached to a finalized PAC study.
///
/// ## JSON Example
///
/// ```json
/// {
///   "required_power_w": 8640,
///   "recommended_model": "PAC Air/Eau 9kW",
///   "scop": 3.8,
///   "annual_consumption_kwh": 4547368,
///   "annual_savings_eur": 800.0,
///   "install_cost_eur": 69120.0,
///   "payback_years": 8.0,
///   "recommended_works": ["Vérification isolation toiture"],
///   "recommended_options": ["Régulation connectée"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    /// Required power in watts
    pub required_power_w: u32,

    /// Recommended model label (e.g., "PAC Air/Eau 9kW")
    pub recommended_model: String,

    /// Estimated seasonal efficiency
    pub scop: f64,

    /// Estimated annual electrical consumption in kWh
    pub annual_consumption_kwh: u32,

    /// Estimated annual savings in €
    pub annual_savings_eur: f64,

    /// Estimated installed cost in €
    pub install_cost_eur: f64,

    /// Estimated payback period in years
    pub payback_years: f64,

    /// Recommended supplementary works
    pub recommended_works: Vec<String>,

    /// Recommended options
    pub recommended_options: Vec<String>,
}

impl SizingResult {
    /// Build the summary for an air-to-water study
    pub fn from_air_to_water(result: &AirToWaterResult) -> Self {
        let power = result.power_w;
        let consumption =
            (f64::from(power) * FULL_LOAD_HEATING_HOURS / result.scop).round() as u32;
        Self::with_economics(PacKind::AirToWater, power, result.scop, consumption)
    }

    /// Build the summary for an air-to-air study
    pub fn from_air_to_air(result: &AirToAirResult) -> Self {
        let power = result.cooling_w.max(result.heating_w);
        let consumption = ((f64::from(result.cooling_w) * COOLING_HOURS
            + f64::from(result.heating_w) * AIR_TO_AIR_HEATING_HOURS)
            / AIR_TO_AIR_SCOP)
            .round() as u32;
        Self::with_economics(PacKind::AirToAir, power, AIR_TO_AIR_SCOP, consumption)
    }

    /// Summary when no sizing data is available yet (draft studies)
    pub fn empty(kind: PacKind) -> Self {
        Self::with_economics(kind, 0, FALLBACK_SCOP, 0)
    }

    fn with_economics(kind: PacKind, power_w: u32, scop: f64, consumption_kwh: u32) -> Self {
        let kw = (f64::from(power_w) / 1000.0).round() as u32;
        SizingResult {
            required_power_w: power_w,
            recommended_model: format!("PAC {} {}kW", kind.display_name(), kw),
            scop,
            annual_consumption_kwh: consumption_kwh,
            annual_savings_eur: ANNUAL_SAVINGS_EUR,
            install_cost_eur: f64::from(power_w) * INSTALL_COST_EUR_PER_W,
            payback_years: PAYBACK_YEARS,
            recommended_works: RECOMMENDED_WORKS.iter().map(|s| s.to_string()).collect(),
            recommended_options: RECOMMENDED_OPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::air_to_air::SizingStrategy;

    #[test]
    fn test_air_to_water_summary() {
        let result = AirToWaterResult {
            power_w: 8640,
            scop: 3.8,
        };
        let summary = SizingResult::from_air_to_water(&result);
        assert_eq!(summary.required_power_w, 8640);
        assert_eq!(summary.recommended_model, "PAC Air/Eau 9kW");
        // round(8640 * 2000 / 3.8)
        assert_eq!(summary.annual_consumption_kwh, 4547368);
        assert_eq!(summary.install_cost_eur, 69120.0);
    }

    #[test]
    fn test_air_to_air_summary_takes_max_power() {
        let result = AirToAirResult {
            strategy: SizingStrategy::PerRoom,
            cooling_w: 12000,
            heating_w: 10500,
            zones: Vec::new(),
        };
        let summary = SizingResult::from_air_to_air(&result);
        assert_eq!(summary.required_power_w, 12000);
        assert_eq!(summary.scop, 4.2);
        // round((12000*500 + 10500*1500)/4.2)
        assert_eq!(summary.annual_consumption_kwh, 5178571);
        assert_eq!(summary.recommended_model, "PAC Air/Air 12kW");
    }

    #[test]
    fn test_empty_summary() {
        let summary = SizingResult::empty(PacKind::AirToWater);
        assert_eq!(summary.required_power_w, 0);
        assert_eq!(summary.scop, 3.5);
        assert_eq!(summary.annual_consumption_kwh, 0);
        assert_eq!(summary.recommended_model, "PAC Air/Eau 0kW");
    }

    #[test]
    fn test_recommendations_attached() {
        let summary = SizingResult::empty(PacKind::AirToAir);
        assert_eq!(summary.recommended_works.len(), 3);
        assert_eq!(summary.recommended_options.len(), 3);
    }

    #[test]
    fn test_pac_kind_wire_codes() {
        assert_eq!(
            serde_json::to_string(&PacKind::AirToWater).unwrap(),
            "\"Air_Eau\""
        );
        assert_eq!(PacKind::AirToAir.to_string(), "Air/Air");
    }
}
