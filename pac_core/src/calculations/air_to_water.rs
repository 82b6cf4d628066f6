//! # Air-to-Water Heat Pump Sizing
//!
//! Estimates the required heating power and seasonal efficiency for an
//! air-to-water heat pump from a building profile.
//!
//! ## Method
//!
//! The load estimate scales a 60 W/m² baseline by the wall insulation and
//! glazing coefficients, normalized against a 27 °C reference delta-T:
//!
//! ```text
//! P = surface * 60 * C_insulation * C_glazing * (deltaT / 27)
//! ```
//!
//! The SCOP is a fixed lookup on the existing emitter type (underfloor
//! heating runs at low flow temperature, hence 4.5 vs 3.8).
//!
//! ## Example
//!
//! ```rust
//! use pac_core::calculations::air_to_water::{AirToWaterInput, calculate};
//! use pac_core::coefficients::{WallInsulation, Glazing};
//!
//! let input = AirToWaterInput {
//!     surface_m2: 20.0,
//!     wall_insulation: WallInsulation::Insulated,
//!     glazing: Glazing::Double,
//!     base_temperature_c: 20.0,
//!     min_outdoor_temperature_c: -7.0,
//!     ..AirToWaterInput::default()
//! };
//!
//! let result = calculate(&input);
//! assert_eq!(result.power_w, 1200);
//! assert_eq!(result.scop, 3.8);
//! ```

use serde::{Deserialize, Serialize};

use crate::coefficients::{Emitter, Glazing, WallInsulation};

/// Baseline heating load in W per m² of heated surface
const BASE_LOAD_W_PER_M2: f64 = 60.0;

/// Reference delta-T (°C) the baseline load is normalized against
const REFERENCE_DELTA_T_C: f64 = 27.0;

/// Wall construction material (informational, no load coefficient)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallMaterial {
    #[serde(rename = "Brique")]
    Brick,
    #[serde(rename = "Parpaing")]
    ConcreteBlock,
    #[serde(rename = "Beton")]
    Concrete,
    #[serde(rename = "Pierre")]
    Stone,
}

impl Default for WallMaterial {
    fn default() -> Self {
        WallMaterial::ConcreteBlock
    }
}

/// Window condition (informational)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowCondition {
    #[serde(rename = "Tres_bon")]
    VeryGood,
    #[serde(rename = "Bon")]
    Good,
    #[serde(rename = "Moyen")]
    Fair,
    #[serde(rename = "Mauvais")]
    Poor,
}

impl Default for WindowCondition {
    fn default() -> Self {
        WindowCondition::Good
    }
}

/// Roof insulation tier (informational, carried through to the report)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoofInsulation {
    #[serde(rename = "Bien_isoles")]
    WellInsulated,
    #[serde(rename = "Isoles")]
    Insulated,
    #[serde(rename = "Peu_isoles")]
    PoorlyInsulated,
    #[serde(rename = "Pas_isoles")]
    Uninsulated,
}

impl Default for RoofInsulation {
    fn default() -> Self {
        RoofInsulation::Insulated
    }
}

/// What sits under the ground floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasementType {
    #[serde(rename = "Cave")]
    Cellar,
    #[serde(rename = "Vide_sanitaire")]
    CrawlSpace,
    #[serde(rename = "Terre_plein")]
    SlabOnGrade,
    #[serde(rename = "Sous_sol_chauffe")]
    HeatedBasement,
}

impl Default for BasementType {
    fn default() -> Self {
        BasementType::CrawlSpace
    }
}

/// Current heating fuel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fuel {
    #[serde(rename = "Gaz")]
    Gas,
    #[serde(rename = "Fioul")]
    Oil,
    #[serde(rename = "Electrique")]
    Electric,
    #[serde(rename = "Bois")]
    Wood,
}

impl Default for Fuel {
    fn default() -> Self {
        Fuel::Gas
    }
}

/// Current annual energy consumption of the dwelling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConsumption {
    pub fuel: Fuel,
    /// Annual quantity in `unit`
    pub annual_quantity: f64,
    /// Billing unit (e.g., "kWh", "m³", "L", "kg")
    pub unit: String,
    /// Annual bill in euros
    pub annual_cost_eur: f64,
}

impl Default for CurrentConsumption {
    fn default() -> Self {
        CurrentConsumption {
            fuel: Fuel::Gas,
            annual_quantity: 0.0,
            unit: "m³".to_string(),
            annual_cost_eur: 0.0,
        }
    }
}

/// Domestic hot water configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomesticHotWater {
    /// DHW produced by the heat pump
    pub integrated: bool,
    /// Tank volume in liters (when integrated)
    pub tank_volume_l: f64,
    /// Number of occupants the tank is sized for
    pub occupants: u32,
}

impl Default for DomesticHotWater {
    fn default() -> Self {
        DomesticHotWater {
            integrated: false,
            tank_volume_l: 0.0,
            occupants: 0,
        }
    }
}

/// Building profile for the air-to-water sizing path.
///
/// Only `surface_m2`, the insulation/glazing tiers, the two temperatures and
/// the emitter type enter the power formula; the remaining fields describe
/// the building and installation for the study report.
///
/// ## JSON Example
///
/// ```json
/// {
///   "surface_m2": 120.0,
///   "construction_year": 1998,
///   "ceiling_height_m": 2.5,
///   "wall_insulation": "Bien_isoles",
///   "insulation_thickness_cm": 10.0,
///   "wall_material": "Parpaing",
///   "glazing": "Double",
///   "window_condition": "Bon",
///   "glazed_surface_m2": 18.0,
///   "roof_insulation": "Isoles",
///   "roof_insulation_thickness_cm": 20.0,
///   "ground_floor_insulated": false,
///   "basement": "Vide_sanitaire",
///   "consumption": { "fuel": "Gaz", "annual_quantity": 1400.0, "unit": "m³", "annual_cost_eur": 1650.0 },
///   "emitter": "Radiateurs",
///   "flow_temperature_c": 65.0,
///   "circuit_count": 1,
///   "existing_regulation": false,
///   "dhw": { "integrated": true, "tank_volume_l": 200.0, "occupants": 4 },
///   "base_temperature_c": 20.0,
///   "min_outdoor_temperature_c": -7.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirToWaterInput {
    /// Heated surface in m². Zero or unset yields a zero-power result.
    pub surface_m2: f64,

    /// Year of construction
    pub construction_year: u32,

    /// Ceiling height in meters
    pub ceiling_height_m: f64,

    /// Wall insulation tier (enters the power formula)
    pub wall_insulation: WallInsulation,

    /// Wall insulation thickness in cm
    pub insulation_thickness_cm: f64,

    /// Wall construction material
    pub wall_material: WallMaterial,

    /// Window glazing tier (enters the power formula)
    pub glazing: Glazing,

    /// Window condition
    pub window_condition: WindowCondition,

    /// Total glazed surface in m²
    pub glazed_surface_m2: f64,

    /// Roof insulation tier
    pub roof_insulation: RoofInsulation,

    /// Roof insulation thickness in cm
    pub roof_insulation_thickness_cm: f64,

    /// Ground floor insulated
    pub ground_floor_insulated: bool,

    /// What sits under the ground floor
    pub basement: BasementType,

    /// Current fuel and consumption
    pub consumption: CurrentConsumption,

    /// Existing emitter type (determines the SCOP estimate)
    pub emitter: Emitter,

    /// Heating flow temperature in °C
    pub flow_temperature_c: f64,

    /// Number of heating circuits
    pub circuit_count: u32,

    /// Existing regulation present
    pub existing_regulation: bool,

    /// Domestic hot water configuration
    pub dhw: DomesticHotWater,

    /// Target indoor (base) temperature in °C
    pub base_temperature_c: f64,

    /// Minimum design outdoor temperature in °C
    pub min_outdoor_temperature_c: f64,
}

impl Default for AirToWaterInput {
    fn default() -> Self {
        AirToWaterInput {
            surface_m2: 0.0,
            construction_year: 0,
            ceiling_height_m: 2.5,
            wall_insulation: WallInsulation::default(),
            insulation_thickness_cm: 0.0,
            wall_material: WallMaterial::default(),
            glazing: Glazing::default(),
            window_condition: WindowCondition::default(),
            glazed_surface_m2: 0.0,
            roof_insulation: RoofInsulation::default(),
            roof_insulation_thickness_cm: 0.0,
            ground_floor_insulated: false,
            basement: BasementType::default(),
            consumption: CurrentConsumption::default(),
            emitter: Emitter::default(),
            flow_temperature_c: 65.0,
            circuit_count: 1,
            existing_regulation: false,
            dhw: DomesticHotWater::default(),
            base_temperature_c: 20.0,
            min_outdoor_temperature_c: -7.0,
        }
    }
}

impl AirToWaterInput {
    /// Design delta-T: base indoor minus minimum design outdoor temperature
    pub fn delta_t_c(&self) -> f64 {
        self.base_temperature_c - self.min_outdoor_temperature_c
    }
}

/// Results of the air-to-water load estimate.
///
/// ## JSON Example
///
/// ```json
/// { "power_w": 8640, "scop": 3.8 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirToWaterResult {
    /// Required heating power in watts (rounded, non-negative)
    pub power_w: u32,

    /// Estimated seasonal coefficient of performance
    pub scop: f64,
}

/// Estimate the required heating power and SCOP for an air-to-water
/// heat pump.
///
/// Pure function: zero surface yields zero power, unknown tiers have
/// already been absorbed by the coefficient defaults, nothing fails.
pub fn calculate(input: &AirToWaterInput) -> AirToWaterResult {
    let c_insulation = input.wall_insulation.coefficient();
    let c_glazing = input.glazing.coefficient();
    let delta_ratio = input.delta_t_c() / REFERENCE_DELTA_T_C;

    let power = input.surface_m2 * BASE_LOAD_W_PER_M2 * c_insulation * c_glazing * delta_ratio;

    AirToWaterResult {
        // saturating float-to-int cast clamps negative products to 0
        power_w: power.round() as u32,
        scop: input.emitter.seasonal_cop(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_input() -> AirToWaterInput {
        AirToWaterInput {
            surface_m2: 20.0,
            wall_insulation: WallInsulation::Insulated,
            glazing: Glazing::Double,
            base_temperature_c: 20.0,
            min_outdoor_temperature_c: -7.0,
            ..AirToWaterInput::default()
        }
    }

    #[test]
    fn test_reference_case() {
        // 20 m², neutral coefficients, deltaT = 27 -> 20 * 60 * 1.0 = 1200 W
        let result = calculate(&reference_input());
        assert_eq!(result.power_w, 1200);
    }

    #[test]
    fn test_delta_t() {
        let input = reference_input();
        assert!((input.delta_t_c() - 27.0).abs() < 1e-9);
    }

    #[test]
    fn test_power_monotonic_in_insulation() {
        let mut previous = 0;
        for tier in WallInsulation::ALL {
            let input = AirToWaterInput {
                wall_insulation: tier,
                ..reference_input()
            };
            let power = calculate(&input).power_w;
            assert!(power >= previous, "power decreased for worse insulation");
            previous = power;
        }
    }

    #[test]
    fn test_glazing_coefficient_applied() {
        let single = AirToWaterInput {
            glazing: Glazing::Single,
            ..reference_input()
        };
        let triple = AirToWaterInput {
            glazing: Glazing::Triple,
            ..reference_input()
        };
        // 1200 * 1.3 and 1200 * 0.8
        assert_eq!(calculate(&single).power_w, 1560);
        assert_eq!(calculate(&triple).power_w, 960);
    }

    #[test]
    fn test_zero_surface_gives_zero_power() {
        let input = AirToWaterInput {
            surface_m2: 0.0,
            ..reference_input()
        };
        assert_eq!(calculate(&input).power_w, 0);
    }

    #[test]
    fn test_scop_follows_emitter() {
        let underfloor = AirToWaterInput {
            emitter: Emitter::UnderfloorHeating,
            ..reference_input()
        };
        assert_eq!(calculate(&underfloor).scop, 4.5);
        assert_eq!(calculate(&reference_input()).scop, 3.8);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let input = reference_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("\"Isoles\""));
        assert!(json.contains("\"Double\""));
        let roundtrip: AirToWaterInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
