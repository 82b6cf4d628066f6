//! # Coefficient Tables
//!
//! Every multiplicative coefficient used by the thermal load estimators,
//! encapsulated as an enumerated type with a pure lookup method and an
//! explicit default. Call sites never embed conditionals on tier values;
//! adding a tier means touching only this module.
//!
//! Wire codes match the historical study files (French trade vocabulary),
//! so existing stored studies deserialize unchanged.
//!
//! ## Example
//!
//! ```rust
//! use pac_core::coefficients::{WallInsulation, Glazing};
//!
//! assert_eq!(WallInsulation::Ite.coefficient(), 0.6);
//! assert_eq!(Glazing::default().coefficient(), 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Wall insulation (air/water path)
// ============================================================================

/// Wall insulation tier for the air-to-water load estimate.
///
/// Coefficients scale the 60 W/m² baseline load: better insulation,
/// lower coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallInsulation {
    /// External thermal insulation (ITE)
    #[serde(rename = "ITE")]
    Ite,
    /// Well insulated (~10cm)
    #[serde(rename = "Bien_isoles")]
    WellInsulated,
    /// Insulated (~5cm)
    #[serde(rename = "Isoles")]
    Insulated,
    /// No insulation
    #[serde(rename = "Pas_isoles")]
    Uninsulated,
}

impl WallInsulation {
    /// All tiers for UI selection, best to worst
    pub const ALL: [WallInsulation; 4] = [
        WallInsulation::Ite,
        WallInsulation::WellInsulated,
        WallInsulation::Insulated,
        WallInsulation::Uninsulated,
    ];

    /// Load coefficient for this tier
    pub fn coefficient(&self) -> f64 {
        match self {
            WallInsulation::Ite => 0.6,
            WallInsulation::WellInsulated => 0.8,
            WallInsulation::Insulated => 1.0,
            WallInsulation::Uninsulated => 1.4,
        }
    }

    /// Get the wire code (e.g., "ITE", "Bien_isoles")
    pub fn code(&self) -> &'static str {
        match self {
            WallInsulation::Ite => "ITE",
            WallInsulation::WellInsulated => "Bien_isoles",
            WallInsulation::Insulated => "Isoles",
            WallInsulation::Uninsulated => "Pas_isoles",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            WallInsulation::Ite => "ITE (Isolation Thermique Extérieure)",
            WallInsulation::WellInsulated => "Bien isolés (10cm)",
            WallInsulation::Insulated => "Isolés (5cm)",
            WallInsulation::Uninsulated => "Pas isolés",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_uppercase().replace([' ', '-'], "_").as_str() {
            "ITE" => Ok(WallInsulation::Ite),
            "BIEN_ISOLES" => Ok(WallInsulation::WellInsulated),
            "ISOLES" => Ok(WallInsulation::Insulated),
            "PAS_ISOLES" => Ok(WallInsulation::Uninsulated),
            _ => Err(CalcError::invalid_input(
                "wall_insulation",
                s,
                "Unknown insulation tier",
            )),
        }
    }
}

impl Default for WallInsulation {
    /// Unknown/missing tier falls back to the neutral 1.0 coefficient
    fn default() -> Self {
        WallInsulation::Insulated
    }
}

impl std::fmt::Display for WallInsulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Window glazing (air/water path)
// ============================================================================

/// Window glazing tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Glazing {
    #[serde(rename = "Simple")]
    Single,
    #[serde(rename = "Double")]
    Double,
    #[serde(rename = "Triple")]
    Triple,
}

impl Glazing {
    /// All tiers for UI selection
    pub const ALL: [Glazing; 3] = [Glazing::Single, Glazing::Double, Glazing::Triple];

    /// Load coefficient for this tier
    pub fn coefficient(&self) -> f64 {
        match self {
            Glazing::Triple => 0.8,
            Glazing::Double => 1.0,
            Glazing::Single => 1.3,
        }
    }

    /// Get the wire code
    pub fn code(&self) -> &'static str {
        match self {
            Glazing::Single => "Simple",
            Glazing::Double => "Double",
            Glazing::Triple => "Triple",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Glazing::Single => "Simple vitrage",
            Glazing::Double => "Double vitrage",
            Glazing::Triple => "Triple vitrage",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().as_str() {
            "simple" | "single" => Ok(Glazing::Single),
            "double" => Ok(Glazing::Double),
            "triple" => Ok(Glazing::Triple),
            _ => Err(CalcError::invalid_input("glazing", s, "Unknown glazing tier")),
        }
    }
}

impl Default for Glazing {
    /// Unspecified glazing falls back to the neutral 1.0 coefficient
    fn default() -> Self {
        Glazing::Double
    }
}

impl std::fmt::Display for Glazing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Insulation level 1-5 (air/air path)
// ============================================================================

/// Five-level insulation scale used by the air-to-air estimators.
///
/// Serialized as the raw 1-5 level to match the historical study files.
/// Out-of-range levels clamp to the neutral middle level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum InsulationLevel {
    /// 1 - very poor
    VeryPoor,
    /// 2 - poor
    Poor,
    /// 3 - average
    Average,
    /// 4 - good
    Good,
    /// 5 - excellent
    Excellent,
}

impl InsulationLevel {
    /// All levels, worst to best
    pub const ALL: [InsulationLevel; 5] = [
        InsulationLevel::VeryPoor,
        InsulationLevel::Poor,
        InsulationLevel::Average,
        InsulationLevel::Good,
        InsulationLevel::Excellent,
    ];

    /// Numeric level (1-5)
    pub fn level(&self) -> u8 {
        match self {
            InsulationLevel::VeryPoor => 1,
            InsulationLevel::Poor => 2,
            InsulationLevel::Average => 3,
            InsulationLevel::Good => 4,
            InsulationLevel::Excellent => 5,
        }
    }

    /// Per-room/zone coefficient table (modern strategy)
    pub fn zone_coefficient(&self) -> f64 {
        const TABLE: [f64; 5] = [1.6, 1.3, 1.0, 0.8, 0.6];
        TABLE[(self.level() - 1) as usize]
    }

    /// Legacy whole-building coefficient table (aggregate strategy)
    pub fn aggregate_coefficient(&self) -> f64 {
        const TABLE: [f64; 5] = [1.4, 1.2, 1.0, 0.9, 0.8];
        TABLE[(self.level() - 1) as usize]
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            InsulationLevel::VeryPoor => "Très mauvais",
            InsulationLevel::Poor => "Mauvais",
            InsulationLevel::Average => "Moyen",
            InsulationLevel::Good => "Bon",
            InsulationLevel::Excellent => "Excellent",
        }
    }
}

impl From<u8> for InsulationLevel {
    fn from(level: u8) -> Self {
        match level {
            1 => InsulationLevel::VeryPoor,
            2 => InsulationLevel::Poor,
            4 => InsulationLevel::Good,
            5 => InsulationLevel::Excellent,
            _ => InsulationLevel::Average,
        }
    }
}

impl From<InsulationLevel> for u8 {
    fn from(l: InsulationLevel) -> Self {
        l.level()
    }
}

impl Default for InsulationLevel {
    fn default() -> Self {
        InsulationLevel::Average
    }
}

impl std::fmt::Display for InsulationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/5 ({})", self.level(), self.display_name())
    }
}

// ============================================================================
// Solar exposure (air/air path)
// ============================================================================

/// Main solar exposure of a room or building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exposure {
    #[serde(rename = "Nord")]
    North,
    #[serde(rename = "Sud")]
    South,
    #[serde(rename = "Est")]
    East,
    #[serde(rename = "Ouest")]
    West,
    #[serde(rename = "Sud_Est")]
    SouthEast,
    #[serde(rename = "Sud_Ouest")]
    SouthWest,
    /// Mixed/unknown exposure, neutral coefficient
    #[serde(rename = "Multiple")]
    Multiple,
}

impl Exposure {
    /// All exposures for UI selection
    pub const ALL: [Exposure; 7] = [
        Exposure::North,
        Exposure::South,
        Exposure::East,
        Exposure::West,
        Exposure::SouthEast,
        Exposure::SouthWest,
        Exposure::Multiple,
    ];

    /// Solar gain coefficient
    pub fn coefficient(&self) -> f64 {
        match self {
            Exposure::South => 1.2,
            Exposure::SouthEast | Exposure::SouthWest => 1.1,
            Exposure::East | Exposure::West => 1.0,
            Exposure::North => 0.9,
            Exposure::Multiple => 1.0,
        }
    }

    /// Get the wire code
    pub fn code(&self) -> &'static str {
        match self {
            Exposure::North => "Nord",
            Exposure::South => "Sud",
            Exposure::East => "Est",
            Exposure::West => "Ouest",
            Exposure::SouthEast => "Sud_Est",
            Exposure::SouthWest => "Sud_Ouest",
            Exposure::Multiple => "Multiple",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Exposure::North => "Nord",
            Exposure::South => "Sud",
            Exposure::East => "Est",
            Exposure::West => "Ouest",
            Exposure::SouthEast => "Sud-Est",
            Exposure::SouthWest => "Sud-Ouest",
            Exposure::Multiple => "Multiple",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_uppercase().replace([' ', '-'], "_").as_str() {
            "NORD" | "NORTH" => Ok(Exposure::North),
            "SUD" | "SOUTH" => Ok(Exposure::South),
            "EST" | "EAST" => Ok(Exposure::East),
            "OUEST" | "WEST" => Ok(Exposure::West),
            "SUD_EST" | "SOUTHEAST" => Ok(Exposure::SouthEast),
            "SUD_OUEST" | "SOUTHWEST" => Ok(Exposure::SouthWest),
            "MULTIPLE" => Ok(Exposure::Multiple),
            _ => Err(CalcError::invalid_input("exposure", s, "Unknown exposure")),
        }
    }
}

impl Default for Exposure {
    fn default() -> Self {
        Exposure::Multiple
    }
}

impl std::fmt::Display for Exposure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code().replace('_', "-"))
    }
}

// ============================================================================
// Heat emitters (air/water path)
// ============================================================================

/// Existing heat emitter type. Determines the seasonal efficiency estimate:
/// underfloor heating runs at low flow temperature, hence the higher SCOP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emitter {
    #[serde(rename = "Radiateurs")]
    Radiators,
    #[serde(rename = "Plancher_chauffant")]
    UnderfloorHeating,
    #[serde(rename = "Ventilo_convecteurs")]
    FanCoils,
}

impl Emitter {
    /// All emitter types for UI selection
    pub const ALL: [Emitter; 3] = [
        Emitter::Radiators,
        Emitter::UnderfloorHeating,
        Emitter::FanCoils,
    ];

    /// Estimated seasonal coefficient of performance (SCOP)
    pub fn seasonal_cop(&self) -> f64 {
        match self {
            Emitter::UnderfloorHeating => 4.5,
            Emitter::Radiators | Emitter::FanCoils => 3.8,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Emitter::Radiators => "Radiateurs",
            Emitter::UnderfloorHeating => "Plancher chauffant",
            Emitter::FanCoils => "Ventilo-convecteurs",
        }
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Emitter::Radiators
    }
}

impl std::fmt::Display for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_insulation_coefficients_ordered() {
        // Power must be non-decreasing as insulation worsens
        let coeffs: Vec<f64> = WallInsulation::ALL.iter().map(|t| t.coefficient()).collect();
        assert!(coeffs.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(coeffs, vec![0.6, 0.8, 1.0, 1.4]);
    }

    #[test]
    fn test_defaults_are_neutral() {
        assert_eq!(WallInsulation::default().coefficient(), 1.0);
        assert_eq!(Glazing::default().coefficient(), 1.0);
        assert_eq!(Exposure::default().coefficient(), 1.0);
        assert_eq!(InsulationLevel::default().zone_coefficient(), 1.0);
        assert_eq!(InsulationLevel::default().aggregate_coefficient(), 1.0);
    }

    #[test]
    fn test_insulation_level_tables() {
        assert_eq!(InsulationLevel::VeryPoor.zone_coefficient(), 1.6);
        assert_eq!(InsulationLevel::Excellent.zone_coefficient(), 0.6);
        assert_eq!(InsulationLevel::VeryPoor.aggregate_coefficient(), 1.4);
        assert_eq!(InsulationLevel::Excellent.aggregate_coefficient(), 0.8);
    }

    #[test]
    fn test_insulation_level_clamps_out_of_range() {
        assert_eq!(InsulationLevel::from(0), InsulationLevel::Average);
        assert_eq!(InsulationLevel::from(9), InsulationLevel::Average);
        assert_eq!(InsulationLevel::from(5), InsulationLevel::Excellent);
    }

    #[test]
    fn test_insulation_level_serde_as_number() {
        let json = serde_json::to_string(&InsulationLevel::Good).unwrap();
        assert_eq!(json, "4");
        let roundtrip: InsulationLevel = serde_json::from_str("2").unwrap();
        assert_eq!(roundtrip, InsulationLevel::Poor);
    }

    #[test]
    fn test_wire_codes_roundtrip() {
        let json = serde_json::to_string(&WallInsulation::WellInsulated).unwrap();
        assert_eq!(json, "\"Bien_isoles\"");
        let json = serde_json::to_string(&Exposure::SouthEast).unwrap();
        assert_eq!(json, "\"Sud_Est\"");
        let json = serde_json::to_string(&Emitter::UnderfloorHeating).unwrap();
        assert_eq!(json, "\"Plancher_chauffant\"");
    }

    #[test]
    fn test_from_str_flexible() {
        assert_eq!(
            WallInsulation::from_str_flexible("bien isoles").unwrap(),
            WallInsulation::WellInsulated
        );
        assert_eq!(
            Exposure::from_str_flexible("sud-est").unwrap(),
            Exposure::SouthEast
        );
        assert!(Glazing::from_str_flexible("quadruple").is_err());
    }

    #[test]
    fn test_emitter_scop() {
        assert_eq!(Emitter::UnderfloorHeating.seasonal_cop(), 4.5);
        assert_eq!(Emitter::Radiators.seasonal_cop(), 3.8);
        assert_eq!(Emitter::FanCoils.seasonal_cop(), 3.8);
    }
}
