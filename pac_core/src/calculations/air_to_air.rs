//! # Air-to-Air Heat Pump Sizing
//!
//! Estimates cooling and heating power for an air-to-air (split) system.
//!
//! Two divergent sizing strategies coexist in the field data and are kept
//! as explicit, selectable modes rather than merged:
//!
//! - [`SizingStrategy::PerRoom`]: volumetric loads (40 W/m³ cooling,
//!   35 W/m³ heating) scaled per zone by the 5-level insulation table and
//!   the solar exposure coefficient. Falls back to whole-building
//!   granularity when no zones are described.
//! - [`SizingStrategy::Aggregate`]: the legacy estimate, a single
//!   35 W/m³ figure scaled by the legacy insulation table and a
//!   user-supplied delta-T against a 30 °C reference.
//!
//! Selection is driven by which input fields are populated: a legacy
//! `delta_t_c` selects `Aggregate`, otherwise `PerRoom` applies.
//!
//! ## Example
//!
//! ```rust
//! use pac_core::calculations::air_to_air::{AirToAirInput, calculate, SizingStrategy};
//! use pac_core::coefficients::{Exposure, InsulationLevel};
//!
//! let input = AirToAirInput {
//!     volume_m3: 300.0,
//!     insulation_level: InsulationLevel::Average,
//!     exposure: Exposure::East,
//!     ..AirToAirInput::default()
//! };
//!
//! let result = calculate(&input);
//! assert_eq!(result.strategy, SizingStrategy::PerRoom);
//! assert_eq!(result.cooling_w, 12000); // 300 * 40 * 1.0 * 1.0
//! assert_eq!(result.heating_w, 10500); // 300 * 35 * 1.0 * 1.0
//! ```

use serde::{Deserialize, Serialize};

use crate::coefficients::{Exposure, InsulationLevel};

/// Cooling load baseline in W per m³
const COOLING_LOAD_W_PER_M3: f64 = 40.0;

/// Heating load baseline in W per m³
const HEATING_LOAD_W_PER_M3: f64 = 35.0;

/// Reference delta-T (°C) for the legacy aggregate estimate
const LEGACY_REFERENCE_DELTA_T_C: f64 = 30.0;

/// Indoor unit style for a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndoorUnitType {
    #[serde(rename = "Murale")]
    WallMounted,
    #[serde(rename = "Console")]
    Console,
    #[serde(rename = "Gainable")]
    Ducted,
    #[serde(rename = "Cassette")]
    Cassette,
}

impl Default for IndoorUnitType {
    fn default() -> Self {
        IndoorUnitType::WallMounted
    }
}

impl IndoorUnitType {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            IndoorUnitType::WallMounted => "Murale",
            IndoorUnitType::Console => "Console",
            IndoorUnitType::Ducted => "Gainable",
            IndoorUnitType::Cassette => "Cassette",
        }
    }
}

/// Overall installation topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallationType {
    #[serde(rename = "Mono_split")]
    MonoSplit,
    #[serde(rename = "Multi_split")]
    MultiSplit,
    #[serde(rename = "Gainable")]
    Ducted,
    #[serde(rename = "Console")]
    Console,
}

impl Default for InstallationType {
    fn default() -> Self {
        InstallationType::MonoSplit
    }
}

impl InstallationType {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            InstallationType::MonoSplit => "Mono-split",
            InstallationType::MultiSplit => "Multi-split",
            InstallationType::Ducted => "Gainable",
            InstallationType::Console => "Console",
        }
    }
}

/// One room/zone to be conditioned.
///
/// Surface and volume are always derived from the dimensions, never stored
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomZone {
    /// Room name (e.g., "Salon", "Chambre 1")
    pub name: String,

    pub length_m: f64,
    pub width_m: f64,
    pub height_m: f64,

    /// Solar exposure of the room
    pub orientation: Exposure,

    /// Floor level (0 = ground floor)
    pub floor_level: i32,

    /// Insulation level of the room (1-5)
    pub insulation_level: InsulationLevel,

    /// Internal heat gains in watts (appliances, lighting)
    pub internal_gains_w: f64,

    /// Occupant count
    pub occupants: u32,

    /// Indoor unit retained for this room
    pub unit_type: IndoorUnitType,
}

impl RoomZone {
    /// Derived floor surface in m²
    pub fn surface_m2(&self) -> f64 {
        self.length_m * self.width_m
    }

    /// Derived air volume in m³
    pub fn volume_m3(&self) -> f64 {
        self.length_m * self.width_m * self.height_m
    }
}

impl Default for RoomZone {
    fn default() -> Self {
        RoomZone {
            name: String::new(),
            length_m: 0.0,
            width_m: 0.0,
            height_m: 2.5,
            orientation: Exposure::default(),
            floor_level: 0,
            insulation_level: InsulationLevel::default(),
            internal_gains_w: 0.0,
            occupants: 0,
            unit_type: IndoorUnitType::default(),
        }
    }
}

/// Input for the air-to-air sizing path.
///
/// Which fields are populated selects the strategy: a legacy `delta_t_c`
/// selects [`SizingStrategy::Aggregate`]; otherwise the per-room tables
/// apply, over `zones` when present or the whole-building `volume_m3`
/// when not.
///
/// ## JSON Example (per-room)
///
/// ```json
/// {
///   "zones": [
///     {
///       "name": "Salon", "length_m": 6.0, "width_m": 5.0, "height_m": 2.5,
///       "orientation": "Sud", "floor_level": 0, "insulation_level": 3,
///       "internal_gains_w": 300.0, "occupants": 4, "unit_type": "Murale"
///     }
///   ],
///   "volume_m3": 0.0,
///   "insulation_level": 3,
///   "exposure": "Multiple",
///   "delta_t_c": null,
///   "installation": "Mono_split",
///   "indoor_unit_count": 1,
///   "solar_masks": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirToAirInput {
    /// Per-room descriptions (per-room strategy)
    pub zones: Vec<RoomZone>,

    /// Whole-building volume in m³ (used when `zones` is empty)
    pub volume_m3: f64,

    /// Whole-building insulation level (used when `zones` is empty)
    pub insulation_level: InsulationLevel,

    /// Main solar exposure (used when `zones` is empty)
    pub exposure: Exposure,

    /// Legacy delta-T in °C; populating this selects the aggregate strategy
    pub delta_t_c: Option<f64>,

    /// Installation topology
    pub installation: InstallationType,

    /// Number of indoor units
    pub indoor_unit_count: u32,

    /// Solar masks present (shading)
    pub solar_masks: bool,
}

impl Default for AirToAirInput {
    fn default() -> Self {
        AirToAirInput {
            zones: Vec::new(),
            volume_m3: 0.0,
            insulation_level: InsulationLevel::default(),
            exposure: Exposure::default(),
            delta_t_c: None,
            installation: InstallationType::default(),
            indoor_unit_count: 1,
            solar_masks: false,
        }
    }
}

impl AirToAirInput {
    /// Strategy selected by the populated fields
    pub fn strategy(&self) -> SizingStrategy {
        if self.delta_t_c.is_some() {
            SizingStrategy::Aggregate
        } else {
            SizingStrategy::PerRoom
        }
    }
}

/// Which of the two historical sizing estimates applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizingStrategy {
    /// Per-room coefficient tables (or whole-building when no zones)
    PerRoom,
    /// Legacy single-coefficient estimate with user-supplied delta-T
    Aggregate,
}

/// Per-zone power figures (per-room strategy only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneResult {
    pub name: String,
    pub surface_m2: f64,
    pub volume_m3: f64,
    pub cooling_w: u32,
    pub heating_w: u32,
    pub unit_type: IndoorUnitType,
}

/// Results of the air-to-air load estimate.
///
/// ## JSON Example
///
/// ```json
/// { "strategy": "PerRoom", "cooling_w": 12000, "heating_w": 10500, "zones": [] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirToAirResult {
    /// Strategy that produced the figures
    pub strategy: SizingStrategy,

    /// Total cooling power in watts
    pub cooling_w: u32,

    /// Total heating power in watts
    pub heating_w: u32,

    /// Per-zone breakdown (empty for the aggregate strategy)
    pub zones: Vec<ZoneResult>,
}

/// Estimate cooling and heating power for an air-to-air installation.
///
/// Pure function: zero volume yields zero power, nothing fails.
pub fn calculate(input: &AirToAirInput) -> AirToAirResult {
    match input.strategy() {
        SizingStrategy::Aggregate => calculate_aggregate(input),
        SizingStrategy::PerRoom => calculate_per_room(input),
    }
}

fn calculate_per_room(input: &AirToAirInput) -> AirToAirResult {
    if input.zones.is_empty() {
        // Whole-building granularity with the global volume and tiers
        let coeff = input.insulation_level.zone_coefficient() * input.exposure.coefficient();
        return AirToAirResult {
            strategy: SizingStrategy::PerRoom,
            cooling_w: (input.volume_m3 * COOLING_LOAD_W_PER_M3 * coeff).round() as u32,
            heating_w: (input.volume_m3 * HEATING_LOAD_W_PER_M3 * coeff).round() as u32,
            zones: Vec::new(),
        };
    }

    let mut zones = Vec::with_capacity(input.zones.len());
    let mut cooling_total = 0u32;
    let mut heating_total = 0u32;

    for zone in &input.zones {
        let coeff = zone.insulation_level.zone_coefficient() * zone.orientation.coefficient();
        let volume = zone.volume_m3();
        let cooling = (volume * COOLING_LOAD_W_PER_M3 * coeff).round() as u32;
        let heating = (volume * HEATING_LOAD_W_PER_M3 * coeff).round() as u32;

        cooling_total += cooling;
        heating_total += heating;

        zones.push(ZoneResult {
            name: zone.name.clone(),
            surface_m2: zone.surface_m2(),
            volume_m3: volume,
            cooling_w: cooling,
            heating_w: heating,
            unit_type: zone.unit_type,
        });
    }

    AirToAirResult {
        strategy: SizingStrategy::PerRoom,
        cooling_w: cooling_total,
        heating_w: heating_total,
        zones,
    }
}

fn calculate_aggregate(input: &AirToAirInput) -> AirToAirResult {
    let delta_ratio = input.delta_t_c.unwrap_or(LEGACY_REFERENCE_DELTA_T_C)
        / LEGACY_REFERENCE_DELTA_T_C;
    let coeff = input.insulation_level.aggregate_coefficient();
    let power =
        (input.volume_m3 * HEATING_LOAD_W_PER_M3 * coeff * delta_ratio).round() as u32;

    // The legacy estimate produced a single figure; report it for both modes
    AirToAirResult {
        strategy: SizingStrategy::Aggregate,
        cooling_w: power,
        heating_w: power,
        zones: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building_input() -> AirToAirInput {
        AirToAirInput {
            volume_m3: 300.0,
            insulation_level: InsulationLevel::Average,
            exposure: Exposure::East,
            ..AirToAirInput::default()
        }
    }

    #[test]
    fn test_strategy_selection() {
        let per_room = building_input();
        assert_eq!(per_room.strategy(), SizingStrategy::PerRoom);

        let aggregate = AirToAirInput {
            delta_t_c: Some(30.0),
            ..building_input()
        };
        assert_eq!(aggregate.strategy(), SizingStrategy::Aggregate);
    }

    #[test]
    fn test_whole_building_per_room() {
        // 300 m³, neutral coefficients
        let result = calculate(&building_input());
        assert_eq!(result.cooling_w, 12000);
        assert_eq!(result.heating_w, 10500);
        assert!(result.zones.is_empty());
    }

    #[test]
    fn test_exposure_scales_power() {
        let south = AirToAirInput {
            exposure: Exposure::South,
            ..building_input()
        };
        let result = calculate(&south);
        // 300 * 40 * 1.0 * 1.2
        assert_eq!(result.cooling_w, 14400);
    }

    #[test]
    fn test_per_zone_sum() {
        let input = AirToAirInput {
            zones: vec![
                RoomZone {
                    name: "Salon".to_string(),
                    length_m: 6.0,
                    width_m: 5.0,
                    height_m: 2.5,
                    orientation: Exposure::South,
                    insulation_level: InsulationLevel::Average,
                    ..RoomZone::default()
                },
                RoomZone {
                    name: "Chambre".to_string(),
                    length_m: 4.0,
                    width_m: 3.0,
                    height_m: 2.5,
                    orientation: Exposure::North,
                    insulation_level: InsulationLevel::Good,
                    ..RoomZone::default()
                },
            ],
            ..AirToAirInput::default()
        };

        let result = calculate(&input);
        assert_eq!(result.zones.len(), 2);

        // Salon: 75 m³ * 40 * 1.0 * 1.2 = 3600 cooling; * 35 = 3150 heating
        assert_eq!(result.zones[0].cooling_w, 3600);
        assert_eq!(result.zones[0].heating_w, 3150);

        // Chambre: 30 m³ * 40 * 0.8 * 0.9 = 864 cooling; 30 * 35 * 0.72 = 756
        assert_eq!(result.zones[1].cooling_w, 864);
        assert_eq!(result.zones[1].heating_w, 756);

        assert_eq!(result.cooling_w, 3600 + 864);
        assert_eq!(result.heating_w, 3150 + 756);
    }

    #[test]
    fn test_zone_derived_quantities() {
        let zone = RoomZone {
            length_m: 6.0,
            width_m: 5.0,
            height_m: 2.5,
            ..RoomZone::default()
        };
        assert!((zone.surface_m2() - 30.0).abs() < 1e-9);
        assert!((zone.volume_m3() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_legacy_formula() {
        let input = AirToAirInput {
            volume_m3: 300.0,
            insulation_level: InsulationLevel::Average,
            delta_t_c: Some(30.0),
            ..AirToAirInput::default()
        };
        let result = calculate(&input);
        // 300 * 35 * 1.0 * (30/30) = 10500, reported for both modes
        assert_eq!(result.heating_w, 10500);
        assert_eq!(result.cooling_w, 10500);
        assert_eq!(result.strategy, SizingStrategy::Aggregate);
    }

    #[test]
    fn test_aggregate_delta_ratio() {
        let input = AirToAirInput {
            volume_m3: 300.0,
            insulation_level: InsulationLevel::Poor,
            delta_t_c: Some(15.0),
            ..AirToAirInput::default()
        };
        let result = calculate(&input);
        // 300 * 35 * 1.2 * 0.5 = 6300
        assert_eq!(result.heating_w, 6300);
    }

    #[test]
    fn test_zero_volume_gives_zero_power() {
        let result = calculate(&AirToAirInput::default());
        assert_eq!(result.cooling_w, 0);
        assert_eq!(result.heating_w, 0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let input = AirToAirInput {
            zones: vec![RoomZone {
                name: "Bureau".to_string(),
                length_m: 3.0,
                width_m: 3.0,
                ..RoomZone::default()
            }],
            delta_t_c: None,
            ..AirToAirInput::default()
        };
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("\"Mono_split\""));
        let roundtrip: AirToAirInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
