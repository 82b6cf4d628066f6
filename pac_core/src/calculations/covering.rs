//! # Covering Quantity Estimation
//!
//! Converts room dimensions into tiled-surface areas with the fixed 10%
//! cutting-waste allowance, for floor tiling and wall tiling separately.
//!
//! All four derived quantities (floor net/waste, wall net/waste) come out
//! of one pure pass so a caller can never observe a stale combination
//! after a dimension edit.
//!
//! ## Example
//!
//! ```rust
//! use pac_core::calculations::covering::{RoomDimensions, estimate};
//!
//! let room = RoomDimensions { length_m: 3.5, width_m: 2.8, height_m: 2.5 };
//! let quantities = estimate(&room, 120.0);
//!
//! assert!((quantities.floor.net_m2 - 9.8).abs() < 1e-9);
//! assert!((quantities.wall.net_m2 - 15.12).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Fixed extra-material allowance for cutting loss
const WASTE_FACTOR: f64 = 1.10;

/// Room dimensions in meters.
///
/// Surface and perimeter are always derived, never stored: after any
/// dimension edit, `surface_m2()` is length × width by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub length_m: f64,
    pub width_m: f64,
    pub height_m: f64,
}

impl RoomDimensions {
    /// Floor surface in m²
    pub fn surface_m2(&self) -> f64 {
        self.length_m * self.width_m
    }

    /// Wall perimeter in m
    pub fn perimeter_m(&self) -> f64 {
        2.0 * (self.length_m + self.width_m)
    }

    /// Air volume in m³
    pub fn volume_m3(&self) -> f64 {
        self.surface_m2() * self.height_m
    }
}

impl Default for RoomDimensions {
    fn default() -> Self {
        RoomDimensions {
            length_m: 0.0,
            width_m: 0.0,
            height_m: 2.5,
        }
    }
}

/// Tile surface finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileFinish {
    #[serde(rename = "Mat")]
    Matte,
    #[serde(rename = "Brillant")]
    Gloss,
    #[serde(rename = "Satiné")]
    Satin,
}

impl TileFinish {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            TileFinish::Matte => "Mat",
            TileFinish::Gloss => "Brillant",
            TileFinish::Satin => "Satiné",
        }
    }
}

impl Default for TileFinish {
    fn default() -> Self {
        TileFinish::Matte
    }
}

/// Floor laying pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayingPattern {
    #[serde(rename = "Droite")]
    Straight,
    #[serde(rename = "Decalee")]
    Offset,
    #[serde(rename = "Chevrons")]
    Herringbone,
}

impl LayingPattern {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LayingPattern::Straight => "Droite",
            LayingPattern::Offset => "Décalée",
            LayingPattern::Herringbone => "Chevrons",
        }
    }
}

impl Default for LayingPattern {
    fn default() -> Self {
        LayingPattern::Offset
    }
}

/// Placement-specific covering attributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Placement {
    /// Floor tiling with its laying pattern
    Floor { pattern: LayingPattern },
    /// Wall tiling mounted up to a height in cm
    Wall { mounting_height_cm: f64 },
}

/// One covering line of a technical sheet (floor tiles or wall tiles).
///
/// `net_m2` and `with_waste_m2` are derived quantities, refreshed as a
/// pair whenever the room dimensions or the mounting height change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoveringSpec {
    /// Tile format (e.g., "30x60", "60x60")
    pub format: String,

    /// Tile color
    pub color: String,

    /// Surface finish
    pub finish: TileFinish,

    /// Floor pattern or wall mounting height
    pub placement: Placement,

    /// Unit price in €/m²
    pub unit_price_eur_m2: f64,

    /// Supplier name (free text, may be empty until ordering)
    pub supplier: String,

    /// Supplier reference
    pub reference: String,

    /// Net surface in m²
    pub net_m2: f64,

    /// Surface with the 10% waste allowance in m²
    pub with_waste_m2: f64,
}

impl CoveringSpec {
    /// Default floor covering of a new technical sheet
    pub fn default_floor() -> Self {
        CoveringSpec {
            format: "30x60".to_string(),
            color: "Gris Clair".to_string(),
            finish: TileFinish::Matte,
            placement: Placement::Floor {
                pattern: LayingPattern::Offset,
            },
            unit_price_eur_m2: 25.0,
            supplier: String::new(),
            reference: String::new(),
            net_m2: 0.0,
            with_waste_m2: 0.0,
        }
    }

    /// Default wall covering of a new technical sheet
    pub fn default_wall() -> Self {
        CoveringSpec {
            format: "25x40".to_string(),
            color: "Blanc".to_string(),
            finish: TileFinish::Gloss,
            placement: Placement::Wall {
                mounting_height_cm: 120.0,
            },
            unit_price_eur_m2: 20.0,
            supplier: String::new(),
            reference: String::new(),
            net_m2: 0.0,
            with_waste_m2: 0.0,
        }
    }

    /// Wall mounting height in cm, if this is a wall covering
    pub fn mounting_height_cm(&self) -> Option<f64> {
        match self.placement {
            Placement::Wall { mounting_height_cm } => Some(mounting_height_cm),
            Placement::Floor { .. } => None,
        }
    }

    /// Material cost of this line: with-waste surface × unit price
    pub fn line_total_ht_eur(&self) -> f64 {
        self.with_waste_m2 * self.unit_price_eur_m2
    }

    /// Return a copy carrying the given derived quantities
    pub fn with_quantities(&self, quantities: CoveringQuantities) -> Self {
        CoveringSpec {
            net_m2: quantities.net_m2,
            with_waste_m2: quantities.with_waste_m2,
            ..self.clone()
        }
    }
}

/// Net and with-waste surface for one covering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoveringQuantities {
    pub net_m2: f64,
    pub with_waste_m2: f64,
}

impl CoveringQuantities {
    fn from_net(net_m2: f64) -> Self {
        CoveringQuantities {
            net_m2,
            with_waste_m2: net_m2 * WASTE_FACTOR,
        }
    }
}

/// Floor and wall quantities computed together
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoveringEstimate {
    pub floor: CoveringQuantities,
    pub wall: CoveringQuantities,
}

/// Compute floor and wall tiling quantities for a room.
///
/// Floor net surface is length × width; wall net surface is the perimeter
/// times the mounting height (cm) over 100. Both with-waste figures are
/// exactly 10% above net. One pure pass, so the four quantities always
/// belong to the same set of inputs.
pub fn estimate(room: &RoomDimensions, wall_mount_height_cm: f64) -> CoveringEstimate {
    let floor_net = room.surface_m2();
    let wall_net = room.perimeter_m() * wall_mount_height_cm / 100.0;

    CoveringEstimate {
        floor: CoveringQuantities::from_net(floor_net),
        wall: CoveringQuantities::from_net(wall_net),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> RoomDimensions {
        RoomDimensions {
            length_m: 3.5,
            width_m: 2.8,
            height_m: 2.5,
        }
    }

    #[test]
    fn test_derived_dimensions() {
        let r = room();
        assert!((r.surface_m2() - 9.8).abs() < 1e-9);
        assert!((r.perimeter_m() - 12.6).abs() < 1e-9);
        assert!((r.volume_m3() - 24.5).abs() < 1e-9);
    }

    #[test]
    fn test_reference_room_quantities() {
        // 3.5m x 2.8m room, 120cm wall mounting height
        let q = estimate(&room(), 120.0);

        assert!((q.floor.net_m2 - 9.8).abs() < 1e-9);
        assert!((q.floor.with_waste_m2 - 10.78).abs() < 1e-9);
        assert!((q.wall.net_m2 - 15.12).abs() < 1e-9);
        assert!((q.wall.with_waste_m2 - 16.632).abs() < 1e-9);
    }

    #[test]
    fn test_waste_is_exactly_ten_percent() {
        let q = estimate(&room(), 200.0);
        assert!((q.floor.with_waste_m2 - q.floor.net_m2 * 1.10).abs() < 1e-12);
        assert!((q.wall.with_waste_m2 - q.wall.net_m2 * 1.10).abs() < 1e-12);
    }

    #[test]
    fn test_recompute_is_atomic() {
        // Changing any input refreshes floor and wall quantities together
        let before = estimate(&room(), 120.0);
        let after = estimate(
            &RoomDimensions {
                length_m: 4.0,
                ..room()
            },
            120.0,
        );

        assert!((after.floor.net_m2 - 11.2).abs() < 1e-9);
        // Wall perimeter also moved: 2 * (4.0 + 2.8) * 1.2 = 16.32
        assert!((after.wall.net_m2 - 16.32).abs() < 1e-9);
        assert!(after.wall.net_m2 > before.wall.net_m2);
    }

    #[test]
    fn test_zero_room() {
        let q = estimate(&RoomDimensions::default(), 120.0);
        assert_eq!(q.floor.net_m2, 0.0);
        assert_eq!(q.wall.net_m2, 0.0);
    }

    #[test]
    fn test_line_total() {
        let spec = CoveringSpec {
            unit_price_eur_m2: 25.0,
            ..CoveringSpec::default_floor()
        }
        .with_quantities(CoveringQuantities::from_net(9.8));
        assert!((spec.line_total_ht_eur() - 10.78 * 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_placement_serialization() {
        let floor = CoveringSpec::default_floor();
        let json = serde_json::to_string(&floor).unwrap();
        assert!(json.contains("\"type\":\"Floor\""));

        let wall = CoveringSpec::default_wall();
        let json = serde_json::to_string_pretty(&wall).unwrap();
        assert!(json.contains("mounting_height_cm"));
        let roundtrip: CoveringSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(wall, roundtrip);
    }
}
