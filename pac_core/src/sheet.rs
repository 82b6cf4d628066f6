//! # Bathroom Technical Sheet
//!
//! The technical sheet captures one turnkey bathroom renovation: room
//! dimensions, floor and wall coverings with derived quantities, fixtures,
//! plumbing and electrical choices, and the quote totals.
//!
//! Field entry happens over several wizard steps in the host application.
//! Rather than one mutable record progressively filled in place, the draft
//! is an immutable value: every edit goes through a `with_*` method that
//! returns a fresh draft with all derived fields recomputed in a single
//! pure pass. Stale floor/wall quantity combinations are unrepresentable.
//!
//! ## Example
//!
//! ```rust
//! use pac_core::sheet::SheetDraft;
//!
//! let draft = SheetDraft::new("Mme Laurent", "12 rue des Lilas, Lyon")
//!     .with_length_m(3.5)
//!     .with_width_m(2.8)
//!     .with_wall_mounting_height_cm(120.0);
//!
//! assert!((draft.sheet.floor.net_m2 - 9.8).abs() < 1e-9);
//! assert!((draft.sheet.wall.with_waste_m2 - 16.632).abs() < 1e-9);
//!
//! let study = draft.finalize().unwrap();
//! assert_eq!(study.client_name, "Mme Laurent");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::covering::{self, CoveringSpec, Placement, RoomDimensions};
use crate::calculations::quote::{self, QuoteTotals};
use crate::errors::{CalcError, CalcResult};
use crate::study::{Status, Study, StudyData};

/// Project type for a technical sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "Creation")]
    Creation,
    #[serde(rename = "Renovation")]
    Renovation,
    #[serde(rename = "Amenagement")]
    FitOut,
}

impl ProjectType {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::Creation => "Création",
            ProjectType::Renovation => "Rénovation",
            ProjectType::FitOut => "Aménagement",
        }
    }
}

impl Default for ProjectType {
    fn default() -> Self {
        ProjectType::Creation
    }
}

/// Shower configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shower {
    /// "Italienne", "Receveur" or "Baignoire_douche"
    pub kind: String,
    /// Footprint, e.g. "120x90"
    pub dimensions: String,
    /// "Siphon_sol" or "Siphon_mural"
    pub drain: String,
    pub screen: String,
    pub tapware: String,
}

impl Default for Shower {
    fn default() -> Self {
        Shower {
            kind: "Italienne".to_string(),
            dimensions: "120x90".to_string(),
            drain: "Siphon_sol".to_string(),
            screen: "Verre trempé".to_string(),
            tapware: "Mitigeur thermostatique".to_string(),
        }
    }
}

/// Basin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basin {
    /// "Suspendu", "Colonne" or "Plan_vasque"
    pub kind: String,
    pub dimensions: String,
    pub tapware: String,
    pub cabinet: String,
}

impl Default for Basin {
    fn default() -> Self {
        Basin {
            kind: "Suspendu".to_string(),
            dimensions: "60x45".to_string(),
            tapware: "Mitigeur".to_string(),
            cabinet: "Sous-vasque 2 tiroirs".to_string(),
        }
    }
}

/// Toilet configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toilet {
    /// "Suspendu" or "Pose_sol"
    pub kind: String,
    /// "Horizontale" or "Verticale"
    pub outlet: String,
    pub hand_basin: bool,
}

impl Default for Toilet {
    fn default() -> Self {
        Toilet {
            kind: "Suspendu".to_string(),
            outlet: "Horizontale".to_string(),
            hand_basin: false,
        }
    }
}

/// Bathroom fixtures
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fixtures {
    pub shower: Shower,
    pub basin: Basin,
    pub toilet: Toilet,
    /// Free-form additional fixtures
    pub other: Vec<String>,
}

/// Plumbing choices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plumbing {
    /// "Cuivre", "PER" or "Multicouche"
    pub water_supply: String,
    /// "PVC" or "Fonte"
    pub drainage: String,
    /// "VMC" or "Naturelle"
    pub ventilation: String,
    /// "Radiateur", "Plancher_chauffant" or "Seche_serviette"
    pub heating: String,
}

impl Default for Plumbing {
    fn default() -> Self {
        Plumbing {
            water_supply: "PER".to_string(),
            drainage: "PVC".to_string(),
            ventilation: "VMC".to_string(),
            heating: "Seche_serviette".to_string(),
        }
    }
}

/// Electrical choices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Electrical {
    pub main_lighting: String,
    pub mirror_lighting: String,
    pub outlet_count: u32,
    pub switch_count: u32,
    pub electric_ventilation: bool,
}

impl Default for Electrical {
    fn default() -> Self {
        Electrical {
            main_lighting: "Spots LED encastrés".to_string(),
            mirror_lighting: "Réglette LED".to_string(),
            outlet_count: 2,
            switch_count: 2,
            electric_ventilation: true,
        }
    }
}

/// One complete bathroom technical sheet.
///
/// All derived figures (room surface, covering quantities, quote totals)
/// are kept consistent by [`SheetDraft::derive`]; the finalized sheet is
/// immutable outside an explicit edit flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSheet {
    pub project_type: ProjectType,

    pub dimensions: RoomDimensions,

    /// Floor tiling
    pub floor: CoveringSpec,

    /// Wall tiling
    pub wall: CoveringSpec,

    pub fixtures: Fixtures,
    pub plumbing: Plumbing,
    pub electrical: Electrical,

    /// Under-floor height (HSP) in cm
    pub under_floor_height_cm: f64,

    /// Site particularities (free text)
    pub particularities: String,

    /// Site constraints (free text)
    pub constraints: String,

    /// Stylus annotations captured on site
    pub stylus_notes: Option<String>,

    /// Quote totals derived from the coverings and labor figures
    pub totals: QuoteTotals,
}

impl Default for TechnicalSheet {
    fn default() -> Self {
        TechnicalSheet {
            project_type: ProjectType::default(),
            dimensions: RoomDimensions::default(),
            floor: CoveringSpec::default_floor(),
            wall: CoveringSpec::default_wall(),
            fixtures: Fixtures::default(),
            plumbing: Plumbing::default(),
            electrical: Electrical::default(),
            under_floor_height_cm: 0.0,
            particularities: String::new(),
            constraints: String::new(),
            stylus_notes: None,
            totals: QuoteTotals::default(),
        }
    }
}

impl TechnicalSheet {
    /// Material subtotal: both covering line totals
    pub fn material_total_ht_eur(&self) -> f64 {
        self.floor.line_total_ht_eur() + self.wall.line_total_ht_eur()
    }
}

/// Immutable draft of a technical sheet being filled in.
///
/// Every `with_*` edit replaces the draft wholesale and re-runs the single
/// pure [`SheetDraft::derive`] pass; validation only happens at
/// [`SheetDraft::finalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetDraft {
    pub client_name: String,
    pub address: String,
    pub sheet: TechnicalSheet,
}

impl SheetDraft {
    /// Start a draft with workshop defaults
    pub fn new(client_name: impl Into<String>, address: impl Into<String>) -> Self {
        SheetDraft {
            client_name: client_name.into(),
            address: address.into(),
            sheet: TechnicalSheet::default(),
        }
        .derive()
    }

    /// Recompute every derived field from the current inputs.
    ///
    /// One atomic pass: floor and wall quantities come from the same
    /// covering estimate, and the quote totals from those quantities, so
    /// no observable state mixes old and new inputs.
    pub fn derive(mut self) -> Self {
        let mount_height_cm = self.sheet.wall.mounting_height_cm().unwrap_or(0.0);
        let quantities = covering::estimate(&self.sheet.dimensions, mount_height_cm);

        self.sheet.floor = self.sheet.floor.with_quantities(quantities.floor);
        self.sheet.wall = self.sheet.wall.with_quantities(quantities.wall);

        let totals = &self.sheet.totals;
        self.sheet.totals = quote::compute(
            totals.labor_hours,
            totals.hourly_rate_eur,
            self.sheet.material_total_ht_eur(),
            totals.tax_rate_percent,
        );
        self
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_project_type(mut self, project_type: ProjectType) -> Self {
        self.sheet.project_type = project_type;
        self
    }

    pub fn with_length_m(mut self, length_m: f64) -> Self {
        self.sheet.dimensions.length_m = length_m;
        self.derive()
    }

    pub fn with_width_m(mut self, width_m: f64) -> Self {
        self.sheet.dimensions.width_m = width_m;
        self.derive()
    }

    pub fn with_height_m(mut self, height_m: f64) -> Self {
        self.sheet.dimensions.height_m = height_m;
        self.derive()
    }

    pub fn with_wall_mounting_height_cm(mut self, height_cm: f64) -> Self {
        self.sheet.wall.placement = Placement::Wall {
            mounting_height_cm: height_cm,
        };
        self.derive()
    }

    pub fn with_floor_covering(mut self, floor: CoveringSpec) -> Self {
        self.sheet.floor = floor;
        self.derive()
    }

    pub fn with_wall_covering(mut self, wall: CoveringSpec) -> Self {
        self.sheet.wall = wall;
        self.derive()
    }

    pub fn with_labor(mut self, hours: f64, hourly_rate_eur: f64) -> Self {
        self.sheet.totals.labor_hours = hours;
        self.sheet.totals.hourly_rate_eur = hourly_rate_eur;
        self.derive()
    }

    pub fn with_tax_rate_percent(mut self, rate: f64) -> Self {
        self.sheet.totals.tax_rate_percent = rate;
        self.derive()
    }

    pub fn with_fixtures(mut self, fixtures: Fixtures) -> Self {
        self.sheet.fixtures = fixtures;
        self
    }

    pub fn with_particularities(mut self, text: impl Into<String>) -> Self {
        self.sheet.particularities = text.into();
        self
    }

    /// Finalize the draft into a persisted study record.
    ///
    /// The only validation the field workflow enforces is a non-empty
    /// client name; dimension sanity is deliberately not checked here.
    pub fn finalize(self) -> CalcResult<Study> {
        self.finalize_at(Utc::now())
    }

    /// Finalize with an explicit creation instant (report determinism,
    /// tests, imports).
    pub fn finalize_at(self, created: DateTime<Utc>) -> CalcResult<Study> {
        if self.client_name.trim().is_empty() {
            return Err(CalcError::missing_field("client_name"));
        }
        let draft = self.derive();
        Ok(Study::create(
            draft.client_name,
            draft.address,
            StudyData::TechnicalSheet(draft.sheet),
            Status::Draft,
            created,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SheetDraft {
        SheetDraft::new("M. Dupont", "8 impasse du Canal, Nantes")
            .with_length_m(3.5)
            .with_width_m(2.8)
            .with_wall_mounting_height_cm(120.0)
    }

    #[test]
    fn test_quantities_follow_dimensions() {
        let d = draft();
        assert!((d.sheet.dimensions.surface_m2() - 9.8).abs() < 1e-9);
        assert!((d.sheet.floor.net_m2 - 9.8).abs() < 1e-9);
        assert!((d.sheet.floor.with_waste_m2 - 10.78).abs() < 1e-9);
        assert!((d.sheet.wall.net_m2 - 15.12).abs() < 1e-9);
        assert!((d.sheet.wall.with_waste_m2 - 16.632).abs() < 1e-9);
    }

    #[test]
    fn test_edit_recomputes_everything_together() {
        let d = draft().with_length_m(4.0);

        // Floor, wall and totals all reflect the new length
        assert!((d.sheet.floor.net_m2 - 11.2).abs() < 1e-9);
        assert!((d.sheet.wall.net_m2 - 16.32).abs() < 1e-9);

        let expected_materials =
            d.sheet.floor.line_total_ht_eur() + d.sheet.wall.line_total_ht_eur();
        assert!((d.sheet.totals.material_total_ht_eur - expected_materials).abs() < 1e-9);
    }

    #[test]
    fn test_mounting_height_edit_updates_wall_only_figures() {
        let d = draft().with_wall_mounting_height_cm(200.0);
        // 12.6 * 200 / 100 = 25.2
        assert!((d.sheet.wall.net_m2 - 25.2).abs() < 1e-9);
        // Floor untouched by the height change
        assert!((d.sheet.floor.net_m2 - 9.8).abs() < 1e-9);
    }

    #[test]
    fn test_totals_reference_case() {
        // Force the material subtotal to 1000 by pricing: floor only
        let floor = CoveringSpec {
            unit_price_eur_m2: 1000.0 / 10.78,
            ..CoveringSpec::default_floor()
        };
        let wall = CoveringSpec {
            unit_price_eur_m2: 0.0,
            ..CoveringSpec::default_wall()
        };
        let d = draft()
            .with_floor_covering(floor)
            .with_wall_covering(wall)
            .with_labor(40.0, 45.0)
            .with_tax_rate_percent(20.0);

        assert!((d.sheet.totals.total_ht_eur - 2800.0).abs() < 1e-6);
        assert!((d.sheet.totals.total_ttc_eur - 3360.0).abs() < 1e-6);
    }

    #[test]
    fn test_finalize_requires_client_name() {
        let err = SheetDraft::new("", "").finalize().unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_finalize_produces_draft_study() {
        let study = draft().finalize().unwrap();
        assert_eq!(study.status, Status::Draft);
        assert_eq!(study.client_name, "M. Dupont");
        assert_eq!(study.id, study.created.timestamp_millis());
        match &study.data {
            StudyData::TechnicalSheet(sheet) => {
                assert!((sheet.floor.net_m2 - 9.8).abs() < 1e-9);
            }
            other => panic!("unexpected study data: {:?}", other),
        }
    }

    #[test]
    fn test_serialization_roundtrip() {
        let d = draft();
        let json = serde_json::to_string_pretty(&d).unwrap();
        let roundtrip: SheetDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(d, roundtrip);
    }
}
