//! # Study Records
//!
//! A study is one saved customer dossier: a heat pump sizing (air/water or
//! air/air) or a bathroom technical sheet, together with client identity,
//! workflow status and timestamps.
//!
//! The record identifier is the creation instant in milliseconds since the
//! Unix epoch. Identifiers are assigned once at creation and never change,
//! so a study keeps its report file names and its place in the saved list
//! across edits.
//!
//! ## Example
//!
//! ```rust
//! use pac_core::calculations::air_to_water::{self, AirToWaterInput};
//! use pac_core::study::{Status, Study};
//!
//! let input = AirToWaterInput {
//!     surface_m2: 120.0,
//!     ..Default::default()
//! };
//! let study = Study::new_air_to_water("M. Martin", "4 rue Pasteur, Tours", input);
//! assert_eq!(study.status, Status::Computed);
//! assert!(study.required_power_w().unwrap() > 0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::air_to_air::{self, AirToAirInput, AirToAirResult};
use crate::calculations::air_to_water::{self, AirToWaterInput, AirToWaterResult};
use crate::calculations::{PacKind, SizingResult};
use crate::sheet::TechnicalSheet;

/// Workflow status of a study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Brouillon")]
    Draft,
    #[serde(rename = "Calcule")]
    Computed,
    #[serde(rename = "Valide")]
    Validated,
    #[serde(rename = "Envoye_client")]
    SentToClient,
    #[serde(rename = "Envoye_fournisseur")]
    SentToSupplier,
    #[serde(rename = "Commande")]
    Ordered,
}

impl Status {
    /// All statuses in workflow order
    pub const ALL: [Status; 6] = [
        Status::Draft,
        Status::Computed,
        Status::Validated,
        Status::SentToClient,
        Status::SentToSupplier,
        Status::Ordered,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Status::Draft => "Brouillon",
            Status::Computed => "Calculé",
            Status::Validated => "Validé",
            Status::SentToClient => "Envoyé client",
            Status::SentToSupplier => "Envoyé fournisseur",
            Status::Ordered => "Commandé",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Draft
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The domain payload of a study.
///
/// Each variant carries everything its report needs: the raw inputs, the
/// computed result, and (for heat pumps) the derived sizing and economics.
/// The `type` tag keeps saved files self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StudyData {
    /// Air/water heat pump sizing
    #[serde(rename = "Air_Eau")]
    AirToWater {
        input: AirToWaterInput,
        result: AirToWaterResult,
        sizing: SizingResult,
    },
    /// Air/air heat pump sizing
    #[serde(rename = "Air_Air")]
    AirToAir {
        input: AirToAirInput,
        result: AirToAirResult,
        sizing: SizingResult,
    },
    /// Bathroom renovation technical sheet
    #[serde(rename = "Fiche_technique")]
    TechnicalSheet(TechnicalSheet),
}

impl StudyData {
    /// Short label for lists and file names
    pub fn label(&self) -> &'static str {
        match self {
            StudyData::AirToWater { .. } => "PAC Air/Eau",
            StudyData::AirToAir { .. } => "PAC Air/Air",
            StudyData::TechnicalSheet(_) => "Fiche technique",
        }
    }

    /// File-name stem for report artifacts
    pub fn file_stem(&self) -> &'static str {
        match self {
            StudyData::AirToWater { .. } | StudyData::AirToAir { .. } => "etude_pac",
            StudyData::TechnicalSheet(_) => "fiche_technique",
        }
    }

    /// Heat pump kind, if this study is a sizing
    pub fn pac_kind(&self) -> Option<PacKind> {
        match self {
            StudyData::AirToWater { .. } => Some(PacKind::AirToWater),
            StudyData::AirToAir { .. } => Some(PacKind::AirToAir),
            StudyData::TechnicalSheet(_) => None,
        }
    }
}

/// One saved study record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Study {
    /// Creation instant in milliseconds since the Unix epoch
    pub id: i64,

    pub client_name: String,
    pub address: String,

    pub status: Status,

    /// Free-form notes shown at the end of reports
    pub notes: String,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,

    pub data: StudyData,
}

impl Study {
    /// Assemble a record around an already-built payload.
    ///
    /// The identifier is derived from `created` and never changes
    /// afterwards.
    pub fn create(
        client_name: impl Into<String>,
        address: impl Into<String>,
        data: StudyData,
        status: Status,
        created: DateTime<Utc>,
    ) -> Self {
        Study {
            id: created.timestamp_millis(),
            client_name: client_name.into(),
            address: address.into(),
            status,
            notes: String::new(),
            created,
            modified: created,
            data,
        }
    }

    /// Size an air/water heat pump and wrap it as a computed study
    pub fn new_air_to_water(
        client_name: impl Into<String>,
        address: impl Into<String>,
        input: AirToWaterInput,
    ) -> Self {
        Self::new_air_to_water_at(client_name, address, input, Utc::now())
    }

    /// [`Study::new_air_to_water`] with an explicit creation instant
    pub fn new_air_to_water_at(
        client_name: impl Into<String>,
        address: impl Into<String>,
        input: AirToWaterInput,
        created: DateTime<Utc>,
    ) -> Self {
        let result = air_to_water::calculate(&input);
        let sizing = SizingResult::from_air_to_water(&result);
        Self::create(
            client_name,
            address,
            StudyData::AirToWater {
                input,
                result,
                sizing,
            },
            Status::Computed,
            created,
        )
    }

    /// Size an air/air heat pump and wrap it as a computed study
    pub fn new_air_to_air(
        client_name: impl Into<String>,
        address: impl Into<String>,
        input: AirToAirInput,
    ) -> Self {
        Self::new_air_to_air_at(client_name, address, input, Utc::now())
    }

    /// [`Study::new_air_to_air`] with an explicit creation instant
    pub fn new_air_to_air_at(
        client_name: impl Into<String>,
        address: impl Into<String>,
        input: AirToAirInput,
        created: DateTime<Utc>,
    ) -> Self {
        let result = air_to_air::calculate(&input);
        let sizing = SizingResult::from_air_to_air(&result);
        Self::create(
            client_name,
            address,
            StudyData::AirToAir {
                input,
                result,
                sizing,
            },
            Status::Computed,
            created,
        )
    }

    /// Replace the payload, bumping the modification timestamp.
    ///
    /// The identifier and creation instant are preserved.
    pub fn with_data(mut self, data: StudyData) -> Self {
        self.data = data;
        self.modified = Utc::now();
        self
    }

    /// Move the study to a new workflow status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self.modified = Utc::now();
        self
    }

    /// Required heat pump power, if this study is a sizing
    pub fn required_power_w(&self) -> Option<u32> {
        match &self.data {
            StudyData::AirToWater { sizing, .. } | StudyData::AirToAir { sizing, .. } => {
                Some(sizing.required_power_w)
            }
            StudyData::TechnicalSheet(_) => None,
        }
    }

    /// File-name for this study's text report, e.g.
    /// `etude_pac_M_Martin_1726000000000.txt`
    pub fn report_file_name(&self) -> String {
        let client: String = self
            .client_name
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        format!("{}_{}_{}.txt", self.data.file_stem(), client, self.id)
    }
}
