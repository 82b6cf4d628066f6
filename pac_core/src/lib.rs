//! # pac_core - Heat Pump Sizing & Bathroom Quote Engine
//!
//! `pac_core` is the computational heart of Pacalc, the study tool of a
//! French plumbing and heating trade: heat pump sizing (air/water and
//! air/air), bathroom renovation quantity take-off and quoting, saved
//! customer studies, and plain-text client reports. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Forgiving inputs**: Estimators never fail; unknown tiers fall back
//!   to neutral coefficients and empty dimensions yield zero
//!
//! ## Quick Start
//!
//! ```rust
//! use pac_core::calculations::air_to_water::{self, AirToWaterInput};
//!
//! let input = AirToWaterInput {
//!     surface_m2: 120.0,
//!     ..Default::default()
//! };
//! let result = air_to_water::calculate(&input);
//! assert_eq!(result.power_w, 7200);
//!
//! // Serialize for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Thermal loads, covering quantities, quote totals
//! - [`coefficients`] - Insulation, glazing, exposure and emitter tiers
//! - [`sheet`] - Bathroom technical sheet and its draft builder
//! - [`study`] - Saved study records (sizings and technical sheets)
//! - [`report`] - Deterministic plain-text client reports
//! - [`store`] - File persistence with atomic saves and locking
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod coefficients;
pub mod errors;
pub mod report;
pub mod sheet;
pub mod store;
pub mod study;

// Re-export commonly used types at crate root for convenience
pub use calculations::{PacKind, SizingResult};
pub use errors::{CalcError, CalcResult};
pub use report::format_study;
pub use sheet::{SheetDraft, TechnicalSheet};
pub use store::{load_studies, save_studies, FileLock};
pub use study::{Status, Study, StudyData};
