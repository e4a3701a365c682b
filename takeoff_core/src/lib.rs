//! # takeoff_core - Paint & Wallcovering Takeoff Engine
//!
//! `takeoff_core` is the computational heart of PaintPilot. It turns a list of
//! rooms (dimensions, opening counts, finish system) into wall areas and
//! material quantities, and packages the results as a workbook, a PDF bid
//! summary, a floor-plan diagram and a JSON report. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions from rooms + config to results
//! - **Lenient data, strict structure**: negative dimensions or counts are
//!   clamped, unknown finishes fall back to paint, but missing fields are errors
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::calculator::process_takeoff;
//! use takeoff_core::config::TakeoffConfig;
//! use takeoff_core::extraction::mock_room_extraction;
//! use takeoff_core::summary::TakeoffSummary;
//!
//! let rooms = mock_room_extraction("plans/office_2ndfloor.pdf");
//! let results = process_takeoff(&rooms, &TakeoffConfig::default());
//! let summary = TakeoffSummary::from_results(&results);
//!
//! assert_eq!(summary.room_count(), 8);
//! ```
//!
//! ## Modules
//!
//! - [`rooms`] - Room records and finish types
//! - [`config`] - Opening sizes, coverage rates and TOML overrides
//! - [`calculator`] - Gross/net wall area and the per-room pipeline
//! - [`finish_systems`] - Gallons and rolls per finish system
//! - [`summary`] - Project totals
//! - [`extraction`] - Demo plan extraction
//! - [`floor_plan`] - Schematic SVG diagram
//! - [`preview`] - Static HTML preview page
//! - [`export`] - Spreadsheet bid package
//! - [`pdf`] - PDF bid summary
//! - [`report`] - JSON takeoff report
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic writes and file loading

pub mod calculator;
pub mod config;
pub mod errors;
pub mod export;
pub mod extraction;
pub mod file_io;
pub mod finish_systems;
pub mod floor_plan;
pub mod pdf;
pub mod preview;
pub mod report;
pub mod rooms;
pub mod summary;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculator::{process_takeoff, TakeoffResult};
pub use config::{load_config, TakeoffConfig};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_report, load_rooms, save_report, write_atomic};
pub use report::TakeoffReport;
pub use rooms::{FinishType, Room, RoomsData};
pub use summary::TakeoffSummary;
