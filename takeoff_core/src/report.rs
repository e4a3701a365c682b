//! # Takeoff Report
//!
//! The JSON artifact written next to the workbook: metadata, every room result
//! and the project summary.
//!
//! ```text
//! TakeoffReport
//! ├── meta: ReportMetadata (schema version, project, floor, timestamp)
//! ├── results: Vec<TakeoffResult>
//! └── summary: TakeoffSummary
//! ```
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculator::process_takeoff;
//! use takeoff_core::config::TakeoffConfig;
//! use takeoff_core::extraction::mock_room_extraction;
//! use takeoff_core::report::TakeoffReport;
//!
//! let data = mock_room_extraction("plans.pdf");
//! let results = process_takeoff(&data, &TakeoffConfig::default());
//! let report = TakeoffReport::new(&data, results);
//!
//! assert_eq!(report.summary.room_count(), 8);
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! assert!(json.contains("\"Break Room\""));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::TakeoffResult;
use crate::rooms::RoomsData;
use crate::summary::TakeoffSummary;

/// Current schema version for report files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Report header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Schema version (for compatibility checks on load)
    pub version: String,

    #[serde(default)]
    pub project: Option<String>,

    #[serde(default)]
    pub floor: Option<String>,

    /// When the takeoff was run
    pub generated: DateTime<Utc>,
}

/// A finished takeoff, ready to serialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeoffReport {
    pub meta: ReportMetadata,
    pub results: Vec<TakeoffResult>,
    pub summary: TakeoffSummary,
}

impl TakeoffReport {
    /// Build a report, computing the summary from `results`.
    pub fn new(rooms_data: &RoomsData, results: Vec<TakeoffResult>) -> Self {
        let summary = TakeoffSummary::from_results(&results);
        TakeoffReport {
            meta: ReportMetadata {
                version: SCHEMA_VERSION.to_string(),
                project: rooms_data.project.clone(),
                floor: rooms_data.floor.clone(),
                generated: Utc::now(),
            },
            results,
            summary,
        }
    }
}
