//! # Plan Extraction (Demo)
//!
//! Stand-in for floor-plan PDF analysis. The PDF is never parsed: metadata is
//! fixed apart from the file size, and the room list is a fixed fixture so
//! demos are deterministic. Use [`crate::file_io::load_rooms`] for real room
//! data supplied as JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::file_io::write_atomic;
use crate::rooms::{FinishType, Room, RoomsData};

/// Page count reported for every plan set
pub const DEMO_PAGE_COUNT: u32 = 12;

/// Minimal valid-looking PDF used as a demo input.
pub const SAMPLE_PDF_BYTES: &[u8] =
    b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<<>>\n%%EOF\n";

/// Default location for [`write_sample_pdf`]
pub const SAMPLE_PDF_PATH: &str = "data/sample_plans/office_2ndfloor.pdf";

/// Basic facts about a plan set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub file: String,
    pub pages: u32,
    pub project: String,
    /// File size, when the file could be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// Describe a plan set without opening it.
pub fn extract_metadata(pdf_path: impl AsRef<Path>) -> PlanMetadata {
    let path = pdf_path.as_ref();
    let size_bytes = fs::metadata(path).ok().map(|m| m.len());
    if size_bytes.is_none() {
        tracing::warn!(path = %path.display(), "Plan file not readable; continuing with demo data");
    }

    PlanMetadata {
        file: path.display().to_string(),
        pages: DEMO_PAGE_COUNT,
        project: "AC Wallcovering Office – 2nd Floor".to_string(),
        size_bytes,
    }
}

fn demo_room(
    id: &str,
    name: &str,
    (length, width, height): (f64, f64, f64),
    (doors, windows): (i64, i64),
    finish_type: FinishType,
) -> Room {
    Room::new(id, name, length, width, height)
        .with_openings(doors, windows)
        .with_finish(finish_type)
}

/// The fixed second-floor office plan used for demos.
pub fn mock_room_extraction(pdf_path: impl AsRef<Path>) -> RoomsData {
    use FinishType::{Paint, Wallcovering};

    tracing::debug!(path = %pdf_path.as_ref().display(), "Using demo room fixture");

    RoomsData {
        project: Some("AC Wallcovering Office".to_string()),
        floor: Some("2nd Floor".to_string()),
        rooms: vec![
            demo_room("201", "Conference A", (20.0, 15.0, 9.0), (2, 3), Paint),
            demo_room("202", "Open Office", (35.0, 22.0, 9.0), (2, 6), Paint),
            demo_room("203", "Private Office 1", (12.0, 10.0, 9.0), (1, 1), Paint),
            demo_room("204", "Private Office 2", (12.0, 10.0, 9.0), (1, 1), Paint),
            demo_room("205", "Break Room", (16.0, 12.0, 9.0), (1, 2), Wallcovering),
            demo_room("206", "Reception", (18.0, 14.0, 10.0), (1, 3), Paint),
            demo_room("207", "Corridor", (50.0, 6.0, 9.0), (6, 0), Paint),
            demo_room("208", "Storage", (10.0, 8.0, 9.0), (1, 0), Paint),
        ],
    }
}

/// Write the placeholder PDF, creating parent directories.
pub fn write_sample_pdf(path: &Path) -> CalcResult<()> {
    write_atomic(path, SAMPLE_PDF_BYTES)?;
    tracing::info!(path = %path.display(), "Wrote sample plan PDF");
    Ok(())
}
