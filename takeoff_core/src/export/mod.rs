//! # Bid Package Export
//!
//! The bid package is three tables. Each is built here as a plain [`Sheet`]
//! (header plus typed cells) so the content can be checked without opening a
//! spreadsheet; writers turn sheets into files.
//!
//! ## Sheets
//!
//! - **Summary** - project totals, one metric per row
//! - **Room Breakdown** - one row per room, in input order
//! - **System Breakdown** - one row per finish system
//!
//! ## Writers
//!
//! - [`xlsx`] - Excel workbook via libxlsxwriter

pub mod xlsx;

use crate::calculator::TakeoffResult;
use crate::summary::TakeoffSummary;

pub use xlsx::generate_workbook;

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// Left blank (a field the room's finish system does not have)
    Empty,
}

impl Cell {
    fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    fn opt(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }
}

/// One worksheet's worth of data.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Column width for a header: `max(14, len + 2)`
    pub fn column_width(header: &str) -> f64 {
        (header.chars().count() + 2).max(14) as f64
    }
}

pub const SUMMARY_HEADERS: &[&str] = &["Metric", "Value"];

pub const ROOM_BREAKDOWN_HEADERS: &[&str] = &[
    "Room ID",
    "Name",
    "L (ft)",
    "W (ft)",
    "H (ft)",
    "Doors",
    "# Windows",
    "Finish Type",
    "Gross Area (sf)",
    "Net Area (sf)",
    "Primer (gal)",
    "Finish (gal)",
    "Total (gal)",
    "Rolls",
];

pub const SYSTEM_BREAKDOWN_HEADERS: &[&str] = &[
    "System",
    "Rooms",
    "#",
    "Net Area (sf)",
    "Primer (gal)",
    "Finish (gal)",
    "Total (gal)",
    "Rolls",
];

/// Project totals, one metric per row.
pub fn summary_sheet(summary: &TakeoffSummary) -> Sheet {
    let metric = |name: &str, value: f64| vec![Cell::text(name), Cell::Number(value)];
    Sheet {
        name: "Summary",
        headers: SUMMARY_HEADERS,
        rows: vec![
            metric("Total Net Area (sf)", summary.total_net_area.value()),
            metric("Paint – Primer Gallons", summary.paint.primer_gallons.value()),
            metric("Paint – Finish Gallons", summary.paint.finish_gallons.value()),
            metric("Paint – Total Gallons", summary.paint.total_gallons.value()),
            metric("Wallcovering – Rolls", summary.wallcovering.rolls.value()),
            metric("# Paint Rooms", summary.paint.rooms as f64),
            metric("# Wallcovering Rooms", summary.wallcovering.rooms as f64),
        ],
    }
}

/// One row per room.
pub fn room_breakdown_sheet(results: &[TakeoffResult]) -> Sheet {
    let rows = results
        .iter()
        .map(|r| {
            let room = &r.room;
            let paint = r.materials.as_paint();
            let wallcovering = r.materials.as_wallcovering();
            vec![
                Cell::text(&room.id),
                Cell::text(&room.name),
                Cell::Number(room.length),
                Cell::Number(room.width),
                Cell::Number(room.height),
                Cell::Number(room.doors as f64),
                Cell::Number(room.windows as f64),
                Cell::text(r.materials.finish_type().as_str()),
                Cell::Number(r.gross_area.value()),
                Cell::Number(r.net_area.value()),
                Cell::opt(paint.map(|p| p.primer_gallons.value())),
                Cell::opt(paint.map(|p| p.finish_gallons.value())),
                Cell::opt(paint.map(|p| p.total_gallons.value())),
                Cell::opt(wallcovering.map(|w| w.rolls.value())),
            ]
        })
        .collect();

    Sheet {
        name: "Room Breakdown",
        headers: ROOM_BREAKDOWN_HEADERS,
        rows,
    }
}

/// A `paint` row and a `wallcovering` row.
pub fn system_breakdown_sheet(summary: &TakeoffSummary) -> Sheet {
    let paint = &summary.paint;
    let wc = &summary.wallcovering;
    Sheet {
        name: "System Breakdown",
        headers: SYSTEM_BREAKDOWN_HEADERS,
        rows: vec![
            vec![
                Cell::text("paint"),
                Cell::text("rooms"),
                Cell::Number(paint.rooms as f64),
                Cell::Number(paint.net_area.value()),
                Cell::Number(paint.primer_gallons.value()),
                Cell::Number(paint.finish_gallons.value()),
                Cell::Number(paint.total_gallons.value()),
                Cell::Empty,
            ],
            vec![
                Cell::text("wallcovering"),
                Cell::text("rooms"),
                Cell::Number(wc.rooms as f64),
                Cell::Number(wc.net_area.value()),
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Number(wc.rolls.value()),
            ],
        ],
    }
}

/// All three sheets, in workbook order.
pub fn bid_package_sheets(results: &[TakeoffResult]) -> Vec<Sheet> {
    let summary = TakeoffSummary::from_results(results);
    vec![
        summary_sheet(&summary),
        room_breakdown_sheet(results),
        system_breakdown_sheet(&summary),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::process_takeoff;
    use crate::config::TakeoffConfig;
    use crate::extraction::mock_room_extraction;

    fn demo_sheets() -> Vec<Sheet> {
        let data = mock_room_extraction("plan.pdf");
        bid_package_sheets(&process_takeoff(&data, &TakeoffConfig::default()))
    }

    #[test]
    fn test_sheet_order() {
        let names: Vec<_> = demo_sheets().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Summary", "Room Breakdown", "System Breakdown"]);
    }

    #[test]
    fn test_summary_sheet() {
        let sheets = demo_sheets();
        let summary = &sheets[0];
        assert_eq!(summary.rows.len(), 7);
        assert_eq!(summary.rows[0], vec![Cell::text("Total Net Area (sf)"), Cell::Number(4417.0)]);
        assert_eq!(summary.rows[3], vec![Cell::text("Paint – Total Gallons"), Cell::Number(29.68)]);
        assert_eq!(summary.rows[4][1], Cell::Number(15.3));
        assert_eq!(summary.rows[5][1], Cell::Number(7.0));
        assert_eq!(summary.rows[6][1], Cell::Number(1.0));
    }

    #[test]
    fn test_room_breakdown_blanks_missing_fields() {
        let sheets = demo_sheets();
        let rooms = &sheets[1];
        assert_eq!(rooms.rows.len(), 8);
        assert!(rooms.rows.iter().all(|r| r.len() == ROOM_BREAKDOWN_HEADERS.len()));

        let conference = &rooms.rows[0];
        assert_eq!(conference[7], Cell::text("paint"));
        assert_eq!(conference[10], Cell::Number(1.38));
        assert_eq!(conference[13], Cell::Empty);

        let break_room = &rooms.rows[4];
        assert_eq!(break_room[7], Cell::text("wallcovering"));
        assert_eq!(break_room[8], Cell::Number(504.0));
        assert_eq!(break_room[10..13], [Cell::Empty, Cell::Empty, Cell::Empty]);
        assert_eq!(break_room[13], Cell::Number(15.3));
    }

    #[test]
    fn test_system_breakdown() {
        let sheets = demo_sheets();
        let systems = &sheets[2];
        assert_eq!(systems.rows[0][0], Cell::text("paint"));
        assert_eq!(systems.rows[0][2], Cell::Number(7.0));
        assert_eq!(systems.rows[0][3], Cell::Number(3958.0));
        assert_eq!(systems.rows[0][7], Cell::Empty);
        assert_eq!(systems.rows[1][3], Cell::Number(459.0));
        assert_eq!(systems.rows[1][4], Cell::Empty);
    }

    #[test]
    fn test_empty_results_still_produce_all_sheets() {
        let sheets = bid_package_sheets(&[]);
        assert_eq!(sheets.len(), 3);
        assert!(sheets[1].rows.is_empty());
        assert_eq!(sheets[2].rows[0][2], Cell::Number(0.0));
    }

    #[test]
    fn test_column_width() {
        assert_eq!(Sheet::column_width("L (ft)"), 14.0);
        assert_eq!(Sheet::column_width("Gross Area (sf)"), 17.0);
    }
}
