//! # HTML Preview
//!
//! A single self-contained HTML page for reviewing a takeoff in a browser:
//! the floor-plan diagram inside a framed container, a caption, and the room
//! breakdown table. No scripts, no external assets.

use std::fmt::Write;

use crate::calculator::TakeoffResult;
use crate::config::TakeoffConfig;
use crate::finish_systems::Materials;
use crate::floor_plan::{escape_xml, render_floor_plan_svg, SvgSizing, SVG_W};
use crate::rooms::RoomsData;

/// Shown in place of the diagram when there is nothing to draw
pub const NO_ROOMS_MESSAGE: &str = "No rooms available for visualization.";

const CAPTION: &str = "Pastel blue = Paint • Pastel green = Wallcovering • Hover rooms for details";

const TABLE_HEADERS: [&str; 14] = [
    "Room ID",
    "Name",
    "L",
    "W",
    "H",
    "Doors",
    "Windows",
    "Finish",
    "Gross Area",
    "Net Area",
    "Primer (gal)",
    "Finish (gal)",
    "Total (gal)",
    "Rolls",
];

const STYLE: &str = "\
body { font-family: Inter, system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; color: #222; margin: 24px; }
h1 { font-size: 22px; }
h2 { font-size: 17px; margin-top: 28px; }
.caption { color: #666; font-size: 13px; }
table { border-collapse: collapse; font-size: 13px; }
th, td { border: 1px solid #ddd; padding: 4px 8px; }
th { background: #ddd; }
td.num { text-align: right; }";

fn fit_container(svg: &str) -> String {
    format!(
        r#"<div style="width: min(96vw, 1700px); margin: 0 auto; border-radius: 12px; padding: 20px; background: #ffffff; border: 1px solid #d5d5d5; box-shadow: 0 6px 18px rgba(15, 23, 42, 0.08);">
<div style="display:flex; justify-content:center;">
{svg}
</div>
</div>"#
    )
}

fn scroll_container(svg: &str) -> String {
    format!(
        r#"<div style="max-width: 100%; overflow-x: auto; border-radius: 12px; padding: 16px; background: #ffffff; border: 1px solid #e0e0e0; box-shadow: 0 4px 12px rgba(15, 23, 42, 0.05);">
<div style="min-width: {SVG_W}px; margin: 0 auto; display:flex; justify-content:center;">
{svg}
</div>
</div>"#
    )
}

fn cell(out: &mut String, text: &str) {
    let _ = write!(out, "<td>{}</td>", escape_xml(text));
}

fn num_cell(out: &mut String, value: Option<f64>) {
    match value {
        Some(v) => {
            let _ = write!(out, r#"<td class="num">{v}</td>"#);
        }
        None => out.push_str("<td></td>"),
    }
}

fn breakdown_table(out: &mut String, results: &[TakeoffResult]) {
    out.push_str("<table>\n<thead><tr>");
    for header in TABLE_HEADERS {
        let _ = write!(out, "<th>{header}</th>");
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for result in results {
        let room = &result.room;
        out.push_str("<tr>");
        cell(out, &room.id);
        cell(out, &room.name);
        num_cell(out, Some(room.length));
        num_cell(out, Some(room.width));
        num_cell(out, Some(room.height));
        num_cell(out, Some(room.doors as f64));
        num_cell(out, Some(room.windows as f64));
        cell(out, result.materials.finish_type().as_str());
        num_cell(out, Some(result.gross_area.value()));
        num_cell(out, Some(result.net_area.value()));

        let (primer, finish, total, rolls) = match &result.materials {
            Materials::Paint(p) => (
                Some(p.primer_gallons.value()),
                Some(p.finish_gallons.value()),
                Some(p.total_gallons.value()),
                None,
            ),
            Materials::Wallcovering(w) => (None, None, None, Some(w.rolls.value())),
        };
        num_cell(out, primer);
        num_cell(out, finish);
        num_cell(out, total);
        num_cell(out, rolls);
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

/// Render the preview page.
///
/// With `fit_to_screen` the diagram scales to the container width; otherwise
/// it keeps its pixel size inside a horizontally scrolling frame.
pub fn render_preview_html(
    rooms_data: &RoomsData,
    results: &[TakeoffResult],
    config: &TakeoffConfig,
    fit_to_screen: bool,
) -> String {
    let sizing = if fit_to_screen {
        SvgSizing::Responsive
    } else {
        SvgSizing::Fixed
    };

    let title = match (&rooms_data.project, &rooms_data.floor) {
        (Some(p), Some(f)) => format!("{p} • {f}"),
        (Some(p), None) => p.clone(),
        (None, Some(f)) => f.clone(),
        (None, None) => "PaintPilot Takeoff".to_string(),
    };

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_xml(&title));
    let _ = writeln!(out, "<style>\n{STYLE}\n</style>\n</head>\n<body>");
    let _ = writeln!(out, "<h1>{}</h1>", escape_xml(&title));

    out.push_str("<h2>Floor Plan Preview</h2>\n");
    match render_floor_plan_svg(rooms_data, &config.openings, sizing) {
        Some(svg) => {
            let container = if fit_to_screen {
                fit_container(&svg)
            } else {
                scroll_container(&svg)
            };
            out.push_str(&container);
            let _ = writeln!(out, "\n<p class=\"caption\">{CAPTION}</p>");
        }
        None => {
            let _ = writeln!(out, "<p class=\"caption\">{NO_ROOMS_MESSAGE}</p>");
        }
    }

    out.push_str("<h2>Room Breakdown</h2>\n");
    breakdown_table(&mut out, results);
    out.push_str("</body>\n</html>\n");
    out
}
