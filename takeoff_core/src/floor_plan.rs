//! # Floor Plan Diagram
//!
//! Renders rooms as a schematic SVG. This is not a reconstruction of the real
//! plan: rooms are laid out left to right with word-wrap, each drawn at its
//! real length x width, scaled to fit the canvas.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ ┌──────┐ ┌────────────┐ ┌───┐     Legend     │
//! │ │ 201  │ │    202     │ │203│     ■ Paint    │
//! │ └──────┘ │            │ └───┘     ■ Wallcov. │
//! │          └────────────┘                      │
//! │ ┌────────────────────────┐ ┌──┐              │
//! │ └────────────────────────┘ └──┘              │
//! └──────────────────────────────────────────────┘
//! ```

use std::fmt::Write;

use crate::calculator::{gross_wall_area, net_paintable_area};
use crate::config::StandardOpenings;
use crate::rooms::{FinishType, Room, RoomsData};

/// Canvas width (px)
pub const SVG_W: f64 = 1100.0;
/// Canvas height (px)
pub const SVG_H: f64 = 720.0;
/// Outer margin (px)
pub const MARGIN: f64 = 20.0;
/// Gap between rooms; half of it is applied in layout feet
pub const GAP: f64 = 14.0;
/// Row width (ft) past which the layout wraps
pub const TARGET_WRAP_FEET: f64 = 120.0;
/// Lower bound on px per foot so labels stay legible
pub const SCALE_MIN: f64 = 2.0;

/// Most opening ticks drawn per kind
const MAX_TICKS: i64 = 6;

const ROOM_FILL_PAINT: &str = "#cfe8ff";
const ROOM_FILL_WC: &str = "#d2f2d0";
const ROOM_STROKE: &str = "#666666";
const TEXT_COLOR: &str = "#222222";
const WALL_STROKE: &str = "#111111";
const DOOR_TICK: &str = "#222";
const WINDOW_TICK: &str = "#48a";
const FONT_FAMILY: &str = "Inter, system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif";

/// How the root `<svg>` element is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SvgSizing {
    /// Fixed pixel width and height
    #[default]
    Fixed,
    /// Full container width, aspect ratio kept, capped at 80% viewport height
    Responsive,
}

/// A room placed in layout space (feet).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRoom<'a> {
    pub room: &'a Room,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Result of [`flow_layout`]: placements plus overall extents in feet.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLayout<'a> {
    pub placed: Vec<PlacedRoom<'a>>,
    pub width_feet: f64,
    pub height_feet: f64,
}

/// Shelf-pack rooms into rows, wrapping once a row passes [`TARGET_WRAP_FEET`].
///
/// Length is the plan width and width the plan height. A room that starts a
/// row is never wrapped, however long it is.
pub fn flow_layout(rooms: &[Room]) -> FlowLayout<'_> {
    let half_gap = GAP / 2.0;
    let mut placed = Vec::with_capacity(rooms.len());
    let mut x = 0.0;
    let mut y = 0.0;
    let mut row_h: f64 = 0.0;
    let mut max_w: f64 = 0.0;

    for room in rooms {
        let w = room.length;
        let h = room.width;
        if x > 0.0 && x + w > TARGET_WRAP_FEET {
            max_w = max_w.max(x);
            x = 0.0;
            y += row_h + half_gap;
            row_h = 0.0;
        }

        placed.push(PlacedRoom { room, x, y, w, h });
        x += w + half_gap;
        row_h = row_h.max(h);
    }

    FlowLayout {
        placed,
        width_feet: max_w.max(x),
        height_feet: y + row_h,
    }
}

/// Pixels per foot that fits the layout inside the margins.
pub fn compute_scale(width_feet: f64, height_feet: f64) -> f64 {
    let w_avail = SVG_W - 2.0 * MARGIN;
    let h_avail = SVG_H - 2.0 * MARGIN;
    let sx = w_avail / width_feet.max(1e-6);
    let sy = h_avail / height_feet.max(1e-6);
    sx.min(sy).max(SCALE_MIN)
}

fn room_fill(finish_type: FinishType) -> &'static str {
    match finish_type {
        FinishType::Paint => ROOM_FILL_PAINT,
        FinishType::Wallcovering => ROOM_FILL_WC,
    }
}

/// `"{id} • {net} sf"`, net area to the nearest square foot
fn room_label(room: &Room, openings: &StandardOpenings) -> String {
    let net = net_paintable_area(gross_wall_area(room), room.doors, room.windows, openings);
    format!("{} • {:.0} sf", room.id, net.value())
}

/// Escape text for use in SVG content and attributes.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn svg_rect(out: &mut String, x: f64, y: f64, w: f64, h: f64, fill: &str, stroke: &str, stroke_w: f64) {
    let _ = writeln!(
        out,
        r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{fill}" stroke="{stroke}" stroke-width="{stroke_w}"/>"#
    );
}

fn svg_text(out: &mut String, x: f64, y: f64, text: &str, size: u32, weight: u32, anchor: &str) {
    let _ = writeln!(
        out,
        r#"<text x="{x:.1}" y="{y:.1}" font-size="{size}" font-weight="{weight}" fill="{TEXT_COLOR}" text-anchor="{anchor}" font-family="{FONT_FAMILY}">{}</text>"#,
        escape_xml(text)
    );
}

fn svg_legend(out: &mut String) {
    let x0 = SVG_W - 260.0;
    let y0 = MARGIN + 10.0;
    let _ = writeln!(out, r#"<g transform="translate({x0},{y0})">"#);
    svg_text(out, 80.0, -6.0, "Legend", 13, 600, "start");

    let mut y = 10.0;
    for finish in FinishType::ALL {
        svg_rect(out, 0.0, y, 22.0, 14.0, room_fill(finish), ROOM_STROKE, 1.0);
        svg_text(out, 32.0, y + 11.5, finish.display_name(), 12, 500, "start");
        y += 22.0;
    }
    out.push_str("</g>\n");
}

fn svg_open(out: &mut String, sizing: SvgSizing) {
    match sizing {
        SvgSizing::Fixed => {
            let _ = writeln!(
                out,
                r#"<svg width="{SVG_W}" height="{SVG_H}" viewBox="0 0 {SVG_W} {SVG_H}" xmlns="http://www.w3.org/2000/svg" role="img" aria-label="Floor plan preview">"#
            );
        }
        SvgSizing::Responsive => {
            let _ = writeln!(
                out,
                r#"<svg width="100%" viewBox="0 0 {SVG_W} {SVG_H}" preserveAspectRatio="xMidYMid meet" xmlns="http://www.w3.org/2000/svg" role="img" aria-label="Floor plan preview" style="width:100%; height:auto; display:block; max-height:80vh;">"#
            );
        }
    }
}

/// Diagram title: `"{project} • {floor}"`, trimmed
fn plan_title(rooms_data: &RoomsData) -> String {
    let title = format!(
        "{} • {}",
        rooms_data.project.as_deref().unwrap_or("Project"),
        rooms_data.floor.as_deref().unwrap_or("")
    );
    let title = title.trim();
    if title.is_empty() {
        "Floor Plan Preview".to_string()
    } else {
        title.to_string()
    }
}

/// Render the floor plan, or `None` when there are no rooms to draw.
pub fn render_floor_plan_svg(
    rooms_data: &RoomsData,
    openings: &StandardOpenings,
    sizing: SvgSizing,
) -> Option<String> {
    if rooms_data.rooms.is_empty() {
        return None;
    }

    let layout = flow_layout(&rooms_data.rooms);
    let scale = compute_scale(layout.width_feet, layout.height_feet);
    tracing::debug!(
        rooms = layout.placed.len(),
        width_feet = layout.width_feet,
        height_feet = layout.height_feet,
        scale,
        "Floor plan layout"
    );

    let mut out = String::new();
    svg_open(&mut out, sizing);
    svg_rect(
        &mut out,
        MARGIN,
        MARGIN,
        SVG_W - 2.0 * MARGIN,
        SVG_H - 2.0 * MARGIN,
        "#ffffff",
        WALL_STROKE,
        2.0,
    );

    for p in &layout.placed {
        let room = p.room;
        let x = MARGIN + p.x * scale;
        let y = MARGIN + p.y * scale;
        let w = (p.w * scale).max(1.0);
        let h = (p.h * scale).max(1.0);
        let label = room_label(room, openings);

        out.push_str("<g>\n");
        let _ = writeln!(
            out,
            "<title>{}</title>",
            escape_xml(&format!(
                "{} | {} | {}x{}x{} ft | Doors:{} Windows:{}",
                room.name, label, room.length, room.width, room.height, room.doors, room.windows
            ))
        );
        svg_rect(&mut out, x, y, w, h, room_fill(room.finish_type), ROOM_STROKE, 1.0);

        svg_text(&mut out, x + w / 2.0, y + h / 2.0 - 4.0, &label, 12, 600, "middle");
        svg_text(&mut out, x + w / 2.0, y + h / 2.0 + 12.0, &room.name, 11, 400, "middle");

        // Opening ticks along the top edge: doors first, then windows
        let mut dx = x + 6.0;
        for (count, color) in [(room.doors, DOOR_TICK), (room.windows, WINDOW_TICK)] {
            for _ in 0..count.clamp(0, MAX_TICKS) {
                svg_rect(&mut out, dx, y - 2.0, 6.0, 2.0, color, color, 0.5);
                dx += 10.0;
            }
        }

        out.push_str("</g>\n");
    }

    svg_text(&mut out, MARGIN + 4.0, MARGIN - 6.0, &plan_title(rooms_data), 13, 700, "start");
    svg_legend(&mut out);
    out.push_str("</svg>");

    Some(out)
}
