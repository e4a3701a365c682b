//! # PDF Bid Report
//!
//! Renders a takeoff to a printable bid summary using Typst.
//!
//! ## Architecture
//!
//! - The page setup and title block are an embedded Typst template
//! - Tables are generated from the same [`Sheet`]s as the workbook, so the
//!   PDF and the spreadsheet never disagree
//! - The floor-plan SVG is served to Typst as a virtual file
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use takeoff_core::calculator::process_takeoff;
//! use takeoff_core::config::TakeoffConfig;
//! use takeoff_core::extraction::mock_room_extraction;
//! use takeoff_core::pdf::render_bid_pdf;
//!
//! let data = mock_room_extraction("plans.pdf");
//! let config = TakeoffConfig::default();
//! let results = process_takeoff(&data, &config);
//! let pdf_bytes = render_bid_pdf(&data, &results, &config).unwrap();
//! std::fs::write("bid_summary.pdf", pdf_bytes).unwrap();
//! ```

use std::fmt::Write;
use std::path::Path;

use chrono::Utc;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculator::TakeoffResult;
use crate::config::TakeoffConfig;
use crate::errors::{CalcError, CalcResult};
use crate::export::{bid_package_sheets, Cell, Sheet};
use crate::floor_plan::{render_floor_plan_svg, SvgSizing};
use crate::rooms::RoomsData;

/// Name the floor plan is visible under inside the Typst world
const FLOOR_PLAN_FILE: &str = "floor_plan.svg";

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world: one source, bundled fonts, and an optional
/// in-memory floor-plan image.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
    floor_plan: Option<Bytes>,
}

impl PdfWorld {
    fn new(source: String, floor_plan_svg: Option<String>) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
            floor_plan: floor_plan_svg.map(|svg| Bytes::new(svg.into_bytes())),
        }
    }

    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        let path = id.vpath().as_rootless_path();
        match &self.floor_plan {
            Some(svg) if path == Path::new(FLOOR_PLAN_FILE) => Ok(svg.clone()),
            _ => Err(FileError::NotFound(path.into())),
        }
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

const BID_TEMPLATE: &str = r##"
#set page(
  paper: "us-letter",
  flipped: true,
  margin: (top: 0.75in, bottom: 0.75in, left: 0.6in, right: 0.6in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[PaintPilot Takeoff]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[{{PROJECT}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 10pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 16pt, radius: 4pt)[
    #text(size: 20pt, weight: "bold")[Paint and Wallcovering Bid Summary]
    #v(4pt)
    #text(size: 14pt)[{{PROJECT}}]
  ]
]

#v(12pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    *Project Information*
    #table(
      columns: (auto, 1fr),
      stroke: none,
      [Project:], [{{PROJECT}}],
      [Floor:], [{{FLOOR}}],
      [Rooms:], [{{ROOM_COUNT}}],
      [Date:], [{{DATE}}],
    )
  ],
  [
    *Assumptions*
    #table(
      columns: (auto, 1fr),
      stroke: none,
      [Door:], [{{DOOR}}],
      [Window:], [{{WINDOW}}],
      [Primer:], [{{PRIMER}}],
      [Finish:], [{{FINISH}}],
      [Wallcovering:], [{{WALLCOVERING}}],
    )
  ],
)
"##;

/// Escape special Typst markup characters
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '/' => "\\/".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

fn typst_cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => format!("[{}]", escape_typst(s)),
        Cell::Number(n) => format!("[{}]", n),
        Cell::Empty => "[]".to_string(),
    }
}

/// Render a sheet as a Typst table with a bold header row
fn typst_table(sheet: &Sheet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n== {}\n", escape_typst(sheet.name));
    let _ = writeln!(
        out,
        "#table(\n  columns: {},\n  inset: 5pt,\n  stroke: 0.5pt,\n  fill: (_, y) => if y == 0 {{ rgb(\"#dddddd\") }},",
        sheet.headers.len()
    );

    let header: Vec<String> = sheet
        .headers
        .iter()
        .map(|h| format!("[*{}*]", escape_typst(h)))
        .collect();
    let _ = writeln!(out, "  table.header({}),", header.join(", "));

    for row in &sheet.rows {
        let cells: Vec<String> = row.iter().map(typst_cell).collect();
        let _ = writeln!(out, "  {},", cells.join(", "));
    }
    out.push_str(")\n");
    out
}

fn coat_text(coats: u32, coverage: f64) -> String {
    format!("{} coat(s) at {} sf\\/gal", coats, coverage)
}

fn build_source(
    rooms_data: &RoomsData,
    results: &[TakeoffResult],
    config: &TakeoffConfig,
    has_floor_plan: bool,
) -> String {
    let openings = &config.openings;
    let paint = &config.finish_systems.paint;
    let project = rooms_data.project.as_deref().unwrap_or("Project");

    let mut source = BID_TEMPLATE
        .replace("{{PROJECT}}", &escape_typst(project))
        .replace("{{FLOOR}}", &escape_typst(rooms_data.floor.as_deref().unwrap_or("Not specified")))
        .replace("{{ROOM_COUNT}}", &results.len().to_string())
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace(
            "{{DOOR}}",
            &format!("{} x {} ft", openings.door.width_ft, openings.door.height_ft),
        )
        .replace(
            "{{WINDOW}}",
            &format!("{} x {} ft", openings.window.width_ft, openings.window.height_ft),
        )
        .replace("{{PRIMER}}", &coat_text(paint.primer.coats, paint.primer.coverage))
        .replace("{{FINISH}}", &coat_text(paint.finish.coats, paint.finish.coverage))
        .replace(
            "{{WALLCOVERING}}",
            &format!("{} sf\\/roll", config.finish_systems.wallcovering.coverage),
        );

    let sheets = bid_package_sheets(results);
    for sheet in &sheets {
        source.push_str(&typst_table(sheet));
    }

    if has_floor_plan {
        source.push_str("\n#pagebreak()\n== Floor Plan\n\n");
        let _ = writeln!(source, "#image(\"{}\", width: 100%)", FLOOR_PLAN_FILE);
    }

    source
}

/// Render the bid summary report.
///
/// The floor plan page is included only when there are rooms to draw.
pub fn render_bid_pdf(
    rooms_data: &RoomsData,
    results: &[TakeoffResult],
    config: &TakeoffConfig,
) -> CalcResult<Vec<u8>> {
    let floor_plan = render_floor_plan_svg(rooms_data, &config.openings, SvgSizing::Fixed);
    let source = build_source(rooms_data, results, config, floor_plan.is_some());

    let world = PdfWorld::new(source, floor_plan);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::RenderError {
            reason: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::RenderError {
            reason: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })?;

    tracing::info!(rooms = results.len(), bytes = pdf_bytes.len(), "Rendered bid PDF");
    Ok(pdf_bytes)
}
