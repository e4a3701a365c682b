//! Excel workbook writer.

use std::path::{Path, PathBuf};

use xlsxwriter::format::{FormatAlignment, FormatColor, FormatPatterns};
use xlsxwriter::{Format, Workbook, XlsxError};

use super::{bid_package_sheets, Cell, Sheet};
use crate::calculator::TakeoffResult;
use crate::errors::{CalcError, CalcResult};
use crate::file_io::ensure_parent_dir;

/// Header cell fill
const HEADER_FILL: u32 = 0xDDDDDD;

fn xlsx_error(e: XlsxError) -> CalcError {
    CalcError::export_error("xlsx", e.to_string())
}

fn header_format() -> Format {
    let mut format = Format::new();
    format
        .set_bold()
        .set_pattern(FormatPatterns::Solid)
        .set_bg_color(FormatColor::Custom(HEADER_FILL))
        .set_align(FormatAlignment::Center);
    format
}

fn write_sheet(workbook: &Workbook, sheet: &Sheet, header: &Format) -> Result<(), XlsxError> {
    let mut worksheet = workbook.add_worksheet(Some(sheet.name))?;

    for (col, title) in sheet.headers.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string(0, col, title, Some(header))?;
        worksheet.set_column(col, col, Sheet::column_width(title), None)?;
    }

    for (i, row) in sheet.rows.iter().enumerate() {
        let row_idx = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) => worksheet.write_string(row_idx, col, s, None)?,
                Cell::Number(n) => worksheet.write_number(row_idx, col, *n, None)?,
                Cell::Empty => {}
            }
        }
    }

    Ok(())
}

/// Write the bid package workbook and return its path.
///
/// Parent directories are created. An existing file is replaced.
pub fn generate_workbook(results: &[TakeoffResult], output_path: &Path) -> CalcResult<PathBuf> {
    ensure_parent_dir(output_path)?;
    let path_str = output_path.to_str().ok_or_else(|| {
        CalcError::export_error("xlsx", format!("Path is not valid UTF-8: {}", output_path.display()))
    })?;

    let workbook = Workbook::new(path_str).map_err(xlsx_error)?;
    let header = header_format();
    for sheet in bid_package_sheets(results) {
        write_sheet(&workbook, &sheet, &header).map_err(xlsx_error)?;
    }
    workbook.close().map_err(xlsx_error)?;

    tracing::info!(path = %output_path.display(), rooms = results.len(), "Wrote bid package workbook");
    Ok(output_path.to_path_buf())
}
