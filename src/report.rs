//! XLSX report writer.
//!
//! Lays the report rows out on a single worksheet: a bold header in row 1,
//! one publication per row below it, a wide title column, auto-sized columns
//! B–I and an auto-filter over B–I. The workbook is rendered in memory and
//! swapped into place with a temp-file rename, so a failed run never leaves
//! a half-written report behind.

use crate::error::{ReportError, Result};
use crate::model::Scalar;
use crate::transform::ReportRow;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Header labels for columns A–I.
pub const HEADERS: [&str; 9] = [
    "Назва",
    "Тип",
    "Scopus",
    "WoS",
    "Країна",
    "Рік публікації",
    "Автор",
    "Факультет",
    "Кафедра",
];

/// First column covered by the auto-filter (B).
const FILTER_FIRST_COL: ColNum = 1;
/// Last report column (I).
const LAST_COL: ColNum = (HEADERS.len() - 1) as ColNum;
/// Columns holding newline-joined lists (G–I).
const LIST_COLS: std::ops::RangeInclusive<ColNum> = 6..=8;

/// Worksheet layout settings.
#[derive(Debug, Clone)]
pub struct ReportLayout {
    /// Width of the title column (A), in characters
    pub title_width: f64,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self { title_width: 100.0 }
    }
}

/// A single cell value of a data row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Bool(bool),
    Number(f64),
}

/// Cells for columns A–I of `row`.
pub fn row_cells(row: &ReportRow) -> [Cell<'_>; 9] {
    let year = match &row.year {
        Scalar::Integer(n) => Cell::Number(*n as f64),
        Scalar::Float(n) => Cell::Number(*n),
        Scalar::Text(s) => Cell::Text(s),
    };

    [
        Cell::Text(&row.title),
        Cell::Text(&row.work_type),
        Cell::Bool(row.scopus_indexed),
        Cell::Bool(row.wos_indexed),
        Cell::Text(&row.country),
        year,
        Cell::Text(&row.author_names),
        Cell::Text(&row.faculty_names),
        Cell::Text(&row.department_names),
    ]
}

/// Zero-based `(first_row, first_col, last_row, last_col)` of the auto-filter.
///
/// Spans B1 through I(1 + row_count).
pub fn autofilter_range(row_count: usize) -> (RowNum, ColNum, RowNum, ColNum) {
    (0, FILTER_FIRST_COL, row_count as RowNum, LAST_COL)
}

fn fill_worksheet(
    worksheet: &mut Worksheet,
    rows: &[ReportRow],
    layout: &ReportLayout,
) -> Result<()> {
    let header_format = Format::new().set_bold();
    let list_format = Format::new().set_text_wrap();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as ColNum, *header, &header_format)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let excel_row = (idx + 1) as RowNum;
        for (col, cell) in row_cells(row).into_iter().enumerate() {
            let col = col as ColNum;
            match cell {
                Cell::Text(s) if LIST_COLS.contains(&col) => {
                    worksheet.write_string_with_format(excel_row, col, s, &list_format)?;
                }
                Cell::Text(s) => {
                    worksheet.write_string(excel_row, col, s)?;
                }
                Cell::Bool(b) => {
                    worksheet.write_boolean(excel_row, col, b)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(excel_row, col, n)?;
                }
            }
        }
    }

    // Autofit everything, then pin the title column.
    worksheet.autofit();
    worksheet.set_column_width(0, layout.title_width)?;

    let (first_row, first_col, last_row, last_col) = autofilter_range(rows.len());
    worksheet.autofilter(first_row, first_col, last_row, last_col)?;

    Ok(())
}

/// Build the report workbook in memory.
pub fn build_workbook(rows: &[ReportRow], layout: &ReportLayout) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    fill_worksheet(worksheet, rows, layout)?;
    Ok(workbook)
}

/// Render the report to XLSX bytes.
pub fn render_report(rows: &[ReportRow], layout: &ReportLayout) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(rows, layout)?;
    Ok(workbook.save_to_buffer()?)
}

/// Write the report to `destination` with the default layout.
pub fn write_report(rows: &[ReportRow], destination: &Path) -> Result<()> {
    write_report_with(rows, destination, &ReportLayout::default())
}

/// Write the report to `destination`.
///
/// The file is written next to `destination` under a temporary name and
/// renamed over it once complete. A new report gets the usual umask-derived
/// mode; an existing one keeps its permissions.
pub fn write_report_with(
    rows: &[ReportRow],
    destination: &Path,
    layout: &ReportLayout,
) -> Result<()> {
    let bytes = render_report(rows, layout)?;
    debug!(bytes = bytes.len(), rows = rows.len(), "Rendered workbook");

    let output_error = |source: std::io::Error| ReportError::OutputWrite {
        path: destination.to_path_buf(),
        source,
    };

    let dir = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = create_staging_file(dir, destination).map_err(output_error)?;
    tmp.write_all(&bytes).map_err(output_error)?;
    tmp.as_file().sync_all().map_err(output_error)?;
    tmp.persist(destination).map_err(|e| output_error(e.error))?;

    info!(path = %destination.display(), rows = rows.len(), "Saved report");
    Ok(())
}

/// Temp file in `dir` carrying the permissions `destination` should end up with.
fn create_staging_file(dir: &Path, destination: &Path) -> std::io::Result<NamedTempFile> {
    #[allow(unused_mut)]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Leave the final mode to the umask, as for a plain create.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir)?;

    if let Ok(existing) = std::fs::metadata(destination) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    Ok(tmp)
}
