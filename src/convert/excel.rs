//! Excel workbook previews.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use super::{automation_preview, fit_cell};
use crate::error::{Error, Result};
use crate::report::Report;

/// Fallback preview bounds: 10 columns, one header row plus 10 data rows.
const MAX_COLUMNS: usize = 10;
const MAX_ROWS: usize = 11;

pub fn append(path: &Path, report: &mut Report) {
    match automation_preview(path, report) {
        Ok(()) => {}
        Err(primary) => {
            log::warn!(
                "PDF export failed for {}: {primary}; reading sheet values directly",
                path.display()
            );
            match sheet_preview(path) {
                Ok(rows) if rows.is_empty() => {
                    report.add_paragraph("Worksheet contains no data.");
                }
                Ok(rows) => report.add_table(&rows, true),
                Err(fallback) => {
                    log::warn!("sheet read failed for {}: {fallback}", path.display());
                    report.add_paragraph(&format!("Failed to read workbook: {fallback}"));
                }
            }
        }
    }
}

/// Read evaluated cell values from the first worksheet, bounded to
/// [`MAX_COLUMNS`] x [`MAX_ROWS`].
fn sheet_preview(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Conversion("workbook has no worksheets".into()))??;
    Ok(bounded_rows(&range))
}

/// Clamp a sheet range to the preview bounds. Empty cells stay blank
/// rather than getting a placeholder.
pub(crate) fn bounded_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let (height, width) = range.get_size();
    let rows = height.min(MAX_ROWS);
    let cols = width.min(MAX_COLUMNS);
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| match range.get((r, c)) {
                    None | Some(Data::Empty) => String::new(),
                    Some(Data::String(text)) => fit_cell(text),
                    Some(value) => fit_cell(&value.to_string()),
                })
                .collect()
        })
        .collect()
}
