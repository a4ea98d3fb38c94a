//! Per-category preview converters.
//!
//! Every converter appends its preview to the report and isolates its own
//! failures: a file that cannot be converted logs a warning and leaves an
//! empty or diagnostic block, never aborting the run. Converters with an
//! automation-backed primary path inspect that outcome explicitly and
//! only then attempt their fallback.

mod excel;
mod image;
mod pdf;
mod text;
mod word;

use std::path::Path;

use unicode_width::UnicodeWidthChar;

use crate::classify::FileKind;
use crate::error::Result;
use crate::office::OfficeSession;
use crate::report::Report;

/// Maximum display width of a single preview table cell, in columns.
const MAX_CELL_WIDTH: usize = 120;

/// Dispatch a file to its category's converter.
pub fn append_preview(kind: FileKind, path: &Path, report: &mut Report) {
    match kind {
        FileKind::Pdf => pdf::append(path, report),
        FileKind::Word => word::append(path, report),
        FileKind::Excel => excel::append(path, report),
        FileKind::Image => image::append(path, report),
        FileKind::Text => text::append(path, report),
    }
}

/// Shared primary path for office documents: a fresh automation session
/// exports the file to PDF and the PDF renderer produces the preview.
/// The session and the exported file are released when this returns,
/// on every path.
fn automation_preview(path: &Path, report: &mut Report) -> Result<()> {
    let session = OfficeSession::acquire()?;
    let outdir = tempfile::tempdir()?;
    let exported = session.export_pdf(path, outdir.path())?;
    let page = pdf::render_first_page(&exported)?;
    report.add_picture(page.png, page.width, page.height);
    Ok(())
}

/// Bound a cell's text to [`MAX_CELL_WIDTH`] display columns.
pub(crate) fn fit_cell(value: &str) -> String {
    let mut width = 0usize;
    let mut out = String::new();
    for ch in value.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > MAX_CELL_WIDTH {
            out.push('…');
            return out;
        }
        width += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_cell_passes_short_values() {
        assert_eq!(fit_cell("a"), "a");
        assert_eq!(fit_cell(""), "");
    }

    #[test]
    fn test_fit_cell_bounds_long_values() {
        let long = "x".repeat(500);
        let fitted = fit_cell(&long);
        assert!(fitted.ends_with('…'));
        assert_eq!(fitted.chars().count(), MAX_CELL_WIDTH + 1);
    }

    #[test]
    fn test_fit_cell_counts_wide_chars() {
        // CJK characters occupy two columns each.
        let wide = "中".repeat(100);
        let fitted = fit_cell(&wide);
        assert!(fitted.chars().count() <= MAX_CELL_WIDTH / 2 + 1);
    }
}
