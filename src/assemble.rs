//! Directory traversal and report assembly.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::classify::classify;
use crate::convert;
use crate::error::{Error, Result};
use crate::office::OfficeSession;
use crate::report::Report;

/// Title of the generated document.
const REPORT_TITLE: &str = "Document Preview Report";

/// Outcome of a report generation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Files that produced a preview section.
    pub rendered: usize,
    /// Files skipped because their extension is unrecognized.
    pub skipped: usize,
    /// Where the report was actually written (the fallback location when
    /// the requested one was not writable).
    pub output: PathBuf,
}

/// Walk `input_dir`, preview every recognized file, and write the
/// consolidated report to `output`.
///
/// Files are visited in sorted traversal order, one at a time. A file
/// that fails to convert is logged and leaves an empty or diagnostic
/// block; only a save failure at both the requested and the fallback
/// location aborts the run.
///
/// # Example
///
/// ```no_run
/// let summary = docsnap::generate_report("scans".as_ref(), "report.docx".as_ref())?;
/// println!("{} files previewed", summary.rendered);
/// # Ok::<(), docsnap::Error>(())
/// ```
pub fn generate_report(input_dir: &Path, output: &Path) -> Result<RunSummary> {
    if !input_dir.is_dir() {
        return Err(Error::InputNotADirectory(input_dir.to_path_buf()));
    }

    let mut report = Report::new(REPORT_TITLE);
    let mut skipped = 0usize;

    for entry in WalkDir::new(input_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        match classify(path) {
            Some(kind) => {
                log::debug!("previewing {} as {kind}", path.display());
                report.begin_section(path);
                convert::append_preview(kind, path, &mut report);
            }
            None => {
                log::debug!("skipping unrecognized file {}", path.display());
                skipped += 1;
            }
        }
    }

    report.append_index();
    let rendered = report.entries().len();
    let written = report.save(output)?;

    refresh_toc(&written);

    Ok(RunSummary {
        rendered,
        skipped,
        output: written,
    })
}

/// Ask the external editor to recompute the TOC field in the saved file.
/// Best-effort: a missing or failing converter leaves the field
/// unresolved for the next editor to evaluate.
fn refresh_toc(document: &Path) {
    let refreshed =
        OfficeSession::acquire().and_then(|session| session.refresh_fields(document));
    if let Err(err) = refreshed {
        log::warn!("table of contents refresh skipped: {err}");
    }
}
