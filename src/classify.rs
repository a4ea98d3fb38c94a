//! Extension-based classification of scanned files.

use std::path::Path;

/// Categories of files the report can preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// PDF document (.pdf)
    Pdf,
    /// Word document (.doc, .docx)
    Word,
    /// Excel workbook (.xls, .xlsx)
    Excel,
    /// Raster image (.png, .jpg, .jpeg, .gif, .bmp)
    Image,
    /// Plain text or CSV (.txt, .log, .md, .csv)
    Text,
}

impl FileKind {
    /// Returns a human-readable name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            FileKind::Pdf => "PDF Document",
            FileKind::Word => "Word Document",
            FileKind::Excel => "Excel Workbook",
            FileKind::Image => "Image",
            FileKind::Text => "Text File",
        }
    }

    fn from_extension(ext: &str) -> Option<FileKind> {
        match ext {
            "pdf" => Some(FileKind::Pdf),
            "doc" | "docx" => Some(FileKind::Word),
            "xls" | "xlsx" => Some(FileKind::Excel),
            "png" | "jpg" | "jpeg" | "gif" | "bmp" => Some(FileKind::Image),
            "txt" | "log" | "md" | "csv" => Some(FileKind::Text),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classify a path by its extension, case-insensitively.
///
/// Returns `None` for unrecognized extensions; such files are skipped
/// entirely (no heading, no anchor, no index entry).
///
/// # Example
///
/// ```
/// use docsnap::classify::{classify, FileKind};
///
/// assert_eq!(classify("report.PDF".as_ref()), Some(FileKind::Pdf));
/// assert_eq!(classify("archive.tar.gz".as_ref()), None);
/// ```
pub fn classify(path: &Path) -> Option<FileKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    FileKind::from_extension(&ext)
}

/// Check whether a path has the given extension, case-insensitively.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}
