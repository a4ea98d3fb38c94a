//! # docsnap
//!
//! Consolidated one-page preview reports for directory trees.
//!
//! docsnap walks a directory, converts each supported file (PDF, Word,
//! Excel, image, text/CSV) into a one-page visual preview, and assembles
//! everything into a single `.docx` report with a table of contents,
//! per-file bookmarks, and a clickable file index.
//!
//! ## Quick Start
//!
//! ```no_run
//! let summary = docsnap::generate_report("scans".as_ref(), "report.docx".as_ref())?;
//! println!(
//!     "previewed {} files ({} skipped) into {}",
//!     summary.rendered,
//!     summary.skipped,
//!     summary.output.display()
//! );
//! # Ok::<(), docsnap::Error>(())
//! ```
//!
//! ## Building blocks
//!
//! ```no_run
//! use docsnap::{classify, FileKind, Report};
//!
//! let mut report = Report::new("Custom Report");
//! let path = std::path::Path::new("scans/invoice.pdf");
//! if classify(path) == Some(FileKind::Pdf) {
//!     report.begin_section(path);
//! }
//! report.append_index();
//! report.save("custom.docx".as_ref())?;
//! # Ok::<(), docsnap::Error>(())
//! ```
//!
//! External conversions (Word/Excel exports and the final TOC field
//! refresh) shell out to LibreOffice in headless mode; PDF pages are
//! rasterized through pdfium. Both are optional at runtime: when a tool
//! is missing the affected converter falls back or logs and moves on.

pub mod anchor;
pub mod assemble;
pub mod classify;
pub mod convert;
pub mod error;
pub mod office;
pub mod report;

// Re-exports
pub use assemble::{generate_report, RunSummary};
pub use classify::{classify, FileKind};
pub use error::{Error, Result};
pub use office::OfficeSession;
pub use report::{IndexEntry, Report};
