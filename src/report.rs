//! The report accumulator and output document writer.
//!
//! [`Report`] wraps the output container and is the single mutable
//! accumulator for the whole run: converters append blocks, the assembler
//! appends sections and the index, and [`Report::save`] packs everything
//! once at the end. Anchors placed at section headings pair one-to-one
//! with the hyperlinks emitted by the index.

use std::env;
use std::fs;
use std::io::{Cursor, ErrorKind};
use std::path::{Path, PathBuf};

use docx_rs::{
    BreakType, Docx, Hyperlink, HyperlinkType, Paragraph, Pic, Run, Style, StyleType, Table,
    TableCell, TableOfContents, TableRow,
};

use crate::anchor::{self, absolutize};
use crate::error::{Error, Result};

/// Fixed display width for embedded previews: 6 inches at 96 DPI.
const DISPLAY_WIDTH_PX: u32 = 576;

/// One index line per previewed file, rendered after all preview blocks.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Base file name, used as the link text.
    pub file_name: String,
    /// Anchor placed at the file's section heading.
    pub anchor: String,
    /// File extension with leading dot, lowercased.
    pub extension: String,
    /// Up to three trailing directory segments for disambiguation.
    pub context: String,
    /// Full containing directory.
    pub directory: String,
}

/// The in-progress report document.
pub struct Report {
    docx: Docx,
    bookmark_seq: usize,
    entries: Vec<IndexEntry>,
}

impl Report {
    /// Create a report with its title page: title, a "Table of Contents"
    /// heading and an unresolved TOC field over heading levels 1-3, then
    /// a page break. The field stays dirty until an editor evaluates it.
    pub fn new(title: &str) -> Self {
        let docx = Docx::new()
            .add_style(
                Style::new("Title", StyleType::Paragraph)
                    .name("Title")
                    .size(48)
                    .bold(),
            )
            .add_style(
                Style::new("Heading1", StyleType::Paragraph)
                    .name("Heading 1")
                    .size(32)
                    .bold(),
            )
            .add_style(
                Style::new("Heading2", StyleType::Paragraph)
                    .name("Heading 2")
                    .size(26)
                    .bold(),
            );

        let mut report = Report {
            docx,
            bookmark_seq: 0,
            entries: Vec::new(),
        };

        report.push_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(title))
                .style("Title"),
        );
        report.add_heading("Table of Contents", 1);
        report.with_docx(|d| {
            d.add_table_of_contents(TableOfContents::new().heading_styles_range(1, 3).auto())
        });
        report.add_paragraph("");
        report.page_break();
        report
    }

    /// Append a styled heading.
    pub fn add_heading(&mut self, text: &str, level: u8) {
        let para = Paragraph::new()
            .add_run(Run::new().add_text(text))
            .style(&format!("Heading{level}"));
        self.push_paragraph(para);
    }

    /// Append a heading wrapped in a bookmark so index links can target it.
    pub fn anchored_heading(&mut self, text: &str, anchor: &str) {
        self.bookmark_seq += 1;
        let id = self.bookmark_seq;
        let para = Paragraph::new()
            .add_bookmark_start(id, anchor)
            .add_run(Run::new().add_text(text))
            .add_bookmark_end(id)
            .style("Heading2");
        self.push_paragraph(para);
    }

    /// Append a plain paragraph. An empty string yields a spacer.
    pub fn add_paragraph(&mut self, text: &str) {
        self.push_paragraph(Paragraph::new().add_run(Run::new().add_text(text)));
    }

    /// Append a grid table. With `header` set, the first row renders bold.
    pub fn add_table(&mut self, rows: &[Vec<String>], header: bool) {
        if rows.is_empty() {
            return;
        }
        let mut table = Table::new(vec![]);
        for (ri, row) in rows.iter().enumerate() {
            let mut cells = Vec::with_capacity(row.len());
            for value in row {
                let mut run = Run::new().add_text(value.as_str());
                if header && ri == 0 {
                    run = run.bold();
                }
                cells.push(TableCell::new().add_paragraph(Paragraph::new().add_run(run)));
            }
            table = table.add_row(TableRow::new(cells));
        }
        self.with_docx(|d| d.add_table(table));
    }

    /// Embed an image at the fixed 6-inch display width, preserving the
    /// source aspect ratio.
    pub fn add_picture(&mut self, bytes: Vec<u8>, width_px: u32, height_px: u32) {
        if width_px == 0 || height_px == 0 {
            return;
        }
        let scaled_height =
            ((height_px as u64 * DISPLAY_WIDTH_PX as u64) / width_px as u64) as u32;
        let pic = Pic::new_with_dimensions(bytes, DISPLAY_WIDTH_PX, scaled_height);
        self.push_paragraph(Paragraph::new().add_run(Run::new().add_image(pic)));
    }

    /// Append a paragraph holding a single link to a placed anchor.
    pub fn internal_link(&mut self, display_text: &str, anchor: &str) {
        let link =
            Hyperlink::new(anchor, HyperlinkType::Anchor).add_run(link_run(display_text));
        self.push_paragraph(Paragraph::new().add_hyperlink(link));
    }

    /// Append a paragraph holding a single link to an external resource.
    pub fn external_link(&mut self, text: &str, url: &str) {
        let link = Hyperlink::new(url, HyperlinkType::External).add_run(link_run(text));
        self.push_paragraph(Paragraph::new().add_hyperlink(link));
    }

    /// Append a page break.
    pub fn page_break(&mut self) {
        self.push_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)));
    }

    /// Open a file's section: anchored heading with the path context in
    /// brackets, followed by a location line. Records the matching index
    /// entry, so an entry exists exactly when its anchor was placed.
    pub fn begin_section(&mut self, path: &Path) -> String {
        let anchor = anchor::mint(path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let context = anchor::path_context(path);
        let directory = path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        self.anchored_heading(&format!("{file_name} [{context}]"), &anchor);
        self.add_paragraph(&format!("Location: {directory}"));

        self.entries.push(IndexEntry {
            file_name,
            anchor: anchor.clone(),
            extension,
            context,
            directory,
        });
        anchor
    }

    /// Index entries recorded so far, in discovery order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Append the "File Index" section: one linked line per previewed
    /// file, in discovery order.
    pub fn append_index(&mut self) {
        self.add_heading("File Index", 1);
        let entries = std::mem::take(&mut self.entries);
        for entry in &entries {
            let link = Hyperlink::new(entry.anchor.as_str(), HyperlinkType::Anchor)
                .add_run(link_run(&entry.file_name));
            let para = Paragraph::new()
                .add_hyperlink(link)
                .add_run(
                    Run::new().add_text(format!(" ({}) - {}", entry.extension, entry.context)),
                )
                .add_run(
                    Run::new()
                        .add_break(BreakType::TextWrapping)
                        .add_text(format!("    Location: {}", entry.directory)),
                );
            self.push_paragraph(para);
        }
        self.entries = entries;
    }

    /// Pack the document and write it to `output` (resolved to an
    /// absolute path first).
    ///
    /// A permission failure at the requested location retries once at
    /// `report_<file-name>` in the current working directory; if that
    /// write also fails the error is fatal. Returns the path actually
    /// written.
    pub fn save(self, output: &Path) -> Result<PathBuf> {
        let output = absolutize(output)?;
        let mut cursor = Cursor::new(Vec::new());
        self.docx
            .build()
            .pack(&mut cursor)
            .map_err(|e| Error::Document(e.to_string()))?;
        let bytes = cursor.into_inner();

        match fs::write(&output, &bytes) {
            Ok(()) => Ok(output),
            Err(err) if err.kind() == ErrorKind::PermissionDenied => {
                let fallback = fallback_path(&output, &env::current_dir()?);
                log::warn!(
                    "permission denied writing {}; retrying at {}",
                    output.display(),
                    fallback.display()
                );
                match fs::write(&fallback, &bytes) {
                    Ok(()) => Ok(fallback),
                    Err(second) => Err(Error::SaveFailed {
                        primary: output,
                        fallback,
                        source: second,
                    }),
                }
            }
            Err(err) => Err(Error::Io(err)),
        }
    }

    fn push_paragraph(&mut self, para: Paragraph) {
        self.with_docx(|d| d.add_paragraph(para));
    }

    fn with_docx<F: FnOnce(Docx) -> Docx>(&mut self, f: F) {
        let docx = std::mem::replace(&mut self.docx, Docx::new());
        self.docx = f(docx);
    }
}

fn link_run(text: &str) -> Run {
    Run::new().add_text(text).color("0563C1").underline("single")
}

/// Compose the retry location for a report that could not be written:
/// `report_<file-name>` in the working directory.
pub(crate) fn fallback_path(output: &Path, cwd: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    cwd.join(format!("report_{name}"))
}
