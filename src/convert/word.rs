//! Word document previews.
//!
//! The primary path exports the document to PDF through a scoped
//! automation session and reuses the PDF renderer. When that fails, the
//! fallback pulls paragraphs and tables straight out of the document
//! container. Legacy binary `.doc` files have no container to fall back
//! on and end up as an empty block.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{automation_preview, fit_cell};
use crate::error::Result;
use crate::report::Report;

pub fn append(path: &Path, report: &mut Report) {
    match automation_preview(path, report) {
        Ok(()) => {}
        Err(primary) => {
            log::warn!(
                "PDF export failed for {}: {primary}; extracting content directly",
                path.display()
            );
            if let Err(fallback) = extract_preview(path, report) {
                log::warn!(
                    "direct extraction failed for {}: {fallback}",
                    path.display()
                );
            }
        }
    }
}

/// Fallback path: each paragraph becomes a text block, each table a grid
/// with a spacer after it, in document order.
fn extract_preview(path: &Path, report: &mut Report) -> Result<()> {
    let xml = read_container_entry(path, "word/document.xml")?;
    for block in document_blocks(&xml)? {
        match block {
            DocBlock::Text(text) => report.add_paragraph(&text),
            DocBlock::Grid(rows) => {
                report.add_table(&rows, false);
                report.add_paragraph("");
            }
        }
    }
    Ok(())
}

fn read_container_entry(path: &Path, name: &str) -> Result<String> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;
    let mut entry = archive.by_name(name)?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

#[derive(Debug, PartialEq)]
pub(crate) enum DocBlock {
    Text(String),
    Grid(Vec<Vec<String>>),
}

/// Stream `word/document.xml` and collect top-level paragraphs and tables.
pub(crate) fn document_blocks(xml: &str) -> Result<Vec<DocBlock>> {
    let mut reader = Reader::from_str(xml);

    let mut blocks = Vec::new();
    let mut in_text = false;
    let mut in_cell = false;
    let mut table_depth = 0usize;

    let mut paragraph = String::new();
    let mut cell = String::new();
    let mut row: Vec<String> = Vec::new();
    let mut grid: Vec<Vec<String>> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => {
                    table_depth += 1;
                    if table_depth == 1 {
                        grid.clear();
                    }
                }
                b"tr" if table_depth > 0 => row.clear(),
                b"tc" if table_depth > 0 => {
                    in_cell = true;
                    cell.clear();
                }
                b"p" if !in_cell => paragraph.clear(),
                b"t" => in_text = true,
                b"br" => push_text(&mut paragraph, &mut cell, in_cell, "\n"),
                b"tab" => push_text(&mut paragraph, &mut cell, in_cell, "\t"),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"br" => push_text(&mut paragraph, &mut cell, in_cell, "\n"),
                b"tab" => push_text(&mut paragraph, &mut cell, in_cell, "\t"),
                _ => {}
            },
            Event::Text(e) => {
                if in_text {
                    if let Ok(text) = e.unescape() {
                        push_text(&mut paragraph, &mut cell, in_cell, &text);
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if in_cell {
                        if !cell.is_empty() && !cell.ends_with('\n') {
                            cell.push('\n');
                        }
                    } else {
                        if !paragraph.trim().is_empty() {
                            blocks.push(DocBlock::Text(paragraph.trim().to_string()));
                        }
                        paragraph.clear();
                    }
                }
                b"tc" => {
                    row.push(fit_cell(cell.trim()));
                    in_cell = false;
                }
                b"tr" if table_depth > 0 => grid.push(std::mem::take(&mut row)),
                b"tbl" => {
                    table_depth = table_depth.saturating_sub(1);
                    if table_depth == 0 && !grid.is_empty() {
                        blocks.push(DocBlock::Grid(std::mem::take(&mut grid)));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(blocks)
}

fn push_text(paragraph: &mut String, cell: &mut String, in_cell: bool, text: &str) {
    if in_cell {
        cell.push_str(text);
    } else {
        paragraph.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_collect_paragraph_text() {
        let xml = r#"<w:document xmlns:w="ns"><w:body>
            <w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t> world</w:t></w:r></w:p>
            <w:p><w:r><w:t>Second</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let blocks = document_blocks(xml).unwrap();
        assert_eq!(
            blocks,
            vec![
                DocBlock::Text("Hello world".to_string()),
                DocBlock::Text("Second".to_string()),
            ]
        );
    }

    #[test]
    fn test_blocks_collect_table_grid() {
        let xml = r#"<w:document xmlns:w="ns"><w:body>
            <w:tbl>
                <w:tr>
                    <w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p></w:tc>
                    <w:tc><w:p><w:r><w:t>b</w:t></w:r></w:p></w:tc>
                </w:tr>
                <w:tr>
                    <w:tc><w:p><w:r><w:t>c</w:t></w:r></w:p></w:tc>
                    <w:tc><w:p/></w:tc>
                </w:tr>
            </w:tbl>
        </w:body></w:document>"#;
        let blocks = document_blocks(xml).unwrap();
        assert_eq!(
            blocks,
            vec![DocBlock::Grid(vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), String::new()],
            ])]
        );
    }

    #[test]
    fn test_blocks_skip_empty_paragraphs() {
        let xml = r#"<w:document xmlns:w="ns"><w:body>
            <w:p/>
            <w:p><w:r><w:t>kept</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let blocks = document_blocks(xml).unwrap();
        assert_eq!(blocks, vec![DocBlock::Text("kept".to_string())]);
    }
}
