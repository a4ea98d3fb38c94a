//! Text and CSV previews with multi-encoding detection.

use std::fs;
use std::path::Path;

use encoding_rs::Encoding;

use super::fit_cell;
use crate::classify::has_extension;
use crate::error::{Error, Result};
use crate::report::Report;

/// Encoding attempt order: UTF-8 first, then the CJK-region legacy
/// encodings, then UTF-16. The first label that decodes the whole file
/// without error wins.
const ENCODING_LABELS: [&str; 6] = ["utf-8", "gbk", "gb2312", "gb18030", "big5", "utf-16"];

/// Maximum lines (or CSV rows) included in a preview.
const MAX_LINES: usize = 10;

pub fn append(path: &Path, report: &mut Report) {
    match preview(path) {
        Ok(TextPreview::Excerpt { text, encoding }) => {
            report.add_paragraph(&text);
            report.add_paragraph(&format!("Detected encoding: {encoding}"));
        }
        Ok(TextPreview::CsvTable { rows, encoding }) => {
            report.add_table(&rows, false);
            report.add_paragraph(&format!(
                "CSV data presented as table (first {MAX_LINES} rows). Detected encoding: {encoding}"
            ));
        }
        Ok(TextPreview::EmptyCsv) => report.add_paragraph("CSV file appears to be empty."),
        Err(Error::EncodingExhausted) => {
            log::warn!(
                "could not decode {} with any configured encoding",
                path.display()
            );
            report.add_paragraph("Could not decode file with any of the attempted encodings.");
        }
        Err(err) => {
            log::warn!("failed to read {}: {err}", path.display());
            report.add_paragraph(&format!("Error processing file: {err}"));
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum TextPreview {
    Excerpt {
        text: String,
        encoding: &'static str,
    },
    CsvTable {
        rows: Vec<Vec<String>>,
        encoding: &'static str,
    },
    EmptyCsv,
}

pub(crate) fn preview(path: &Path) -> Result<TextPreview> {
    let data = fs::read(path)?;
    let (text, encoding) = decode_text(&data).ok_or(Error::EncodingExhausted)?;

    if has_extension(path, "csv") {
        let rows = csv_rows(&text);
        if rows.is_empty() {
            return Ok(TextPreview::EmptyCsv);
        }
        return Ok(TextPreview::CsvTable { rows, encoding });
    }

    let excerpt = text.lines().take(MAX_LINES).collect::<Vec<_>>().join("\n");
    Ok(TextPreview::Excerpt { text: excerpt, encoding })
}

/// Try each configured encoding in order, reporting the label that
/// decoded cleanly.
pub(crate) fn decode_text(data: &[u8]) -> Option<(String, &'static str)> {
    for label in ENCODING_LABELS {
        let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
            continue;
        };
        let (decoded, _, had_errors) = encoding.decode(data);
        if !had_errors {
            return Some((decoded.into_owned(), label));
        }
    }
    None
}

/// Split the first [`MAX_LINES`] lines into a rectangular grid: the first
/// row fixes the column count, short rows pad with blanks, long rows drop
/// the excess.
pub(crate) fn csv_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = text
        .lines()
        .filter(|line| !line.is_empty())
        .take(MAX_LINES)
        .map(|line| line.split(',').map(|cell| fit_cell(cell.trim())).collect())
        .collect();

    let Some(width) = rows.first().map(Vec::len) else {
        return rows;
    };
    for row in rows.iter_mut().skip(1) {
        row.truncate(width);
        row.resize(width, String::new());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_first() {
        let (text, encoding) = decode_text("plain ascii\n".as_bytes()).unwrap();
        assert_eq!(text, "plain ascii\n");
        assert_eq!(encoding, "utf-8");
    }

    #[test]
    fn test_decode_gbk_on_second_attempt() {
        // "中文" in GBK; invalid as UTF-8, so the second label must win.
        let data = [0xD6, 0xD0, 0xCE, 0xC4];
        let (text, encoding) = decode_text(&data).unwrap();
        assert_eq!(text, "中文");
        assert_eq!(encoding, "gbk");
    }

    #[test]
    fn test_csv_rows_pad_short_rows() {
        let rows = csv_rows("a,b\nc\n");
        assert_eq!(
            rows,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), String::new()],
            ]
        );
    }

    #[test]
    fn test_csv_rows_drop_excess_cells() {
        let rows = csv_rows("a,b\nc,d,e\n");
        assert_eq!(rows[1], vec!["c".to_string(), "d".to_string()]);
    }

    #[test]
    fn test_csv_rows_bounded() {
        let text = (0..25).map(|i| format!("r{i}\n")).collect::<String>();
        assert_eq!(csv_rows(&text).len(), MAX_LINES);
    }

    #[test]
    fn test_preview_excerpt_limits_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.txt");
        let body = (0..40).map(|i| format!("line {i}\n")).collect::<String>();
        fs::write(&path, body).unwrap();

        match preview(&path).unwrap() {
            TextPreview::Excerpt { text, encoding } => {
                assert_eq!(text.lines().count(), MAX_LINES);
                assert_eq!(encoding, "utf-8");
            }
            other => panic!("expected excerpt, got {other:?}"),
        }
    }

    #[test]
    fn test_preview_empty_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();

        assert_eq!(preview(&path).unwrap(), TextPreview::EmptyCsv);
    }

    #[test]
    fn test_preview_csv_detection_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DATA.CSV");
        fs::write(&path, "h1,h2\nv1,v2\n").unwrap();

        assert!(matches!(
            preview(&path).unwrap(),
            TextPreview::CsvTable { .. }
        ));
    }
}
