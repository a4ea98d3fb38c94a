//! End-to-end assembly over temporary directory trees.
//!
//! These tests only exercise converters with pure-Rust paths (text, CSV,
//! image) so they pass without LibreOffice or pdfium installed; the
//! office-backed converters are covered by unit tests on their fallback
//! helpers.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use docsnap::{generate_report, Error, Report};

fn write_png(path: &Path) {
    let img = image::RgbaImage::from_pixel(4, 3, image::Rgba([200, 10, 10, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    fs::write(path, buf).unwrap();
}

#[test]
fn generates_report_for_mixed_tree() {
    let root = tempfile::tempdir().unwrap();
    let nested = root.path().join("inbox").join("2024");
    fs::create_dir_all(&nested).unwrap();

    fs::write(root.path().join("notes.txt"), "first line\nsecond line\n").unwrap();
    fs::write(nested.join("table.csv"), "a,b\nc\n").unwrap();
    fs::write(nested.join("ignored.xyz"), b"\x00\x01\x02").unwrap();
    write_png(&nested.join("pixel.png"));

    let out_dir = root.path().join("out");
    fs::create_dir(&out_dir).unwrap();
    let output = out_dir.join("report.docx");

    let summary = generate_report(root.path(), &output).unwrap();

    assert_eq!(summary.rendered, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.output, output);

    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[..2], b"PK", "output must be a zip container");
}

#[test]
fn rejects_missing_input_directory() {
    let err = generate_report(Path::new("/definitely/not/here"), Path::new("r.docx"))
        .unwrap_err();
    assert!(matches!(err, Error::InputNotADirectory(_)));
}

#[test]
fn rejects_file_as_input() {
    let root = tempfile::tempdir().unwrap();
    let file = root.path().join("plain.txt");
    fs::write(&file, "data").unwrap();

    let err = generate_report(&file, Path::new("r.docx")).unwrap_err();
    assert!(matches!(err, Error::InputNotADirectory(_)));
}

#[test]
fn index_entries_match_sections_in_order() {
    let mut report = Report::new("Ordering");
    report.begin_section(Path::new("/scans/alpha/one.txt"));
    report.begin_section(Path::new("/scans/beta/two.csv"));
    report.begin_section(Path::new("/scans/beta/three.pdf"));

    let names: Vec<_> = report
        .entries()
        .iter()
        .map(|e| e.file_name.as_str())
        .collect();
    assert_eq!(names, ["one.txt", "two.csv", "three.pdf"]);

    // Every entry carries the anchor minted for its heading.
    assert!(report
        .entries()
        .iter()
        .all(|e| e.anchor.starts_with("bm_")));
}

#[test]
fn anchor_minting_is_stable_across_calls() {
    let mut report = Report::new("Anchors");
    let first = report.begin_section(Path::new("/a/data.csv"));
    let second = report.begin_section(Path::new("/b/data.csv"));
    // Same base name in different directories collides; a known limitation
    // of base-name-derived anchors.
    assert_eq!(first, second);
}
