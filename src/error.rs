//! Error types for the docsnap library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docsnap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a preview report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The scan root is missing or not a directory.
    #[error("input is not a directory: {0}")]
    InputNotADirectory(PathBuf),

    /// A per-file conversion failed. Never aborts the run.
    #[error("conversion failed: {0}")]
    Conversion(String),

    /// Every configured text encoding failed to decode the file.
    #[error("no configured encoding could decode the file")]
    EncodingExhausted,

    /// The office automation session could not be acquired or its
    /// export step failed.
    #[error("office automation error: {0}")]
    Office(String),

    /// Rasterizer or image codec failure.
    #[error("render error: {0}")]
    Render(String),

    /// Error building or packing the output document.
    #[error("document error: {0}")]
    Document(String),

    /// Error reading a ZIP container.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// The report could not be written to the requested location or
    /// the fallback location. Fatal.
    #[error("failed to save report to {primary} and fallback {fallback}: {source}")]
    SaveFailed {
        primary: PathBuf,
        fallback: PathBuf,
        source: io::Error,
    },
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Render(err.to_string())
    }
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::Conversion(err.to_string())
    }
}
