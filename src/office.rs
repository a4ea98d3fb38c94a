//! Scoped sessions for the external office converter.
//!
//! Word and Excel previews, and the final field refresh, all go through
//! LibreOffice in headless mode. Each [`OfficeSession`] is acquired for a
//! single call and carries its own user-profile directory, so concurrent
//! or crashed conversions never share converter state; the profile is
//! removed when the session drops, on success and failure alike.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::error::{Error, Result};

/// Overrides converter binary discovery.
const BINARY_ENV: &str = "DOCSNAP_SOFFICE";

#[cfg(not(windows))]
const BINARY_NAMES: &[&str] = &["soffice", "libreoffice"];
#[cfg(windows)]
const BINARY_NAMES: &[&str] = &["soffice.exe", "soffice.com"];

/// A single-use handle on the external converter.
pub struct OfficeSession {
    binary: PathBuf,
    profile_dir: TempDir,
}

impl OfficeSession {
    /// Locate the converter binary and create an isolated profile
    /// directory for this session.
    pub fn acquire() -> Result<Self> {
        let binary = locate_binary().ok_or_else(|| {
            Error::Office(format!(
                "no LibreOffice binary found; install it or set {BINARY_ENV}"
            ))
        })?;
        let profile_dir = TempDir::new()
            .map_err(|e| Error::Office(format!("cannot create session profile: {e}")))?;
        Ok(Self {
            binary,
            profile_dir,
        })
    }

    /// Export a document to PDF inside `outdir`, returning the PDF path.
    pub fn export_pdf(&self, input: &Path, outdir: &Path) -> Result<PathBuf> {
        self.convert(input, "pdf", outdir)
    }

    /// Round-trip an already-saved report through the converter so field
    /// codes (the TOC field in particular) get evaluated, then copy the
    /// result back over the original.
    pub fn refresh_fields(&self, document: &Path) -> Result<()> {
        let outdir = tempfile::tempdir()?;
        let refreshed = self.convert(document, "docx", outdir.path())?;
        fs::copy(&refreshed, document)?;
        Ok(())
    }

    fn convert(&self, input: &Path, format: &str, outdir: &Path) -> Result<PathBuf> {
        let output = Command::new(&self.binary)
            .arg("--headless")
            .arg("--norestore")
            .arg(format!(
                "-env:UserInstallation=file://{}",
                self.profile_dir.path().display()
            ))
            .arg("--convert-to")
            .arg(format)
            .arg("--outdir")
            .arg(outdir)
            .arg(input)
            .output()
            .map_err(|e| {
                Error::Office(format!("failed to launch {}: {e}", self.binary.display()))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(Error::Office(if detail.is_empty() {
                format!("conversion to {format} failed")
            } else {
                detail
            }));
        }

        let converted = converted_path(input, format, outdir);
        if !converted.is_file() {
            return Err(Error::Office(format!(
                "converter produced no {format} output for {}",
                input.display()
            )));
        }
        Ok(converted)
    }
}

/// The converter names its output after the input's stem.
fn converted_path(input: &Path, format: &str, outdir: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(format);
    outdir.join(name)
}

fn locate_binary() -> Option<PathBuf> {
    if let Some(path) = env::var_os(BINARY_ENV) {
        let path = PathBuf::from(path);
        if path.is_file() {
            return Some(path);
        }
    }
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        for name in BINARY_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converted_path_uses_input_stem() {
        let path = converted_path(Path::new("/in/Budget Final.xlsx"), "pdf", Path::new("/tmp/x"));
        assert_eq!(path, Path::new("/tmp/x/Budget Final.pdf"));
    }

    #[test]
    fn test_converted_path_docx_roundtrip() {
        let path = converted_path(Path::new("/out/report.docx"), "docx", Path::new("/work"));
        assert_eq!(path, Path::new("/work/report.docx"));
    }
}
