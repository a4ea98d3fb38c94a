//! Anchor minting and path-context derivation.
//!
//! Every previewed file gets a bookmark anchor derived from its base name,
//! and a short "path context" (up to three trailing directory segments)
//! used to tell same-named files apart in headings and index entries.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Prefix applied to every minted anchor.
const ANCHOR_PREFIX: &str = "bm_";

/// Number of trailing directory segments collected for display context.
const CONTEXT_LEVELS: usize = 3;

/// Mint a bookmark anchor for a file.
///
/// The anchor is a pure function of the file's base name: every
/// non-alphanumeric character is replaced by an underscore and a fixed
/// prefix is applied. Calling this twice on the same path within a run
/// yields the same anchor.
///
/// Two files sharing a base name in different directories will collide;
/// the report still renders, but their index links double-target.
pub fn mint(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut anchor = String::with_capacity(ANCHOR_PREFIX.len() + name.len());
    anchor.push_str(ANCHOR_PREFIX);
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            anchor.push(ch);
        } else {
            anchor.push('_');
        }
    }
    anchor
}

/// Derive the display context for a file: up to [`CONTEXT_LEVELS`] trailing
/// directory names of its location, joined most-distant first.
///
/// Stops early at the filesystem root. When no segments collect (the file
/// sits directly under the root), the containing directory string is
/// returned instead.
pub fn path_context(path: &Path) -> String {
    let mut segments: Vec<String> = Vec::with_capacity(CONTEXT_LEVELS);
    let mut dir = path.parent();

    for _ in 0..CONTEXT_LEVELS {
        let Some(current) = dir else { break };
        match current.file_name() {
            Some(name) => segments.push(name.to_string_lossy().into_owned()),
            None => break,
        }
        dir = current.parent();
    }

    if segments.is_empty() {
        return path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
    }

    segments.reverse();
    let mut joined = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            joined.push(MAIN_SEPARATOR);
        }
        joined.push_str(segment);
    }
    joined
}

/// Resolve a path against the current working directory without touching
/// the filesystem.
pub(crate) fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_is_idempotent() {
        let path = Path::new("/scans/q3/Budget Final.xlsx");
        assert_eq!(mint(path), mint(path));
        assert_eq!(mint(path), "bm_Budget_Final_xlsx");
    }

    #[test]
    fn test_mint_depends_only_on_base_name() {
        assert_eq!(
            mint(Path::new("/a/b/notes.txt")),
            mint(Path::new("/x/y/notes.txt"))
        );
    }

    #[test]
    fn test_mint_sanitizes_non_alphanumeric() {
        assert_eq!(mint(Path::new("a b-c.d.txt")), "bm_a_b_c_d_txt");
    }

    #[test]
    fn test_context_at_depth() {
        // Deep file: exactly three trailing segments.
        let path = Path::new("/srv/archive/2024/q3/reports/summary.pdf");
        let expected = format!(
            "2024{sep}q3{sep}reports",
            sep = MAIN_SEPARATOR
        );
        assert_eq!(path_context(path), expected);
    }

    #[test]
    fn test_context_shallow_directory() {
        // One level below the root: the single segment stands alone.
        assert_eq!(path_context(Path::new("/data/file.txt")), "data");
    }

    #[test]
    fn test_context_file_at_root() {
        // Nothing to collect: fall back to the containing directory string.
        assert_eq!(path_context(Path::new("/file.txt")), "/");
    }
}
