//! Asset directory scanning
//!
//! Enumerates the files that make up the bundle. The scan is deliberately
//! shallow: one directory, one extension, regular files only.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BundleResult;

/// A web asset slated for embedding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    /// Filename including extension (`index.html`)
    pub name: String,
    /// Path to the file on disk
    pub path: PathBuf,
}

/// Enumerate asset files with `extension` directly inside `dir`.
///
/// Results are sorted by filename so generated output is reproducible
/// byte-for-byte regardless of filesystem enumeration order. A missing
/// directory yields an empty set rather than an error, so a project without
/// assets still builds.
pub fn scan_assets(dir: &Path, extension: &str) -> BundleResult<Vec<AssetFile>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut assets = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e == extension)
            .unwrap_or(false);
        if !matches {
            continue;
        }
        // A filename that is not valid UTF-8 cannot name a constant.
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            assets.push(AssetFile {
                name: name.to_string(),
                path,
            });
        }
    }

    assets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let assets = scan_assets(&dir.path().join("web"), "html").unwrap();
        assert!(assets.is_empty());
    }

    #[test]
    fn test_scan_filters_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html>").unwrap();
        fs::write(dir.path().join("style.css"), "body {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "todo").unwrap();

        let assets = scan_assets(dir.path(), "html").unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].name, "index.html");
    }

    #[test]
    fn test_scan_is_not_recursive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html>").unwrap();
        fs::create_dir(dir.path().join("partials")).unwrap();
        fs::write(dir.path().join("partials").join("nav.html"), "<nav>").unwrap();

        let assets = scan_assets(dir.path(), "html").unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].name, "index.html");
    }

    #[test]
    fn test_scan_skips_directories_with_matching_extension() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("weird.html")).unwrap();
        fs::write(dir.path().join("real.html"), "<html>").unwrap();

        let assets = scan_assets(dir.path(), "html").unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].name, "real.html");
    }

    #[test]
    fn test_scan_sorts_by_filename() {
        let dir = tempdir().unwrap();
        for name in ["zeta.html", "alpha.html", "midway.html"] {
            fs::write(dir.path().join(name), "<html>").unwrap();
        }

        let assets = scan_assets(dir.path(), "html").unwrap();
        let names: Vec<_> = assets.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["alpha.html", "midway.html", "zeta.html"]);
    }

    #[test]
    fn test_scan_extension_match_is_case_sensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("upper.HTML"), "<html>").unwrap();
        fs::write(dir.path().join("lower.html"), "<html>").unwrap();

        let assets = scan_assets(dir.path(), "html").unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].name, "lower.html");
    }
}
