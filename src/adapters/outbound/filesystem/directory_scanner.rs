use crate::bom_construction::services::name_version;
use crate::ports::outbound::ArtifactScanner;
use crate::shared::error::BomError;
use crate::shared::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const LIBRARY_SUFFIXES: [&str; 4] = [".dylib", ".so", ".a", ".dll"];
const LIBRARY_INFIXES: [&str; 2] = [".so.", ".a."];

/// DirectoryScanner adapter finding native libraries and archives in a tree
///
/// Symbolic links are not followed, so a link farm cannot make the walk
/// loop or escape the root.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryScanner;

impl DirectoryScanner {
    pub fn new() -> Self {
        Self
    }

    /// Whether a file name looks like a library or an archive worth identifying.
    pub fn is_candidate(file_name: &str) -> bool {
        let lower = file_name.to_ascii_lowercase();
        LIBRARY_SUFFIXES.iter().any(|s| lower.ends_with(s))
            || LIBRARY_INFIXES.iter().any(|s| lower.contains(s))
            || name_version::is_archive(Path::new(file_name))
    }
}

impl ArtifactScanner for DirectoryScanner {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(BomError::InvalidScanPath {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            }
            .into());
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if Self::is_candidate(&name) {
                debug!(path = %entry.path().display(), "scan candidate");
                found.push(entry.into_path());
            }
        }
        found.sort();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_candidate() {
        for name in [
            "libpng.so",
            "libpng.so.1.6.37",
            "libpng.16.dylib",
            "libz.a",
            "zlib1.DLL",
            "libfoo.a.1",
            "zlib-1.2.11.tar.gz",
            "boost.7z",
        ] {
            assert!(DirectoryScanner::is_candidate(name), "{}", name);
        }
        for name in ["README.md", "main.c", "libpng.pc", "Makefile", "solver"] {
            assert!(!DirectoryScanner::is_candidate(name), "{}", name);
        }
    }

    #[test]
    fn test_scan_finds_nested_libraries_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("deps/lib");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("libz.so.1.2.11"), "").unwrap();
        fs::write(temp_dir.path().join("libpng.a"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let found = DirectoryScanner::new().scan(temp_dir.path()).unwrap();
        assert_eq!(
            found,
            vec![nested.join("libz.so.1.2.11"), temp_dir.path().join("libpng.a")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_does_not_follow_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("libout.so.1.0.0"), "").unwrap();
        std::os::unix::fs::symlink(outside.path(), temp_dir.path().join("linked")).unwrap();

        let found = DirectoryScanner::new().scan(temp_dir.path()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_scan_rejects_missing_root() {
        let err = DirectoryScanner::new()
            .scan(Path::new("/nonexistent/scan/root"))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid scan path"));
    }
}
