use crate::bom_construction::domain::{LibraryReference, Platform, ResolvedFile};
use crate::shared::error::BomError;
use crate::shared::paths::clean_path;
use crate::shared::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// macOS install-name prefixes that are relative to a search directory
const DYLD_RELATIVE_PREFIXES: [&str; 3] = ["@rpath/", "@loader_path/", "@executable_path/"];

/// PathResolver service locating library files on disk
///
/// A reference that already names a file (`libz.so.1`, `/usr/lib/libpng.a`)
/// is checked as given and then inside each search directory. A bare name
/// (`png`) is globbed as `<dir>/<prefix><name><suffix>*` with the
/// platform's prefix and suffix. Search directories are probed in order and
/// the first existing match wins. Returned paths are lexically cleaned.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver {
    platform: Platform,
}

impl PathResolver {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// Resolves `reference` against `search_paths`
    ///
    /// # Errors
    /// - `BomError::UnsupportedPlatform` (fatal) on Windows
    /// - `BomError::NotFound` when no directory yields a match
    pub fn resolve(
        &self,
        search_paths: &[PathBuf],
        reference: &LibraryReference,
    ) -> Result<ResolvedFile> {
        self.platform.ensure_resolution_supported()?;

        let raw = reference.as_str();
        let not_found = || BomError::NotFound {
            reference: raw.to_string(),
            searched: search_paths.len(),
        };
        if raw.is_empty() {
            return Err(not_found().into());
        }

        let relative = DYLD_RELATIVE_PREFIXES
            .iter()
            .find_map(|prefix| raw.strip_prefix(prefix));

        let found = match relative {
            Some(rest) => Self::find_in_dirs(search_paths, rest),
            None if self.is_literal(raw) => Self::find_literal(search_paths, raw),
            None => self.find_by_name(search_paths, raw),
        };

        match found {
            Some(found) => {
                let path = clean_path(&found);
                debug!(reference = raw, path = %path.display(), "resolved library");
                Ok(ResolvedFile::from_path(path))
            }
            None => Err(not_found().into()),
        }
    }

    fn is_literal(&self, reference: &str) -> bool {
        self.platform.looks_like_library_file(reference) || reference.contains('/')
    }

    /// The reference as given, then joined onto each search directory.
    fn find_literal(search_paths: &[PathBuf], reference: &str) -> Option<PathBuf> {
        let as_given = Path::new(reference);
        if as_given.exists() {
            return Some(as_given.to_path_buf());
        }
        if as_given.is_absolute() {
            return None;
        }
        Self::find_in_dirs(search_paths, reference)
    }

    fn find_in_dirs(search_paths: &[PathBuf], relative: &str) -> Option<PathBuf> {
        search_paths
            .iter()
            .map(|dir| dir.join(relative))
            .find(|candidate| candidate.exists())
    }

    fn find_by_name(&self, search_paths: &[PathBuf], name: &str) -> Option<PathBuf> {
        let file_pattern = format!(
            "{}{}{}*",
            glob::Pattern::escape(self.platform.library_prefix()),
            glob::Pattern::escape(name),
            glob::Pattern::escape(self.platform.library_suffix())
        );

        search_paths.iter().find_map(|dir| {
            let pattern = format!(
                "{}/{}",
                glob::Pattern::escape(&dir.to_string_lossy()),
                file_pattern
            );
            let matches = glob::glob(&pattern).ok()?;
            matches.filter_map(|entry| entry.ok()).find(|p| p.exists())
        })
    }
}
