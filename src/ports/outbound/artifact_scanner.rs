use crate::shared::Result;
use std::path::{Path, PathBuf};

/// ArtifactScanner port for discovering library files under a directory
///
/// This port abstracts directory traversal so the scan use case can be
/// exercised without a real file tree.
pub trait ArtifactScanner {
    /// Lists library and archive files below `root`, sorted by path
    ///
    /// # Errors
    /// Returns an error if `root` is not a readable directory
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}
