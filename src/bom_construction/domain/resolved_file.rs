use std::fs;
use std::path::{Path, PathBuf};

/// A library located on disk.
///
/// `path` is the nominal location that was found; `symlink_target` is the
/// real file when `path` is a symbolic link. Version numbers are frequently
/// only visible in the target (`libpng.so -> libpng.so.1.2.3`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedFile {
    path: PathBuf,
    symlink_target: Option<PathBuf>,
}

impl ResolvedFile {
    pub fn new(path: PathBuf, symlink_target: Option<PathBuf>) -> Self {
        Self {
            path,
            symlink_target,
        }
    }

    /// Builds a ResolvedFile for an existing path, following it when it is a symlink.
    ///
    /// A dangling or unreadable link leaves `symlink_target` empty; the
    /// nominal path is still usable by filename heuristics.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_symlink = fs::symlink_metadata(&path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        let symlink_target = if is_symlink {
            fs::canonicalize(&path).ok().filter(|target| *target != path)
        } else {
            None
        };
        Self::new(path, symlink_target)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn symlink_target(&self) -> Option<&Path> {
        self.symlink_target.as_deref()
    }

    /// The file whose name best describes the artifact: the symlink target when known.
    pub fn real_path(&self) -> &Path {
        self.symlink_target.as_deref().unwrap_or(&self.path)
    }

    /// Canonical location, equal for every spelling of the same file.
    ///
    /// Falls back to [`Self::real_path`] when the file cannot be canonicalized.
    pub fn identity(&self) -> PathBuf {
        fs::canonicalize(&self.path).unwrap_or_else(|_| self.real_path().to_path_buf())
    }

    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }

    pub fn real_file_name(&self) -> String {
        file_name_of(self.real_path())
    }

    /// Directory containing the nominal path.
    pub fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
