use std::path::{Component, Path, PathBuf};

/// Lexically cleans `path`: drops `.` segments and folds `dir/..` pairs.
///
/// The filesystem is not consulted, so the last component may still be a
/// symlink. Package databases (`dpkg -S`, `rpm -qf`) only know paths in
/// this form, and compilers report search dirs like
/// `/usr/lib/gcc/x86_64-linux-gnu/12/../../../x86_64-linux-gnu/`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}
