use super::{LinkInspector, PathResolver};
use crate::bom_construction::domain::{LibraryReference, ResolvedFile};
use crate::ports::outbound::CommandRunner;
use crate::shared::error::BomError;
use crate::shared::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, warn};

/// TransitiveWalker service discovering every shared library reachable
/// from a seed reference
///
/// The walk is depth-first over an explicit worklist. A visited set owned
/// by one call guarantees termination on cyclic or repeated link graphs:
/// a file is inspected at most once, keyed by its canonical path.
pub struct TransitiveWalker<R: CommandRunner> {
    resolver: PathResolver,
    inspector: LinkInspector<R>,
}

struct WorkItem {
    reference: LibraryReference,
    search_paths: Vec<PathBuf>,
    is_seed: bool,
}

impl<R: CommandRunner> TransitiveWalker<R> {
    pub fn new(resolver: PathResolver, inspector: LinkInspector<R>) -> Self {
        Self {
            resolver,
            inspector,
        }
    }

    /// Files reachable from `seed`, in discovery order
    ///
    /// A seed that cannot be resolved yields an empty list.
    ///
    /// # Errors
    /// Only fatal errors (unsupported platform) are returned.
    pub fn walk(
        &self,
        search_paths: &[PathBuf],
        seed: &LibraryReference,
    ) -> Result<Vec<ResolvedFile>> {
        self.walk_all(search_paths, std::slice::from_ref(seed))
    }

    /// Walks several seeds sharing one visited set, so a library reached
    /// from two seeds is reported once.
    pub fn walk_all(
        &self,
        search_paths: &[PathBuf],
        seeds: &[LibraryReference],
    ) -> Result<Vec<ResolvedFile>> {
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut found = Vec::new();
        let mut worklist: Vec<WorkItem> = seeds
            .iter()
            .rev()
            .map(|seed| WorkItem {
                reference: seed.clone(),
                search_paths: search_paths.to_vec(),
                is_seed: true,
            })
            .collect();

        while let Some(item) = worklist.pop() {
            let file = match self.resolver.resolve(&item.search_paths, &item.reference) {
                Ok(file) => file,
                Err(err) if BomError::is_fatal_error(&err) => return Err(err),
                Err(err) => {
                    if item.is_seed {
                        warn!("{}", err);
                    } else {
                        debug!("{}", err);
                    }
                    continue;
                }
            };

            if !visited.insert(file.identity()) {
                continue;
            }

            let children = match self.inspector.dependencies(file.path()) {
                Ok(children) => children,
                Err(err) => {
                    warn!(file = %file.path().display(), "link inspection failed: {:#}", err);
                    Vec::new()
                }
            };

            let mut child_paths = item.search_paths;
            if let Some(dir) = file.parent_dir() {
                if !child_paths.iter().any(|p| p == dir) {
                    child_paths.push(dir.to_path_buf());
                }
            }

            for child in children.into_iter().rev() {
                worklist.push(WorkItem {
                    reference: child,
                    search_paths: child_paths.clone(),
                    is_seed: false,
                });
            }
            found.push(file);
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom_construction::domain::Platform;
    use crate::ports::outbound::CommandOutput;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// `ldd` double answering from a file-name keyed table
    struct FakeLdd {
        graph: HashMap<String, String>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeLdd {
        fn new(edges: &[(&str, &str)]) -> Self {
            Self {
                graph: edges
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for FakeLdd {
        fn is_available(&self, _program: &str) -> bool {
            true
        }

        fn run(&self, _program: &str, args: &[&str]) -> Result<CommandOutput> {
            let path = args.last().copied().unwrap_or_default();
            let name = Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.calls.borrow_mut().push(name.clone());
            match self.graph.get(&name) {
                Some(out) => Ok(CommandOutput::success(out.clone())),
                None => Ok(CommandOutput::failure("not a dynamic executable")),
            }
        }
    }

    fn walker(runner: &FakeLdd) -> TransitiveWalker<&FakeLdd> {
        TransitiveWalker::new(
            PathResolver::new(Platform::Linux),
            LinkInspector::new(runner, Platform::Linux),
        )
    }

    fn file_names(files: &[ResolvedFile]) -> Vec<String> {
        files.iter().map(|f| f.file_name()).collect()
    }

    #[test]
    fn test_cycle_terminates_with_each_file_once() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("liba.so.1"), "").unwrap();
        fs::write(temp_dir.path().join("libb.so.1"), "").unwrap();
        let runner = FakeLdd::new(&[
            ("liba.so.1", "\tlibb.so.1 => somewhere (0x1)\n"),
            ("libb.so.1", "\tliba.so.1 => somewhere (0x2)\n"),
        ]);

        let files = walker(&runner)
            .walk(&[temp_dir.path().to_path_buf()], &"a".into())
            .unwrap();

        assert_eq!(file_names(&files), vec!["liba.so.1", "libb.so.1"]);
        assert_eq!(runner.calls.borrow().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_cycle_through_differently_spelled_paths() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        std::os::unix::fs::symlink(root, root.join("alias")).unwrap();
        fs::write(root.join("liba.so.1"), "").unwrap();
        fs::write(root.join("libb.so.1"), "").unwrap();
        let back_edge = format!("\t{}/alias/liba.so.1 (0x2)\n", root.display());
        let runner = FakeLdd::new(&[
            ("liba.so.1", "\tlibb.so.1 => somewhere (0x1)\n"),
            ("libb.so.1", back_edge.as_str()),
        ]);

        let files = walker(&runner)
            .walk(&[root.join("sub").join("..")], &"a".into())
            .unwrap();

        assert_eq!(file_names(&files), vec!["liba.so.1", "libb.so.1"]);
        assert_eq!(runner.calls.borrow().len(), 2);
        assert!(files
            .iter()
            .all(|f| !f.path().to_string_lossy().contains("..")));
    }

    #[test]
    fn test_children_resolve_in_parent_directory() {
        let search = TempDir::new().unwrap();
        let private = TempDir::new().unwrap();
        let root = private.path().join("libroot.so.1");
        fs::write(&root, "").unwrap();
        fs::write(private.path().join("libdep.so.2"), "").unwrap();
        fs::write(search.path().join("libc.so.6"), "").unwrap();
        let runner = FakeLdd::new(&[(
            "libroot.so.1",
            "\tlinux-vdso.so.1 (0x0)\n\tlibdep.so.2 => not found\n\tlibc.so.6 => /x (0x1)\n",
        )]);

        let files = walker(&runner)
            .walk(
                &[search.path().to_path_buf()],
                &LibraryReference::new(root.to_string_lossy()),
            )
            .unwrap();

        assert_eq!(
            file_names(&files),
            vec!["libroot.so.1", "libdep.so.2", "libc.so.6"]
        );
    }

    #[test]
    fn test_unresolvable_seed_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let runner = FakeLdd::new(&[]);
        let files = walker(&runner)
            .walk(&[temp_dir.path().to_path_buf()], &"missing".into())
            .unwrap();
        assert!(files.is_empty());
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_failed_inspection_keeps_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("libstatic.a"), "").unwrap();
        let runner = FakeLdd::new(&[]);

        let files = walker(&runner)
            .walk(&[temp_dir.path().to_path_buf()], &"libstatic.a".into())
            .unwrap();
        assert_eq!(file_names(&files), vec!["libstatic.a"]);
    }

    #[test]
    fn test_walk_all_shares_visited_set() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["libx.so.1", "liby.so.1", "libshared.so.1"] {
            fs::write(temp_dir.path().join(name), "").unwrap();
        }
        let runner = FakeLdd::new(&[
            ("libx.so.1", "\tlibshared.so.1 => a (0x1)\n"),
            ("liby.so.1", "\tlibshared.so.1 => a (0x1)\n"),
            ("libshared.so.1", ""),
        ]);

        let files = walker(&runner)
            .walk_all(
                &[temp_dir.path().to_path_buf()],
                &["x".into(), "y".into()],
            )
            .unwrap();
        assert_eq!(
            file_names(&files),
            vec!["libx.so.1", "libshared.so.1", "liby.so.1"]
        );
    }

    #[test]
    fn test_windows_walk_is_fatal() {
        let runner = FakeLdd::new(&[]);
        let walker = TransitiveWalker::new(
            PathResolver::new(Platform::Windows),
            LinkInspector::new(&runner, Platform::Windows),
        );
        let err = walker.walk(&[], &"zlib".into()).unwrap_err();
        assert!(BomError::is_fatal_error(&err));
    }
}
