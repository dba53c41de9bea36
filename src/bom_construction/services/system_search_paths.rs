use crate::bom_construction::domain::Platform;
use crate::ports::outbound::CommandRunner;
use crate::shared::paths::clean_path;
use std::path::{Path, PathBuf};
use tracing::debug;

const LINUX_FALLBACK_DIRS: [&str; 5] = ["/lib", "/lib64", "/usr/lib", "/usr/lib64", "/usr/local/lib"];
const MACOS_FALLBACK_DIRS: [&str; 2] = ["/usr/lib", "/usr/local/lib"];

/// SystemSearchPaths service discovering the toolchain's default library
/// directories
///
/// Linux asks `gcc -print-search-dirs`, macOS asks the linker through
/// `clang -Xlinker -v`. Hosts without a compiler fall back to the usual
/// system directories.
pub struct SystemSearchPaths<R: CommandRunner> {
    runner: R,
    platform: Platform,
}

impl<R: CommandRunner> SystemSearchPaths<R> {
    pub fn new(runner: R, platform: Platform) -> Self {
        Self { runner, platform }
    }

    /// Default directories for this platform, never failing
    pub fn discover(&self) -> Vec<PathBuf> {
        let ld_library_path = std::env::var("LD_LIBRARY_PATH").ok();
        self.discover_with_env(ld_library_path.as_deref())
    }

    /// Same as [`discover`](Self::discover) with an explicit `LD_LIBRARY_PATH`
    pub fn discover_with_env(&self, ld_library_path: Option<&str>) -> Vec<PathBuf> {
        match self.platform {
            Platform::Linux => {
                let found = self.query("gcc", &["-print-search-dirs"], false, parse_gcc_search_dirs);
                if !found.is_empty() {
                    return found;
                }
                let mut dirs: Vec<PathBuf> = ld_library_path
                    .map(split_path_list)
                    .unwrap_or_default();
                dirs.extend(LINUX_FALLBACK_DIRS.iter().map(PathBuf::from));
                dedup_preserving_order(dirs)
            }
            Platform::MacOs => {
                let found = self.query("clang", &["-Xlinker", "-v"], true, parse_clang_linker_output);
                if !found.is_empty() {
                    return found;
                }
                MACOS_FALLBACK_DIRS.iter().map(PathBuf::from).collect()
            }
            Platform::Windows => Vec::new(),
        }
    }

    fn query(
        &self,
        program: &str,
        args: &[&str],
        ignore_status: bool,
        parse: fn(&str) -> Vec<PathBuf>,
    ) -> Vec<PathBuf> {
        if !self.runner.is_available(program) {
            debug!(program, "compiler not found, using default library directories");
            return Vec::new();
        }
        match self.runner.run(program, args) {
            Ok(output) if output.success || ignore_status => parse(&output.combined()),
            Ok(output) => {
                debug!(program, stderr = %output.stderr.trim(), "search path query failed");
                Vec::new()
            }
            Err(err) => {
                debug!(program, "search path query failed: {:#}", err);
                Vec::new()
            }
        }
    }
}

/// Directories from the `libraries: =a:b:c` line of `gcc -print-search-dirs`.
pub fn parse_gcc_search_dirs(output: &str) -> Vec<PathBuf> {
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix("libraries:"))
        .map(|rest| split_path_list(rest.trim().trim_start_matches('=')))
        .map(dedup_preserving_order)
        .unwrap_or_default()
}

/// Tab-indented directories following `Library search paths:` in `ld -v` output.
pub fn parse_clang_linker_output(output: &str) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let mut in_section = false;
    for line in output.lines() {
        if line.trim_end() == "Library search paths:" {
            in_section = true;
            continue;
        }
        if !in_section {
            continue;
        }
        if !line.starts_with('\t') && !line.starts_with(' ') {
            break;
        }
        let dir = line.trim();
        if !dir.is_empty() {
            dirs.push(clean_path(Path::new(dir)));
        }
    }
    dedup_preserving_order(dirs)
}

/// Caller directories first, then `system`, cleaned and without repeats.
pub fn merge_search_paths(user: &[PathBuf], system: &[PathBuf]) -> Vec<PathBuf> {
    dedup_preserving_order(
        user.iter()
            .chain(system.iter())
            .map(PathBuf::as_path)
            .map(clean_path)
            .collect(),
    )
}

fn split_path_list(list: &str) -> Vec<PathBuf> {
    list.split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|dir| clean_path(Path::new(dir)))
        .collect()
}

fn dedup_preserving_order(dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut result: Vec<PathBuf> = Vec::with_capacity(dirs.len());
    for dir in dirs {
        if !result.contains(&dir) {
            result.push(dir);
        }
    }
    result
}
