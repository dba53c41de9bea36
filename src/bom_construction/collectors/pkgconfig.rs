use super::{Collector, CollectorKind};
use crate::bom_construction::domain::{PackageCoordinate, ResolvedFile};
use crate::shared::safe_read::{read_text_bounded, MAX_TEXT_FILE_SIZE};
use crate::shared::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Identifies an artifact from a pkg-config `.pc` file installed next to it
///
/// For `/usr/lib/libpng.so` the files probed are, in order,
/// `/usr/lib/pkgconfig/libpng.pc`, `/usr/lib/libpng.pc`,
/// `/usr/lib/pkgconfig/png.pc` and `/usr/lib/png.pc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PkgConfigCollector;

impl PkgConfigCollector {
    pub fn new() -> Self {
        Self
    }

    /// Every `.pc` path worth probing for `file`, most specific first.
    pub fn candidate_paths(file: &ResolvedFile) -> Vec<PathBuf> {
        let mut dirs: Vec<&Path> = Vec::new();
        for dir in [file.parent_dir(), file.real_path().parent()]
            .into_iter()
            .flatten()
        {
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }

        let mut paths = Vec::new();
        for stem in candidate_stems(&file.file_name()) {
            for dir in &dirs {
                for candidate in [
                    dir.join("pkgconfig").join(format!("{}.pc", stem)),
                    dir.join(format!("{}.pc", stem)),
                ] {
                    if !paths.contains(&candidate) {
                        paths.push(candidate);
                    }
                }
            }
        }
        paths
    }
}

impl Collector for PkgConfigCollector {
    fn kind(&self) -> CollectorKind {
        CollectorKind::PkgConfig
    }

    fn identify(&self, file: &ResolvedFile) -> Result<PackageCoordinate> {
        let pc_path = Self::candidate_paths(file)
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| anyhow::anyhow!("no pkg-config file for {}", file.path().display()))?;

        debug!(pc = %pc_path.display(), "reading pkg-config metadata");
        let metadata = parse_pc_file(&read_text_bounded(&pc_path, MAX_TEXT_FILE_SIZE)?);

        let name = metadata
            .name
            .ok_or_else(|| anyhow::anyhow!("no Name field in {}", pc_path.display()))?;
        let version = metadata
            .version
            .ok_or_else(|| anyhow::anyhow!("no Version field in {}", pc_path.display()))?;

        Ok(PackageCoordinate::cpp(name, version)?)
    }
}

/// `.pc` base names derived from a library file name.
fn candidate_stems(file_name: &str) -> Vec<String> {
    let mut stems: Vec<String> = Vec::new();
    let without_last_extension = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned());
    let up_to_first_dot = file_name.split('.').next().map(str::to_string);
    let without_lib = up_to_first_dot
        .as_deref()
        .and_then(|s| s.strip_prefix("lib"))
        .map(str::to_string);

    for stem in [without_last_extension, up_to_first_dot, without_lib]
        .into_iter()
        .flatten()
    {
        if !stem.is_empty() && !stems.contains(&stem) {
            stems.push(stem);
        }
    }
    stems
}

/// Fields of a pkg-config file that identify the package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PcMetadata {
    pub name: Option<String>,
    pub version: Option<String>,
    pub variables: HashMap<String, String>,
}

/// Parses a `.pc` file.
///
/// `key=value` lines define variables; `Keyword: value` lines are fields.
/// `${key}` references are expanded in both, in file order.
pub fn parse_pc_file(content: &str) -> PcMetadata {
    let mut metadata = PcMetadata::default();

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let colon = line.find(':');
        let equals = line.find('=');
        match (colon, equals) {
            (Some(c), Some(e)) if e < c => define_variable(&mut metadata, line, e),
            (None, Some(e)) => define_variable(&mut metadata, line, e),
            (Some(c), _) => {
                let keyword = line[..c].trim();
                let value = expand_variables(line[c + 1..].trim(), &metadata.variables);
                if value.is_empty() {
                    continue;
                }
                match keyword {
                    "Name" => metadata.name = Some(value),
                    "Version" => metadata.version = Some(value),
                    _ => {}
                }
            }
            (None, None) => {}
        }
    }
    metadata
}

fn define_variable(metadata: &mut PcMetadata, line: &str, equals: usize) {
    let key = line[..equals].trim();
    if key.is_empty() {
        return;
    }
    let value = expand_variables(line[equals + 1..].trim(), &metadata.variables);
    metadata.variables.insert(key.to_string(), value);
}

/// Replaces `${name}` with its definition; undefined references expand to nothing.
fn expand_variables(value: &str, variables: &HashMap<String, String>) -> String {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        match rest[start + 2..].find('}') {
            Some(end) => {
                let key = &rest[start + 2..start + 2 + end];
                if let Some(expansion) = variables.get(key) {
                    result.push_str(expansion);
                }
                rest = &rest[start + 3 + end..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}
