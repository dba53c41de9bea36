//! Stateless name/version extractors for library and archive file names.
//!
//! Version strings are opaque tokens: they are cleaned up (separators
//! normalised to `.`) but never parsed or compared.

use crate::bom_construction::domain::Platform;
use crate::shared::Result;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// `libfoo.so.1.2.3`
static UNIX_SUFFIX_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+?)\.so\.(?P<version>[0-9][0-9._-]*)").expect("static regex")
});

/// `libfoo.1.2.3.so`, `libfoo-1.2.3.so`
static UNIX_INFIX_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+?)[._-](?P<version>[0-9][0-9._-]*?)\.so$").expect("static regex")
});

/// `libfoo.1.2.3.dylib`
static MACOS_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+?)\.(?P<version>[0-9][0-9._-]*?)\.dylib$").expect("static regex")
});

/// `foo-1.2.3.dll`, `foo_1_2.dll`
static WINDOWS_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<name>.+?)[._-](?P<version>[0-9][0-9._-]*?)\.dll$")
        .expect("static regex")
});

/// One archive, compression or static-library extension at the end of a name.
static ARCHIVE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<stem>.+)\.(zip|tgz|gz|bz2|tar|7z|xz|a|lib)$").expect("static regex")
});

/// Archive file names as recognised by the directory scanner.
static ARCHIVE_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(zip|tgz|gz|bz2|tar|7z|xz)$").expect("static regex"));

static SRC_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<name>.+?)[._-]src$").expect("static regex"));

/// `name-version` where the version starts with a digit (`openssl-1.0.2k`)
static NAME_VERSION_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+?)[._-](?P<version>[0-9][0-9a-z._-]*)$").expect("static regex")
});

/// Library name and version recovered from a file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameVersion {
    pub name: String,
    pub version: String,
}

impl NameVersion {
    fn from_captures(caps: &regex::Captures<'_>, file_name: &str) -> Result<Self> {
        let name = caps.name("name").map(|m| m.as_str()).unwrap_or_default();
        let version = normalize_version(caps.name("version").map(|m| m.as_str()).unwrap_or_default());
        if name.is_empty() || version.is_empty() {
            anyhow::bail!("cannot get name/version from {}", file_name);
        }
        Ok(Self {
            name: name.to_string(),
            version,
        })
    }
}

/// Normalises `-` and `_` to `.` and drops empty components.
///
/// `1_2-3.` becomes `1.2.3`.
pub fn normalize_version(raw: &str) -> String {
    raw.trim()
        .replace(['-', '_'], ".")
        .split('.')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Unix shared object: `<name>.so.<version>` or `<name>.<version>.so`
pub fn extract_unix(file_name: &str) -> Result<NameVersion> {
    let caps = UNIX_SUFFIX_VERSION
        .captures(file_name)
        .or_else(|| UNIX_INFIX_VERSION.captures(file_name))
        .ok_or_else(|| anyhow::anyhow!("cannot get name/version from {}", file_name))?;
    NameVersion::from_captures(&caps, file_name)
}

/// macOS dynamic library: `<name>.<version>.dylib`
pub fn extract_macos(file_name: &str) -> Result<NameVersion> {
    let caps = MACOS_VERSION
        .captures(file_name)
        .ok_or_else(|| anyhow::anyhow!("cannot get name/version from {}", file_name))?;
    NameVersion::from_captures(&caps, file_name)
}

/// Windows DLL: `<name>[._-]<version>.dll`
pub fn extract_windows(file_name: &str) -> Result<NameVersion> {
    let caps = WINDOWS_VERSION
        .captures(file_name)
        .ok_or_else(|| anyhow::anyhow!("cannot get name/version from {}", file_name))?;
    NameVersion::from_captures(&caps, file_name)
}

/// Applies the grammar of a single platform.
pub fn extract_for_platform(platform: Platform, file_name: &str) -> Result<NameVersion> {
    match platform {
        Platform::Linux => extract_unix(file_name),
        Platform::MacOs => extract_macos(file_name),
        Platform::Windows => extract_windows(file_name),
    }
}

/// Extracts name and version from the file name of `path`.
///
/// The grammar of `platform` is tried first, then the other platforms'
/// grammars, so a `.dylib` found while scanning on Linux is still named.
pub fn extract_library(platform: Platform, path: &Path) -> Result<NameVersion> {
    let file_name = file_name(path);
    std::iter::once(platform)
        .chain(Platform::ALL.into_iter().filter(|p| *p != platform))
        .find_map(|p| extract_for_platform(p, &file_name).ok())
        .ok_or_else(|| anyhow::anyhow!("cannot get library name/version from {}", path.display()))
}

/// Extracts name and version from an archive or static library file name.
///
/// `zlib-1.2.11-src.tar.gz` yields `zlib` / `1.2.11`.
pub fn extract_archive(path: &Path) -> Result<NameVersion> {
    let file_name = file_name(path);
    let stem = remove_src_suffix(&strip_archive_extensions(&file_name));

    let caps = NAME_VERSION_BOUNDARY
        .captures(&stem)
        .ok_or_else(|| anyhow::anyhow!("cannot get archive name/version from {}", file_name))?;
    let extracted = NameVersion::from_captures(&caps, &file_name)?;

    Ok(NameVersion {
        name: remove_src_suffix(&extracted.name),
        version: extracted.version,
    })
}

/// Strips every trailing archive/compression extension (`.tar.gz`, `.a`, ...).
pub fn strip_archive_extensions(name: &str) -> String {
    let mut result = name.to_string();
    while let Some(stem) = ARCHIVE_EXTENSION
        .captures(&result)
        .and_then(|caps| caps.name("stem").map(|m| m.as_str().to_string()))
    {
        result = stem;
    }
    result
}

/// Removes a trailing `-src`, `_src` or `.src`.
pub fn remove_src_suffix(name: &str) -> String {
    SRC_SUFFIX
        .captures(name)
        .and_then(|caps| caps.name("name"))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Whether a path names a compressed or packed archive.
pub fn is_archive(path: &Path) -> bool {
    ARCHIVE_FILE.is_match(&file_name(path))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
