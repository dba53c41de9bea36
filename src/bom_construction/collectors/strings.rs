use super::{Collector, CollectorKind};
use crate::bom_construction::domain::{PackageCoordinate, Platform, ResolvedFile};
use crate::bom_construction::services::name_version::{self, NameVersion};
use crate::shared::safe_read::{read_bytes_bounded, MAX_FILE_SIZE};
use crate::shared::Result;
use regex::Regex;
use std::path::Path;

/// Minimum number of numeric version components for a strings match
pub const DEFAULT_MIN_VERSION_COMPONENTS: usize = 3;

const MIN_STRING_LEN: usize = 6;
const MAX_STRING_LEN: usize = 256;

const LIBRARY_SUFFIXES: [&str; 4] = [".dylib", ".so", ".a", ".dll"];
const LIBRARY_INFIXES: [&str; 2] = [".so.", ".a."];

/// Low-confidence fallback that looks for `<name><version>` text embedded
/// in the library binary itself.
///
/// Coincidental substrings are common, so a match is only accepted when
/// its version has at least `min_version_components` numeric parts.
#[derive(Debug, Clone, Copy)]
pub struct StringsCollector {
    platform: Platform,
    min_version_components: usize,
}

impl StringsCollector {
    pub fn new(platform: Platform) -> Self {
        Self::with_min_version_components(platform, DEFAULT_MIN_VERSION_COMPONENTS)
    }

    pub fn with_min_version_components(platform: Platform, min_version_components: usize) -> Self {
        Self {
            platform,
            min_version_components: min_version_components.max(1),
        }
    }

    /// First well-formed name/version among the printable strings.
    pub fn find_in_strings(&self, file_name: &str, strings: &[String]) -> Result<NameVersion> {
        let stem = search_stem(file_name)
            .ok_or_else(|| anyhow::anyhow!("no searchable name in {}", file_name))?;
        let escaped = regex::escape(&stem);
        let name_and_version = Regex::new(&format!(r"({}[^ \t]+)", escaped))?;
        let name_separator_version =
            Regex::new(&format!(r"({}) +\w+ +(\d+\.\d+\.\d+)", escaped))?;

        for text in strings.iter().filter(|s| s.contains(&stem)) {
            if let Some(candidate) = name_and_version
                .captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| self.accept(m.as_str()))
            {
                return Ok(candidate);
            }

            if let Some(candidate) = name_separator_version.captures(text).and_then(|caps| {
                let rewritten = format!("{}.{}.so", caps.get(1)?.as_str(), caps.get(2)?.as_str());
                self.accept(&rewritten)
            }) {
                return Ok(candidate);
            }
        }
        anyhow::bail!("no name/version found in the strings of {}", file_name)
    }

    fn accept(&self, candidate: &str) -> Option<NameVersion> {
        let extracted = name_version::extract_library(self.platform, Path::new(candidate)).ok()?;
        let numeric = extracted
            .version
            .split('.')
            .filter(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
            .count();
        (!extracted.name.is_empty() && numeric >= self.min_version_components).then_some(extracted)
    }
}

impl Collector for StringsCollector {
    fn kind(&self) -> CollectorKind {
        CollectorKind::Strings
    }

    fn identify(&self, file: &ResolvedFile) -> Result<PackageCoordinate> {
        let file_name = file.file_name();
        if !is_library_file_name(&file_name) {
            anyhow::bail!("{} is not a library", file.path().display());
        }

        let bytes = read_bytes_bounded(file.real_path(), MAX_FILE_SIZE)?;
        let strings = extract_printable_strings(&bytes);
        let found = self.find_in_strings(&file_name, &strings)?;
        Ok(PackageCoordinate::cpp(found.name, found.version)?)
    }
}

fn is_library_file_name(file_name: &str) -> bool {
    LIBRARY_SUFFIXES.iter().any(|s| file_name.ends_with(s))
        || LIBRARY_INFIXES.iter().any(|s| file_name.contains(s))
}

/// File name before the first `.`, with trailing digits removed
/// (`libpng16.so.16` searches for `libpng`).
fn search_stem(file_name: &str) -> Option<String> {
    let stem = file_name
        .split('.')
        .next()?
        .trim_end_matches(|c: char| c.is_ascii_digit());
    (!stem.is_empty()).then(|| stem.to_string())
}

/// Runs of printable ASCII, like `strings(1)`.
///
/// Runs shorter than 6 bytes are dropped; runs longer than 256 bytes are
/// split into 256-byte pieces.
pub fn extract_printable_strings(bytes: &[u8]) -> Vec<String> {
    let mut results = Vec::new();
    let mut current: Vec<u8> = Vec::with_capacity(MAX_STRING_LEN);

    let flush = |current: &mut Vec<u8>, results: &mut Vec<String>| {
        if current.len() >= MIN_STRING_LEN {
            results.push(String::from_utf8_lossy(current).into_owned());
        }
        current.clear();
    };

    for &byte in bytes {
        if byte.is_ascii_graphic() || byte == b' ' {
            if current.len() >= MAX_STRING_LEN {
                flush(&mut current, &mut results);
            }
            current.push(byte);
        } else {
            flush(&mut current, &mut results);
        }
    }
    flush(&mut current, &mut results);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_printable_strings() {
        let mut bytes = b"\x00\x01libpng.so.1.6.37\x00abc\x00".to_vec();
        bytes.extend(vec![b'x'; 300]);
        let found = extract_printable_strings(&bytes);

        assert_eq!(found[0], "libpng.so.1.6.37");
        assert!(!found.iter().any(|s| s == "abc"));
        assert_eq!(found[1].len(), 256);
        assert_eq!(found[2].len(), 44);
    }

    #[test]
    fn test_search_stem() {
        assert_eq!(search_stem("libpng16.so.16").as_deref(), Some("libpng"));
        assert_eq!(search_stem("libz.so.1").as_deref(), Some("libz"));
        assert_eq!(search_stem("12.so"), None);
    }

    #[test]
    fn test_finds_embedded_soname_with_full_version() {
        let collector = StringsCollector::new(Platform::Linux);
        let found = collector
            .find_in_strings(
                "libpng16.so.16",
                &strings(&["GLIBC_2.2.5", "libpng16.so.16", "libpng.so.1.6.37"]),
            )
            .unwrap();
        assert_eq!(found.name, "libpng");
        assert_eq!(found.version, "1.6.37");
    }

    #[test]
    fn test_finds_name_word_version_banner() {
        let collector = StringsCollector::new(Platform::Linux);
        let found = collector
            .find_in_strings(
                "libpng16.so.16",
                &strings(&["libpng version 1.6.37 - April 14, 2019"]),
            )
            .unwrap();
        assert_eq!(found.name, "libpng");
        assert_eq!(found.version, "1.6.37");
    }

    #[test]
    fn test_rejects_short_versions_by_default() {
        let collector = StringsCollector::new(Platform::Linux);
        let result = collector.find_in_strings("libfoo.so", &strings(&["libfoo.so.1.2"]));
        assert!(result.is_err());

        let lenient = StringsCollector::with_min_version_components(Platform::Linux, 2);
        let found = lenient
            .find_in_strings("libfoo.so", &strings(&["libfoo.so.1.2"]))
            .unwrap();
        assert_eq!(found.version, "1.2");
    }

    #[test]
    fn test_stem_is_regex_escaped() {
        let collector = StringsCollector::new(Platform::Linux);
        let found = collector
            .find_in_strings("libstdc++.so.6", &strings(&["libstdc++.so.6.0.28"]))
            .unwrap();
        assert_eq!(found.name, "libstdc++");
        assert_eq!(found.version, "6.0.28");
    }

    #[test]
    fn test_identify_reads_binary() {
        let temp_dir = TempDir::new().unwrap();
        let lib = temp_dir.path().join("libzz.so");
        fs::write(&lib, b"\x7fELF\x00\x00libzz.so.2.4.1\x00\x00").unwrap();

        let coordinate = StringsCollector::new(Platform::Linux)
            .identify(&ResolvedFile::from_path(&lib))
            .unwrap();
        assert_eq!(coordinate.to_string(), "pkg:cpp/libzz@2.4.1");
    }

    #[test]
    fn test_identify_skips_non_libraries() {
        let file = ResolvedFile::new(PathBuf::from("/usr/bin/ls"), None);
        let err = StringsCollector::new(Platform::Linux).identify(&file).unwrap_err();
        assert!(err.to_string().contains("not a library"));
    }
}
