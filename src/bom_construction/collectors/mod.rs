//! Identification strategies tried, in order, by the `CollectorChain`.
//!
//! Each collector derives a [`PackageCoordinate`] from one physical artifact
//! using a single information source. A collector that cannot produce both
//! a name and a version returns an error and the chain moves on.

mod archive;
mod deb;
mod path;
mod pkgconfig;
mod rpm;
mod strings;

pub use archive::ArchiveCollector;
pub use deb::{parse_dpkg_search_output, parse_dpkg_status_output, DebCollector, DEFAULT_DEB_NAMESPACE};
pub use path::PathCollector;
pub use pkgconfig::{parse_pc_file, PcMetadata, PkgConfigCollector};
pub use rpm::{parse_rpm_info_output, parse_rpm_provides_output, RpmCollector, DEFAULT_RPM_NAMESPACE};
pub use strings::{extract_printable_strings, StringsCollector, DEFAULT_MIN_VERSION_COMPONENTS};

use crate::bom_construction::domain::{PackageCoordinate, ResolvedFile};
use crate::shared::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Identifies which strategy produced a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectorKind {
    PkgConfig,
    Rpm,
    Deb,
    Path,
    Archive,
    Strings,
}

impl CollectorKind {
    pub const ALL: [CollectorKind; 6] = [
        CollectorKind::PkgConfig,
        CollectorKind::Rpm,
        CollectorKind::Deb,
        CollectorKind::Path,
        CollectorKind::Archive,
        CollectorKind::Strings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectorKind::PkgConfig => "pkgconfig",
            CollectorKind::Rpm => "rpm",
            CollectorKind::Deb => "deb",
            CollectorKind::Path => "path",
            CollectorKind::Archive => "archive",
            CollectorKind::Strings => "strings",
        }
    }
}

impl fmt::Display for CollectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CollectorKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pkgconfig" | "pkg-config" => Ok(CollectorKind::PkgConfig),
            "rpm" => Ok(CollectorKind::Rpm),
            "deb" | "dpkg" => Ok(CollectorKind::Deb),
            "path" => Ok(CollectorKind::Path),
            "archive" => Ok(CollectorKind::Archive),
            "strings" => Ok(CollectorKind::Strings),
            other => Err(format!(
                "unknown collector '{}'. Expected one of: pkgconfig, rpm, deb, path, archive, strings",
                other
            )),
        }
    }
}

/// A strategy deriving a coordinate from one artifact
pub trait Collector {
    fn kind(&self) -> CollectorKind;

    /// Whether the backing information source exists on this host
    ///
    /// Inapplicable collectors are skipped without being invoked.
    fn is_applicable(&self) -> bool {
        true
    }

    /// Identifies `file`, returning a coordinate with non-empty name and version
    fn identify(&self, file: &ResolvedFile) -> Result<PackageCoordinate>;
}

impl<T: Collector + ?Sized> Collector for &T {
    fn kind(&self) -> CollectorKind {
        (**self).kind()
    }

    fn is_applicable(&self) -> bool {
        (**self).is_applicable()
    }

    fn identify(&self, file: &ResolvedFile) -> Result<PackageCoordinate> {
        (**self).identify(file)
    }
}

/// Successful identification of one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    pub coordinate: PackageCoordinate,
    pub collector: CollectorKind,
    /// Nominal path of the artifact that was identified
    pub source: PathBuf,
}

/// Value of the first `<label> : value` line in free-text tool output.
///
/// Any amount of padding is allowed between the label and the colon.
pub(crate) fn labeled_value(output: &str, label: &str) -> Option<String> {
    let pattern = format!(r"(?m)^\s*{}\s*:[ \t]*(.*?)\s*$", regex::escape(label));
    let re = Regex::new(&pattern).ok()?;
    re.captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|value| !value.is_empty())
}
