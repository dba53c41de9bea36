use super::{Collector, CollectorKind};
use crate::bom_construction::domain::{PackageCoordinate, Platform, ResolvedFile};
use crate::bom_construction::services::name_version;
use crate::shared::Result;

/// Identifies a shared library from its file name alone
///
/// The symlink target is consulted first because it usually carries the
/// full version (`libpng.so -> libpng.so.1.2.3`); the nominal name is the
/// fallback.
#[derive(Debug, Clone, Copy)]
pub struct PathCollector {
    platform: Platform,
}

impl PathCollector {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl Collector for PathCollector {
    fn kind(&self) -> CollectorKind {
        CollectorKind::Path
    }

    fn identify(&self, file: &ResolvedFile) -> Result<PackageCoordinate> {
        let extracted = name_version::extract_library(self.platform, file.real_path())
            .or_else(|err| {
                if file.symlink_target().is_some() {
                    name_version::extract_library(self.platform, file.path())
                } else {
                    Err(err)
                }
            })?;
        Ok(PackageCoordinate::cpp(extracted.name, extracted.version)?)
    }
}
