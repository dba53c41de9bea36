use super::{Collector, CollectorKind};
use crate::bom_construction::domain::{PackageCoordinate, ResolvedFile};
use crate::bom_construction::services::name_version;
use crate::shared::Result;

/// Identifies static libraries and source archives by file name
/// (`zlib-1.2.11.tar.gz`, `libfoo-1.2.3.a`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchiveCollector;

impl ArchiveCollector {
    pub fn new() -> Self {
        Self
    }
}

impl Collector for ArchiveCollector {
    fn kind(&self) -> CollectorKind {
        CollectorKind::Archive
    }

    fn identify(&self, file: &ResolvedFile) -> Result<PackageCoordinate> {
        let extracted = name_version::extract_archive(file.real_path())
            .or_else(|_| name_version::extract_archive(file.path()))?;
        Ok(PackageCoordinate::cpp(extracted.name, extracted.version)?)
    }
}
