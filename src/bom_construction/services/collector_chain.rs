use crate::bom_construction::collectors::{
    ArchiveCollector, Collector, CollectorKind, DebCollector, Identification, PathCollector,
    PkgConfigCollector, RpmCollector, StringsCollector, DEFAULT_DEB_NAMESPACE,
    DEFAULT_MIN_VERSION_COMPONENTS, DEFAULT_RPM_NAMESPACE,
};
use crate::bom_construction::domain::{Platform, ResolvedFile};
use crate::ports::outbound::CommandRunner;
use crate::shared::error::BomError;
use crate::shared::Result;
use tracing::{debug, info};

/// Order tried for dynamically linked libraries
const SHARED_LIBRARY_ORDER: [CollectorKind; 5] = [
    CollectorKind::PkgConfig,
    CollectorKind::Rpm,
    CollectorKind::Deb,
    CollectorKind::Path,
    CollectorKind::Strings,
];

/// Order tried for static archives and anything else
const STATIC_ARCHIVE_ORDER: [CollectorKind; 4] = [
    CollectorKind::PkgConfig,
    CollectorKind::Path,
    CollectorKind::Archive,
    CollectorKind::Strings,
];

/// Tunables for the standard chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSettings {
    pub rpm_namespace: String,
    pub deb_namespace: String,
    pub disabled: Vec<CollectorKind>,
    pub strings_min_version_components: usize,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            rpm_namespace: DEFAULT_RPM_NAMESPACE.to_string(),
            deb_namespace: DEFAULT_DEB_NAMESPACE.to_string(),
            disabled: Vec::new(),
            strings_min_version_components: DEFAULT_MIN_VERSION_COMPONENTS,
        }
    }
}

struct Slot<'a> {
    collector: Box<dyn Collector + 'a>,
    applicable: bool,
}

/// CollectorChain service identifying artifacts by chain of responsibility
///
/// Collectors are tried in a fixed priority order chosen by artifact kind;
/// the first to return a coordinate wins. Applicability is checked once
/// when the chain is built, so a missing `rpm` or `dpkg` is never invoked.
pub struct CollectorChain<'a> {
    platform: Platform,
    slots: Vec<Slot<'a>>,
}

impl<'a> CollectorChain<'a> {
    /// Builds a chain from explicit collectors
    pub fn new(platform: Platform, collectors: Vec<Box<dyn Collector + 'a>>) -> Self {
        let slots = collectors
            .into_iter()
            .map(|collector| {
                let applicable = collector.is_applicable();
                if !applicable {
                    debug!(collector = %collector.kind(), "backing tool not available, collector skipped");
                }
                Slot {
                    collector,
                    applicable,
                }
            })
            .collect();
        Self { platform, slots }
    }

    /// The full pkg-config, RPM, Debian, path, archive and strings chain
    pub fn standard<R: CommandRunner + 'a>(
        runner: &'a R,
        platform: Platform,
        settings: &ChainSettings,
    ) -> Self {
        let mut collectors: Vec<Box<dyn Collector + 'a>> = vec![
            Box::new(PkgConfigCollector::new()),
            Box::new(RpmCollector::with_namespace(
                runner,
                settings.rpm_namespace.clone(),
            )),
            Box::new(DebCollector::with_namespace(
                runner,
                settings.deb_namespace.clone(),
            )),
            Box::new(PathCollector::new(platform)),
            Box::new(ArchiveCollector::new()),
            Box::new(StringsCollector::with_min_version_components(
                platform,
                settings.strings_min_version_components,
            )),
        ];
        collectors.retain(|c| !settings.disabled.contains(&c.kind()));
        Self::new(platform, collectors)
    }

    /// Collector kinds that will actually be consulted, in registration order.
    pub fn active_kinds(&self) -> Vec<CollectorKind> {
        self.slots
            .iter()
            .filter(|s| s.applicable)
            .map(|s| s.collector.kind())
            .collect()
    }

    /// Priority order for `file`: shared libraries consult the package
    /// databases, archives consult the archive-name heuristic.
    pub fn order_for(&self, file: &ResolvedFile) -> &'static [CollectorKind] {
        if self.platform.is_shared_library(&file.file_name()) {
            &SHARED_LIBRARY_ORDER
        } else {
            &STATIC_ARCHIVE_ORDER
        }
    }

    /// Identifies one artifact
    ///
    /// # Errors
    /// `BomError::UnidentifiedArtifact` when every collector fails. Failures
    /// of individual collectors are logged at debug level and skipped.
    pub fn identify(&self, file: &ResolvedFile) -> Result<Identification> {
        for kind in self.order_for(file) {
            for slot in self
                .slots
                .iter()
                .filter(|s| s.applicable && s.collector.kind() == *kind)
            {
                match slot.collector.identify(file) {
                    Ok(coordinate) => {
                        info!(
                            file = %file.path().display(),
                            collector = %kind,
                            "identified {}",
                            coordinate
                        );
                        return Ok(Identification {
                            coordinate,
                            collector: *kind,
                            source: file.path().to_path_buf(),
                        });
                    }
                    Err(err) if BomError::is_fatal_error(&err) => return Err(err),
                    Err(err) => {
                        debug!(file = %file.path().display(), collector = %kind, "{:#}", err);
                    }
                }
            }
        }

        Err(BomError::UnidentifiedArtifact {
            path: file.path().to_path_buf(),
        }
        .into())
    }
}
