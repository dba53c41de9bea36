use super::{labeled_value, Collector, CollectorKind};
use crate::bom_construction::domain::{Ecosystem, PackageCoordinate, ResolvedFile};
use crate::ports::outbound::CommandRunner;
use crate::shared::error::BomError;
use crate::shared::Result;
use tracing::debug;

pub const DEFAULT_DEB_NAMESPACE: &str = "ubuntu";

const DPKG: &str = "dpkg";

/// Identifies an artifact through the Debian package database
///
/// `dpkg -S <path>` names the owning package, then `dpkg -s <package>`
/// describes it. The package name is used verbatim in the coordinate.
pub struct DebCollector<R: CommandRunner> {
    runner: R,
    namespace: String,
}

impl<R: CommandRunner> DebCollector<R> {
    pub fn new(runner: R) -> Self {
        Self::with_namespace(runner, DEFAULT_DEB_NAMESPACE)
    }

    pub fn with_namespace(runner: R, namespace: impl Into<String>) -> Self {
        Self {
            runner,
            namespace: namespace.into(),
        }
    }
}

impl<R: CommandRunner> Collector for DebCollector<R> {
    fn kind(&self) -> CollectorKind {
        CollectorKind::Deb
    }

    fn is_applicable(&self) -> bool {
        self.runner.is_available(DPKG)
    }

    fn identify(&self, file: &ResolvedFile) -> Result<PackageCoordinate> {
        let path = file.path().to_string_lossy().into_owned();
        let search = self.runner.run_checked(DPKG, &["-S", path.as_str()])?;
        let owner = parse_dpkg_search_output(&search.stdout)?;
        debug!(package = %owner, file = %path, "dpkg owner found");

        let status = self.runner.run_checked(DPKG, &["-s", owner.as_str()])?;
        let (name, version) = parse_dpkg_status_output(&status.stdout, &owner)?;

        Ok(PackageCoordinate::new(
            Ecosystem::Deb,
            Some(self.namespace.clone()),
            name,
            version,
        )?)
    }
}

/// Owning package from `dpkg -S` output.
///
/// Lines look like `libc6:amd64: /lib/x86_64-linux-gnu/libc.so.6` or
/// `libfoo1, libfoo-dev: /usr/share/doc/foo`. Diversion notices are skipped,
/// the first package of a list wins and any `:arch` qualifier is dropped.
pub fn parse_dpkg_search_output(output: &str) -> Result<String> {
    let malformed = |details: &str| BomError::MalformedToolOutput {
        tool: DPKG.to_string(),
        details: details.to_string(),
    };

    let line = output
        .lines()
        .map(str::trim)
        .find(|line| {
            !line.is_empty() && !line.starts_with("diversion by") && !line.starts_with("local diversion")
        })
        .ok_or_else(|| malformed("empty -S output"))?;

    let (packages, _) = line
        .split_once(':')
        .ok_or_else(|| malformed("expected '<package>: <path>'"))?;

    let owner = packages
        .split(',')
        .next()
        .map(str::trim)
        .unwrap_or_default();
    if owner.is_empty() || owner.contains(char::is_whitespace) {
        return Err(malformed(&format!("cannot read package name from '{}'", line)).into());
    }
    Ok(owner.to_string())
}

/// `(name, version)` from `dpkg -s` output.
///
/// The name comes from the `Package` field, then `Name`, then `owner`.
pub fn parse_dpkg_status_output(output: &str, owner: &str) -> Result<(String, String)> {
    let name = labeled_value(output, "Package")
        .or_else(|| labeled_value(output, "Name"))
        .unwrap_or_else(|| owner.to_string());
    let version = labeled_value(output, "Version").ok_or_else(|| BomError::MalformedToolOutput {
        tool: DPKG.to_string(),
        details: format!("no Version field for package {}", owner),
    })?;
    Ok((name, version))
}
