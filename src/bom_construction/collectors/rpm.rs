use super::{labeled_value, Collector, CollectorKind};
use crate::bom_construction::domain::{Ecosystem, PackageCoordinate, ResolvedFile};
use crate::ports::outbound::CommandRunner;
use crate::shared::error::BomError;
use crate::shared::Result;
use tracing::debug;

pub const DEFAULT_RPM_NAMESPACE: &str = "fedora";

const RPM: &str = "rpm";

/// Identifies an artifact through the RPM database
///
/// `rpm -q --whatprovides <path>` names the owning package, then
/// `rpm -q -i <package>` describes it.
pub struct RpmCollector<R: CommandRunner> {
    runner: R,
    namespace: String,
}

impl<R: CommandRunner> RpmCollector<R> {
    pub fn new(runner: R) -> Self {
        Self::with_namespace(runner, DEFAULT_RPM_NAMESPACE)
    }

    pub fn with_namespace(runner: R, namespace: impl Into<String>) -> Self {
        Self {
            runner,
            namespace: namespace.into(),
        }
    }
}

impl<R: CommandRunner> Collector for RpmCollector<R> {
    fn kind(&self) -> CollectorKind {
        CollectorKind::Rpm
    }

    fn is_applicable(&self) -> bool {
        self.runner.is_available(RPM)
    }

    fn identify(&self, file: &ResolvedFile) -> Result<PackageCoordinate> {
        let path = file.path().to_string_lossy().into_owned();
        let provides = self
            .runner
            .run_checked(RPM, &["-q", "--whatprovides", path.as_str()])?;
        let package = parse_rpm_provides_output(&provides.stdout)?;
        debug!(package = %package, file = %path, "rpm owner found");

        let info = self
            .runner
            .run_checked(RPM, &["-q", "-i", package.as_str()])?;
        let (name, version) = parse_rpm_info_output(&info.stdout)?;

        Ok(PackageCoordinate::new(
            Ecosystem::Rpm,
            Some(self.namespace.clone()),
            name,
            version,
        )?)
    }
}

/// Owning package from `rpm -q --whatprovides` output (first non-empty line).
pub fn parse_rpm_provides_output(output: &str) -> Result<String> {
    let package = output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| BomError::MalformedToolOutput {
            tool: RPM.to_string(),
            details: "empty --whatprovides output".to_string(),
        })?;

    if package.contains("not owned by any package") || package.starts_with("no package provides") {
        return Err(BomError::MalformedToolOutput {
            tool: RPM.to_string(),
            details: package.to_string(),
        }
        .into());
    }
    Ok(package.to_string())
}

/// `Name` and `Version` fields from `rpm -q -i` output.
pub fn parse_rpm_info_output(output: &str) -> Result<(String, String)> {
    let missing = |field: &str| BomError::MalformedToolOutput {
        tool: RPM.to_string(),
        details: format!("no {} field in package info", field),
    };
    let name = labeled_value(output, "Name").ok_or_else(|| missing("Name"))?;
    let version = labeled_value(output, "Version").ok_or_else(|| missing("Version"))?;
    Ok((name, version))
}
