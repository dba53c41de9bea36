use crate::application::dto::{BomRequest, BomResponse};
use crate::bom_construction::domain::{Platform, ResolvedFile};
use crate::bom_construction::services::{
    merge_search_paths, BomAssembler, BomMetadataGenerator, CollectorChain, LinkInspector,
    PathResolver, SystemSearchPaths, TransitiveWalker,
};
use crate::ports::outbound::{CommandRunner, ProgressReporter};
use crate::shared::error::BomError;
use crate::shared::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::warn;

/// BuildBomUseCase - Core use case for building a bill of materials
///
/// Resolves library names, walks their transitive dependencies, runs the
/// collector chain over every artifact and assembles the result. Every
/// per-artifact failure is logged and skipped; only fatal errors abort.
///
/// # Type Parameters
/// * `CR` - CommandRunner implementation
/// * `PR` - ProgressReporter implementation
pub struct BuildBomUseCase<CR, PR> {
    command_runner: CR,
    progress_reporter: PR,
    platform: Platform,
}

impl<CR, PR> BuildBomUseCase<CR, PR>
where
    CR: CommandRunner,
    PR: ProgressReporter,
{
    /// Creates a new BuildBomUseCase with injected dependencies
    pub fn new(command_runner: CR, progress_reporter: PR, platform: Platform) -> Self {
        Self {
            command_runner,
            progress_reporter,
            platform,
        }
    }

    /// Executes the BOM construction
    ///
    /// # Errors
    /// Returns an error only for failures that invalidate the whole run,
    /// such as library resolution on an unsupported platform.
    pub fn execute(&self, request: BomRequest) -> Result<BomResponse> {
        let search_paths = self.search_paths(&request);
        let artifacts = self.collect_artifacts(&request, &search_paths)?;
        self.identify_artifacts(&request, artifacts)
    }

    fn search_paths(&self, request: &BomRequest) -> Vec<PathBuf> {
        if !request.include_system_paths {
            return merge_search_paths(&request.search_paths, &[]);
        }
        let system = SystemSearchPaths::new(&self.command_runner, self.platform).discover();
        merge_search_paths(&request.search_paths, &system)
    }

    /// Walked libraries first, then literal files, each artifact once.
    fn collect_artifacts(
        &self,
        request: &BomRequest,
        search_paths: &[PathBuf],
    ) -> Result<Vec<ResolvedFile>> {
        let mut artifacts = Vec::new();

        if !request.library_names.is_empty() {
            self.progress_reporter.report(&format!(
                "🔍 Resolving {} library name(s) across {} search path(s)...",
                request.library_names.len(),
                search_paths.len()
            ));
            let walker = TransitiveWalker::new(
                PathResolver::new(self.platform),
                LinkInspector::new(&self.command_runner, self.platform),
            );
            artifacts = walker.walk_all(search_paths, &request.library_names)?;
        }

        let mut seen: HashSet<PathBuf> = artifacts
            .iter()
            .map(ResolvedFile::identity)
            .collect();
        for path in &request.files {
            if !path.exists() {
                let err = BomError::NotFound {
                    reference: path.display().to_string(),
                    searched: 0,
                };
                warn!("{}", err);
                self.progress_reporter
                    .report_error(&format!("⚠️  Warning: {}", err));
                continue;
            }
            let file = ResolvedFile::from_path(path);
            if seen.insert(file.identity()) {
                artifacts.push(file);
            }
        }

        Ok(artifacts)
    }

    fn identify_artifacts(
        &self,
        request: &BomRequest,
        artifacts: Vec<ResolvedFile>,
    ) -> Result<BomResponse> {
        let chain =
            CollectorChain::standard(&self.command_runner, self.platform, &request.chain_settings);
        let mut assembler = BomAssembler::new();
        let mut identifications = Vec::new();
        let mut unidentified = Vec::new();

        let total = artifacts.len();
        self.progress_reporter
            .report(&format!("📦 Identifying {} artifact(s)...", total));

        for (index, file) in artifacts.iter().enumerate() {
            self.progress_reporter
                .report_progress(index + 1, total, Some(file.file_name().as_str()));

            match chain.identify(file) {
                Ok(identification) => {
                    assembler.add(&identification);
                    identifications.push(identification);
                }
                Err(err) if BomError::is_fatal_error(&err) => return Err(err),
                Err(err) => {
                    warn!("{}", err);
                    unidentified.push(file.path().to_path_buf());
                }
            }
        }

        let bom = assembler.build();
        self.progress_reporter.report_completion(&format!(
            "✅ Identified {} of {} artifact(s): {} package coordinate(s)",
            identifications.len(),
            total,
            bom.len()
        ));

        let metadata = BomMetadataGenerator::generate_default_metadata(self.platform);
        Ok(BomResponse::new(bom, metadata, identifications, unidentified))
    }
}
