use crate::application::dto::{BomRequest, BomResponse, ScanRequest};
use crate::application::use_cases::BuildBomUseCase;
use crate::bom_construction::domain::Platform;
use crate::ports::outbound::{ArtifactScanner, CommandRunner, ProgressReporter};
use crate::shared::Result;

/// ScanDirectoryUseCase - Builds a bill of materials for every library
/// file found under a directory tree
///
/// Discovered files are identified as literal files; they are not walked,
/// because a scanned tree is expected to already contain what it ships.
pub struct ScanDirectoryUseCase<S, CR, PR> {
    scanner: S,
    build: BuildBomUseCase<CR, PR>,
}

impl<S, CR, PR> ScanDirectoryUseCase<S, CR, PR>
where
    S: ArtifactScanner,
    CR: CommandRunner,
    PR: ProgressReporter,
{
    pub fn new(scanner: S, command_runner: CR, progress_reporter: PR, platform: Platform) -> Self {
        Self {
            scanner,
            build: BuildBomUseCase::new(command_runner, progress_reporter, platform),
        }
    }

    pub fn execute(&self, request: ScanRequest) -> Result<BomResponse> {
        let files = self.scanner.scan(&request.root)?;
        tracing::debug!(
            "Found {} candidate file(s) under {}",
            files.len(),
            request.root.display()
        );

        let bom_request = BomRequest::new(Vec::new(), request.search_paths, files)
            .with_system_paths(request.include_system_paths)
            .with_chain_settings(request.chain_settings);
        self.build.execute(bom_request)
    }
}
