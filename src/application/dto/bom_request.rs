use crate::bom_construction::domain::LibraryReference;
use crate::bom_construction::services::ChainSettings;
use std::path::PathBuf;

/// BomRequest - Request DTO for building a bill of materials
///
/// Mirrors what a linker invocation supplies: `-l` names, `-L`
/// directories and literal library or archive files.
#[derive(Debug, Clone)]
pub struct BomRequest {
    /// Bare library names, resolved and walked transitively
    pub library_names: Vec<LibraryReference>,
    /// Caller search directories, probed before the system defaults
    pub search_paths: Vec<PathBuf>,
    /// Files identified as given, without resolution
    pub files: Vec<PathBuf>,
    /// Whether the toolchain's default directories are appended
    pub include_system_paths: bool,
    pub chain_settings: ChainSettings,
}

impl BomRequest {
    pub fn new(
        library_names: Vec<LibraryReference>,
        search_paths: Vec<PathBuf>,
        files: Vec<PathBuf>,
    ) -> Self {
        Self {
            library_names,
            search_paths,
            files,
            include_system_paths: true,
            chain_settings: ChainSettings::default(),
        }
    }

    pub fn with_system_paths(mut self, include: bool) -> Self {
        self.include_system_paths = include;
        self
    }

    pub fn with_chain_settings(mut self, settings: ChainSettings) -> Self {
        self.chain_settings = settings;
        self
    }
}
