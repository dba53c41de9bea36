use crate::bom_construction::services::ChainSettings;
use std::path::PathBuf;

/// ScanRequest - Request DTO for scanning a directory tree
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub root: PathBuf,
    pub search_paths: Vec<PathBuf>,
    pub include_system_paths: bool,
    pub chain_settings: ChainSettings,
}

impl ScanRequest {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            search_paths: Vec::new(),
            include_system_paths: true,
            chain_settings: ChainSettings::default(),
        }
    }

    pub fn with_search_paths(mut self, search_paths: Vec<PathBuf>) -> Self {
        self.search_paths = search_paths;
        self
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
