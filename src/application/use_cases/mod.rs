/// Use cases module containing application business logic orchestration
mod build_bom;
mod scan_directory;

pub use build_bom::BuildBomUseCase;
pub use scan_directory::ScanDirectoryUseCase;
