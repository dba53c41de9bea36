//! native-sbom - native library identification and bill-of-materials construction
//!
//! Given linker-style inputs (library names, search directories, concrete
//! files) this library locates the physical libraries, walks their
//! transitive shared-library dependencies and reduces each artifact to a
//! canonical package URL through an ordered chain of collectors
//! (pkg-config, RPM, Debian, file-name heuristics, binary strings).
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`bom_construction`): Domain models, services, policies and collectors
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use native_sbom::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let command_runner = SystemCommandRunner::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = BuildBomUseCase::new(command_runner, progress_reporter, Platform::current());
//!
//! // Execute
//! let request = BomRequest::new(
//!     vec![LibraryReference::new("png")],
//!     vec![PathBuf::from("/usr/local/lib")],
//!     vec![],
//! );
//! let response = use_case.execute(request)?;
//!
//! // Format output
//! let output = TextFormatter::new().format(&response)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod bom_construction;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        DirectoryScanner, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::process::SystemCommandRunner;
    pub use crate::application::dto::{BomRequest, BomResponse, ScanRequest};
    pub use crate::application::use_cases::{BuildBomUseCase, ScanDirectoryUseCase};
    pub use crate::bom_construction::collectors::{Collector, CollectorKind, Identification};
    pub use crate::bom_construction::domain::{
        BillOfMaterials, BomMetadata, Ecosystem, LibraryReference, PackageCoordinate, Platform,
        ResolvedFile,
    };
    pub use crate::bom_construction::policies::LibNamePolicy;
    pub use crate::bom_construction::services::{
        BomAssembler, ChainSettings, CollectorChain, PathResolver, TransitiveWalker,
    };
    pub use crate::ports::outbound::{
        ArtifactScanner, BomFormatter, CommandOutput, CommandRunner, OutputPresenter,
        ProgressReporter,
    };
    pub use crate::shared::error::BomError;
    pub use crate::shared::Result;
}
