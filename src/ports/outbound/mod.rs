/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the core uses to interact with
/// external systems (processes, console, file system).
pub mod artifact_scanner;
pub mod bom_formatter;
pub mod command_runner;
pub mod output_presenter;
pub mod progress_reporter;

pub use artifact_scanner::ArtifactScanner;
pub use bom_formatter::BomFormatter;
pub use command_runner::{describe_command, CommandOutput, CommandRunner};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
