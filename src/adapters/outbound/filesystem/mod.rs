/// Filesystem adapters for scanning input trees and writing output
mod directory_scanner;
mod file_writer;

pub use directory_scanner::DirectoryScanner;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
