/// Shared error types, result alias, path cleaning and file-reading guards
pub mod error;
pub mod paths;
pub mod result;
pub mod safe_read;

pub use result::Result;
