/// Data Transfer Objects for application layer
///
/// DTOs carry requests from the CLI into the use cases and results back
/// out to the formatters.
mod bom_request;
mod bom_response;
mod scan_request;

pub use bom_request::BomRequest;
pub use bom_response::BomResponse;
pub use scan_request::ScanRequest;
