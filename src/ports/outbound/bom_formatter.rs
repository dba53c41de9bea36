use crate::application::dto::BomResponse;
use crate::shared::Result;

/// BomFormatter port for rendering a bill of materials
///
/// This port abstracts the output format handed to the audit step
/// (JSON document, plain purl list).
pub trait BomFormatter {
    /// Formats the BOM construction result
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, response: &BomResponse) -> Result<String>;
}
