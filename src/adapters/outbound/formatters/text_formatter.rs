use crate::application::dto::BomResponse;
use crate::ports::outbound::BomFormatter;
use crate::shared::Result;

/// TextFormatter adapter printing one package URL per line
///
/// Meant for piping into scripts; nothing else is emitted.
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BomFormatter for TextFormatter {
    fn format(&self, response: &BomResponse) -> Result<String> {
        Ok(response.bom.purls().join("\n"))
    }
}
