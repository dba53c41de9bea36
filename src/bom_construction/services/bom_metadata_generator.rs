use crate::bom_construction::domain::{BomMetadata, Platform};
use chrono::Utc;
use uuid::Uuid;

/// BomMetadataGenerator service stamping each run
///
/// Produces an RFC 3339 timestamp and a `urn:uuid:` serial number so two
/// inventories of the same build can be told apart.
pub struct BomMetadataGenerator;

impl BomMetadataGenerator {
    /// Generates metadata with the current time and a fresh serial number
    pub fn generate_metadata(tool_name: &str, tool_version: &str, platform: Platform) -> BomMetadata {
        let timestamp = Utc::now().to_rfc3339();
        let serial_number = format!("urn:uuid:{}", Uuid::new_v4());

        BomMetadata::new(
            timestamp,
            tool_name.to_string(),
            tool_version.to_string(),
            serial_number,
            platform.to_string(),
        )
    }

    /// Metadata naming this crate and its compile-time version
    pub fn generate_default_metadata(platform: Platform) -> BomMetadata {
        Self::generate_metadata(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_metadata() {
        let metadata = BomMetadataGenerator::generate_metadata("test-tool", "1.0.0", Platform::MacOs);

        assert_eq!(metadata.tool_name(), "test-tool");
        assert_eq!(metadata.tool_version(), "1.0.0");
        assert_eq!(metadata.platform(), "macos");
        assert!(metadata.serial_number().starts_with("urn:uuid:"));
        assert!(metadata.timestamp().contains('T'));
    }

    #[test]
    fn test_generate_default_metadata() {
        let metadata = BomMetadataGenerator::generate_default_metadata(Platform::Linux);
        assert_eq!(metadata.tool_name(), "native-sbom");
        assert_eq!(metadata.tool_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_serial_numbers_are_unique() {
        let first = BomMetadataGenerator::generate_default_metadata(Platform::Linux);
        let second = BomMetadataGenerator::generate_default_metadata(Platform::Linux);
        assert_ne!(first.serial_number(), second.serial_number());
    }
}
