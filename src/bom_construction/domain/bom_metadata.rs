/// BomMetadata value object describing one BOM construction run
#[derive(Debug, Clone)]
pub struct BomMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    serial_number: String,
    platform: String,
}

impl BomMetadata {
    pub fn new(
        timestamp: String,
        tool_name: String,
        tool_version: String,
        serial_number: String,
        platform: String,
    ) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            serial_number,
            platform,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_metadata_new() {
        let metadata = BomMetadata::new(
            "2024-01-01T00:00:00Z".to_string(),
            "native-sbom".to_string(),
            "0.4.0".to_string(),
            "urn:uuid:12345".to_string(),
            "linux".to_string(),
        );

        assert_eq!(metadata.timestamp(), "2024-01-01T00:00:00Z");
        assert_eq!(metadata.tool_name(), "native-sbom");
        assert_eq!(metadata.tool_version(), "0.4.0");
        assert_eq!(metadata.serial_number(), "urn:uuid:12345");
        assert_eq!(metadata.platform(), "linux");
    }
}
