use crate::application::dto::BomResponse;
use crate::ports::outbound::BomFormatter;
use crate::shared::Result;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct Document {
    metadata: Metadata,
    components: Vec<Component>,
    lookup: BTreeMap<String, String>,
    identifications: Vec<IdentificationEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unidentified: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Metadata {
    timestamp: String,
    tools: Vec<Tool>,
    #[serde(rename = "serialNumber")]
    serial_number: String,
    platform: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct Component {
    purl: String,
    #[serde(rename = "type")]
    ecosystem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

#[derive(Debug, Serialize)]
struct IdentificationEntry {
    source: String,
    collector: String,
    purl: String,
}

/// JsonFormatter adapter rendering the full BOM as a JSON document
///
/// Alongside the coordinates the document carries the coordinate to file
/// lookup and which collector named each artifact.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BomFormatter for JsonFormatter {
    fn format(&self, response: &BomResponse) -> Result<String> {
        let bom = &response.bom;
        let metadata = &response.metadata;

        let components = bom
            .coordinates()
            .iter()
            .map(|coordinate| Component {
                purl: coordinate.to_purl(),
                ecosystem: coordinate.ecosystem().to_string(),
                namespace: coordinate.namespace().map(str::to_string),
                name: coordinate.name().to_string(),
                version: coordinate.version().to_string(),
                source: bom
                    .source_of(coordinate)
                    .map(|p| p.display().to_string()),
            })
            .collect();

        let document = Document {
            metadata: Metadata {
                timestamp: metadata.timestamp().to_string(),
                tools: vec![Tool {
                    name: metadata.tool_name().to_string(),
                    version: metadata.tool_version().to_string(),
                }],
                serial_number: metadata.serial_number().to_string(),
                platform: metadata.platform().to_string(),
            },
            components,
            lookup: bom
                .file_lookup()
                .iter()
                .map(|(purl, path)| (purl.clone(), path.display().to_string()))
                .collect(),
            identifications: response
                .identifications
                .iter()
                .map(|id| IdentificationEntry {
                    source: id.source.display().to_string(),
                    collector: id.collector.to_string(),
                    purl: id.coordinate.to_purl(),
                })
                .collect(),
            unidentified: response
                .unidentified
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&document)?)
    }
}
