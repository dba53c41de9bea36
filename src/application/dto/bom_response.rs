use crate::bom_construction::collectors::Identification;
use crate::bom_construction::domain::{BillOfMaterials, BomMetadata};
use std::path::PathBuf;

/// BomResponse - Response DTO from the BOM use cases
///
/// Carries the assembled inventory plus enough detail about the run for
/// formatters and the exit-code decision.
#[derive(Debug, Clone)]
pub struct BomResponse {
    pub bom: BillOfMaterials,
    pub metadata: BomMetadata,
    /// One entry per artifact that a collector identified
    pub identifications: Vec<Identification>,
    /// Artifacts no collector could identify
    pub unidentified: Vec<PathBuf>,
}

impl BomResponse {
    pub fn new(
        bom: BillOfMaterials,
        metadata: BomMetadata,
        identifications: Vec<Identification>,
        unidentified: Vec<PathBuf>,
    ) -> Self {
        Self {
            bom,
            metadata,
            identifications,
            unidentified,
        }
    }

    /// Whether no library at all was identified
    pub fn is_empty(&self) -> bool {
        self.bom.is_empty()
    }
}
