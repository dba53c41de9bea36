use super::PackageCoordinate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Final, deduplicated inventory of package coordinates.
///
/// Built once per run by the `BomAssembler`; read-only afterwards. The
/// coordinate order is the order of identification, which is stable for a
/// given filesystem state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BillOfMaterials {
    coordinates: Vec<PackageCoordinate>,
    file_lookup: BTreeMap<String, PathBuf>,
}

impl BillOfMaterials {
    pub fn new(
        coordinates: Vec<PackageCoordinate>,
        file_lookup: BTreeMap<String, PathBuf>,
    ) -> Self {
        Self {
            coordinates,
            file_lookup,
        }
    }

    pub fn coordinates(&self) -> &[PackageCoordinate] {
        &self.coordinates
    }

    /// Coordinate string to the artifact it was identified from.
    pub fn file_lookup(&self) -> &BTreeMap<String, PathBuf> {
        &self.file_lookup
    }

    pub fn source_of(&self, coordinate: &PackageCoordinate) -> Option<&Path> {
        self.file_lookup
            .get(&coordinate.to_string())
            .map(PathBuf::as_path)
    }

    pub fn purls(&self) -> Vec<String> {
        self.coordinates.iter().map(|c| c.to_string()).collect()
    }

    pub fn contains_purl(&self, purl: &str) -> bool {
        self.coordinates.iter().any(|c| c.to_string() == purl)
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}
