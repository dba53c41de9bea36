use crate::bom_construction::collectors::Identification;
use crate::bom_construction::domain::{BillOfMaterials, PackageCoordinate};
use crate::bom_construction::policies::LibNamePolicy;
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

/// BomAssembler service merging identifications into a BillOfMaterials
///
/// Applies the "lib" naming policy, drops duplicate coordinates and keeps
/// the first artifact each coordinate was seen on.
#[derive(Debug, Default)]
pub struct BomAssembler {
    coordinates: Vec<PackageCoordinate>,
    seen: HashSet<PackageCoordinate>,
    file_lookup: BTreeMap<String, PathBuf>,
}

impl BomAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one identified artifact; returns how many coordinates were new.
    pub fn add(&mut self, identification: &Identification) -> usize {
        let mut added = 0;
        for coordinate in LibNamePolicy::variants(&identification.coordinate) {
            self.file_lookup
                .entry(coordinate.to_string())
                .or_insert_with(|| identification.source.clone());
            if self.seen.insert(coordinate.clone()) {
                self.coordinates.push(coordinate);
                added += 1;
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn build(self) -> BillOfMaterials {
        BillOfMaterials::new(self.coordinates, self.file_lookup)
    }
}
