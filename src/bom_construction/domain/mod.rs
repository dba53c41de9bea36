pub mod bill_of_materials;
pub mod bom_metadata;
pub mod library_reference;
pub mod package_coordinate;
pub mod platform;
pub mod resolved_file;

pub use bill_of_materials::BillOfMaterials;
pub use bom_metadata::BomMetadata;
pub use library_reference::LibraryReference;
pub use package_coordinate::{Ecosystem, PackageCoordinate};
pub use platform::Platform;
pub use resolved_file::ResolvedFile;
