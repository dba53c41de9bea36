mod bom_assembler;
mod bom_metadata_generator;
mod collector_chain;
mod link_inspector;
pub mod name_version;
mod path_resolver;
mod system_search_paths;
mod transitive_walker;

pub use bom_assembler::BomAssembler;
pub use bom_metadata_generator::BomMetadataGenerator;
pub use collector_chain::{ChainSettings, CollectorChain};
pub use link_inspector::{parse_link_output, LinkInspector};
pub use path_resolver::PathResolver;
pub use system_search_paths::{
    merge_search_paths, parse_clang_linker_output, parse_gcc_search_dirs, SystemSearchPaths,
};
pub use transitive_walker::TransitiveWalker;
