//! Library identification and bill-of-materials construction.
//!
//! Leaves first: `domain` value objects, the `name_version` extractors,
//! the `collectors`, then the `services` that resolve, walk, identify and
//! assemble.

pub mod collectors;
pub mod domain;
pub mod policies;
pub mod services;
