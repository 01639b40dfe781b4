//! Domain layer types and invariants.

pub mod draft;
pub mod filters;
pub mod pagination;
pub mod permissions;
pub mod records;
pub mod resources;
