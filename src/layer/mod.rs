//! Layer document model and authoring helpers.

pub mod dsl;
pub mod model;
