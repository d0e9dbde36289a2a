//! Placeholder token resolution.

pub mod placeholder;
