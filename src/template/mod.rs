//! Persisted layout format.

pub mod format;
