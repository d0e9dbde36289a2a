//! Export pass toward the external renderer.

pub mod pass;
