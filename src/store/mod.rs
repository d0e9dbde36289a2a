//! Layout mutation authority.

pub mod layout;
