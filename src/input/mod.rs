//! Recipient data context.

pub mod context;
