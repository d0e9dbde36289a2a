//! GreatCard layout core: the in-memory document behind the card editor.
//!
//! This crate owns the one subsystem of the greeting-card product with real
//! invariants: the ordered layer list and its mutation protocol. Everything
//! around it (routing, file storage, CSV parsing, rasterization) lives in
//! external collaborators reached through plain data contracts.
//!
//! # Editing flow
//!
//! 1. **Load**: a template's saved layout (or the default layer set) enters
//!    the session via [`LayoutStore::set_layers`].
//! 2. **Edit**: every user interaction is one [`LayoutStore`] mutation. Each
//!    committed mutation snapshots the immutable layer list into a bounded
//!    undo/redo log; locked and constraint-protected layers degrade to
//!    silent no-ops reported through [`MutationOutcome`].
//! 3. **Preview**: text layers are resolved against the active
//!    [`InputContext`] row by the pure [`resolve_layer`] function, leaving
//!    unresolved `{Key}` tokens verbatim so missing data stays visible.
//! 4. **Export**: [`resolve_cards`] re-runs the same resolver per recipient
//!    row and hands [`RenderRequest`] payloads to the external renderer.
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: resolution is pure and stable for a given
//!   `(content, context)` pair.
//! - **Snapshot isolation**: history entries are never retroactively altered
//!   by later mutations.
//! - **Single logical thread**: mutations are synchronous and atomic with
//!   respect to each other; async collaborators re-enter through the same
//!   operations.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod export;
mod foundation;
mod input;
mod layer;
mod resolve;
mod store;
mod template;

pub use export::pass::{RenderRequest, ResolvedCard, resolve_cards};
pub use foundation::core::{CanvasSize, DEFAULT_CANVAS, Flip};
pub use foundation::error::{CardError, CardResult};
pub use input::context::{BatchData, InputContext, InputMode, PRIMARY_FIELD, Row};
pub use layer::dsl::{
    LayerBuilder, background_layer, default_background_layer, default_layers,
};
pub use layer::model::{
    Layer, LayerConstraints, LayerKind, LayerStyle, TextAlign, validate_layers,
};
pub use resolve::placeholder::{Resolution, lookup, resolve_against_row, resolve_layer};
pub use store::layout::{
    ConstraintsUpdate, Direction, EditMode, HISTORY_LIMIT, LayerUpdate, LayoutStore,
    MutationOutcome, StyleUpdate,
};
pub use template::format::{TemplateDocument, TemplateInfo, TemplateMetadata};
