//! Batch export: one resolved card per recipient row.
//!
//! The core never rasterizes. This pass produces the payloads the external
//! render service consumes: the visible layer list with every text layer's
//! content resolved against one recipient row. Batch mode iterates the full
//! row set re-invoking the same resolver the editor preview uses (which only
//! ever sees row 0); manual mode yields exactly one card.

use crate::{
    foundation::core::CanvasSize,
    input::context::{InputContext, InputMode, Row},
    layer::model::Layer,
    resolve::placeholder::resolve_against_row,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One card's worth of resolved layers.
pub struct ResolvedCard {
    /// Index of the source row (always 0 in manual mode).
    pub row_index: usize,
    /// Visible layers with text content fully resolved.
    pub layers: Vec<Layer>,
    /// True if any text layer kept an unresolved token.
    pub unresolved: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Composition request handed to the external render service.
pub struct RenderRequest {
    /// Canvas dimensions.
    pub canvas: CanvasSize,
    /// Background image rendered under the layers, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_url: Option<String>,
    /// Resolved visible layers in render order.
    pub layers: Vec<Layer>,
}

impl RenderRequest {
    /// Wrap one resolved card for the wire.
    pub fn new(canvas: CanvasSize, background_url: Option<String>, card: ResolvedCard) -> Self {
        Self {
            canvas,
            background_url,
            layers: card.layers,
        }
    }
}

/// Resolve the visible layers against every recipient record in the active
/// mode. Pure with respect to its inputs; the layer document is untouched.
#[tracing::instrument(skip(layers, ctx), fields(layers = layers.len(), mode = ?ctx.mode))]
pub fn resolve_cards(layers: &[Layer], ctx: &InputContext) -> Vec<ResolvedCard> {
    match ctx.mode {
        InputMode::Manual => vec![resolve_one(layers, &ctx.manual, 0)],
        InputMode::Batch => {
            let Some(batch) = &ctx.batch else {
                return Vec::new();
            };
            // Older upload payloads carried only the preview subset.
            let rows: &[Row] = if batch.rows.is_empty() {
                &batch.preview
            } else {
                &batch.rows
            };
            rows.iter()
                .enumerate()
                .map(|(i, row)| resolve_one(layers, row, i))
                .collect()
        }
    }
}

fn resolve_one(layers: &[Layer], row: &Row, row_index: usize) -> ResolvedCard {
    let mut unresolved = false;
    let layers = layers
        .iter()
        .filter(|l| l.visible)
        .map(|l| {
            if !l.is_text() {
                return l.clone();
            }
            let resolution = resolve_against_row(&l.content, row);
            unresolved |= resolution.unresolved;
            let mut resolved = l.clone();
            resolved.content = resolution.text;
            resolved
        })
        .collect();

    ResolvedCard {
        row_index,
        layers,
        unresolved,
    }
}
