//! Persisted layout format and the external template-source descriptor.
//!
//! The round-trip contract is a JSON object `{ metadata, layers }`. Loading
//! is the one place in the core where a hard error is appropriate: a missing
//! or non-array `layers` field means the file is corrupt or foreign and must
//! be surfaced to the caller instead of silently accepted.

use crate::{
    foundation::core::CanvasSize,
    foundation::error::{CardError, CardResult},
    layer::model::{Layer, validate_layers},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Descriptive header of a persisted template document.
pub struct TemplateMetadata {
    /// Template display name.
    pub name: String,
    /// Canvas dimensions the layer positions are expressed in.
    pub dimensions: CanvasSize,
    /// Category labels ("Birthday", ...).
    #[serde(default)]
    pub categories: Vec<String>,
    /// Format version string.
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// The persisted layout document: the only state format the core owns.
pub struct TemplateDocument {
    /// Document header.
    pub metadata: TemplateMetadata,
    /// Layer list in render order.
    pub layers: Vec<Layer>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Descriptor supplied by the external template catalog.
pub struct TemplateInfo {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Catalog category.
    pub category: String,
    /// Preview thumbnail URL.
    pub preview_image_url: String,
    /// Background image URL rendered under the layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_url: Option<String>,
    /// Canvas dimensions.
    pub dimensions: CanvasSize,
}

impl TemplateDocument {
    /// Current format version written by [`TemplateDocument::to_json`].
    pub const FORMAT_VERSION: &'static str = "1.0";

    /// Assemble a document from the current layer list.
    pub fn new(metadata: TemplateMetadata, layers: Vec<Layer>) -> CardResult<Self> {
        validate_layers(&layers)?;
        Ok(Self { metadata, layers })
    }

    /// Parse a persisted layout.
    ///
    /// Fails with [`CardError::MalformedLayout`] when the `layers` field is
    /// missing or not an array, and with [`CardError::Serde`] on any other
    /// shape mismatch. Layer invariants (id uniqueness) are re-checked so a
    /// hand-edited file cannot smuggle in a corrupt document.
    #[tracing::instrument(skip(json), fields(len = json.len()))]
    pub fn from_json(json: &str) -> CardResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| CardError::malformed_layout(format!("not valid JSON: {e}")))?;
        match value.get("layers") {
            None => {
                return Err(CardError::malformed_layout("missing 'layers' field"));
            }
            Some(layers) if !layers.is_array() => {
                return Err(CardError::malformed_layout("'layers' is not an array"));
            }
            Some(_) => {}
        }

        let doc: Self =
            serde_json::from_value(value).map_err(|e| CardError::serde(e.to_string()))?;
        validate_layers(&doc.layers)?;
        Ok(doc)
    }

    /// Serialize in the persisted format (pretty-printed, matching the
    /// files the template builder exports).
    pub fn to_json(&self) -> CardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CardError::serde(e.to_string()))
    }
}
