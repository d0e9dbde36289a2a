use std::collections::BTreeSet;

use crate::foundation::{
    core::Flip,
    error::{CardError, CardResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Kind of a visual element. Fixed at creation, never changes.
pub enum LayerKind {
    /// Text content, possibly embedding `{Key}` placeholder tokens.
    Text,
    /// Raster image referenced by URL.
    Image,
    /// Brand logo image.
    Logo,
    /// Full-canvas background. Conventionally locked at the origin.
    Background,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One positioned visual element in a card's composition.
///
/// Layer list order *is* z-order: index 0 renders first (bottommost), later
/// entries draw on top. There is no separate z-index field.
pub struct Layer {
    /// Unique identifier, stable for the document's lifetime.
    pub id: String,
    /// Element kind.
    #[serde(rename = "type")]
    pub kind: LayerKind,
    /// User-facing label. Mutable, not required to be unique.
    pub name: String,
    /// Raw content: text (with optional `{Key}` tokens) or an image URL.
    pub content: String,
    /// Marks the layer as data-driven and names the binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_key: Option<String>,
    /// Alternative binding name used by newer template documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    /// Admin-authored restrictions honored by the end-user edit surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<LayerConstraints>,
    /// X position in canvas coordinates.
    pub x: f64,
    /// Y position in canvas coordinates.
    pub y: f64,
    /// Explicit width (image/background layers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Explicit height (image/background layers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// When `false` the layer is excluded from rendering but kept in the
    /// document.
    pub visible: bool,
    /// Transient user-level lock. Blocks end-user mutation except toggling
    /// the lock itself; never blocks the builder surface.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub locked: bool,
    /// Mirror flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip: Option<Flip>,
    /// Visual styling. Absent fields mean "component default", not zero.
    #[serde(default)]
    pub style: LayerStyle,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Admin-level locks authored in builder mode.
///
/// These are finer-grained than the transient [`Layer::locked`] flag and are
/// honored by the end-user mutation path regardless of it.
pub struct LayerConstraints {
    /// Reject end-user changes to `x`/`y`.
    pub lock_position: bool,
    /// Reject end-user style changes.
    pub lock_style: bool,
    /// Reject end-user content changes.
    pub lock_content: bool,
    /// Maximum content length in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_chars: Option<u32>,
    /// Colors the end user may pick from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_colors: Option<Vec<String>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Horizontal text alignment.
pub enum TextAlign {
    /// Align to the left edge.
    Left,
    /// Center within the text box.
    Center,
    /// Align to the right edge.
    Right,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Visual styling of a layer. Every field is optional.
pub struct LayerStyle {
    /// Font family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Font size in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Font weight ("bold", "400", ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// Italic flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    /// Underline flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    /// Foreground color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Background fill color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Text alignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    /// Line height multiplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    /// Letter spacing in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    /// Opacity in `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Corner radius in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    /// Uniform scale multiplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Blur radius in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
    /// Shadow descriptor (CSS-like string, passed through to the renderer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
    /// Gradient descriptor (CSS-like string, passed through to the renderer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient: Option<String>,
}

impl Layer {
    /// The binding name for data-driven layers, preferring `variable_name`
    /// over the legacy `placeholder_key`.
    pub fn binding(&self) -> Option<&str> {
        self.variable_name
            .as_deref()
            .or(self.placeholder_key.as_deref())
    }

    /// Whether this layer participates in placeholder resolution.
    pub fn is_text(&self) -> bool {
        self.kind == LayerKind::Text
    }

    /// Validate per-layer invariants.
    pub fn validate(&self) -> CardResult<()> {
        if self.id.trim().is_empty() {
            return Err(CardError::validation("layer id must be non-empty"));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(CardError::validation(format!(
                "layer '{}' position must be finite",
                self.id
            )));
        }
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if let Some(v) = value
                && (!v.is_finite() || v <= 0.0)
            {
                return Err(CardError::validation(format!(
                    "layer '{}' {field} must be finite and > 0",
                    self.id
                )));
            }
        }
        if let Some(r) = self.rotation
            && !r.is_finite()
        {
            return Err(CardError::validation(format!(
                "layer '{}' rotation must be finite",
                self.id
            )));
        }
        if let Some(op) = self.style.opacity
            && !(0.0..=1.0).contains(&op)
        {
            return Err(CardError::validation(format!(
                "layer '{}' opacity must be within [0, 1]",
                self.id
            )));
        }
        if let Some(c) = &self.constraints
            && c.max_chars == Some(0)
        {
            return Err(CardError::validation(format!(
                "layer '{}' max_chars must be > 0 when set",
                self.id
            )));
        }
        Ok(())
    }
}

/// Validate a full layer list: per-layer invariants plus id uniqueness.
pub fn validate_layers(layers: &[Layer]) -> CardResult<()> {
    let mut seen = BTreeSet::new();
    for layer in layers {
        layer.validate()?;
        if !seen.insert(layer.id.as_str()) {
            return Err(CardError::duplicate_id(layer.id.clone()));
        }
    }
    Ok(())
}
