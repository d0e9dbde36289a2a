use crate::{
    foundation::core::{CanvasSize, DEFAULT_CANVAS, Flip},
    layer::model::{Layer, LayerConstraints, LayerKind, LayerStyle, TextAlign},
};

/// Consuming builder for [`Layer`] values.
///
/// Callers are responsible for id uniqueness before handing the layer to
/// [`LayoutStore::add_layer`](crate::LayoutStore::add_layer).
pub struct LayerBuilder {
    layer: Layer,
}

impl LayerBuilder {
    /// Start a layer of the given kind.
    pub fn new(id: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            layer: Layer {
                id: id.into(),
                kind,
                name: String::new(),
                content: String::new(),
                placeholder_key: None,
                variable_name: None,
                constraints: None,
                x: 0.0,
                y: 0.0,
                width: None,
                height: None,
                rotation: None,
                visible: true,
                locked: false,
                flip: None,
                style: LayerStyle::default(),
            },
        }
    }

    /// Start a text layer with content.
    pub fn text(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, LayerKind::Text).content(content)
    }

    /// Start an image layer with a source URL.
    pub fn image(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(id, LayerKind::Image).content(url)
    }

    /// Set the user-facing label.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.layer.name = name.into();
        self
    }

    /// Set the raw content string.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.layer.content = content.into();
        self
    }

    /// Set the position in canvas coordinates.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.layer.x = x;
        self.layer.y = y;
        self
    }

    /// Set an explicit size.
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.layer.width = Some(width);
        self.layer.height = Some(height);
        self
    }

    /// Set rotation in degrees.
    pub fn rotated(mut self, degrees: f64) -> Self {
        self.layer.rotation = Some(degrees);
        self
    }

    /// Set mirror flags.
    pub fn flipped(mut self, x: bool, y: bool) -> Self {
        self.layer.flip = Some(Flip { x, y });
        self
    }

    /// Mark the layer as data-driven under the legacy binding name.
    pub fn placeholder_key(mut self, key: impl Into<String>) -> Self {
        self.layer.placeholder_key = Some(key.into());
        self
    }

    /// Set the transient lock flag.
    pub fn locked(mut self, locked: bool) -> Self {
        self.layer.locked = locked;
        self
    }

    /// Hide the layer.
    pub fn hidden(mut self) -> Self {
        self.layer.visible = false;
        self
    }

    /// Replace the whole style object.
    pub fn style(mut self, style: LayerStyle) -> Self {
        self.layer.style = style;
        self
    }

    /// Attach builder-authored constraints.
    pub fn constraints(mut self, constraints: LayerConstraints) -> Self {
        self.layer.constraints = Some(constraints);
        self
    }

    /// Finish the layer.
    pub fn build(self) -> Layer {
        self.layer
    }
}

/// Starter layer set used when a template ships without a saved layout:
/// a logo slot plus name/position/occasion text placeholders.
pub fn default_layers() -> Vec<Layer> {
    vec![
        LayerBuilder::new("logo-1", LayerKind::Logo)
            .name("Logo")
            .content("LOGO")
            .at(100.0, 100.0)
            .style(LayerStyle {
                size: Some(60.0),
                color: Some("#e5e7eb".to_string()),
                ..LayerStyle::default()
            })
            .build(),
        LayerBuilder::text("name-1", "{Name}")
            .name("Recipient Name")
            .placeholder_key("name")
            .at(540.0, 1100.0)
            .style(LayerStyle {
                font: Some("Inter".to_string()),
                size: Some(48.0),
                color: Some("#1f2937".to_string()),
                align: Some(TextAlign::Center),
                weight: Some("bold".to_string()),
                ..LayerStyle::default()
            })
            .build(),
        LayerBuilder::text("position-1", "{Position}")
            .name("Role / Position")
            .placeholder_key("position")
            .at(540.0, 1180.0)
            .style(LayerStyle {
                font: Some("Inter".to_string()),
                size: Some(32.0),
                color: Some("#4b5563".to_string()),
                align: Some(TextAlign::Center),
                ..LayerStyle::default()
            })
            .build(),
        LayerBuilder::text("occasion-1", "{Occasion}")
            .name("Occasion")
            .placeholder_key("occasion")
            .at(540.0, 200.0)
            .style(LayerStyle {
                font: Some("Playfair Display".to_string()),
                size: Some(72.0),
                color: Some("#111827".to_string()),
                align: Some(TextAlign::Center),
                ..LayerStyle::default()
            })
            .build(),
    ]
}

/// Locked full-canvas background layer used as the builder-mode starting
/// point for a blank template.
pub fn background_layer(canvas: CanvasSize) -> Layer {
    LayerBuilder::new("bg-1", LayerKind::Background)
        .name("Background")
        .at(0.0, 0.0)
        .sized(f64::from(canvas.width), f64::from(canvas.height))
        .locked(true)
        .style(LayerStyle {
            background_color: Some("#ffffff".to_string()),
            ..LayerStyle::default()
        })
        .build()
}

/// Convenience wrapper for [`background_layer`] on the default canvas.
pub fn default_background_layer() -> Layer {
    background_layer(DEFAULT_CANVAS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::model::validate_layers;

    #[test]
    fn default_layers_are_valid_and_data_driven() {
        let layers = default_layers();
        validate_layers(&layers).unwrap();
        assert_eq!(layers.len(), 4);
        assert!(
            layers
                .iter()
                .filter(|l| l.is_text())
                .all(|l| l.binding().is_some())
        );
    }

    #[test]
    fn background_spans_canvas_and_is_locked() {
        let bg = default_background_layer();
        assert_eq!(bg.kind, LayerKind::Background);
        assert!(bg.locked);
        assert_eq!((bg.x, bg.y), (0.0, 0.0));
        assert_eq!(bg.width, Some(1080.0));
        assert_eq!(bg.height, Some(1920.0));
    }
}
