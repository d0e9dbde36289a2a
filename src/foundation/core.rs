use crate::foundation::error::{CardError, CardResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Card canvas dimensions in background-image pixels.
///
/// Layer positions are expressed in this coordinate space, never in the
/// on-screen zoomed/scaled space a presentation surface may apply.
pub struct CanvasSize {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

/// Default portrait card canvas (matches the stock template set).
pub const DEFAULT_CANVAS: CanvasSize = CanvasSize {
    width: 1080,
    height: 1920,
};

impl CanvasSize {
    /// Construct a canvas, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> CardResult<Self> {
        if width == 0 || height == 0 {
            return Err(CardError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Independent horizontal/vertical mirror flags for a layer.
pub struct Flip {
    /// Mirror across the vertical axis.
    #[serde(default)]
    pub x: bool,
    /// Mirror across the horizontal axis.
    #[serde(default)]
    pub y: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_rejects_zero_dimensions() {
        assert!(CanvasSize::new(0, 1920).is_err());
        assert!(CanvasSize::new(1080, 0).is_err());
        assert_eq!(CanvasSize::new(1080, 1920).unwrap(), DEFAULT_CANVAS);
    }

    #[test]
    fn flip_defaults_to_no_mirror() {
        let f = Flip::default();
        assert!(!f.x && !f.y);
    }
}
