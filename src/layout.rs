//! Text placement.
//!
//! Initials are drawn at their natural size when they fit inside the padded
//! canvas and shrunk uniformly when they do not. They are never enlarged.
//!
//! Backends apply the scale as a transform before drawing, so the placement
//! rectangle is expressed in the scaled context's local coordinates.

use crate::geometry::{Rect, Size};

/// Fraction of the smaller canvas side used as padding by default.
const DEFAULT_PADDING_RATIO: f32 = 0.1;

/// Clamps a corner radius to `[0, min(width, height) / 2]`.
pub fn clamp_corner_radius(requested: f32, size: Size) -> f32 {
    requested
        .max(0.0)
        .min(size.width / 2.0)
        .min(size.height / 2.0)
}

/// Resolves the padding, defaulting to 10% of the smaller side rounded up.
pub fn resolve_padding(requested: Option<f32>, size: Size) -> f32 {
    match requested {
        Some(padding) => padding.max(0.0),
        None => (size.min_side() * DEFAULT_PADDING_RATIO).ceil(),
    }
}

/// Scale and placement of the initials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    /// Uniform scale in `(0, 1]`.
    pub scale: f32,

    /// Text rectangle in pre-scale coordinates. Its size is the measured
    /// text size.
    pub rect: Rect,
}

impl TextLayout {
    /// The area the text covers once the scale has been applied.
    pub fn footprint(&self) -> Rect {
        self.rect.scaled(self.scale)
    }
}

/// Computes where the measured text goes on the canvas.
///
/// Returns `None` when there is nothing to place: the text has no area, or
/// the padding leaves no room inside the canvas. The avatar is then drawn
/// without text.
pub fn layout_text(size: Size, padding: f32, text: Size) -> Option<TextLayout> {
    if !text.is_positive() {
        return None;
    }

    let available = Rect::from_size(size).inset(padding).size();
    if !available.is_positive() {
        return None;
    }

    let scale = 1f32
        .min(available.width / text.width)
        .min(available.height / text.height);

    let rect = Rect::new(
        ((size.width - text.width * scale) / 2.0) / scale,
        ((size.height - text.height * scale) / 2.0) / scale,
        text.width,
        text.height,
    );

    tracing::trace!(scale, x = rect.x, y = rect.y, "placed initials");
    Some(TextLayout { scale, rect })
}
