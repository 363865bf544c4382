//! Rendering backends.
//!
//! The derivation pipeline never touches pixels. It hands a backend an
//! [`AvatarScene`] describing what to draw, and asks it to measure text it
//! cannot measure itself. Each backend owns its graphics context for the
//! duration of one call.
//!
//! # Drawing Order
//!
//! ```text
//! acquire context
//!     │
//!     ▼
//! save ──► fill rounded rect (background color, clamped radius)
//!     │
//!     ▼
//! save ──► scale by layout.scale ──► draw initials at layout.rect ──► restore
//!     │        (skipped when the scene has no text layout)
//!     ▼
//! restore ──► release context as an image
//! ```

pub mod pixmap;

pub use pixmap::{GraphicsContext, PixmapBackend, encode_png};

use crate::appearance::DerivedAppearance;
use crate::color::HsbColor;
use crate::error::AvatarError;
use crate::geometry::{Rect, Size};
use crate::layout::TextLayout;
use crate::style::FontSpec;

/// Font, size and color of the initials.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    pub font: &'a FontSpec,
    pub size: f32,
    pub color: HsbColor,
}

/// Everything a backend needs to draw one avatar.
#[derive(Debug, Clone, Copy)]
pub struct AvatarScene<'a> {
    pub appearance: &'a DerivedAppearance,
    pub font: &'a FontSpec,

    /// Placement of the initials, or `None` for a background-only avatar.
    pub text: Option<TextLayout>,
}

impl<'a> AvatarScene<'a> {
    /// The rectangle filled with the background color.
    pub fn background_rect(&self) -> Rect {
        Rect::from_size(self.appearance.size)
    }

    /// The style the initials are measured and drawn with.
    pub fn text_style(&self) -> TextStyle<'a> {
        TextStyle {
            font: self.font,
            size: self.appearance.font_size,
            color: self.appearance.text_color,
        }
    }
}

/// A graphics environment that can measure and draw avatars.
pub trait RenderBackend {
    /// The finished image type.
    type Image;

    /// Measures the bounding size of `text`.
    ///
    /// A zero size means the text cannot be drawn (for example no font is
    /// available); the avatar is then drawn without text.
    fn measure_text(&mut self, text: &str, style: &TextStyle<'_>) -> Size;

    /// Draws the scene into a new image of the scene's canvas size.
    fn draw(&mut self, scene: &AvatarScene<'_>) -> Result<Self::Image, AvatarError>;
}

impl<B: RenderBackend + ?Sized> RenderBackend for &mut B {
    type Image = B::Image;

    fn measure_text(&mut self, text: &str, style: &TextStyle<'_>) -> Size {
        (**self).measure_text(text, style)
    }

    fn draw(&mut self, scene: &AvatarScene<'_>) -> Result<Self::Image, AvatarError> {
        (**self).draw(scene)
    }
}
