//! Visual parameters of an avatar.

use crate::geometry::Size;

/// Default saturation of the background color.
pub const DEFAULT_SATURATION: f32 = 0.40;

/// Default brightness of the background color.
pub const DEFAULT_BRIGHTNESS: f32 = 0.80;

/// Default font weight (regular).
pub const DEFAULT_FONT_WEIGHT: u16 = 400;

/// Generic family used when no font family is set.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

// ============================================================================
// FontSpec
// ============================================================================

/// The font the initials are set in.
///
/// Unset fields resolve to the system sans-serif face at half the canvas
/// height.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font family name.
    pub family: Option<String>,

    /// Font size in canvas units.
    pub size: Option<f32>,

    /// CSS-style weight (100-900).
    pub weight: u16,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: None,
            size: None,
            weight: DEFAULT_FONT_WEIGHT,
        }
    }
}

impl FontSpec {
    /// Creates a font spec for the given family.
    pub fn family(family: impl Into<String>) -> Self {
        Self {
            family: Some(family.into()),
            ..Self::default()
        }
    }

    /// Sets the font size. Non-positive sizes fall back to the default.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = (size > 0.0).then_some(size);
        self
    }

    /// Sets the weight, clamped to 1-1000.
    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight.clamp(1, 1000);
        self
    }

    /// The family name to request from the font database.
    pub fn family_name(&self) -> &str {
        self.family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    /// The font size used on a canvas: the configured size, or half the
    /// canvas height rounded down.
    pub fn resolved_size(&self, canvas: Size) -> f32 {
        self.size.unwrap_or_else(|| (canvas.height / 2.0).floor())
    }
}

// ============================================================================
// AvatarStyle
// ============================================================================

/// Style parameters shared by every avatar of a generator.
///
/// # Example
///
/// ```
/// use initials_avatar::AvatarStyle;
///
/// let style = AvatarStyle::new()
///     .with_brightness(0.9)
///     .with_corner_radius(12.0)
///     .with_padding(4.0);
///
/// assert_eq!(style.saturation, 0.40);
/// assert_eq!(style.padding, Some(4.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarStyle {
    /// Background saturation (0.0-1.0).
    pub saturation: f32,

    /// Background brightness (0.0-1.0). Above 0.8 the text turns dark.
    pub brightness: f32,

    /// Requested corner radius. Clamped to half the smaller canvas side
    /// when drawing.
    pub corner_radius: f32,

    /// Inset around the text. `None` uses 10% of the smaller canvas side,
    /// rounded up.
    pub padding: Option<f32>,

    pub font: FontSpec,
}

impl Default for AvatarStyle {
    fn default() -> Self {
        Self {
            saturation: DEFAULT_SATURATION,
            brightness: DEFAULT_BRIGHTNESS,
            corner_radius: 0.0,
            padding: None,
            font: FontSpec::default(),
        }
    }
}

impl AvatarStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The saturation is clamped to 0.0-1.0.
    pub fn with_saturation(mut self, saturation: f32) -> Self {
        self.saturation = saturation.clamp(0.0, 1.0);
        self
    }

    /// The brightness is clamped to 0.0-1.0.
    pub fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness.clamp(0.0, 1.0);
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = Some(padding.max(0.0));
        self
    }

    /// Restores the proportional default padding.
    pub fn with_default_padding(mut self) -> Self {
        self.padding = None;
        self
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let style = AvatarStyle::default();
        assert_eq!(style.saturation, 0.40);
        assert_eq!(style.brightness, 0.80);
        assert_eq!(style.corner_radius, 0.0);
        assert_eq!(style.padding, None);
        assert_eq!(style.font.family_name(), "sans-serif");
        assert_eq!(style.font.weight, 400);
    }

    #[test]
    fn builders_clamp() {
        let style = AvatarStyle::new()
            .with_saturation(1.5)
            .with_brightness(-0.1)
            .with_corner_radius(-2.0)
            .with_padding(-1.0);
        assert_eq!(style.saturation, 1.0);
        assert_eq!(style.brightness, 0.0);
        assert_eq!(style.corner_radius, 0.0);
        assert_eq!(style.padding, Some(0.0));
        assert_eq!(style.with_default_padding().padding, None);
    }

    #[test]
    fn font_size_defaults_to_half_height() {
        let font = FontSpec::default();
        assert_eq!(font.resolved_size(Size::new(100.0, 100.0)), 50.0);
        assert_eq!(font.resolved_size(Size::new(100.0, 41.0)), 20.0);
        assert_eq!(font.clone().with_size(12.0).resolved_size(Size::new(100.0, 41.0)), 12.0);
        assert_eq!(font.with_size(0.0).size, None);
    }

    #[test]
    fn font_family_and_weight() {
        let font = FontSpec::family("Inter").with_weight(2000);
        assert_eq!(font.family_name(), "Inter");
        assert_eq!(font.weight, 1000);
    }
}
