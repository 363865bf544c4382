//! Serializable avatar style profile.
//!
//! An [`AvatarProfile`] captures an [`AvatarStyle`] in a JSON-friendly form
//! so a host application can store it in its settings or pass it between
//! processes. Every field is optional; missing fields take the style
//! defaults.
//!
//! # Example
//!
//! ```
//! use initials_avatar::{AvatarProfile, AvatarStyle, FontSettings};
//!
//! let profile = AvatarProfile::new()
//!     .with_brightness(0.9)
//!     .with_corner_radius(16.0)
//!     .with_font(FontSettings { family: Some("Inter".into()), ..Default::default() });
//!
//! let json = profile.to_json().unwrap();
//! let restored = AvatarProfile::from_json(&json).unwrap();
//!
//! let style = AvatarStyle::from(&restored);
//! assert_eq!(style.brightness, 0.9);
//! assert_eq!(style.font.family.as_deref(), Some("Inter"));
//! ```

use serde::{Deserialize, Serialize};

use crate::style::{AvatarStyle, DEFAULT_FONT_WEIGHT, FontSpec};

// ============================================================================
// Font Settings
// ============================================================================

/// Serializable settings for the initials font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct FontSettings {
    /// Font family name. Defaults to the system sans-serif face.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// Font size. Defaults to half the canvas height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,

    /// Font weight (100-900). Defaults to 400.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
}

impl From<&FontSpec> for FontSettings {
    fn from(font: &FontSpec) -> Self {
        Self {
            family: font.family.clone(),
            size: font.size,
            weight: (font.weight != DEFAULT_FONT_WEIGHT).then_some(font.weight),
        }
    }
}

impl From<&FontSettings> for FontSpec {
    fn from(settings: &FontSettings) -> Self {
        let mut font = FontSpec {
            family: settings.family.clone(),
            ..FontSpec::default()
        };
        if let Some(size) = settings.size {
            font = font.with_size(size);
        }
        if let Some(weight) = settings.weight {
            font = font.with_weight(weight);
        }
        font
    }
}

// ============================================================================
// AvatarProfile
// ============================================================================

/// A serializable profile containing all style settings.
///
/// # JSON Format
///
/// ```json
/// {
///   "saturation": 0.4,
///   "brightness": 0.8,
///   "cornerRadius": 12.0,
///   "padding": 4.0,
///   "font": { "family": "Inter", "weight": 600 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AvatarProfile {
    /// Background saturation (0.0-1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f32>,

    /// Background brightness (0.0-1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f32>,

    /// Corner radius in canvas units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f32>,

    /// Padding in canvas units. `None` means 10% of the smaller side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,

    /// Font settings. `None` means the default font.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<FontSettings>,
}

impl AvatarProfile {
    /// Creates an empty profile; every setting takes its default.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saturation(mut self, saturation: f32) -> Self {
        self.saturation = Some(saturation);
        self
    }

    pub fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = Some(brightness);
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_font(mut self, font: FontSettings) -> Self {
        self.font = Some(font);
        self
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<&AvatarProfile> for AvatarStyle {
    /// Builds a style, clamping out-of-range values.
    fn from(profile: &AvatarProfile) -> Self {
        let mut style = AvatarStyle::default();
        if let Some(saturation) = profile.saturation {
            style = style.with_saturation(saturation);
        }
        if let Some(brightness) = profile.brightness {
            style = style.with_brightness(brightness);
        }
        if let Some(radius) = profile.corner_radius {
            style = style.with_corner_radius(radius);
        }
        if let Some(padding) = profile.padding {
            style = style.with_padding(padding);
        }
        if let Some(font) = &profile.font {
            style = style.with_font(font.into());
        }
        style
    }
}

impl From<&AvatarStyle> for AvatarProfile {
    fn from(style: &AvatarStyle) -> Self {
        let font = FontSettings::from(&style.font);
        Self {
            saturation: Some(style.saturation),
            brightness: Some(style.brightness),
            corner_radius: Some(style.corner_radius),
            padding: style.padding,
            font: (font != FontSettings::default()).then_some(font),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
