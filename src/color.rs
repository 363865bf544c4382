//! Color derivation.
//!
//! The identity key seeds a rolling hash over the long text, and the hash
//! picks a hue. Saturation and brightness come from the style, so every
//! avatar in a set shares the same tone and differs only in hue.

use palette::{Hsv, IntoColor, Srgb};

// ============================================================================
// Hashing
// ============================================================================

/// Multiplier applied to the running hash for every byte.
const HASH_MULTIPLIER: u64 = 33;

/// Weight applied to every byte before it is mixed in.
const BYTE_WEIGHT: u64 = 101;

/// Background brightness above which text switches to dark gray.
const DARK_TEXT_THRESHOLD: f32 = 0.8;

const DARK_TEXT_BRIGHTNESS: f32 = 0.2;
const LIGHT_TEXT_BRIGHTNESS: f32 = 1.0;

/// Mixes the long text into the identity key.
///
/// Starting from `key`, every UTF-8 byte `b` updates the hash as
/// `h = h * 33 + b * 101` with wrapping 64-bit arithmetic. Empty text
/// returns `key` unchanged.
pub fn combine_hash(key: u64, long: &str) -> u64 {
    long.bytes().fold(key, |hash, byte| {
        hash.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(u64::from(byte) * BYTE_WEIGHT)
    })
}

/// Maps a hash to a hue in `[0, 1)`.
pub fn hue_for(hash: u64) -> f32 {
    (hash % 360) as f32 / 360.0
}

// ============================================================================
// HsbColor
// ============================================================================

/// A color in hue/saturation/brightness form.
///
/// All components are in `[0, 1]`; `hue` is a fraction of a full turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsbColor {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub alpha: f32,
}

impl HsbColor {
    /// Creates a fully opaque color.
    pub fn new(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self {
            hue,
            saturation,
            brightness,
            alpha: 1.0,
        }
    }

    /// Creates a fully opaque gray.
    pub fn gray(brightness: f32) -> Self {
        Self::new(0.0, 0.0, brightness)
    }

    /// Converts to 8-bit sRGB with straight alpha.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        let hsv = Hsv::new(
            self.hue * 360.0,
            self.saturation.clamp(0.0, 1.0),
            self.brightness.clamp(0.0, 1.0),
        );
        let rgb: Srgb = hsv.into_color();
        let rgb: Srgb<u8> = rgb.into_format();
        (
            rgb.red,
            rgb.green,
            rgb.blue,
            (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }

    /// Formats the color as `#rrggbb`, ignoring alpha.
    pub fn to_hex(&self) -> String {
        let (r, g, b, _a) = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

// ============================================================================
// ColorScheme
// ============================================================================

/// Background and text colors for one avatar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScheme {
    /// Hue shared by the background, in `[0, 1)`.
    pub hue: f32,
    pub background: HsbColor,
    pub text: HsbColor,
}

/// Background color for a hue at the style's saturation and brightness.
pub fn background_color(hue: f32, saturation: f32, brightness: f32) -> HsbColor {
    HsbColor::new(hue, saturation, brightness)
}

/// Text color readable on a background of the given brightness.
///
/// Very light backgrounds get dark gray text, everything else white.
pub fn text_color(background_brightness: f32) -> HsbColor {
    if background_brightness > DARK_TEXT_THRESHOLD {
        HsbColor::gray(DARK_TEXT_BRIGHTNESS)
    } else {
        HsbColor::gray(LIGHT_TEXT_BRIGHTNESS)
    }
}

/// Derives the full color scheme from an identity key and long text.
pub fn derive_colors(key: u64, long: &str, saturation: f32, brightness: f32) -> ColorScheme {
    let hue = hue_for(combine_hash(key, long));
    ColorScheme {
        hue,
        background: background_color(hue, saturation, brightness),
        text: text_color(brightness),
    }
}

// ============================================================================
// Tests
// ============================================================================
