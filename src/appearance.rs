//! The pure part of avatar generation.
//!
//! [`derive_appearance`] turns an identity, a text source and a style into
//! everything a backend needs except the text measurement. It performs no
//! I/O and keeps no state, so results can be computed on any thread and
//! memoized freely by callers.

use crate::color::{HsbColor, derive_colors};
use crate::geometry::Size;
use crate::identity::Identity;
use crate::layout::{clamp_corner_radius, resolve_padding};
use crate::style::AvatarStyle;
use crate::text::TextSource;

/// Colors, text and geometry derived for one avatar.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedAppearance {
    /// Canvas size.
    pub size: Size,

    /// Background hue in `[0, 1)`.
    pub hue: f32,

    pub background: HsbColor,

    /// Gray chosen for contrast with the background.
    pub text_color: HsbColor,

    /// The short initials to draw. Never empty.
    pub initials: String,

    /// Corner radius after clamping to the canvas.
    pub corner_radius: f32,

    /// Padding after resolving the default.
    pub padding: f32,

    /// Font size after resolving the default.
    pub font_size: f32,
}

/// Derives the appearance of an avatar.
///
/// Returns `None` when the caller's placeholder should be used instead:
/// the canvas has a non-positive side, or the text yields no initials.
/// The canvas is checked before anything is hashed or extracted.
pub fn derive_appearance(
    identity: &Identity,
    text: &TextSource,
    size: Size,
    style: &AvatarStyle,
) -> Option<DerivedAppearance> {
    if !size.is_positive() {
        tracing::debug!(
            width = size.width,
            height = size.height,
            "non-positive canvas, using placeholder"
        );
        return None;
    }

    let initials = text.extract();
    if initials.is_empty() {
        tracing::debug!("no initials extracted, using placeholder");
        return None;
    }

    // Hash the long text, draw the short one.
    let colors = derive_colors(
        identity.key(),
        &initials.long,
        style.saturation,
        style.brightness,
    );
    tracing::trace!(hue = colors.hue, initials = %initials.short, "derived colors");

    Some(DerivedAppearance {
        size,
        hue: colors.hue,
        background: colors.background,
        text_color: colors.text,
        initials: initials.short,
        corner_radius: clamp_corner_radius(style.corner_radius, size),
        padding: resolve_padding(style.padding, size),
        font_size: style.font.resolved_size(size),
    })
}
