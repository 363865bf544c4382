//! Avatar generation entry points.

use crate::appearance::{DerivedAppearance, derive_appearance};
use crate::geometry::Size;
use crate::identity::Identity;
use crate::layout::layout_text;
use crate::profile::AvatarProfile;
use crate::render::{AvatarScene, PixmapBackend, RenderBackend};
use crate::style::{AvatarStyle, FontSpec};
use crate::text::TextSource;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from an [`AvatarProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &AvatarProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> AvatarProfile;
}

// ============================================================================
// AvatarRequest
// ============================================================================

/// A complete description of one avatar.
///
/// # Example
///
/// ```
/// use initials_avatar::{AvatarRequest, Identity, Size, TextSource};
///
/// let request = AvatarRequest::new(TextSource::name("Grace Hopper"), Size::new(48.0, 48.0))
///     .with_identity(Identity::from_int(1906_u64))
///     .with_corner_radius(24.0);
///
/// assert_eq!(request.style.corner_radius, 24.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarRequest {
    pub identity: Identity,
    pub text: TextSource,
    pub size: Size,
    pub style: AvatarStyle,
}

impl AvatarRequest {
    /// Creates a request with the default identity and style.
    pub fn new(text: TextSource, size: impl Into<Size>) -> Self {
        Self {
            identity: Identity::default(),
            text,
            size: size.into(),
            style: AvatarStyle::default(),
        }
    }

    pub fn with_identity(mut self, identity: impl Into<Identity>) -> Self {
        self.identity = identity.into();
        self
    }

    pub fn with_style(mut self, style: AvatarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_saturation(mut self, saturation: f32) -> Self {
        self.style = self.style.with_saturation(saturation);
        self
    }

    pub fn with_brightness(mut self, brightness: f32) -> Self {
        self.style = self.style.with_brightness(brightness);
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.style = self.style.with_corner_radius(radius);
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.style = self.style.with_padding(padding);
        self
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.style = self.style.with_font(font);
        self
    }

    /// Derives the appearance without rendering.
    pub fn appearance(&self) -> Option<DerivedAppearance> {
        derive_appearance(&self.identity, &self.text, self.size, &self.style)
    }
}

// ============================================================================
// AvatarGenerator
// ============================================================================

/// Generates avatars with a rendering backend.
///
/// The generator holds a default [`AvatarStyle`] used by
/// [`generate`](Self::generate). Requests carrying their own style go
/// through [`generate_request`](Self::generate_request).
///
/// Generation never fails loudly: when the canvas is empty, the initials are
/// empty or the backend fails, the caller's placeholder is returned.
///
/// # Example
///
/// ```
/// use initials_avatar::{AvatarGenerator, AvatarStyle, Identity, PixmapBackend, Size, TextSource};
///
/// let mut generator = AvatarGenerator::new(PixmapBackend::without_system_fonts())
///     .with_style(AvatarStyle::new().with_corner_radius(8.0));
///
/// let placeholder = image::RgbaImage::new(1, 1);
/// let avatar = generator.generate(
///     &Identity::default(),
///     &TextSource::name(""),
///     Size::new(32.0, 32.0),
///     Some(placeholder.clone()),
/// );
///
/// // No initials: the placeholder comes back unchanged.
/// assert_eq!(avatar, Some(placeholder));
/// ```
pub struct AvatarGenerator<B: RenderBackend = PixmapBackend> {
    backend: B,

    /// Style applied by [`generate`](Self::generate).
    pub style: AvatarStyle,
}

impl<B: RenderBackend> AvatarGenerator<B> {
    /// Creates a generator with the default style.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            style: AvatarStyle::default(),
        }
    }

    pub fn with_style(mut self, style: AvatarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Returns the backend, consuming the generator.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Renders an avatar with the generator's style.
    pub fn generate(
        &mut self,
        identity: &Identity,
        text: &TextSource,
        size: Size,
        placeholder: Option<B::Image>,
    ) -> Option<B::Image> {
        let appearance = derive_appearance(identity, text, size, &self.style);
        let font = self.style.font.clone();
        self.render(appearance, &font, placeholder)
    }

    /// Renders an avatar described by a request, ignoring the generator's
    /// style.
    pub fn generate_request(
        &mut self,
        request: &AvatarRequest,
        placeholder: Option<B::Image>,
    ) -> Option<B::Image> {
        self.render(request.appearance(), &request.style.font, placeholder)
    }

    fn render(
        &mut self,
        appearance: Option<DerivedAppearance>,
        font: &FontSpec,
        placeholder: Option<B::Image>,
    ) -> Option<B::Image> {
        let Some(appearance) = appearance else {
            return placeholder;
        };

        let scene = AvatarScene {
            appearance: &appearance,
            font,
            text: None,
        };
        let measured = self
            .backend
            .measure_text(&appearance.initials, &scene.text_style());

        let text = layout_text(appearance.size, appearance.padding, measured);
        if text.is_none() {
            tracing::debug!(
                width = measured.width,
                height = measured.height,
                "initials do not fit, drawing background only"
            );
        }

        match self.backend.draw(&AvatarScene { text, ..scene }) {
            Ok(image) => Some(image),
            Err(err) => {
                tracing::warn!(error = %err, "avatar rendering failed, using placeholder");
                placeholder
            }
        }
    }
}

impl<B: RenderBackend> Configurable for AvatarGenerator<B> {
    /// Replaces the generator's style with the profile's settings.
    ///
    /// Fields missing from the profile reset to their defaults.
    fn apply_profile(&mut self, profile: &AvatarProfile) {
        self.style = AvatarStyle::from(profile);
    }

    /// Exports the generator's style as a profile.
    fn export_profile(&self) -> AvatarProfile {
        AvatarProfile::from(&self.style)
    }
}

/// Renders an avatar to an [`image::RgbaImage`] using system fonts.
///
/// Creates a fresh [`PixmapBackend`] per call. The system font database is
/// scanned once per process and shared, but the shaping cache is not; keep
/// an [`AvatarGenerator`] around when generating many avatars.
pub fn generate_avatar(
    identity: &Identity,
    text: &TextSource,
    size: Size,
    style: &AvatarStyle,
    placeholder: Option<image::RgbaImage>,
) -> Option<image::RgbaImage> {
    if !size.is_positive() {
        return placeholder;
    }
    AvatarGenerator::new(PixmapBackend::new())
        .with_style(style.clone())
        .generate(identity, text, size, placeholder)
}

// ============================================================================
// Tests
// ============================================================================
