//! initials-avatar: deterministic placeholder avatars
//!
//! This crate draws a colored rounded rectangle with centered initials for
//! an identity and a display name. The same identity and name always give
//! the same color and the same initials.
//!
//! # Pipeline
//!
//! ```text
//! Identity ──► SHA-256 key ─────────┐
//!                                   ├──► hue ──► background + text color
//! TextSource ──► long text ─────────┘
//!            └─► short initials ──► measured by backend ──► scale + placement
//! ```
//!
//! Everything up to the measurement is pure ([`derive_appearance`]). The
//! drawing happens in a [`RenderBackend`]; [`PixmapBackend`] renders to an
//! [`image::RgbaImage`] on the CPU.
//!
//! # Example
//!
//! ```
//! use initials_avatar::{AvatarGenerator, AvatarStyle, Identity, PixmapBackend, Size, TextSource};
//!
//! let mut generator = AvatarGenerator::new(PixmapBackend::new())
//!     .with_style(AvatarStyle::new().with_corner_radius(32.0));
//!
//! let avatar = generator.generate(
//!     &Identity::from_string("ada@example.com"),
//!     &TextSource::name("Ada Lovelace"),
//!     Size::new(64.0, 64.0),
//!     None,
//! );
//!
//! assert_eq!(avatar.map(|image| image.dimensions()), Some((64, 64)));
//! ```
//!
//! # Serializable Profiles
//!
//! Styles can be stored as JSON with [`AvatarProfile`] and applied through
//! the [`Configurable`] trait:
//!
//! ```
//! use initials_avatar::{AvatarGenerator, AvatarProfile, Configurable, PixmapBackend};
//!
//! let mut generator = AvatarGenerator::new(PixmapBackend::without_system_fonts());
//! let profile = AvatarProfile::from_json(r#"{"brightness": 0.9, "cornerRadius": 8}"#).unwrap();
//! generator.apply_profile(&profile);
//!
//! assert_eq!(generator.style.brightness, 0.9);
//! let exported = generator.export_profile().to_json().unwrap();
//! ```

mod appearance;
mod color;
mod error;
mod generator;
mod geometry;
mod identity;
mod layout;
mod profile;
mod render;
mod style;
mod text;

pub use appearance::{DerivedAppearance, derive_appearance};
pub use color::{
    ColorScheme, HsbColor, background_color, combine_hash, derive_colors, hue_for, text_color,
};
pub use error::AvatarError;
pub use generator::{AvatarGenerator, AvatarRequest, Configurable, generate_avatar};
pub use geometry::{Rect, Size};
pub use identity::{Identity, IdentityInt, derive_key};
pub use layout::{TextLayout, clamp_corner_radius, layout_text, resolve_padding};
pub use profile::{AvatarProfile, FontSettings};
pub use render::{
    AvatarScene, GraphicsContext, PixmapBackend, RenderBackend, TextStyle, encode_png,
};
pub use style::{
    AvatarStyle, DEFAULT_BRIGHTNESS, DEFAULT_FONT_FAMILY, DEFAULT_FONT_WEIGHT,
    DEFAULT_SATURATION, FontSpec,
};
pub use text::{DEFAULT_MAX_INITIALS, Initials, NameOrder, PersonName, TextSource};
