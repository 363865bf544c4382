//! Error type for the rendering and configuration boundaries.
//!
//! The derivation pipeline itself never fails. These errors only surface
//! from backends and profile parsing, and [`AvatarGenerator`] turns them
//! into the caller's placeholder.
//!
//! [`AvatarGenerator`]: crate::AvatarGenerator

use thiserror::Error;

/// Errors raised while rasterizing or (de)serializing avatars.
#[derive(Debug, Error)]
pub enum AvatarError {
    /// The canvas could not be allocated for the requested dimensions.
    #[error("cannot allocate a {width}x{height} canvas")]
    InvalidCanvas { width: u32, height: u32 },

    /// The generated text document could not be parsed.
    #[error("failed to build text geometry: {0}")]
    Svg(#[from] resvg::usvg::Error),

    /// The rendered image could not be encoded.
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    /// A profile could not be read or written.
    #[error("invalid avatar profile: {0}")]
    Profile(#[from] serde_json::Error),
}
