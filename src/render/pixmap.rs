//! CPU backend built on resvg/tiny-skia.
//!
//! Text is laid out by building a one-element SVG document and letting
//! `usvg` shape it against a `fontdb` database; the background is filled
//! directly on a `tiny_skia` pixmap. The result is an [`RgbaImage`] with
//! straight alpha.

use std::io::Cursor;
use std::sync::{Arc, OnceLock};

use image::{ImageFormat, Rgba, RgbaImage};
use resvg::tiny_skia::{self, FillRule, Paint, PathBuilder, Pixmap, Transform};
use resvg::usvg::{self, Node, Options, Tree, fontdb};

use super::{AvatarScene, RenderBackend, TextStyle};
use crate::color::HsbColor;
use crate::error::AvatarError;
use crate::geometry::{Rect, Size};

/// Control point distance for approximating a quarter circle with a cubic.
const KAPPA: f32 = 0.552_284_8;

/// System font database, loaded once per process.
static SYSTEM_FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();

// ============================================================================
// GraphicsContext
// ============================================================================

/// A pixmap with a current transform and a save/restore stack.
pub struct GraphicsContext {
    pixmap: Pixmap,
    transform: Transform,
    saved: Vec<Transform>,
}

impl GraphicsContext {
    /// Allocates a transparent context of `width x height` pixels.
    pub fn new(width: u32, height: u32) -> Result<Self, AvatarError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(AvatarError::InvalidCanvas { width, height })?;
        Ok(Self {
            pixmap,
            transform: Transform::identity(),
            saved: Vec::new(),
        })
    }

    /// Pushes the current transform.
    pub fn save(&mut self) {
        self.saved.push(self.transform);
    }

    /// Pops the most recently saved transform.
    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(transform) => self.transform = transform,
            None => tracing::warn!("graphics context restored without a matching save"),
        }
    }

    /// Number of saves not yet restored.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Scales subsequent drawing in local coordinates.
    pub fn scale_by(&mut self, sx: f32, sy: f32) {
        self.transform = self.transform.pre_scale(sx, sy);
    }

    /// Translates subsequent drawing in local coordinates.
    pub fn translate_by(&mut self, tx: f32, ty: f32) {
        self.transform = self.transform.pre_translate(tx, ty);
    }

    /// Fills a rectangle with rounded corners.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: HsbColor) {
        let Some(path) = rounded_rect_path(rect, radius) else {
            return;
        };

        let (r, g, b, a) = color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, self.transform, None);
    }

    /// Renders a parsed SVG tree with the current transform.
    pub fn render_tree(&mut self, tree: &Tree) {
        resvg::render(tree, self.transform, &mut self.pixmap.as_mut());
    }

    /// Releases the context as a straight-alpha image.
    pub fn into_image(self) -> RgbaImage {
        if !self.saved.is_empty() {
            tracing::warn!(depth = self.saved.len(), "graphics context released while saved");
        }
        pixmap_to_rgba_image(&self.pixmap)
    }
}

fn rounded_rect_path(rect: Rect, radius: f32) -> Option<tiny_skia::Path> {
    let bounds = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)?;
    let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0);
    if radius <= 0.0 {
        return Some(PathBuilder::from_rect(bounds));
    }

    let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
    let k = radius * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(left + radius, top);
    pb.line_to(right - radius, top);
    pb.cubic_to(right - radius + k, top, right, top + radius - k, right, top + radius);
    pb.line_to(right, bottom - radius);
    pb.cubic_to(right, bottom - radius + k, right - radius + k, bottom, right - radius, bottom);
    pb.line_to(left + radius, bottom);
    pb.cubic_to(left + radius - k, bottom, left, bottom - radius + k, left, bottom - radius);
    pb.line_to(left, top + radius);
    pb.cubic_to(left, top + radius - k, left + radius - k, top, left + radius, top);
    pb.close();
    pb.finish()
}

/// Converts a premultiplied pixmap to a straight-alpha image.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    img
}

/// Encodes an avatar as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, AvatarError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

// ============================================================================
// PixmapBackend
// ============================================================================

/// Shaped initials kept between measuring and drawing.
struct MeasuredText {
    document: String,
    tree: Tree,
    bounds: Rect,
}

/// Renders avatars to [`RgbaImage`]s.
///
/// # Example
///
/// ```
/// use initials_avatar::{AvatarGenerator, Identity, PixmapBackend, Size, TextSource};
///
/// let mut generator = AvatarGenerator::new(PixmapBackend::new());
/// let image = generator
///     .generate(
///         &Identity::from_string("ada@example.com"),
///         &TextSource::name("Ada Lovelace"),
///         Size::new(64.0, 64.0),
///         None,
///     )
///     .unwrap();
///
/// assert_eq!(image.dimensions(), (64, 64));
/// ```
pub struct PixmapBackend {
    options: Options<'static>,
    measured: Option<MeasuredText>,
}

impl Default for PixmapBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PixmapBackend {
    /// Creates a backend using the fonts installed on the system.
    ///
    /// The system fonts are scanned on the first call only; later backends
    /// share the same database.
    pub fn new() -> Self {
        Self::with_fontdb(system_fonts())
    }

    /// Creates a backend with an empty font database.
    ///
    /// Until fonts are added with [`load_font_data`](Self::load_font_data),
    /// avatars are drawn without initials.
    pub fn without_system_fonts() -> Self {
        Self::with_fontdb(Arc::new(fontdb::Database::new()))
    }

    /// Creates a backend sharing an existing font database.
    pub fn with_fontdb(fontdb: Arc<fontdb::Database>) -> Self {
        let mut options = Options::default();
        options.fontdb = fontdb;
        Self {
            options,
            measured: None,
        }
    }

    /// Registers a font file (TTF, OTF or a collection).
    ///
    /// A shared database is copied first, so other backends are unaffected.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        let fontdb = self.options.fontdb_mut();
        fontdb.load_font_data(data);
        ensure_sans_serif(fontdb);
        self.measured = None;
    }

    /// Number of font faces available for text.
    pub fn font_count(&self) -> usize {
        self.options.fontdb.len()
    }

    /// Shapes `text`, reusing the previous result for identical input.
    fn shape(&mut self, text: &str, style: &TextStyle<'_>) -> Result<&MeasuredText, AvatarError> {
        let document = text_document(text, style);

        let measured = match self.measured.take() {
            Some(measured) if measured.document == document => measured,
            _ => {
                let tree = Tree::from_str(&document, &self.options)?;
                let bounds = text_bounds(tree.root()).unwrap_or_default();
                MeasuredText {
                    document,
                    tree,
                    bounds,
                }
            }
        };

        Ok(self.measured.insert(measured))
    }
}

impl RenderBackend for PixmapBackend {
    type Image = RgbaImage;

    fn measure_text(&mut self, text: &str, style: &TextStyle<'_>) -> Size {
        match self.shape(text, style) {
            Ok(measured) => measured.bounds.size(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to shape initials");
                Size::default()
            }
        }
    }

    fn draw(&mut self, scene: &AvatarScene<'_>) -> Result<RgbaImage, AvatarError> {
        let appearance = scene.appearance;
        let (width, height) = appearance.size.to_pixels();
        let mut ctx = GraphicsContext::new(width, height)?;

        ctx.save();
        ctx.fill_rounded_rect(
            scene.background_rect(),
            appearance.corner_radius,
            appearance.background,
        );

        if let Some(layout) = scene.text {
            let measured = self.shape(&appearance.initials, &scene.text_style())?;

            ctx.save();
            ctx.scale_by(layout.scale, layout.scale);
            // Glyph bounds start at the shaped origin, not at (0, 0).
            ctx.translate_by(
                layout.rect.x - measured.bounds.x,
                layout.rect.y - measured.bounds.y,
            );
            ctx.render_tree(&measured.tree);
            ctx.restore();
        }

        ctx.restore();
        Ok(ctx.into_image())
    }
}

fn system_fonts() -> Arc<fontdb::Database> {
    SYSTEM_FONTS
        .get_or_init(|| {
            let mut fontdb = fontdb::Database::new();
            fontdb.load_system_fonts();
            ensure_sans_serif(&mut fontdb);
            tracing::debug!(faces = fontdb.len(), "loaded system fonts");
            Arc::new(fontdb)
        })
        .clone()
}

/// Maps the generic sans-serif family to an installed face when the
/// database's default mapping points at a missing font.
fn ensure_sans_serif(fontdb: &mut fontdb::Database) {
    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        ..fontdb::Query::default()
    };
    if fontdb.query(&query).is_some() {
        return;
    }

    let fallback = fontdb
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()));
    match fallback {
        Some(family) => {
            tracing::debug!(%family, "using fallback sans-serif family");
            fontdb.set_sans_serif_family(family);
        }
        None => tracing::warn!("no fonts available, initials will not be drawn"),
    }
}

/// Builds an SVG document holding only the initials, with the baseline
/// origin at (0, 0).
fn text_document(text: &str, style: &TextStyle<'_>) -> String {
    let extent = (style.size * 4.0).max(1.0);
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{extent}" height="{extent}">"#,
            r#"<text x="0" y="0" xml:space="preserve" font-family="{family}" "#,
            r#"font-size="{size}" font-weight="{weight}" fill="{fill}">{text}</text></svg>"#
        ),
        extent = extent,
        family = escape_xml(style.font.family_name()),
        size = style.size,
        weight = style.font.weight,
        fill = style.color.to_hex(),
        text = escape_xml(text),
    )
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Bounding box of the first text node with a non-empty extent.
fn text_bounds(group: &usvg::Group) -> Option<Rect> {
    group.children().iter().find_map(|node| match node {
        Node::Group(group) => text_bounds(group),
        Node::Text(text) => {
            let bbox = text.bounding_box();
            (bbox.width() > 0.0 && bbox.height() > 0.0)
                .then(|| Rect::new(bbox.x(), bbox.y(), bbox.width(), bbox.height()))
        }
        Node::Path(_) | Node::Image(_) => None,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::derive_appearance;
    use crate::identity::Identity;
    use crate::layout::TextLayout;
    use crate::style::{AvatarStyle, FontSpec};
    use crate::text::TextSource;

    fn scene_appearance(size: Size, style: &AvatarStyle) -> crate::DerivedAppearance {
        derive_appearance(&Identity::default(), &TextSource::name("Ada Lovelace"), size, style)
            .unwrap()
    }

    #[test]
    fn context_save_restore_balances() {
        let mut ctx = GraphicsContext::new(4, 4).unwrap();
        ctx.save();
        ctx.scale_by(2.0, 2.0);
        assert_eq!(ctx.depth(), 1);
        assert_ne!(ctx.transform(), Transform::identity());
        ctx.restore();
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.transform(), Transform::identity());

        // Unbalanced restore leaves the transform alone.
        ctx.translate_by(1.0, 1.0);
        ctx.restore();
        assert_eq!(ctx.transform(), Transform::from_translate(1.0, 1.0));
    }

    #[test]
    fn scale_then_translate_is_local() {
        let mut ctx = GraphicsContext::new(4, 4).unwrap();
        ctx.scale_by(0.5, 0.5);
        ctx.translate_by(10.0, 20.0);
        let t = ctx.transform();
        assert_eq!((t.tx, t.ty), (5.0, 10.0));
        assert_eq!((t.sx, t.sy), (0.5, 0.5));
    }

    #[test]
    fn zero_sized_context_is_rejected() {
        assert!(matches!(
            GraphicsContext::new(0, 10),
            Err(AvatarError::InvalidCanvas { width: 0, height: 10 })
        ));
    }

    #[test]
    fn square_background_fills_every_pixel() {
        let mut ctx = GraphicsContext::new(8, 8).unwrap();
        ctx.fill_rounded_rect(
            Rect::from_size(Size::new(8.0, 8.0)),
            0.0,
            HsbColor::new(0.0, 1.0, 1.0),
        );
        let img = ctx.into_image();
        assert!(img.pixels().all(|p| p.0 == [255, 0, 0, 255]));
    }

    #[test]
    fn rounded_corners_are_transparent() {
        let mut ctx = GraphicsContext::new(64, 64).unwrap();
        ctx.fill_rounded_rect(
            Rect::from_size(Size::new(64.0, 64.0)),
            32.0,
            HsbColor::gray(1.0),
        );
        let img = ctx.into_image();
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(63, 63)[3], 0);
        assert_eq!(img.get_pixel(32, 32).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(32, 1)[3], 255);
    }

    #[test]
    fn background_only_scene_without_fonts() {
        let mut backend = PixmapBackend::without_system_fonts();
        assert_eq!(backend.font_count(), 0);

        let style = AvatarStyle::default();
        let appearance = scene_appearance(Size::new(20.0, 10.0), &style);
        let measured = backend.measure_text(
            &appearance.initials,
            &TextStyle {
                font: &style.font,
                size: appearance.font_size,
                color: appearance.text_color,
            },
        );
        assert_eq!(measured, Size::default());

        let scene = AvatarScene {
            appearance: &appearance,
            font: &style.font,
            text: None,
        };
        let img = backend.draw(&scene).unwrap();
        assert_eq!(img.dimensions(), (20, 10));

        let (r, g, b, a) = appearance.background.to_rgba8();
        assert!(img.pixels().all(|p| p.0 == [r, g, b, a]));
    }

    #[test]
    fn system_fonts_are_loaded_once() {
        let first = PixmapBackend::new();
        let second = PixmapBackend::default();
        assert!(Arc::ptr_eq(&first.options.fontdb, &second.options.fontdb));

        let mut custom = PixmapBackend::new();
        custom.load_font_data(Vec::new());
        assert!(!Arc::ptr_eq(&custom.options.fontdb, &first.options.fontdb));
        assert_eq!(first.font_count(), second.font_count());
    }

    #[test]
    fn fractional_canvas_rounds_up() {
        let mut backend = PixmapBackend::without_system_fonts();
        let style = AvatarStyle::default();
        let appearance = scene_appearance(Size::new(10.5, 7.2), &style);
        let scene = AvatarScene {
            appearance: &appearance,
            font: &style.font,
            text: None,
        };
        assert_eq!(backend.draw(&scene).unwrap().dimensions(), (11, 8));
    }

    #[test]
    fn draws_initials_when_fonts_are_installed() {
        let mut backend = PixmapBackend::new();
        if backend.font_count() == 0 {
            return;
        }

        let style = AvatarStyle::default().with_font(FontSpec::default().with_weight(700));
        let appearance = scene_appearance(Size::new(96.0, 96.0), &style);
        let text_style = TextStyle {
            font: &style.font,
            size: appearance.font_size,
            color: appearance.text_color,
        };
        let measured = backend.measure_text(&appearance.initials, &text_style);
        let Some(layout) = crate::layout::layout_text(appearance.size, appearance.padding, measured)
        else {
            return;
        };
        assert!(layout.scale <= 1.0);

        let scene = AvatarScene {
            appearance: &appearance,
            font: &style.font,
            text: Some(layout),
        };
        let img = backend.draw(&scene).unwrap();
        let background = appearance.background.to_rgba8();
        let background = [background.0, background.1, background.2, background.3];

        // Text pixels differ from the background; the padding band does not.
        assert!(img.pixels().any(|p| p.0 != background));
        assert_eq!(img.get_pixel(0, 48).0, background);
        assert_eq!(img.get_pixel(95, 48).0, background);
    }

    #[test]
    fn unmatched_layout_still_draws_background() {
        let mut backend = PixmapBackend::without_system_fonts();
        let style = AvatarStyle::default();
        let appearance = scene_appearance(Size::new(16.0, 16.0), &style);
        let scene = AvatarScene {
            appearance: &appearance,
            font: &style.font,
            text: Some(TextLayout {
                scale: 1.0,
                rect: Rect::new(4.0, 4.0, 8.0, 8.0),
            }),
        };
        let img = backend.draw(&scene).unwrap();
        let (r, g, b, a) = appearance.background.to_rgba8();
        assert!(img.pixels().all(|p| p.0 == [r, g, b, a]));
    }

    #[test]
    fn text_document_escapes_markup() {
        let font = FontSpec::family("A&B");
        let doc = text_document(
            "<&>",
            &TextStyle {
                font: &font,
                size: 10.0,
                color: HsbColor::gray(1.0),
            },
        );
        assert!(doc.contains(r#"font-family="A&amp;B""#));
        assert!(doc.contains(">&lt;&amp;&gt;</text>"));
        assert!(doc.contains(r##"fill="#ffffff""##));
        assert!(doc.contains(r#"font-size="10""#));
    }

    #[test]
    fn png_encoding() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }
}
