use crate::math::Vec2;
use crate::text::FontFace;

/// A positioned glyph in pixels. `offset` is y-down.
#[derive(Debug, Clone, Copy)]
pub struct ShapedGlyph {
    pub glyph_id: u16,
    /// Byte offset of the source cluster within the shaped text.
    pub cluster: usize,
    pub x_advance: f32,
    pub offset: Vec2,
}

/// Turns a left-to-right string into glyphs, appending them to `buf` in
/// visual order.
pub trait TextShaper: Send + Sync + 'static {
    fn shape(&mut self, font_face: &FontFace, text: &str, size: f32, buf: &mut Vec<ShapedGlyph>);
}
