use std::num::NonZeroUsize;

use lru::LruCache;

use crate::math::Vec2;
use crate::path::{Path, PathBuilder};
use crate::text::{FontFace, FontId};

const CAPACITY: usize = 1024;

/// Glyph outlines in font units (y-up), keyed by face and glyph.
///
/// Glyphs without contours (spaces, missing outlines) are cached as `None`.
pub struct OutlineCache {
    lru: LruCache<(FontId, u16), Option<Path>>,
    builder: PathBuilder,
}

impl OutlineCache {
    pub fn new() -> OutlineCache {
        OutlineCache {
            lru: LruCache::new(NonZeroUsize::new(CAPACITY).unwrap_or(NonZeroUsize::MIN)),
            builder: PathBuilder::new(),
        }
    }

    pub fn get(&mut self, face: &FontFace, glyph_id: u16) -> Option<&Path> {
        let builder = &mut self.builder;
        self.lru
            .get_or_insert((face.id(), glyph_id), || {
                builder.clear();
                face.ttfp_face()
                    .outline_glyph(ttf_parser::GlyphId(glyph_id), &mut Outliner { builder })?;
                Some(builder.finish())
            })
            .as_ref()
    }

    pub fn len(&self) -> usize {
        self.lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lru.is_empty()
    }
}

impl Default for OutlineCache {
    fn default() -> Self {
        OutlineCache::new()
    }
}

struct Outliner<'a> {
    builder: &'a mut PathBuilder,
}

impl ttf_parser::OutlineBuilder for Outliner<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(Vec2::new(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(Vec2::new(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(Vec2::new(x1, y1), Vec2::new(x, y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder
            .cubic_to(Vec2::new(x1, y1), Vec2::new(x2, y2), Vec2::new(x, y));
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
