use crate::math::{Rect, Vec2};
use crate::path::Path;
use crate::text::{LayoutBox, TextAttrs, TextLayoutEngine, TextWrap};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GeometryMode {
    /// One outline for the whole laid-out string.
    #[default]
    Block,
    /// One outline per `char`, so every character can move on its own.
    PerCharacter,
}

/// A clip outline placed inside the surface.
#[derive(Debug, Clone)]
pub struct GlyphOutline {
    /// Contours relative to `offset`.
    pub path: Path,
    /// Top-left of the outline in surface space. For per-character outlines
    /// `x` is the advance of all preceding characters.
    pub offset: Vec2,
    /// Advance width, trailing whitespace included.
    pub width: f32,
    /// Height of the whole block.
    pub height: f32,
}

impl GlyphOutline {
    pub fn bounds(&self) -> Option<Rect> {
        self.path.bounds().map(|r| r.translate(self.offset))
    }
}

/// The clip geometry and size of a surface, always replaced as a whole.
#[derive(Debug, Clone, Default)]
pub struct GlyphGeometry {
    mode: GeometryMode,
    outlines: Vec<GlyphOutline>,
    size: Vec2,
}

impl GlyphGeometry {
    pub fn empty(mode: GeometryMode) -> GlyphGeometry {
        GlyphGeometry {
            mode,
            outlines: Vec::new(),
            size: Vec2::ZERO,
        }
    }

    pub fn mode(&self) -> GeometryMode {
        self.mode
    }

    /// Outlines in source order.
    pub fn outlines(&self) -> &[GlyphOutline] {
        &self.outlines
    }

    /// Per-character outlines, `None` for block geometry.
    pub fn glyphs(&self) -> Option<&[GlyphOutline]> {
        match self.mode {
            GeometryMode::PerCharacter => Some(&self.outlines),
            GeometryMode::Block => None,
        }
    }

    /// Size of the surface the outlines clip.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// `true` when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.outlines.len()
    }
}

/// Builds [`GlyphGeometry`] from text through a [`TextLayoutEngine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryBuilder {
    mode: GeometryMode,
}

impl GeometryBuilder {
    pub fn new(mode: GeometryMode) -> GeometryBuilder {
        GeometryBuilder { mode }
    }

    pub fn mode(&self) -> GeometryMode {
        self.mode
    }

    pub fn build(
        &self,
        engine: &mut dyn TextLayoutEngine,
        text: &str,
        attrs: &TextAttrs,
        layout: &LayoutBox,
    ) -> GlyphGeometry {
        if text.is_empty() {
            return GlyphGeometry::empty(self.mode);
        }

        match self.mode {
            GeometryMode::Block => Self::build_block(engine, text, attrs, layout),
            GeometryMode::PerCharacter => Self::build_per_character(engine, text, attrs),
        }
    }

    fn build_block(
        engine: &mut dyn TextLayoutEngine,
        text: &str,
        attrs: &TextAttrs,
        layout: &LayoutBox,
    ) -> GlyphGeometry {
        let constraint = layout.constraint();
        let block = engine.layout(text, attrs, constraint);

        // wrapped text fills its constraint, unwrapped text is as wide as
        // itself
        let width = match (attrs.wrap, constraint) {
            (TextWrap::Wrap, Some(constraint)) => constraint,
            _ => block.width,
        };

        if block.outline.is_empty() && block.width <= 0.0 {
            return GlyphGeometry::empty(GeometryMode::Block);
        }

        GlyphGeometry {
            mode: GeometryMode::Block,
            outlines: vec![GlyphOutline {
                path: block.outline,
                offset: Vec2::ZERO,
                width,
                height: block.height,
            }],
            size: Vec2::new(width, block.height),
        }
    }

    fn build_per_character(
        engine: &mut dyn TextLayoutEngine,
        text: &str,
        attrs: &TextAttrs,
    ) -> GlyphGeometry {
        let attrs = TextAttrs {
            wrap: TextWrap::NoWrap,
            ..attrs.clone()
        };

        let mut outlines = Vec::with_capacity(text.len());
        let mut offset_x = 0.0f32;
        let mut height = 0.0f32;
        let mut buf = [0u8; 4];

        for ch in text.chars() {
            let block = engine.layout(ch.encode_utf8(&mut buf), &attrs, None);
            let width = if block.width.is_finite() {
                block.width.max(0.0)
            } else {
                0.0
            };

            outlines.push(GlyphOutline {
                path: block.outline,
                offset: Vec2::new(offset_x, 0.0),
                width,
                height: block.height,
            });

            offset_x += width;
            height = height.max(block.height);
        }

        for outline in &mut outlines {
            outline.height = height;
        }

        GlyphGeometry {
            mode: GeometryMode::PerCharacter,
            outlines,
            size: Vec2::new(offset_x, height),
        }
    }
}
