use std::sync::Arc;

use crate::image::{ImageData, ImageFormat};
use crate::math::{UVec2, Vec2};
use crate::path::Path;
use crate::shader::{HighlightParams, HighlightShader};
use crate::text::{GeometryMode, GlyphGeometry, TextAlign};
use crate::Color;

/// Turns y-down pixel paths into coverage.
pub trait MaskRasterizer {
    /// Rasterizes `path` translated by `offset` into the [`ImageFormat::Gray8`]
    /// `mask`, keeping the larger coverage where it overlaps what is already
    /// there. Anything outside the mask is dropped.
    fn fill(&mut self, path: &Path, offset: Vec2, mask: &mut ImageData);
}

/// One rendered frame of a [`ClipSurface`].
#[derive(Debug, Clone)]
pub struct Frame {
    /// Top-left of `image` relative to the container.
    pub origin: Vec2,
    /// Premultiplied [`ImageFormat::Rgba8`] pixels.
    pub image: ImageData,
}

/// A filled rectangle, shaded by the highlight program and clipped to glyph
/// outlines.
#[derive(Debug, Clone)]
pub struct ClipSurface {
    geometry: Arc<GlyphGeometry>,
    fill: Color,
    align: TextAlign,
}

impl ClipSurface {
    pub fn new(fill: Color) -> ClipSurface {
        ClipSurface {
            geometry: Arc::new(GlyphGeometry::empty(GeometryMode::Block)),
            fill,
            align: TextAlign::Left,
        }
    }

    /// Replaces both the clip and the surface size.
    pub fn set_geometry(&mut self, geometry: Arc<GlyphGeometry>) {
        self.geometry = geometry;
    }

    pub fn geometry(&self) -> &Arc<GlyphGeometry> {
        &self.geometry
    }

    pub fn size(&self) -> Vec2 {
        self.geometry.size()
    }

    pub fn set_fill(&mut self, fill: Color) {
        self.fill = fill;
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn set_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    pub fn align(&self) -> TextAlign {
        self.align
    }

    /// Where the surface sits inside a container `container_width` wide. Not
    /// clamped, so a surface wider than its container starts left of it
    /// when centered or right-aligned.
    pub fn anchor(&self, container_width: f32) -> Vec2 {
        Vec2::new(self.align.offset(container_width, self.size().x), 0.0)
    }

    /// Renders the surface. `glyph_offsets[i]` moves outline `i` vertically;
    /// the frame grows to keep moved outlines visible.
    pub fn render(
        &self,
        shader: &HighlightShader,
        params: &HighlightParams,
        glyph_offsets: &[f32],
        container_width: f32,
        rasterizer: &mut dyn MaskRasterizer,
    ) -> Frame {
        let anchor = self.anchor(container_width);
        let size = self.size();

        if self.geometry.is_empty() || !(size.x > 0.0 && size.y > 0.0) {
            return Frame {
                origin: anchor,
                image: ImageData::new(ImageFormat::Rgba8, UVec2::ZERO),
            };
        }

        let offset_of = |i: usize| {
            glyph_offsets
                .get(i)
                .copied()
                .filter(|v| v.is_finite())
                .unwrap_or(0.0)
        };

        let count = self.geometry.outlines().len();
        let lift = (0..count).map(offset_of).fold(0.0f32, f32::min).abs();
        let sink = (0..count).map(offset_of).fold(0.0f32, f32::max);

        let px_size = UVec2::new(
            size.x.ceil() as u32,
            (size.y + lift + sink).ceil() as u32,
        );

        let mut mask = ImageData::new(ImageFormat::Gray8, px_size);
        for (i, outline) in self.geometry.outlines().iter().enumerate() {
            if outline.path.is_empty() {
                continue;
            }
            let offset = outline.offset + Vec2::new(0.0, lift + offset_of(i));
            rasterizer.fill(&outline.path, offset, &mut mask);
        }

        // the shading only varies along x
        let row = (0..px_size.x)
            .map(|x| {
                let u = (x as f32 + 0.5) / size.x;
                shader.evaluate(self.fill, u, params)
            })
            .collect::<Vec<_>>();

        let mut image = ImageData::new(ImageFormat::Rgba8, px_size);
        let pixels = image.data.chunks_exact_mut(4);
        for (i, (pixel, &coverage)) in pixels.zip(&mask.data).enumerate() {
            if coverage == 0 {
                continue;
            }
            let color = row[i % row.len()].scale(coverage as f32 / 255.0);
            pixel.copy_from_slice(&color.to_rgba8());
        }

        Frame {
            origin: anchor - Vec2::new(0.0, lift),
            image,
        }
    }
}
