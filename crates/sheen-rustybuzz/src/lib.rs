use std::collections::{hash_map, HashMap};
use std::sync::Arc;

use rustybuzz::{Direction, Face, UnicodeBuffer};
use sheen_core::math::IVec2;
use sheen_core::text::{FontFace, FontId, ShapedGlyph, TextShaper};

self_cell::self_cell! {
    struct CachedFace {
        owner: Arc<dyn AsRef<[u8]> + Send + Sync>,
        #[covariant]
        dependent: Face,
    }
}

/// [`TextShaper`] running HarfBuzz's shaping algorithms, left to right.
#[derive(Default)]
pub struct RustybuzzShaper {
    buffer: UnicodeBuffer,
    faces: HashMap<FontId, CachedFace>,
}

impl RustybuzzShaper {
    pub fn new() -> RustybuzzShaper {
        RustybuzzShaper::default()
    }
}

impl TextShaper for RustybuzzShaper {
    fn shape(&mut self, font_face: &FontFace, text: &str, size: f32, buf: &mut Vec<ShapedGlyph>) {
        if text.is_empty() {
            return;
        }

        let face = match self.faces.entry(font_face.id()) {
            hash_map::Entry::Occupied(v) => v.into_mut().borrow_dependent(),
            hash_map::Entry::Vacant(v) => {
                let index = font_face.face_index();
                let cached_face = match CachedFace::try_new(Arc::clone(font_face.data()), |data| {
                    rustybuzz::ttf_parser::Face::parse((**data).as_ref(), index)
                        .map(Face::from_face)
                }) {
                    Ok(v) => v,
                    Err(e) => {
                        log::warn!("Cannot shape with font {:?}: {}", font_face.id(), e);
                        return;
                    }
                };

                v.insert(cached_face).borrow_dependent()
            }
        };

        let scale = size / face.units_per_em() as f32;

        let mut buffer = std::mem::take(&mut self.buffer);
        buffer.clear();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        buffer.set_direction(Direction::LeftToRight);

        let glyphs = rustybuzz::shape(face, &[], buffer);

        let it = glyphs.glyph_infos().iter().zip(glyphs.glyph_positions());
        buf.extend(it.map(|(info, pos)| ShapedGlyph {
            glyph_id: info.glyph_id as u16,
            x_advance: (pos.x_advance as f32) * scale,
            offset: IVec2::new(pos.x_offset, -pos.y_offset).as_vec2() * scale,
            cluster: info.cluster as usize,
        }));

        self.buffer = glyphs.clear();
    }
}
