use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use smallvec::{smallvec, SmallVec};
use ttf_parser::Face;

use crate::{Error, ErrorKind, Result};

/// Identifies a face: which [`FontSource`](crate::text::FontSource) it came
/// from plus an id that is only meaningful to that source.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct FontId {
    pub source_id: usize,
    pub opaque_id: u64,
}

self_cell::self_cell! {
    struct FaceRef {
        owner: Arc<dyn AsRef<[u8]> + Send + Sync>,
        #[covariant]
        dependent: Face,
    }
}

/// A parsed font face that keeps its backing data alive.
pub struct FontFace {
    id: FontId,
    face_ref: FaceRef,
    face_index: u32,
    metrics: FontMetrics,
}

impl FontFace {
    pub fn new(
        id: FontId,
        data: Arc<dyn AsRef<[u8]> + Send + Sync>,
        face_index: u32,
    ) -> Result<FontFace> {
        let face_ref = FaceRef::try_new(data, |data| Face::parse((**data).as_ref(), face_index))
            .map_err(|e| Error::wrap(ErrorKind::InvalidFont, e))?;
        let metrics = FontMetrics::from_ttfp_face(face_ref.borrow_dependent());

        if metrics.units_per_em == 0 {
            return Err(Error::new(ErrorKind::InvalidFont, "units per em is zero"));
        }

        Ok(FontFace {
            id,
            face_ref,
            face_index,
            metrics,
        })
    }

    pub fn id(&self) -> FontId {
        self.id
    }

    pub fn data(&self) -> &Arc<dyn AsRef<[u8]> + Send + Sync> {
        self.face_ref.borrow_owner()
    }

    pub fn ttfp_face(&self) -> &Face<'_> {
        self.face_ref.borrow_dependent()
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("id", &self.id)
            .field("face_index", &self.face_index)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// What a font source is asked for.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct FontAttrs {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub width: FontWidth,
    pub style: FontStyle,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FontFamily {
    name: Cow<'static, str>,
}

impl FontFamily {
    pub fn new(name: impl Into<Cow<'static, str>>) -> FontFamily {
        FontFamily { name: name.into() }
    }

    pub fn serif() -> FontFamily {
        FontFamily::new("serif")
    }

    pub fn sans_serif() -> FontFamily {
        FontFamily::new("sans-serif")
    }

    pub fn monospace() -> FontFamily {
        FontFamily::new("monospace")
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for FontFamily {
    fn default() -> Self {
        FontFamily::sans_serif()
    }
}

/// Ordered fallback list, never empty.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FontFamilies {
    list: SmallVec<[FontFamily; 2]>,
}

impl FontFamilies {
    pub fn new(base: FontFamily) -> FontFamilies {
        FontFamilies {
            list: smallvec![base],
        }
    }

    pub fn with(mut self, family: FontFamily) -> Self {
        self.list.push(family);
        self
    }

    pub fn base(&self) -> &FontFamily {
        &self.list[0]
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontFamily> + '_ {
        self.list.iter()
    }
}

impl From<FontFamily> for FontFamilies {
    fn from(v: FontFamily) -> FontFamilies {
        FontFamilies::new(v)
    }
}

impl Default for FontFamilies {
    fn default() -> FontFamilies {
        FontFamilies::new(FontFamily::default())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: FontWeight = FontWeight(100);
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const SEMI_BOLD: FontWeight = FontWeight(600);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const BLACK: FontWeight = FontWeight(900);
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::NORMAL
    }
}

/// Font stretch.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum FontWidth {
    UltraCondensed,
    ExtraCondensed,
    Condensed,
    SemiCondensed,
    #[default]
    Normal,
    SemiExpanded,
    Expanded,
    ExtraExpanded,
    UltraExpanded,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Vertical metrics in font units. `descender` is negative below the
/// baseline.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct FontMetrics {
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub units_per_em: u16,
}

impl FontMetrics {
    fn from_ttfp_face(face: &Face<'_>) -> FontMetrics {
        FontMetrics {
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
            units_per_em: face.units_per_em(),
        }
    }

    /// Pixels per font unit at `size`.
    pub fn scale(&self, size: f32) -> f32 {
        size / (self.units_per_em as f32)
    }

    /// Ascender to descender plus line gap, in pixels.
    pub fn line_height(&self, size: f32) -> f32 {
        let units = self.ascender as f32 - self.descender as f32 + self.line_gap as f32;
        units * self.scale(size)
    }
}
