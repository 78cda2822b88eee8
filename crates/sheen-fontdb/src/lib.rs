use std::path::Path;

use sheen_core::text::{FontAttrs, FontFace, FontFamily, FontId, FontSource, FontStyle, FontWidth};
use sheen_core::{Error, ErrorKind, Result};

/// Fonts installed on the system.
pub struct SystemFontSource(FontDbSource);

impl SystemFontSource {
    pub fn new() -> SystemFontSource {
        let mut source = FontDbSource::default();
        source.db.load_system_fonts();
        log::debug!("Found {} system font faces", source.db.len());
        SystemFontSource(source)
    }
}

impl Default for SystemFontSource {
    fn default() -> Self {
        SystemFontSource::new()
    }
}

impl FontSource for SystemFontSource {
    fn query(&self, attrs: &FontAttrs) -> Option<u64> {
        self.0.query(attrs)
    }

    fn load(&mut self, id: FontId) -> Result<FontFace> {
        self.0.load(id)
    }
}

/// Fonts registered by the application, from memory or files.
#[derive(Default)]
pub struct MemoryFontSource(FontDbSource);

impl MemoryFontSource {
    pub fn new() -> MemoryFontSource {
        MemoryFontSource::default()
    }

    /// Adds every face found in `data`. Unparsable data adds nothing.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.0.db.load_font_data(data);
    }

    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.0
            .db
            .load_font_file(path)
            .map_err(|e| Error::from(e).with_context(format!("failed to read {}", path.display())))
    }

    pub fn load_fonts_dir(&mut self, path: impl AsRef<Path>) {
        self.0.db.load_fonts_dir(path);
    }

    /// Number of faces known to the source.
    pub fn len(&self) -> usize {
        self.0.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.db.is_empty()
    }
}

impl FontSource for MemoryFontSource {
    fn query(&self, attrs: &FontAttrs) -> Option<u64> {
        self.0.query(attrs)
    }

    fn load(&mut self, id: FontId) -> Result<FontFace> {
        self.0.load(id)
    }
}

struct FontDbSource {
    db: fontdb::Database,
}

impl Default for FontDbSource {
    fn default() -> Self {
        FontDbSource {
            db: fontdb::Database::new(),
        }
    }
}

impl FontDbSource {
    fn query(&self, attrs: &FontAttrs) -> Option<u64> {
        self.db
            .query(&fontdb::Query {
                families: &[fontdb_family(&attrs.family)],
                weight: fontdb::Weight(attrs.weight.0),
                stretch: fontdb_stretch(attrs.width),
                style: fontdb_style(attrs.style),
            })
            .map(fontdb_id_to_u64)
    }

    fn load(&mut self, id: FontId) -> Result<FontFace> {
        let (data, face_index) = unsafe {
            self.db
                .make_shared_face_data(fontdb_id_from_u64(id.opaque_id))
                .ok_or_else(|| Error::new(ErrorKind::InvalidFont, "font data is unavailable"))?
        };

        FontFace::new(id, data, face_index)
    }
}

fn fontdb_family(family: &FontFamily) -> fontdb::Family<'_> {
    match family.name() {
        "serif" => fontdb::Family::Serif,
        "sans-serif" => fontdb::Family::SansSerif,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        "monospace" => fontdb::Family::Monospace,
        name => fontdb::Family::Name(name),
    }
}

fn fontdb_stretch(stretch: FontWidth) -> fontdb::Stretch {
    match stretch {
        FontWidth::UltraCondensed => fontdb::Stretch::UltraCondensed,
        FontWidth::ExtraCondensed => fontdb::Stretch::ExtraCondensed,
        FontWidth::Condensed => fontdb::Stretch::Condensed,
        FontWidth::SemiCondensed => fontdb::Stretch::SemiCondensed,
        FontWidth::Normal => fontdb::Stretch::Normal,
        FontWidth::SemiExpanded => fontdb::Stretch::SemiExpanded,
        FontWidth::Expanded => fontdb::Stretch::Expanded,
        FontWidth::ExtraExpanded => fontdb::Stretch::ExtraExpanded,
        FontWidth::UltraExpanded => fontdb::Stretch::UltraExpanded,
    }
}

fn fontdb_style(style: FontStyle) -> fontdb::Style {
    match style {
        FontStyle::Normal => fontdb::Style::Normal,
        FontStyle::Italic => fontdb::Style::Italic,
        FontStyle::Oblique => fontdb::Style::Oblique,
    }
}

fn fontdb_id_to_u64(id: fontdb::ID) -> u64 {
    unsafe { std::mem::transmute(id) }
}

fn fontdb_id_from_u64(id: u64) -> fontdb::ID {
    unsafe { std::mem::transmute(id) }
}
