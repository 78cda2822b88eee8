use std::time::Duration;

use sheen::math::Rect;
use sheen::text::{
    FontDatabase, FontFamilies, FontFamily, GeometryBuilder, GeometryMode, LayoutBox, LineHeight,
    MemoryFontSource, RustybuzzShaper, ShapedGlyph, TextAlign, TextAttrs, TextEngine, TextShaper,
    TextWrap,
};
use sheen::{ShinyText, ZenoMaskRasterizer};

const FONT: &[u8] = include_bytes!("fonts/DejaVuSansMono.ttf");

fn engine() -> TextEngine {
    let mut source = MemoryFontSource::new();
    source.load_font_data(FONT.to_vec());
    assert!(!source.is_empty());

    let mut font_db = FontDatabase::new();
    font_db.add_source(source);
    TextEngine::new(font_db, RustybuzzShaper::new())
}

fn attrs() -> TextAttrs {
    TextAttrs {
        size: 40.0,
        fonts: FontFamilies::new(FontFamily::new("DejaVu Sans Mono")),
        ..Default::default()
    }
}

fn wrapped(align: TextAlign) -> TextAttrs {
    TextAttrs {
        align,
        wrap: TextWrap::Wrap,
        line_height: LineHeight::Px(80.0),
        ..attrs()
    }
}

fn bounds(engine: &mut TextEngine, attrs: &TextAttrs, layout: &LayoutBox) -> (Rect, Rect) {
    let builder = GeometryBuilder::new(GeometryMode::Block);
    let geometry = builder.build(engine, "jump over lazy dogs", attrs, layout);
    let size = geometry.size();
    let bounds = geometry.outlines()[0].bounds().unwrap();
    (Rect::new(Default::default(), size), bounds)
}

#[test]
fn test_line_height_override_with_wrapping() {
    let mut engine = engine();
    let layout = LayoutBox::from_width(150.0);
    let (surface, bounds) = bounds(&mut engine, &wrapped(TextAlign::Left), &layout);

    // four words, one per line
    assert_eq!(surface.max.x, 150.0);
    assert_eq!(surface.max.y, 320.0);

    assert!(bounds.min.x >= 0.0 && bounds.min.y >= 0.0);
    assert!(bounds.max.x <= surface.max.x && bounds.max.y <= surface.max.y);
    // glyphs reach into the last line
    assert!(bounds.max.y > 240.0);
}

#[test]
fn test_right_alignment_inside_wrap_width() {
    let mut engine = engine();
    let layout = LayoutBox::from_width(150.0);
    let (_, left) = bounds(&mut engine, &wrapped(TextAlign::Left), &layout);
    let (surface, right) = bounds(&mut engine, &wrapped(TextAlign::Right), &layout);

    assert!(right.min.x > left.min.x + 40.0);
    assert!(right.max.x <= surface.max.x);
    assert_eq!(right.min.y, left.min.y);
}

#[test]
fn test_per_character_widths_match_block() {
    let mut engine = engine();
    let attrs = attrs();
    let layout = LayoutBox::default();

    let block = GeometryBuilder::new(GeometryMode::Block);
    let block = block.build(&mut engine, "HELLO", &attrs, &layout);
    let split = GeometryBuilder::new(GeometryMode::PerCharacter);
    let split = split.build(&mut engine, "HELLO", &attrs, &layout);

    let glyphs = split.glyphs().unwrap();
    assert_eq!(glyphs.len(), 5);
    assert!(glyphs.windows(2).all(|w| w[0].offset.x < w[1].offset.x));

    let last = glyphs.last().unwrap();
    assert!((last.offset.x + last.width - block.size().x).abs() < 0.5);
    assert_eq!(split.size().y, block.size().y);

    for glyph in glyphs {
        let bounds = glyph.bounds().unwrap();
        assert!(bounds.min.x >= glyph.offset.x - 0.5);
        assert!(bounds.max.x <= glyph.offset.x + glyph.width + 0.5);
        assert!(bounds.min.y >= 0.0 && bounds.max.y <= split.size().y);
    }
}

#[test]
fn test_unknown_family_gives_empty_geometry() {
    let mut engine = engine();
    let attrs = TextAttrs {
        fonts: FontFamilies::new(FontFamily::new("No Such Family")),
        ..attrs()
    };

    let builder = GeometryBuilder::new(GeometryMode::Block);
    let geometry = builder.build(&mut engine, "HELLO", &attrs, &LayoutBox::default());
    assert!(geometry.is_empty());
    assert_eq!(geometry.size(), Default::default());
}

#[test]
fn test_rustybuzz_shapes_monospace() {
    let mut engine = engine();
    let attrs = attrs();
    let id = engine
        .font_db()
        .query(&attrs.font_attrs(attrs.fonts.base()))
        .unwrap();
    let face = engine.font_db_mut().get_or_load(id).unwrap();

    let mut shaper = RustybuzzShaper::new();
    let mut glyphs: Vec<ShapedGlyph> = Vec::new();
    shaper.shape(face, "Hi!", 40.0, &mut glyphs);

    assert_eq!(glyphs.len(), 3);
    assert_eq!(glyphs.iter().map(|g| g.cluster).collect::<Vec<_>>(), [0, 1, 2]);
    assert!(glyphs.iter().all(|g| g.glyph_id != 0));

    // 1233 of 2048 units per em
    let advance = 40.0 * 1233.0 / 2048.0;
    assert!(glyphs.iter().all(|g| (g.x_advance - advance).abs() < 0.1));

    shaper.shape(face, "", 40.0, &mut glyphs);
    assert_eq!(glyphs.len(), 3);
}

#[test]
fn test_shiny_text_renders_coverage() {
    let mut engine = engine();
    let mut rasterizer = ZenoMaskRasterizer::new();

    let mut shiny = ShinyText::new(true);
    shiny.set_text("Hop");
    shiny.set_attrs(attrs());
    let frame = shiny.frame(Duration::ZERO, &mut engine, &mut rasterizer);

    let size = shiny.geometry().size();
    assert_eq!(frame.image.size.x, size.x.ceil() as u32);

    let mut covered = 0;
    for y in 0..frame.image.size.y {
        for x in 0..frame.image.size.x {
            if frame.image.pixel(x, y).is_some_and(|p| p[3] > 0) {
                covered += 1;
            }
        }
    }
    assert!(covered > 0);
}
