use std::fmt;

use unicode_linebreak::BreakOpportunity;

use crate::math::{Affine2, Vec2};
use crate::path::{Path, PathBuilder};
use crate::text::{
    FontDatabase, FontId, OutlineCache, ShapedGlyph, TextAttrs, TextShaper, TextTrimming,
    TextWrap,
};

const ELLIPSIS: &str = "\u{2026}";

/// Outline and metrics of a laid-out string.
#[derive(Debug, Clone, Default)]
pub struct TextBlock {
    /// Glyph contours in y-down pixels, the block's top-left at the origin.
    pub outline: Path,
    /// Width of the widest line, trailing whitespace included.
    pub width: f32,
    pub height: f32,
}

/// Shapes and lays out a string in a single style.
///
/// `max_width` is the constraint for wrapping (with [`TextWrap::Wrap`]) or
/// trimming (with [`TextWrap::NoWrap`]); implementations ignore it when it is
/// not positive and finite.
pub trait TextLayoutEngine {
    fn layout(&mut self, text: &str, attrs: &TextAttrs, max_width: Option<f32>) -> TextBlock;
}

/// [`TextLayoutEngine`] backed by a [`FontDatabase`], a [`TextShaper`] and
/// the faces' own glyph outlines.
pub struct TextEngine {
    font_db: FontDatabase,
    shaper: Box<dyn TextShaper>,
    outlines: OutlineCache,
    glyphs: Vec<ShapedGlyph>,
    builder: PathBuilder,
}

impl TextEngine {
    pub fn new<S: TextShaper>(font_db: FontDatabase, shaper: S) -> TextEngine {
        TextEngine {
            font_db,
            shaper: Box::new(shaper),
            outlines: OutlineCache::new(),
            glyphs: Vec::new(),
            builder: PathBuilder::new(),
        }
    }

    pub fn font_db(&self) -> &FontDatabase {
        &self.font_db
    }

    pub fn font_db_mut(&mut self) -> &mut FontDatabase {
        &mut self.font_db
    }

    /// First family of the fallback list that both resolves and loads.
    fn resolve_font(&mut self, attrs: &TextAttrs) -> Option<FontId> {
        for family in attrs.fonts.iter() {
            let Some(id) = self.font_db.query(&attrs.font_attrs(family)) else {
                continue;
            };

            if self.font_db.get_or_load(id).is_ok() {
                return Some(id);
            }
        }

        None
    }
}

impl TextLayoutEngine for TextEngine {
    fn layout(&mut self, text: &str, attrs: &TextAttrs, max_width: Option<f32>) -> TextBlock {
        if text.is_empty() {
            return TextBlock::default();
        }

        let Some(font_id) = self.resolve_font(attrs) else {
            log::warn!("No font found for family {:?}", attrs.fonts.base().name());
            return TextBlock::default();
        };

        let TextEngine {
            font_db,
            shaper,
            outlines,
            glyphs,
            builder,
        } = self;

        let Some(face) = font_db.get(font_id) else {
            return TextBlock::default();
        };

        let size = attrs.size;
        let metrics = *face.metrics();
        let natural_height = metrics.line_height(size);
        let line_height = attrs.line_height_px().unwrap_or(natural_height);

        let max_width = max_width.filter(|w| w.is_finite() && *w > 0.0);
        let wrap_width = match attrs.wrap {
            TextWrap::Wrap => max_width,
            TextWrap::NoWrap => None,
        };
        let trim_width = match (attrs.wrap, attrs.trimming) {
            (TextWrap::NoWrap, TextTrimming::CharacterEllipsis | TextTrimming::WordEllipsis) => {
                max_width
            }
            _ => None,
        };

        let mut ellipsis = None;
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);

            glyphs.clear();
            shaper.shape(face, paragraph, size, glyphs);

            if let Some(max_width) = wrap_width {
                lines.extend(break_lines(paragraph, glyphs, max_width));
                continue;
            }

            let line = Line::new(paragraph, glyphs.clone());
            match trim_width {
                Some(limit) if line.width > limit => {
                    let ellipsis = ellipsis.get_or_insert_with(|| {
                        let mut buf = Vec::new();
                        shaper.shape(face, ELLIPSIS, size, &mut buf);
                        buf
                    });
                    lines.push(trim_line(paragraph, &line, ellipsis, limit, attrs.trimming));
                }
                _ => lines.push(line),
            }
        }

        let content_width = lines.iter().map(|l| l.width).fold(0.0, f32::max);
        let align_width = wrap_width.unwrap_or(content_width);
        let scale = metrics.scale(size);
        let ascent = metrics.ascender as f32 * scale;

        builder.clear();

        for (i, line) in lines.iter().enumerate() {
            // wrapped lines let trailing whitespace hang past the edge
            let extent = if wrap_width.is_some() {
                line.visible_width
            } else {
                line.width
            };

            let baseline =
                i as f32 * line_height + (line_height - natural_height) * 0.5 + ascent;
            let mut x = attrs.align.offset(align_width, extent);

            for glyph in &line.glyphs {
                if let Some(path) = outlines.get(face, glyph.glyph_id) {
                    let pos = Vec2::new(x + glyph.offset.x, baseline + glyph.offset.y);
                    let transform = Affine2::from_translation(pos)
                        * Affine2::from_scale(Vec2::new(scale, -scale));
                    builder.extend(path, &transform);
                }
                x += glyph.x_advance;
            }
        }

        TextBlock {
            outline: builder.finish(),
            width: content_width,
            height: lines.len() as f32 * line_height,
        }
    }
}

impl fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextEngine")
            .field("font_db", &self.font_db)
            .field("cached_outlines", &self.outlines.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
struct Line {
    glyphs: Vec<ShapedGlyph>,
    width: f32,
    visible_width: f32,
}

impl Line {
    fn new(text: &str, glyphs: Vec<ShapedGlyph>) -> Line {
        let mut width = 0.0;
        let mut trailing_whitespace = 0.0;

        for glyph in &glyphs {
            if is_whitespace(text, glyph.cluster) {
                trailing_whitespace += glyph.x_advance;
            } else {
                trailing_whitespace = 0.0;
            }
            width += glyph.x_advance;
        }

        Line {
            glyphs,
            width,
            visible_width: width - trailing_whitespace,
        }
    }
}

fn is_whitespace(text: &str, cluster: usize) -> bool {
    text.get(cluster..)
        .and_then(|s| s.chars().next())
        .is_some_and(char::is_whitespace)
}

fn advance(glyphs: &[ShapedGlyph]) -> f32 {
    glyphs.iter().map(|g| g.x_advance).sum()
}

/// Greedy line breaking at Unicode break opportunities. A word wider than
/// `max_width` gets a line of its own and overflows.
fn break_lines(text: &str, glyphs: &[ShapedGlyph], max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current: Vec<ShapedGlyph> = Vec::new();
    let mut current_width = 0.0;
    let mut glyph_idx = 0;

    for (break_idx, opportunity) in unicode_linebreak::linebreaks(text) {
        let start = glyph_idx;
        while glyph_idx < glyphs.len() && glyphs[glyph_idx].cluster < break_idx {
            glyph_idx += 1;
        }

        let word = &glyphs[start..glyph_idx];
        let word_width = advance(word);
        let trailing = word
            .iter()
            .rev()
            .take_while(|g| is_whitespace(text, g.cluster))
            .map(|g| g.x_advance)
            .sum::<f32>();

        if !current.is_empty() && current_width + word_width - trailing > max_width {
            lines.push(Line::new(text, std::mem::take(&mut current)));
            current_width = 0.0;
        }

        current.extend_from_slice(word);
        current_width += word_width;

        if opportunity == BreakOpportunity::Mandatory && break_idx < text.len() {
            lines.push(Line::new(text, std::mem::take(&mut current)));
            current_width = 0.0;
        }
    }

    // glyphs past the last break (there should be none)
    current.extend_from_slice(&glyphs[glyph_idx..]);
    lines.push(Line::new(text, current));
    lines
}

/// Cuts `line` so that it plus the ellipsis fits `limit`.
fn trim_line(
    text: &str,
    line: &Line,
    ellipsis: &[ShapedGlyph],
    limit: f32,
    trimming: TextTrimming,
) -> Line {
    let budget = limit - advance(ellipsis);

    let mut cut = 0;
    let mut width = 0.0;
    for glyph in &line.glyphs {
        if width + glyph.x_advance > budget {
            break;
        }
        width += glyph.x_advance;
        cut += 1;
    }

    if trimming == TextTrimming::WordEllipsis {
        let breaks = unicode_linebreak::linebreaks(text)
            .filter(|&(_, o)| o == BreakOpportunity::Allowed)
            .map(|(idx, _)| idx)
            .collect::<Vec<_>>();
        let word_end = |g: &ShapedGlyph| {
            is_whitespace(text, g.cluster) || breaks.contains(&g.cluster)
        };

        // no word fits: keep the character cut
        if let Some(word_cut) = (1..=cut.min(line.glyphs.len().saturating_sub(1)))
            .rev()
            .find(|&i| word_end(&line.glyphs[i]))
        {
            cut = word_cut;
        }
    }

    while cut > 0 && is_whitespace(text, line.glyphs[cut - 1].cluster) {
        cut -= 1;
    }

    let mut glyphs = line.glyphs[..cut].to_vec();
    glyphs.extend(ellipsis.iter().map(|g| ShapedGlyph {
        cluster: text.len(),
        ..*g
    }));

    Line::new(text, glyphs)
}
