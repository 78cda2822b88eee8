use std::collections::HashMap;

use crate::image::{ImageData, ImageFormat};
use crate::math::{Rect, Vec2};
use crate::path::{Path, PathBuilder};
use crate::surface::MaskRasterizer;
use crate::text::{TextAttrs, TextBlock, TextLayoutEngine, TextTrimming, TextWrap};

/// Lays text out as one rectangle per non-whitespace char, with a fixed
/// advance per char and a fixed line height. Wraps at spaces.
pub struct FixedAdvanceEngine {
    default_width: f32,
    line_height: f32,
    widths: HashMap<char, f32>,
    pub calls: usize,
}

impl FixedAdvanceEngine {
    pub fn new(default_width: f32, line_height: f32) -> FixedAdvanceEngine {
        FixedAdvanceEngine {
            default_width,
            line_height,
            widths: HashMap::new(),
            calls: 0,
        }
    }

    pub fn with_width(mut self, ch: char, width: f32) -> FixedAdvanceEngine {
        self.widths.insert(ch, width);
        self
    }

    fn width(&self, ch: char) -> f32 {
        self.widths.get(&ch).copied().unwrap_or(self.default_width)
    }

    fn break_words(&self, paragraph: &str, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in paragraph.split_inclusive(' ') {
            let word_width: f32 = word.chars().map(|c| self.width(c)).sum();
            let trailing: f32 = word
                .chars()
                .rev()
                .take_while(|c| c.is_whitespace())
                .map(|c| self.width(c))
                .sum();
            let current_width: f32 = current.chars().map(|c| self.width(c)).sum();

            if !current.is_empty() && current_width + word_width - trailing > max_width {
                lines.push(std::mem::take(&mut current));
            }
            current.push_str(word);
        }

        lines.push(current);
        lines
    }
}

impl TextLayoutEngine for FixedAdvanceEngine {
    fn layout(&mut self, text: &str, attrs: &TextAttrs, max_width: Option<f32>) -> TextBlock {
        self.calls += 1;

        if text.is_empty() {
            return TextBlock::default();
        }

        let max_width = max_width.filter(|w| w.is_finite() && *w > 0.0);
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            match (attrs.wrap, max_width) {
                (TextWrap::Wrap, Some(max_width)) => {
                    lines.extend(self.break_words(paragraph, max_width))
                }
                _ => lines.push(paragraph.to_string()),
            }
        }

        let mut builder = PathBuilder::new();
        let mut width = 0.0f32;

        for (i, line) in lines.iter().enumerate() {
            let mut x = 0.0;
            for ch in line.chars() {
                let advance = self.width(ch);
                if !ch.is_whitespace() {
                    builder.rect(
                        Vec2::new(x, i as f32 * self.line_height),
                        Vec2::new(advance, self.line_height),
                    );
                }
                x += advance;
            }
            width = width.max(x);
        }

        if let (TextWrap::NoWrap, Some(limit)) = (attrs.wrap, max_width) {
            if attrs.trimming != TextTrimming::None {
                width = width.min(limit);
            }
        }

        TextBlock {
            outline: builder.finish(),
            width,
            height: lines.len() as f32 * self.line_height,
        }
    }
}

/// Gives full coverage to every pixel whose center lies inside the path's
/// bounding box.
#[derive(Default)]
pub struct BoundsRasterizer {
    pub calls: Vec<(Rect, Vec2)>,
}

impl MaskRasterizer for BoundsRasterizer {
    fn fill(&mut self, path: &Path, offset: Vec2, mask: &mut ImageData) {
        assert_eq!(mask.format, ImageFormat::Gray8);

        let Some(bounds) = path.bounds() else {
            return;
        };
        self.calls.push((bounds, offset));

        let bounds = bounds.translate(offset);
        let width = mask.size.x as usize;

        for y in 0..mask.size.y {
            for x in 0..mask.size.x {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let inside = center.x >= bounds.min.x
                    && center.x < bounds.max.x
                    && center.y >= bounds.min.y
                    && center.y < bounds.max.y;

                if inside {
                    mask.data[y as usize * width + x as usize] = 255;
                }
            }
        }
    }
}
