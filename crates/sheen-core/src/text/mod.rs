mod engine;
mod font;
mod font_db;
mod geometry;
mod outline;
mod shaping;

pub use self::engine::*;
pub use self::font::*;
pub use self::font_db::*;
pub use self::geometry::*;
pub use self::outline::*;
pub use self::shaping::*;

#[derive(Debug, Clone, PartialEq)]
pub struct TextAttrs {
    pub size: f32,
    pub align: TextAlign,
    pub fonts: FontFamilies,
    pub weight: FontWeight,
    pub width: FontWidth,
    pub style: FontStyle,
    pub line_height: LineHeight,
    pub wrap: TextWrap,
    pub trimming: TextTrimming,
}

impl TextAttrs {
    pub fn font_attrs(&self, family: &FontFamily) -> FontAttrs {
        FontAttrs {
            family: family.clone(),
            weight: self.weight,
            width: self.width,
            style: self.style,
        }
    }

    /// The line height override in pixels, if it resolves to a usable value.
    pub fn line_height_px(&self) -> Option<f32> {
        let px = match self.line_height {
            LineHeight::Auto => return None,
            LineHeight::Px(v) => v,
            LineHeight::Relative(v) => v * self.size,
        };
        (px.is_finite() && px > 0.0).then_some(px)
    }
}

impl Default for TextAttrs {
    fn default() -> Self {
        Self {
            size: 14.0,
            align: Default::default(),
            fonts: Default::default(),
            weight: Default::default(),
            width: Default::default(),
            style: Default::default(),
            line_height: Default::default(),
            wrap: Default::default(),
            trimming: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Offset that places `content` inside `container` along one axis.
    pub fn offset(self, container: f32, content: f32) -> f32 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Center => (container - content) * 0.5,
            TextAlign::Right => container - content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineHeight {
    /// Use the font's ascender, descender and line gap.
    #[default]
    Auto,
    Px(f32),
    Relative(f32),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum TextWrap {
    #[default]
    NoWrap,
    Wrap,
}

/// What happens to unwrapped text that does not fit its constraint.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum TextTrimming {
    /// Overflow.
    #[default]
    None,
    CharacterEllipsis,
    WordEllipsis,
}

/// Size constraints handed down by the host's layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    /// Explicitly requested width.
    pub width: Option<f32>,
    pub max_width: f32,
    /// Width the host actually arranged the component into.
    pub actual_width: f32,
}

impl LayoutBox {
    pub fn from_width(width: f32) -> LayoutBox {
        LayoutBox {
            width: Some(width),
            actual_width: width,
            ..Default::default()
        }
    }

    /// The width text should wrap or trim against: explicit width, then max
    /// width, then actual width, skipping values that are not positive and
    /// finite.
    pub fn constraint(&self) -> Option<f32> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        self.width
            .filter(|&v| usable(v))
            .or_else(|| usable(self.max_width).then_some(self.max_width))
            .or_else(|| usable(self.actual_width).then_some(self.actual_width))
    }
}

impl Default for LayoutBox {
    fn default() -> Self {
        LayoutBox {
            width: None,
            max_width: f32::INFINITY,
            actual_width: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_precedence() {
        let mut layout = LayoutBox {
            width: Some(120.0),
            max_width: 80.0,
            actual_width: 60.0,
        };
        assert_eq!(layout.constraint(), Some(120.0));

        layout.width = Some(f32::NAN);
        assert_eq!(layout.constraint(), Some(80.0));

        layout.max_width = f32::INFINITY;
        assert_eq!(layout.constraint(), Some(60.0));

        layout.actual_width = 0.0;
        assert_eq!(layout.constraint(), None);
        assert_eq!(LayoutBox::default().constraint(), None);
    }

    #[test]
    fn test_line_height_override() {
        let mut attrs = TextAttrs::default();
        assert_eq!(attrs.line_height_px(), None);

        attrs.line_height = LineHeight::Px(30.0);
        assert_eq!(attrs.line_height_px(), Some(30.0));

        attrs.line_height = LineHeight::Relative(2.0);
        assert_eq!(attrs.line_height_px(), Some(28.0));

        attrs.line_height = LineHeight::Px(-4.0);
        assert_eq!(attrs.line_height_px(), None);

        attrs.line_height = LineHeight::Px(f32::NAN);
        assert_eq!(attrs.line_height_px(), None);
    }

    #[test]
    fn test_align_offset() {
        assert_eq!(TextAlign::Left.offset(100.0, 40.0), 0.0);
        assert_eq!(TextAlign::Center.offset(100.0, 40.0), 30.0);
        assert_eq!(TextAlign::Right.offset(100.0, 40.0), 60.0);
    }
}
