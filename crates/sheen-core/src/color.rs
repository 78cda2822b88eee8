use crate::math::Vec4;

/// Color with premultiplied alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel. Range: `0..=1`.
    pub r: f32,
    /// Green channel. Range: `0..=1`.
    pub g: f32,
    /// Blue channel. Range: `0..=1`.
    pub b: f32,
    /// Alpha channel. Range: `0..=1`.
    pub a: f32,
}

impl Color {
    /// Pure white color.
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// Pure black color.
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    /// Fully transparent color.
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Creates a color given an RGBA fourtuplet.
    ///
    /// Color components (`RGB`) are assumed to be premultiplied by alpha.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }

    /// Creates an opaque color given an RGB triplet.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Color {
        Color::rgba(r, g, b, 1.0)
    }

    /// Creates a color from 8-bit straight (non-premultiplied) channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
        let a = a as f32 / 255.0;
        Color::rgba(
            r as f32 / 255.0 * a,
            g as f32 / 255.0 * a,
            b as f32 / 255.0 * a,
            a,
        )
    }

    /// Clamps every channel into `0..=1`, mapping NaN to `0`.
    pub fn saturate(self) -> Color {
        Color::rgba(unit(self.r), unit(self.g), unit(self.b), unit(self.a))
    }

    /// Multiplies every channel, including alpha, by `factor`.
    pub fn scale(self, factor: f32) -> Color {
        Color::rgba(
            self.r * factor,
            self.g * factor,
            self.b * factor,
            self.a * factor,
        )
    }

    /// Converts to 8-bit premultiplied channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.saturate();
        [c.r, c.g, c.b, c.a].map(|v| (v * 255.0).round() as u8)
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Vec4 {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Color {
        Color::rgba(v.x, v.y, v.z, v.w)
    }
}

fn unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba8_premultiplies() {
        let c = Color::from_rgba8(255, 0, 255, 51);
        assert!((c.a - 0.2).abs() < 1e-6);
        assert!((c.r - 0.2).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
    }

    #[test]
    fn test_saturate_handles_nan() {
        let c = Color::rgba(f32::NAN, 2.0, -1.0, 0.5).saturate();
        assert_eq!(c, Color::rgba(0.0, 1.0, 0.0, 0.5));
    }

    #[test]
    fn test_to_rgba8() {
        assert_eq!(Color::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::TRANSPARENT.to_rgba8(), [0, 0, 0, 0]);
    }
}
