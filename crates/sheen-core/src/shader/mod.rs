//! The highlight program: a soft band of light swept horizontally over a
//! surface.

mod registers;

pub use self::registers::*;

use crate::math::Vec4;
use crate::{Color, Result};

/// Band widths below this collapse to an invisible band.
pub const BAND_EPSILON: f32 = 1e-6;

const WGSL_TEMPLATE: &str = include_str!("highlight.wgsl");

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum BlendMode {
    /// Adds the highlight to the surface, saturating at 1.
    #[default]
    Additive,
    /// Interpolates the surface toward the highlight color.
    Lerp,
}

/// Inputs of the highlight program. Any value is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightParams {
    /// Band center in normalized surface width.
    pub sweep_position: f32,
    /// Half-width of the falloff in normalized surface width.
    pub band_width: f32,
    /// Premultiplied highlight color.
    pub color: Color,
    pub blend: BlendMode,
    pub intensity: f32,
}

impl Default for HighlightParams {
    fn default() -> Self {
        HighlightParams {
            sweep_position: 0.0,
            band_width: 0.4,
            color: Color::from_rgba8(230, 242, 255, 240),
            blend: BlendMode::Additive,
            intensity: 1.0,
        }
    }
}

/// Smoothstep falloff: 1 at `u == sweep`, 0 once `|u - sweep| >= band_width`.
pub fn band_weight(u: f32, sweep: f32, band_width: f32) -> f32 {
    let t = (1.0 - (u - sweep).abs() / band_width.max(BAND_EPSILON)).clamp(0.0, 1.0);
    if t.is_nan() {
        return 0.0;
    }
    t * t * (3.0 - 2.0 * t)
}

/// The highlight program bound to a register layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightShader {
    registers: RegisterMap,
}

impl HighlightShader {
    pub fn new(registers: RegisterMap) -> Result<HighlightShader> {
        registers.validate()?;
        Ok(HighlightShader { registers })
    }

    pub fn registers(&self) -> &RegisterMap {
        &self.registers
    }

    /// Shades one pixel of `input` at normalized horizontal position `u`.
    pub fn evaluate(&self, input: Color, u: f32, params: &HighlightParams) -> Color {
        let input = Vec4::from(input.saturate());
        let color = Vec4::from(params.color.saturate());

        let k = gain(band_weight(u, params.sweep_position, params.band_width), params.intensity);

        let out = match params.blend {
            BlendMode::Additive => (input + color * k).min(Vec4::ONE),
            BlendMode::Lerp => input + (color - input) * k.min(1.0),
        };

        Color::from(out).saturate()
    }

    /// Register contents for `params`, laid out per the register map.
    pub fn constants(&self, params: &HighlightParams) -> ConstantBlock {
        let mut block = ConstantBlock::default();
        let scalar = |v: f32| Vec4::new(v, 0.0, 0.0, 0.0);

        for input in HighlightInput::ALL {
            let value = match input {
                HighlightInput::SweepPosition => scalar(params.sweep_position),
                HighlightInput::BandWidth => scalar(params.band_width),
                HighlightInput::Color => params.color.into(),
                HighlightInput::Additive => {
                    scalar(if params.blend == BlendMode::Additive { 1.0 } else { 0.0 })
                }
                HighlightInput::Intensity => scalar(params.intensity),
            };
            block.registers[self.registers.slot(input) as usize] = value;
        }

        block
    }

    /// WGSL source of the program with register indices filled in.
    pub fn wgsl_source(&self) -> String {
        let r = &self.registers;
        WGSL_TEMPLATE
            .replace("{{SWEEP_POSITION}}", &r.sweep_position.to_string())
            .replace("{{BAND_WIDTH}}", &r.band_width.to_string())
            .replace("{{COLOR}}", &r.color.to_string())
            .replace("{{ADDITIVE}}", &r.additive.to_string())
            .replace("{{INTENSITY}}", &r.intensity.to_string())
    }
}

fn gain(weight: f32, intensity: f32) -> f32 {
    if weight <= 0.0 || intensity.is_nan() {
        return 0.0;
    }
    (weight * intensity.max(0.0)).min(f32::MAX)
}
