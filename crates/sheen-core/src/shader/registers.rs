use crate::math::Vec4;
use crate::{Error, ErrorKind, Result};

/// Number of constant registers the highlight program reads.
pub const REGISTER_COUNT: usize = 5;

/// Named inputs of the highlight program.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum HighlightInput {
    SweepPosition,
    BandWidth,
    Color,
    Additive,
    Intensity,
}

impl HighlightInput {
    pub const ALL: [HighlightInput; REGISTER_COUNT] = [
        HighlightInput::SweepPosition,
        HighlightInput::BandWidth,
        HighlightInput::Color,
        HighlightInput::Additive,
        HighlightInput::Intensity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HighlightInput::SweepPosition => "sweep_position",
            HighlightInput::BandWidth => "band_width",
            HighlightInput::Color => "color",
            HighlightInput::Additive => "additive",
            HighlightInput::Intensity => "intensity",
        }
    }
}

/// Constant register slot of every highlight input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct RegisterMap {
    pub sweep_position: u8,
    pub band_width: u8,
    pub color: u8,
    pub additive: u8,
    pub intensity: u8,
}

impl RegisterMap {
    pub fn slot(&self, input: HighlightInput) -> u8 {
        match input {
            HighlightInput::SweepPosition => self.sweep_position,
            HighlightInput::BandWidth => self.band_width,
            HighlightInput::Color => self.color,
            HighlightInput::Additive => self.additive,
            HighlightInput::Intensity => self.intensity,
        }
    }

    /// Checks that every slot is in range and bound to a single input.
    pub fn validate(&self) -> Result<()> {
        let mut bound: [Option<HighlightInput>; REGISTER_COUNT] = [None; REGISTER_COUNT];

        for input in HighlightInput::ALL {
            let slot = self.slot(input) as usize;

            let Some(entry) = bound.get_mut(slot) else {
                return Err(Error::new(
                    ErrorKind::InvalidShader,
                    format!(
                        "register c{} for `{}` is out of range (0..{})",
                        slot,
                        input.name(),
                        REGISTER_COUNT
                    ),
                ));
            };

            if let Some(other) = entry.replace(input) {
                return Err(Error::new(
                    ErrorKind::InvalidShader,
                    format!(
                        "register c{} is bound to both `{}` and `{}`",
                        slot,
                        other.name(),
                        input.name()
                    ),
                ));
            }
        }

        Ok(())
    }
}

impl Default for RegisterMap {
    fn default() -> Self {
        RegisterMap {
            sweep_position: 0,
            band_width: 1,
            color: 2,
            additive: 3,
            intensity: 4,
        }
    }
}

/// Uniform constants of the highlight program. Scalars live in `x`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, encase::ShaderType)]
pub struct ConstantBlock {
    pub registers: [Vec4; REGISTER_COUNT],
}

impl ConstantBlock {
    /// Packs the block with uniform buffer layout rules.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = encase::UniformBuffer::new(Vec::new());
        buffer
            .write(self)
            .map_err(|e| Error::wrap(ErrorKind::InvalidShader, e))?;
        Ok(buffer.into_inner())
    }
}
