use sheen_core::math::Vec2;
use sheen_core::{ImageData, ImageFormat, MaskRasterizer, Path, PathEvent};
use zeno::{Command, Format, Mask, PathBuilder, Scratch};

/// [`MaskRasterizer`] backed by zeno's anti-aliased scanline renderer.
#[derive(Default)]
pub struct ZenoMaskRasterizer {
    scratch: Scratch,
    command_buffer: Vec<Command>,
}

impl ZenoMaskRasterizer {
    pub fn new() -> ZenoMaskRasterizer {
        ZenoMaskRasterizer::default()
    }
}

impl MaskRasterizer for ZenoMaskRasterizer {
    fn fill(&mut self, path: &Path, offset: Vec2, mask: &mut ImageData) {
        if mask.format != ImageFormat::Gray8 || mask.is_empty() || path.is_empty() {
            return;
        }

        self.command_buffer.clear();
        let p = |v: Vec2| [v.x + offset.x, v.y + offset.y];

        for event in path.events() {
            match *event {
                PathEvent::MoveTo { point } => self.command_buffer.move_to(p(point)),
                PathEvent::LineTo { point } => self.command_buffer.line_to(p(point)),
                PathEvent::QuadTo { control, point } => {
                    self.command_buffer.quad_to(p(control), p(point))
                }
                PathEvent::CubicTo { control, point } => {
                    self.command_buffer
                        .curve_to(p(control[0]), p(control[1]), p(point))
                }
                PathEvent::Close => self.command_buffer.close(),
            };
        }

        let (data, placement) = Mask::with_scratch(&self.command_buffer[..], &mut self.scratch)
            .format(Format::Alpha)
            .render();

        if data.is_empty() {
            return;
        }

        let mask_width = mask.size.x as i64;
        let mask_height = mask.size.y as i64;

        for (row, coverage) in data.chunks(placement.width as usize).enumerate() {
            let y = placement.top as i64 + row as i64;
            if y < 0 || y >= mask_height {
                continue;
            }

            for (col, &v) in coverage.iter().enumerate() {
                let x = placement.left as i64 + col as i64;
                if x < 0 || x >= mask_width {
                    continue;
                }

                let dst = &mut mask.data[(y * mask_width + x) as usize];
                *dst = (*dst).max(v);
            }
        }
    }
}
