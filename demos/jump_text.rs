use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use image::{Rgba, RgbaImage};
use sheen::math::Vec2;
use sheen::text::{FontFamilies, FontFamily, FontWeight, LayoutBox, TextAttrs};
use sheen::{Color, Frame, Graphics, ShinyText};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 120;
const FPS: u32 = 30;

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "jump_text_frames".into()),
    );
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut graphics = Graphics::new_zeno();

    let mut shiny = ShinyText::new(true);
    shiny.set_text("Jump TextBlock");
    shiny.set_attrs(TextAttrs {
        size: 56.0,
        weight: FontWeight::BOLD,
        fonts: FontFamilies::new(FontFamily::new("Segoe UI"))
            .with(FontFamily::new("DejaVu Sans"))
            .with(FontFamily::sans_serif()),
        ..Default::default()
    });
    shiny.set_layout_box(LayoutBox {
        actual_width: WIDTH as f32,
        ..Default::default()
    });
    shiny.set_foreground(Color::from_rgba8(30, 80, 190, 255));

    graphics.update(&mut shiny);
    if shiny.geometry().is_empty() {
        bail!("no usable font found");
    }

    shiny.trigger(Duration::ZERO);

    let step = Duration::from_secs(1) / FPS;
    let mut now = Duration::ZERO;
    let mut index = 0;

    loop {
        let frame = graphics.frame(&mut shiny, now);
        let path = out_dir.join(format!("frame_{index:04}.png"));
        save(&frame, &path)?;

        if !shiny.is_animating(now) {
            break;
        }

        now += step;
        index += 1;
    }

    println!("wrote {} frames to {}", index + 1, out_dir.display());
    Ok(())
}

fn save(frame: &Frame, path: &Path) -> Result<()> {
    let mut canvas = RgbaImage::from_pixel(WIDTH, HEIGHT, Rgba([255, 255, 255, 255]));
    let origin = frame.origin + Vec2::new(0.0, 30.0);
    let image = &frame.image;

    for y in 0..image.size.y {
        for x in 0..image.size.x {
            let cx = origin.x as i64 + x as i64;
            let cy = origin.y as i64 + y as i64;
            if cx < 0 || cy < 0 || cx >= WIDTH as i64 || cy >= HEIGHT as i64 {
                continue;
            }

            let Some(&[r, g, b, a]) = image.pixel(x, y) else {
                continue;
            };

            // premultiplied source over opaque destination
            let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
            let inv = 255 - a as u32;
            for (d, s) in dst.0.iter_mut().zip([r, g, b]) {
                *d = (s as u32 + (*d as u32 * inv + 127) / 255).min(255) as u8;
            }
        }
    }

    canvas
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}
