pub use sheen_core::*;
#[cfg(feature = "zeno")]
pub use sheen_zeno::ZenoMaskRasterizer;

mod graphics;

pub use self::graphics::*;

pub mod text {
    pub use sheen_core::text::*;
    #[cfg(feature = "fontdb")]
    pub use sheen_fontdb::{MemoryFontSource, SystemFontSource};
    #[cfg(feature = "rustybuzz")]
    pub use sheen_rustybuzz::RustybuzzShaper;

    #[derive(Default)]
    pub struct DefaultTextShaper {
        #[cfg(feature = "rustybuzz")]
        inner: sheen_rustybuzz::RustybuzzShaper,
        #[cfg(not(feature = "rustybuzz"))]
        inner: DummyTextShaper,
    }

    impl DefaultTextShaper {
        pub fn new() -> DefaultTextShaper {
            DefaultTextShaper::default()
        }
    }

    impl TextShaper for DefaultTextShaper {
        fn shape(&mut self, font_face: &FontFace, text: &str, size: f32, buf: &mut Vec<ShapedGlyph>) {
            self.inner.shape(font_face, text, size, buf);
        }
    }

    /// Produces no glyphs.
    #[derive(Debug, Default)]
    pub struct DummyTextShaper;

    impl TextShaper for DummyTextShaper {
        fn shape(&mut self, _: &FontFace, _: &str, _: f32, _: &mut Vec<ShapedGlyph>) {}
    }
}
