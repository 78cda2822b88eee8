use std::time::Duration;

use crate::text::{DefaultTextShaper, FontDatabase, TextEngine};
use crate::{Frame, MaskRasterizer, ShinyText};

/// The text engine and rasterizer shared by every [`ShinyText`] of an
/// application.
pub struct Graphics {
    pub text_engine: TextEngine,
    pub rasterizer: Box<dyn MaskRasterizer>,
}

#[cfg(feature = "zeno")]
impl Graphics {
    pub fn new_zeno() -> Graphics {
        Graphics::new(crate::ZenoMaskRasterizer::new())
    }
}

impl Graphics {
    pub fn new<R: MaskRasterizer + 'static>(rasterizer: R) -> Graphics {
        let mut graphics = Graphics {
            text_engine: TextEngine::new(FontDatabase::new(), DefaultTextShaper::new()),
            rasterizer: Box::new(rasterizer),
        };

        graphics.default_init();

        graphics
    }

    fn default_init(&mut self) {
        #[cfg(feature = "fontdb")]
        self.font_db_mut()
            .add_source(sheen_fontdb::SystemFontSource::new());

        log::debug!("Initialized {:?}", self.text_engine);
    }

    pub fn font_db(&self) -> &FontDatabase {
        self.text_engine.font_db()
    }

    /// Fonts can be added here, e.g. a [`crate::text::MemoryFontSource`]
    /// with bundled faces. Sources added later have lower priority.
    pub fn font_db_mut(&mut self) -> &mut FontDatabase {
        self.text_engine.font_db_mut()
    }

    /// Lays out `shiny` if it changed since the last call.
    pub fn update(&mut self, shiny: &mut ShinyText) -> bool {
        shiny.update(&mut self.text_engine)
    }

    pub fn render(&mut self, shiny: &ShinyText) -> Frame {
        shiny.render(&mut *self.rasterizer)
    }

    /// Updates, ticks and renders `shiny` at frame time `now`.
    pub fn frame(&mut self, shiny: &mut ShinyText, now: Duration) -> Frame {
        shiny.frame(now, &mut self.text_engine, &mut *self.rasterizer)
    }
}
