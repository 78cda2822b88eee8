use std::sync::Arc;
use std::time::Duration;

use crate::anim::{AnimationConfig, HighlightAnimator};
use crate::shader::{BlendMode, ConstantBlock, HighlightParams, HighlightShader, RegisterMap};
use crate::surface::{ClipSurface, Frame, MaskRasterizer};
use crate::text::{
    GeometryBuilder, GeometryMode, GlyphGeometry, GlyphOutline, LayoutBox, TextAttrs,
    TextLayoutEngine,
};
use crate::{Color, Result};

/// Text with an animated highlight sweeping across its glyphs.
///
/// Setters only record changes. [`ShinyText::update`] rebuilds the glyph
/// geometry, [`ShinyText::tick`] advances the animations and
/// [`ShinyText::render`] produces pixels; [`ShinyText::frame`] does all three.
#[derive(Debug, Clone)]
pub struct ShinyText {
    text: String,
    attrs: TextAttrs,
    layout: LayoutBox,
    builder: GeometryBuilder,
    shader: HighlightShader,
    params: HighlightParams,
    surface: ClipSurface,
    animator: HighlightAnimator,
    dirty: bool,
}

impl ShinyText {
    /// With `split`, every character gets its own outline and hops when
    /// triggered. The mode can't change afterwards.
    pub fn new(split: bool) -> ShinyText {
        let mode = if split {
            GeometryMode::PerCharacter
        } else {
            GeometryMode::Block
        };

        ShinyText {
            text: String::new(),
            attrs: TextAttrs::default(),
            layout: LayoutBox::default(),
            builder: GeometryBuilder::new(mode),
            shader: HighlightShader::default(),
            params: HighlightParams::default(),
            surface: ClipSurface::new(Color::BLACK),
            animator: HighlightAnimator::default(),
            dirty: true,
        }
    }

    /// Like [`ShinyText::new`], binding the highlight inputs to custom
    /// constant registers.
    pub fn with_registers(split: bool, registers: RegisterMap) -> Result<ShinyText> {
        let mut shiny = ShinyText::new(split);
        shiny.shader = HighlightShader::new(registers)?;
        Ok(shiny)
    }

    pub fn mode(&self) -> GeometryMode {
        self.builder.mode()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            log::trace!("Text changed to {:?}", text);
            self.text = text;
            self.dirty = true;
        }
    }

    pub fn attrs(&self) -> &TextAttrs {
        &self.attrs
    }

    pub fn set_attrs(&mut self, attrs: TextAttrs) {
        if attrs != self.attrs {
            log::trace!("Text attributes changed to {:?}", attrs);
            self.surface.set_align(attrs.align);
            self.attrs = attrs;
            self.dirty = true;
        }
    }

    pub fn layout_box(&self) -> &LayoutBox {
        &self.layout
    }

    /// Geometry is only rebuilt when the constraint width changes.
    pub fn set_layout_box(&mut self, layout: LayoutBox) {
        if layout.constraint() != self.layout.constraint() {
            log::trace!("Layout constraint changed to {:?}", layout.constraint());
            self.dirty = true;
        }
        self.layout = layout;
    }

    pub fn foreground(&self) -> Color {
        self.surface.fill()
    }

    pub fn set_foreground(&mut self, color: Color) {
        log::trace!("Foreground changed to {:?}", color);
        self.surface.set_fill(color);
    }

    pub fn params(&self) -> &HighlightParams {
        &self.params
    }

    pub fn sweep_position(&self) -> f32 {
        self.params.sweep_position
    }

    /// Also stops a running sweep from overwriting the value.
    pub fn set_sweep_position(&mut self, value: f32) {
        self.animator.release_sweep();
        self.params.sweep_position = value;
    }

    pub fn band_width(&self) -> f32 {
        self.params.band_width
    }

    pub fn set_band_width(&mut self, value: f32) {
        log::trace!("Band width changed to {}", value);
        self.params.band_width = value;
    }

    pub fn highlight_color(&self) -> Color {
        self.params.color
    }

    pub fn set_highlight_color(&mut self, color: Color) {
        log::trace!("Highlight color changed to {:?}", color);
        self.params.color = color;
    }

    pub fn is_additive(&self) -> bool {
        self.params.blend == BlendMode::Additive
    }

    pub fn set_additive(&mut self, additive: bool) {
        log::trace!("Additive blending set to {}", additive);
        self.params.blend = if additive {
            BlendMode::Additive
        } else {
            BlendMode::Lerp
        };
    }

    pub fn intensity(&self) -> f32 {
        self.params.intensity
    }

    pub fn set_intensity(&mut self, value: f32) {
        log::trace!("Intensity changed to {}", value);
        self.params.intensity = value;
    }

    pub fn animation_config(&self) -> &AnimationConfig {
        self.animator.config()
    }

    pub fn set_animation_config(&mut self, config: AnimationConfig) {
        self.animator.set_config(config);
    }

    pub fn shader(&self) -> &HighlightShader {
        &self.shader
    }

    /// Current highlight inputs, laid out for upload.
    pub fn constants(&self) -> ConstantBlock {
        self.shader.constants(&self.params)
    }

    /// `true` when a change hasn't been laid out yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rebuilds the geometry if anything it depends on changed. Running hops
    /// are dropped along with the old geometry. Returns whether it rebuilt.
    pub fn update(&mut self, engine: &mut dyn TextLayoutEngine) -> bool {
        if !self.dirty {
            return false;
        }

        let geometry = self
            .builder
            .build(engine, &self.text, &self.attrs, &self.layout);

        log::debug!(
            "Rebuilt {:?} geometry: {} outlines, {}x{}",
            geometry.mode(),
            geometry.len(),
            geometry.size().x,
            geometry.size().y,
        );

        self.surface.set_geometry(Arc::new(geometry));
        self.animator.drop_glyph_tracks();
        self.dirty = false;

        true
    }

    pub fn geometry(&self) -> Arc<GlyphGeometry> {
        Arc::clone(self.surface.geometry())
    }

    /// Per-character outlines, `None` in block mode.
    pub fn glyph_outlines(&self) -> Option<&[GlyphOutline]> {
        self.surface.geometry().glyphs()
    }

    /// Starts the sweep (and the hops in per-character mode) at `now`.
    /// Returns `false` when there is no geometry to animate.
    pub fn trigger(&mut self, now: Duration) -> bool {
        self.animator
            .trigger(now, self.surface.geometry(), &self.params)
    }

    pub fn tick(&mut self, now: Duration) {
        self.animator
            .tick(now, self.surface.geometry(), &mut self.params);
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        self.animator.is_animating(now)
    }

    /// Current vertical offset of every outline.
    pub fn glyph_offsets(&self) -> &[f32] {
        self.animator.glyph_offsets()
    }

    pub fn render(&self, rasterizer: &mut dyn MaskRasterizer) -> Frame {
        self.surface.render(
            &self.shader,
            &self.params,
            self.animator.glyph_offsets(),
            self.layout.actual_width,
            rasterizer,
        )
    }

    pub fn frame(
        &mut self,
        now: Duration,
        engine: &mut dyn TextLayoutEngine,
        rasterizer: &mut dyn MaskRasterizer,
    ) -> Frame {
        self.update(engine);
        self.tick(now);
        self.render(rasterizer)
    }
}

impl Default for ShinyText {
    fn default() -> Self {
        ShinyText::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::test_util::{BoundsRasterizer, FixedAdvanceEngine};
    use crate::text::TextAlign;
    use crate::ErrorKind;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn engine() -> FixedAdvanceEngine {
        FixedAdvanceEngine::new(8.0, 20.0)
            .with_width('A', 10.0)
            .with_width('B', 12.0)
    }

    #[test]
    fn test_split_text_geometry() {
        let mut engine = engine();
        let mut shiny = ShinyText::new(true);
        shiny.set_text("AB");
        assert!(shiny.update(&mut engine));

        let outlines = shiny.glyph_outlines().unwrap();
        assert_eq!(outlines.len(), 2);
        assert_eq!(outlines[0].offset.x, 0.0);
        assert_eq!(outlines[1].offset.x, 10.0);
        assert_eq!(shiny.geometry().size(), Vec2::new(22.0, 20.0));
    }

    #[test]
    fn test_block_mode_has_no_glyph_outlines() {
        let mut shiny = ShinyText::default();
        shiny.set_text("AB");
        shiny.update(&mut engine());

        assert_eq!(shiny.mode(), GeometryMode::Block);
        assert!(shiny.glyph_outlines().is_none());
        assert_eq!(shiny.geometry().len(), 1);
    }

    #[test]
    fn test_rebuilds_only_when_dirty() {
        let mut engine = engine();
        let mut shiny = ShinyText::new(true);
        shiny.set_text("AB");
        shiny.set_layout_box(LayoutBox::from_width(200.0));
        shiny.update(&mut engine);
        let calls = engine.calls;

        shiny.set_text("AB");
        shiny.set_foreground(Color::WHITE);
        shiny.set_layout_box(LayoutBox {
            actual_width: 260.0,
            ..LayoutBox::from_width(200.0)
        });
        assert!(!shiny.is_dirty());
        assert!(!shiny.update(&mut engine));
        assert_eq!(engine.calls, calls);

        shiny.set_text("ABA");
        assert!(shiny.update(&mut engine));
        assert_eq!(shiny.geometry().size().x, 32.0);
    }

    #[test]
    fn test_new_text_drops_hops() {
        let mut engine = engine();
        let mut shiny = ShinyText::new(true);
        shiny.set_text("AB");
        shiny.update(&mut engine);

        assert!(shiny.trigger(ms(0)));
        shiny.tick(ms(100));
        assert_eq!(shiny.glyph_offsets().len(), 2);

        shiny.set_text("ABBA");
        shiny.update(&mut engine);
        shiny.tick(ms(200));
        assert!(shiny.glyph_offsets().is_empty());
        // the sweep keeps going
        assert!(shiny.is_animating(ms(200)));
    }

    #[test]
    fn test_trigger_on_empty_text() {
        let mut shiny = ShinyText::new(true);
        shiny.update(&mut engine());
        assert!(!shiny.trigger(ms(0)));
        assert!(!shiny.is_animating(ms(0)));
    }

    #[test]
    fn test_frame_renders_animated_hops() {
        let mut engine = engine();
        let mut rasterizer = BoundsRasterizer::default();
        let mut shiny = ShinyText::new(true);
        shiny.set_text("AB");
        shiny.set_attrs(TextAttrs {
            align: TextAlign::Center,
            ..Default::default()
        });
        shiny.set_layout_box(LayoutBox {
            actual_width: 100.0,
            ..Default::default()
        });

        let frame = shiny.frame(ms(0), &mut engine, &mut rasterizer);
        assert_eq!(frame.origin, Vec2::new(39.0, 0.0));
        assert!(!shiny.is_animating(ms(0)));

        shiny.trigger(ms(0));
        let frame = shiny.frame(ms(3000), &mut engine, &mut rasterizer);
        assert_eq!(frame.origin, Vec2::new(39.0, -10.0));
        assert_eq!(frame.image.size.y, 30);
        assert_eq!(shiny.sweep_position(), 1.0);
    }

    #[test]
    fn test_manual_sweep_position_wins() {
        let mut shiny = ShinyText::new(false);
        shiny.set_text("AB");
        shiny.update(&mut engine());

        shiny.trigger(ms(0));
        shiny.set_sweep_position(0.5);
        shiny.tick(ms(1000));
        assert_eq!(shiny.sweep_position(), 0.5);
    }

    #[test]
    fn test_parameter_setters() {
        let mut shiny = ShinyText::new(false);
        assert_eq!(shiny.foreground(), Color::BLACK);
        assert!(shiny.is_additive());
        assert_eq!(shiny.band_width(), 0.4);

        shiny.set_additive(false);
        shiny.set_band_width(0.1);
        shiny.set_intensity(2.0);
        shiny.set_highlight_color(Color::WHITE);

        assert_eq!(shiny.params().blend, BlendMode::Lerp);
        let constants = shiny.constants();
        assert_eq!(constants.registers[1].x, 0.1);
        assert_eq!(constants.registers[3].x, 0.0);
        assert_eq!(constants.registers[4].x, 2.0);
        assert_eq!(shiny.highlight_color(), Color::WHITE);
        assert_eq!(shiny.intensity(), 2.0);
    }

    #[test]
    fn test_invalid_registers() {
        let registers = RegisterMap {
            additive: 2,
            ..Default::default()
        };
        let err = ShinyText::with_registers(true, registers).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidShader);
    }
}
