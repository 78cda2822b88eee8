use std::sync::Arc;
use std::time::Duration;

use crate::anim::{Easing, StaggerSchedule, Tween};
use crate::shader::HighlightParams;
use crate::text::GlyphGeometry;

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Length of the sweep, which also sets the per-glyph duration.
    pub duration: Duration,
    /// How far each character hops up, in pixels.
    pub hop_height: f32,
    /// Stagger decay constant. Higher values pack later delays tighter.
    pub decay: f32,
    /// Per-glyph duration as a multiple of `duration / N`.
    pub glyph_span: f32,
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            duration: Duration::from_millis(3000),
            hop_height: 10.0,
            decay: 8.4,
            glyph_span: 1.0,
            easing: Easing::CubicInOut,
        }
    }
}

/// Drives the sweep position and the per-glyph hops.
#[derive(Debug, Clone, Default)]
pub struct HighlightAnimator {
    config: AnimationConfig,
    sweep: Option<Tween>,
    // outlines the glyph tracks were scheduled for
    bound: Option<Arc<GlyphGeometry>>,
    tracks: Vec<Tween>,
    offsets: Vec<f32>,
}

impl HighlightAnimator {
    pub fn new(config: AnimationConfig) -> HighlightAnimator {
        HighlightAnimator {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Applies to the next trigger.
    pub fn set_config(&mut self, config: AnimationConfig) {
        self.config = config;
    }

    /// Starts a sweep at `now`, replacing whatever was running. Schedules a
    /// hop per character when the geometry is per-character. Does nothing
    /// and returns `false` when there is nothing to animate.
    pub fn trigger(
        &mut self,
        now: Duration,
        geometry: &Arc<GlyphGeometry>,
        params: &HighlightParams,
    ) -> bool {
        if geometry.is_empty() {
            log::debug!("Ignoring highlight trigger without geometry");
            return false;
        }

        let config = &self.config;
        self.sweep = Some(
            Tween::new(-params.band_width, 1.0, config.duration)
                .starting_at(now)
                .with_easing(config.easing),
        );

        self.tracks.clear();
        self.offsets.clear();
        self.bound = None;

        if let Some(glyphs) = geometry.glyphs() {
            let schedule = StaggerSchedule::new(
                glyphs.len(),
                config.duration,
                config.decay,
                config.glyph_span,
            );

            self.tracks.extend(schedule.delays().iter().map(|&delay| {
                Tween::new(0.0, -config.hop_height, schedule.glyph_duration())
                    .starting_at(now.saturating_add(delay))
                    .with_easing(config.easing)
            }));
            self.offsets.resize(self.tracks.len(), 0.0);
            self.bound = Some(Arc::clone(geometry));
        }

        log::debug!(
            "Triggered highlight sweep over {:?} with {} glyph hops",
            self.config.duration,
            self.tracks.len()
        );

        true
    }

    /// Evaluates every animation at `now`, writing the sweep position into
    /// `params`. Hops scheduled for outlines other than `geometry` are
    /// dropped first.
    pub fn tick(&mut self, now: Duration, geometry: &Arc<GlyphGeometry>, params: &mut HighlightParams) {
        if let Some(bound) = &self.bound {
            if !Arc::ptr_eq(bound, geometry) {
                self.drop_glyph_tracks();
            }
        }

        if let Some(sweep) = &self.sweep {
            params.sweep_position = sweep.value(now);
        }

        for (offset, track) in self.offsets.iter_mut().zip(&self.tracks) {
            *offset = track.value(now);
        }
    }

    /// Forgets the per-glyph hops, e.g. because the outlines they move were
    /// replaced.
    pub fn drop_glyph_tracks(&mut self) {
        if !self.tracks.is_empty() {
            log::debug!("Dropping {} stale glyph hops", self.tracks.len());
        }
        self.tracks.clear();
        self.offsets.clear();
        self.bound = None;
    }

    /// Stops driving the sweep position. The last written value stays.
    pub fn release_sweep(&mut self) {
        self.sweep = None;
    }

    pub fn cancel(&mut self) {
        self.release_sweep();
        self.drop_glyph_tracks();
    }

    pub fn sweep(&self) -> Option<&Tween> {
        self.sweep.as_ref()
    }

    /// Current vertical offset of every outline, by outline index. Empty
    /// when no hops run.
    pub fn glyph_offsets(&self) -> &[f32] {
        &self.offsets
    }

    /// `true` while any animation has not reached its end.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.sweep.is_some_and(|s| !s.is_finished(now))
            || self.tracks.iter().any(|t| !t.is_finished(now))
    }
}
