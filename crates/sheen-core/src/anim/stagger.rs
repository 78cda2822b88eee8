use std::time::Duration;

/// Start delays of the per-glyph hops of one trigger.
///
/// With `N` glyphs and total duration `D`, every glyph gets `U = D / N`
/// scaled by the glyph span. Delays start at zero and grow by
/// `U - (p - 1) * U / (N - 1)` per glyph, or by `U` when `N <= 1`. A step
/// that would go negative is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StaggerSchedule {
    glyph_duration: Duration,
    step: Duration,
    delays: Vec<Duration>,
}

impl StaggerSchedule {
    pub fn new(count: usize, total: Duration, decay: f32, glyph_span: f32) -> StaggerSchedule {
        if count == 0 {
            return StaggerSchedule {
                glyph_duration: Duration::ZERO,
                step: Duration::ZERO,
                delays: Vec::new(),
            };
        }

        let n = count as f64;
        let unit = total.as_secs_f64() / n;
        let step = if count <= 1 {
            unit
        } else {
            unit - (decay as f64 - 1.0) * unit / (n - 1.0)
        };

        let step = secs(step);
        let glyph_duration = secs(unit * glyph_span as f64);

        let mut delays = Vec::with_capacity(count);
        let mut delay = Duration::ZERO;
        for _ in 0..count {
            delays.push(delay);
            delay = delay.saturating_add(step);
        }

        StaggerSchedule {
            glyph_duration,
            step,
            delays,
        }
    }

    pub fn glyph_duration(&self) -> Duration {
        self.glyph_duration
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }
}

/// Seconds to a duration, with negative, NaN and overflowing values at zero.
fn secs(v: f64) -> Duration {
    Duration::try_from_secs_f64(v).unwrap_or(Duration::ZERO)
}
