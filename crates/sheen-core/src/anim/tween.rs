use std::time::Duration;

use crate::anim::Easing;

/// An eased transition between two values on the frame clock. Holds `from`
/// before it starts and `to` once it is over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: Duration) -> Tween {
        Tween {
            from,
            to,
            start: Duration::ZERO,
            duration,
            easing: Easing::default(),
        }
    }

    pub fn starting_at(mut self, start: Duration) -> Tween {
        self.start = start;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Tween {
        self.easing = easing;
        self
    }

    pub fn end(&self) -> Duration {
        self.start.saturating_add(self.duration)
    }

    /// Linear progress at `now`, in `0..=1`.
    pub fn progress(&self, now: Duration) -> f32 {
        if now < self.start {
            return 0.0;
        }
        if now >= self.end() {
            return 1.0;
        }

        let elapsed = now - self.start;
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32
    }

    pub fn value(&self, now: Duration) -> f32 {
        let t = self.easing.apply(self.progress(now));
        self.from * (1.0 - t) + self.to * t
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_midpoint_of_eased_sweep() {
        let tween = Tween::new(0.0, 1.0, ms(1000));
        assert_eq!(tween.value(ms(0)), 0.0);
        assert_eq!(tween.value(ms(500)), 0.5);
        assert_eq!(tween.value(ms(1000)), 1.0);

        let linear = tween.with_easing(Easing::Linear);
        assert_eq!(linear.value(ms(250)), 0.25);
    }

    #[test]
    fn test_holds_before_and_after() {
        let tween = Tween::new(0.0, -10.0, ms(200)).starting_at(ms(100));
        assert_eq!(tween.value(ms(50)), 0.0);
        assert!(!tween.is_finished(ms(299)));
        assert_eq!(tween.value(ms(5000)), -10.0);
        assert!(tween.is_finished(ms(300)));
    }

    #[test]
    fn test_zero_duration_jumps_to_end() {
        let tween = Tween::new(2.0, 4.0, Duration::ZERO).starting_at(ms(10));
        assert_eq!(tween.value(ms(9)), 2.0);
        assert_eq!(tween.value(ms(10)), 4.0);
    }
}
