/// Maps linear progress in `0..=1` to eased progress.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum Easing {
    Linear,
    CubicIn,
    CubicOut,
    /// `4t³` for the first half, `1 - (2 - 2t)³ / 2` for the second.
    #[default]
    CubicInOut,
}

impl Easing {
    /// Progress outside `0..=1` is clamped, NaN counts as not started.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Easing::Linear => t,
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [Easing::Linear, Easing::CubicIn, Easing::CubicOut, Easing::CubicInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-2.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
            assert_eq!(easing.apply(f32::NAN), 0.0);
        }
    }

    #[test]
    fn test_cubic_in_out() {
        let f = |t| Easing::CubicInOut.apply(t);
        assert_eq!(f(0.5), 0.5);
        assert_eq!(f(0.25), 0.0625);
        assert_eq!(f(0.75), 0.9375);

        let mut prev = 0.0;
        for i in 0..=100 {
            let v = f(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }
}
