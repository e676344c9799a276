//! Ripple physics
//!
//! Pure functions only. Lifetimes are integer milliseconds, velocities are px/ms.

use glam::Vec2;

use crate::consts::*;

/// Lifetime of a ripple given how long it was pressed and how fast it was dragged.
///
/// Longer presses (up to [`MAX_PRESS_BONUS_MS`]) and faster drags make the wave linger.
/// Magnitudes are expected to come from [`velocity_magnitude`]; negative values add nothing.
pub fn ripple_lifetime(press_duration_ms: u64, velocity_magnitude: f32) -> u64 {
    let clamped_press = press_duration_ms.min(MAX_PRESS_BONUS_MS);
    let press_bonus = (clamped_press as f32 * PRESS_BONUS_FACTOR) as u64;
    // NaN saturates to 0 in the cast
    let velocity_bonus = (velocity_magnitude.max(0.0) * VELOCITY_BONUS_SCALE) as u64;
    RIPPLE_BASE_DURATION + press_bonus + velocity_bonus
}

/// Velocity per millisecond for a pointer delta.
///
/// Returns zero when `elapsed_ms <= 0` instead of dividing by zero.
pub fn velocity(delta: Vec2, elapsed_ms: i64) -> Vec2 {
    if elapsed_ms <= 0 {
        return Vec2::ZERO;
    }
    let v = delta / elapsed_ms as f32;
    if v.is_finite() { v } else { Vec2::ZERO }
}

/// Euclidean norm clamped to `[0, MAX_VELOCITY_MAGNITUDE]`.
pub fn velocity_magnitude(velocity: Vec2) -> f32 {
    let magnitude = velocity.length();
    if magnitude.is_nan() {
        return 0.0;
    }
    magnitude.clamp(0.0, MAX_VELOCITY_MAGNITUDE)
}

/// Fade curve for trail particles: `(1 - progress)^1.5`
pub fn trail_alpha(progress: f32) -> f32 {
    (1.0 - clamp_unit(progress)).powf(TRAIL_ALPHA_EXPONENT)
}

/// Clamp to `[0, 1]`, mapping NaN to 0
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_longer_press_increases_lifetime() {
        let short = ripple_lifetime(50, 0.0);
        let long = ripple_lifetime(1200, 0.0);
        assert!(long > short);
        assert_eq!(ripple_lifetime(0, 0.0), RIPPLE_BASE_DURATION);
        assert_eq!(ripple_lifetime(500, 0.0), 1900);
    }

    #[test]
    fn test_press_bonus_saturates() {
        assert_eq!(ripple_lifetime(1200, 0.0), ripple_lifetime(5000, 0.0));
        assert_eq!(ripple_lifetime(1200, 0.0), 1600 + 720);
    }

    #[test]
    fn test_velocity_bonus_unit() {
        let base = ripple_lifetime(0, 0.0);
        let moderate = ripple_lifetime(0, 1.0);
        assert_eq!(moderate - base, 420);
    }

    #[test]
    fn test_velocity_bonus_clamped_through_magnitude() {
        let base = ripple_lifetime(0, 0.0);
        let excessive = ripple_lifetime(0, velocity_magnitude(Vec2::new(10.0, 0.0)));
        assert!(excessive - base <= (VELOCITY_BONUS_SCALE * MAX_VELOCITY_MAGNITUDE) as u64);
    }

    #[test]
    fn test_velocity_guards_divide_by_zero() {
        assert_eq!(velocity(Vec2::new(10.0, 10.0), 0), Vec2::ZERO);
        assert_eq!(velocity(Vec2::new(10.0, 10.0), -5), Vec2::ZERO);
        assert_eq!(velocity(Vec2::new(10.0, -20.0), 10), Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_velocity_non_finite_delta() {
        assert_eq!(velocity(Vec2::new(f32::NAN, 1.0), 4), Vec2::ZERO);
    }

    #[test]
    fn test_velocity_magnitude_edges() {
        assert_eq!(velocity_magnitude(Vec2::ZERO), 0.0);
        assert!((velocity_magnitude(Vec2::new(0.3, 0.4)) - 0.5).abs() < 1e-6);
        assert_eq!(velocity_magnitude(Vec2::new(f32::MAX, f32::MAX)), MAX_VELOCITY_MAGNITUDE);
        assert_eq!(velocity_magnitude(Vec2::new(f32::NAN, 0.0)), 0.0);
        assert_eq!(velocity_magnitude(Vec2::new(f32::INFINITY, 0.0)), MAX_VELOCITY_MAGNITUDE);
    }

    #[test]
    fn test_trail_alpha_endpoints() {
        assert_eq!(trail_alpha(0.0), 1.0);
        assert_eq!(trail_alpha(1.0), 0.0);
        assert_eq!(trail_alpha(-3.0), 1.0);
        assert_eq!(trail_alpha(7.0), 0.0);
        assert_eq!(trail_alpha(f32::NAN), 1.0);
    }

    proptest! {
        #[test]
        fn lifetime_monotonic_in_press(a in 0u64..10_000, b in 0u64..10_000, v in 0.0f32..2.2) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ripple_lifetime(hi, v) >= ripple_lifetime(lo, v));
        }

        #[test]
        fn magnitude_always_in_range(x in proptest::num::f32::ANY, y in proptest::num::f32::ANY) {
            let m = velocity_magnitude(Vec2::new(x, y));
            prop_assert!((0.0..=MAX_VELOCITY_MAGNITUDE).contains(&m));
        }

        #[test]
        fn trail_alpha_non_increasing(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(trail_alpha(hi) <= trail_alpha(lo));
            prop_assert!((0.0..=1.0).contains(&trail_alpha(a)));
        }

        #[test]
        fn velocity_zero_elapsed_is_zero(x in -1e6f32..1e6, y in -1e6f32..1e6) {
            prop_assert_eq!(velocity(Vec2::new(x, y), 0), Vec2::ZERO);
        }
    }
}
