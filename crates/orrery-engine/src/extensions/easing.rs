// extensions/easing.rs
//
// Easing curves for camera fly-throughs.
// Pure math on normalized time; no knowledge of cameras or bodies.

use std::f32::consts::PI;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Shape applied to the normalized progress of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Cubic Hermite smoothing, `t²(3 − 2t)`.
    Smoothstep,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    /// Stronger slow end.
    CubicOut,
    /// Stronger slow start and end.
    CubicInOut,
    /// Sine wave easing (smooth).
    SineInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t`.
    /// Input is clamped to [0, 1]; every curve maps 0 → 0 and 1 → 1 exactly.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Smoothstep => t * t * (3.0 - 2.0 * t),

            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            Easing::SineInOut => {
                if t >= 1.0 { 1.0 } else { -((PI * t).cos() - 1.0) / 2.0 }
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two points.
/// `t == 1.0` returns `b` exactly so completed transitions land bit-for-bit.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    if t >= 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

/// Interpolate points with easing.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 8] = [
        Easing::Linear,
        Easing::Smoothstep,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::SineInOut,
    ];

    #[test]
    fn endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at 0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at 1", easing);
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::Smoothstep.apply(7.0), 1.0);
    }

    #[test]
    fn smoothstep_is_symmetric() {
        assert!((Easing::Smoothstep.apply(0.5) - 0.5).abs() < 1e-6);
        let early = Easing::Smoothstep.apply(0.25);
        let late = Easing::Smoothstep.apply(0.75);
        assert!((early + late - 1.0).abs() < 1e-6);
        assert!(early < 0.25, "smoothstep should start slow, got {}", early);
    }

    #[test]
    fn lerp_vec3_lands_on_target() {
        let a = Vec3::new(0.1, 0.2, 0.3);
        let b = Vec3::new(-7.3, 11.9, 4.4);
        assert_eq!(lerp_vec3(a, b, 1.0), b);
        assert_eq!(lerp_vec3(a, b, 0.0), a);
    }

    #[test]
    fn parses_snake_case_names() {
        let easing: Easing = serde_json::from_str("\"smoothstep\"").unwrap();
        assert_eq!(easing, Easing::Smoothstep);
        let easing: Easing = serde_json::from_str("\"cubic_in_out\"").unwrap();
        assert_eq!(easing, Easing::CubicInOut);
    }

    #[test]
    fn lerp_midpoint() {
        assert!((lerp(100.0, 200.0, 0.5) - 150.0).abs() < 1e-4);
    }
}
