//! The corridor door: a hinged leaf that swings open once per visit.

use glam::{Mat4, Vec3};

use crate::config::DoorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoorState {
    #[default]
    Closed,
    Opening,
    /// Stays open until the visitor returns to the corridor.
    Open,
}

#[derive(Debug, Clone)]
pub struct Door {
    state: DoorState,
    /// Swing progress, always in `[0, 1]`.
    fraction: f32,
    pivot: Vec3,
    leaf_size: Vec3,
    leaf_offset: Vec3,
    open_rate: f32,
    max_angle: f32,
}

impl Door {
    pub fn new(config: &DoorConfig) -> Self {
        Self {
            state: DoorState::Closed,
            fraction: 0.0,
            pivot: config.pivot,
            leaf_size: config.leaf_size,
            leaf_offset: config.leaf_offset,
            open_rate: config.open_rate,
            max_angle: config.max_angle,
        }
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Current swing angle about the hinge's Y axis.
    pub fn angle(&self) -> f32 {
        self.fraction * self.max_angle
    }

    pub fn is_opening(&self) -> bool {
        self.state == DoorState::Opening
    }

    /// Start opening. Ignored unless the door is fully closed.
    /// Returns whether the call had an effect.
    pub fn open(&mut self) -> bool {
        if self.state != DoorState::Closed {
            return false;
        }
        self.state = DoorState::Opening;
        true
    }

    /// Advance the swing. Returns `true` exactly once, on the step the door
    /// finishes opening.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.state != DoorState::Opening {
            return false;
        }
        self.fraction = (self.fraction + self.open_rate * dt).clamp(0.0, 1.0);
        if self.fraction >= 1.0 {
            self.state = DoorState::Open;
            return true;
        }
        false
    }

    /// Snap shut without animating, discarding any swing in progress.
    pub fn reset(&mut self) {
        self.state = DoorState::Closed;
        self.fraction = 0.0;
    }

    /// World transform of the leaf box centre.
    pub fn leaf_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.pivot)
            * Mat4::from_rotation_y(self.angle())
            * Mat4::from_translation(self.leaf_offset)
    }

    /// World-space axis-aligned bounds of the (possibly rotated) leaf.
    pub fn leaf_bounds(&self) -> (Vec3, Vec3) {
        let m = self.leaf_matrix();
        let h = self.leaf_size * 0.5;
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { -h.x } else { h.x },
                if i & 2 == 0 { -h.y } else { h.y },
                if i & 4 == 0 { -h.z } else { h.z },
            );
            let p = m.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door() -> Door {
        Door::new(&DoorConfig::default())
    }

    #[test]
    fn opens_over_time_and_reports_once() {
        let mut d = door();
        assert!(d.open());
        let mut finished = 0;
        for _ in 0..200 {
            if d.tick(1.0 / 60.0) {
                finished += 1;
            }
        }
        assert_eq!(finished, 1);
        assert_eq!(d.state(), DoorState::Open);
        assert_eq!(d.fraction(), 1.0);
        assert!((d.angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn repeated_open_does_not_speed_up() {
        let mut once = door();
        let mut spammed = door();
        once.open();
        spammed.open();
        for _ in 0..20 {
            spammed.open();
            spammed.open();
            once.tick(1.0 / 60.0);
            spammed.tick(1.0 / 60.0);
            assert_eq!(once.fraction(), spammed.fraction());
        }
    }

    #[test]
    fn fraction_is_clamped() {
        let mut d = door();
        d.open();
        assert!(d.tick(10.0));
        assert_eq!(d.fraction(), 1.0);
        assert!(!d.tick(10.0));
        assert_eq!(d.fraction(), 1.0);
    }

    #[test]
    fn closed_door_does_not_move() {
        let mut d = door();
        assert!(!d.tick(1.0));
        assert_eq!(d.fraction(), 0.0);
    }

    #[test]
    fn open_door_ignores_open() {
        let mut d = door();
        d.open();
        d.tick(10.0);
        assert!(!d.open());
        assert_eq!(d.state(), DoorState::Open);
    }

    #[test]
    fn reset_snaps_shut_mid_swing() {
        let mut d = door();
        d.open();
        d.tick(0.2);
        assert!(d.fraction() > 0.0);
        d.reset();
        assert_eq!(d.state(), DoorState::Closed);
        assert_eq!(d.fraction(), 0.0);
        assert!(d.open());
    }

    #[test]
    fn closed_leaf_spans_the_doorway() {
        let (min, max) = door().leaf_bounds();
        assert!((min - Vec3::new(-3.0, 0.0, -25.05)).length() < 1e-4, "{min}");
        assert!((max - Vec3::new(3.0, 8.0, -24.95)).length() < 1e-4, "{max}");
    }

    #[test]
    fn open_leaf_swings_into_the_planetarium() {
        let mut d = door();
        d.open();
        d.tick(10.0);
        let (min, max) = d.leaf_bounds();
        // A quarter turn about Y carries the leaf's +X extent to −Z.
        assert!(max.x - min.x < 0.2);
        assert!((min.z - -31.0).abs() < 1e-3, "{min}");
    }
}
