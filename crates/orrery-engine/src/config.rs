//! Scene parameters and live-tunable panel values.
//!
//! `SceneConfig::default()` reproduces the museum scene: eight planets, the
//! Earth's moon, two asteroid belts, the corridor door and two video panels.
//! Rates are stored per simulated second; the scene was tuned in per-frame
//! units, converted here through [`REFERENCE_FPS`].

use glam::Vec3;
use log::error;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::extensions::easing::Easing;

/// Frame rate the per-frame scene constants were tuned at.
pub const REFERENCE_FPS: f32 = 60.0;

/// Convert a per-frame increment into a per-second rate.
#[inline]
pub fn per_frame(value: f32) -> f32 {
    value * REFERENCE_FPS
}

/// Name of the door leaf mesh.
pub const DOOR_MESH: &str = "doorMesh";
/// Name of the door pivot node.
pub const DOOR_PIVOT: &str = "doorPivot";

// ── Body parameters ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoonConfig {
    pub orbit_radius: f32,
    pub body_radius: f32,
    /// Radians per second.
    pub speed: f32,
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self {
            orbit_radius: 1.2,
            body_radius: 0.15,
            speed: per_frame(0.05),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    pub name: String,
    pub radius: f32,
    /// Semi-major axis; the minor axis follows from `SceneConfig::minor_axis_ratio`.
    pub distance: f32,
    /// Radians of orbital phase per second.
    pub revolution_speed: f32,
    /// Radians of self-rotation per second.
    pub rotation_speed: f32,
    /// Axial tilt in degrees.
    pub tilt_deg: f32,
    pub ring: bool,
    pub moon: Option<MoonConfig>,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            radius: 0.5,
            distance: 5.0,
            revolution_speed: per_frame(0.01),
            rotation_speed: per_frame(0.03),
            tilt_deg: 0.0,
            ring: false,
            moon: None,
        }
    }
}

fn planet(name: &str, radius: f32, distance: f32, revolution: f32, rotation: f32, tilt_deg: f32) -> PlanetConfig {
    PlanetConfig {
        name: name.to_string(),
        radius,
        distance,
        revolution_speed: per_frame(revolution),
        rotation_speed: per_frame(rotation),
        tilt_deg,
        ring: false,
        moon: None,
    }
}

/// Parameters for one torus-shaped group of asteroids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeltConfig {
    pub name: String,
    pub count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Total spread along the belt's local Y.
    pub thickness: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Fixed Euler orientation of the belt group (radians).
    pub tilt: Vec3,
    /// Radians per second the whole group turns about its own Y axis.
    pub spin_rate: f32,
    /// Largest per-axis tumble rate of a single asteroid (radians per second).
    pub max_tumble: f32,
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            count: 700,
            inner_radius: 7.0,
            outer_radius: 8.0,
            thickness: 1.0,
            min_size: 0.07,
            max_size: 0.15,
            tilt: Vec3::ZERO,
            spin_rate: per_frame(0.001),
            max_tumble: per_frame(0.01),
        }
    }
}

// ── Room parameters ──────────────────────────────────────────────────

/// A named camera pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Viewpoint {
    pub const fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Hinge position in world space.
    pub pivot: Vec3,
    /// Full extents of the door leaf box.
    pub leaf_size: Vec3,
    /// Leaf centre relative to the hinge.
    pub leaf_offset: Vec3,
    /// Fraction of the full swing covered per second.
    pub open_rate: f32,
    /// Swing angle at fraction 1 (radians, about Y).
    pub max_angle: f32,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            pivot: Vec3::new(-3.0, 4.0, -25.0),
            leaf_size: Vec3::new(6.0, 8.0, 0.1),
            leaf_offset: Vec3::new(3.0, 0.0, 0.0),
            open_rate: per_frame(0.02),
            max_angle: std::f32::consts::FRAC_PI_2,
        }
    }
}

/// A video panel on the corridor wall, facing +Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub name: String,
    pub center: Vec3,
    pub width: f32,
    pub height: f32,
    /// Asset name of the video shown on this panel.
    pub video: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            center: Vec3::ZERO,
            width: 8.0,
            height: 4.5,
            video: String::new(),
        }
    }
}

/// Durations and distances of the camera fly-throughs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub planetarium_ms: f32,
    pub corridor_ms: f32,
    pub planet_ms: f32,
    pub media_ms: f32,
    /// Wait between arriving at a panel and starting its video.
    pub media_play_delay_ms: f32,
    /// How far in front of a planet the camera stops.
    pub planet_standoff: f32,
    /// How much closer the camera moves toward a panel.
    pub media_approach: f32,
    /// Closest the camera gets to a panel.
    pub media_min_distance: f32,
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            planetarium_ms: 2000.0,
            corridor_ms: 1500.0,
            planet_ms: 1500.0,
            media_ms: 1500.0,
            media_play_delay_ms: 500.0,
            planet_standoff: 3.0,
            media_approach: 5.0,
            media_min_distance: 1.0,
            easing: Easing::Linear,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { fov_deg: 60.0, near: 0.1, far: 2000.0 }
    }
}

/// Flight model of the toggle-able ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub spawn: Vec3,
    /// Half extents of the ship's bounding box.
    pub half_extents: Vec3,
    /// Forward/back acceleration (units/s²).
    pub thrust: f32,
    /// Up/down acceleration (units/s²).
    pub lift: f32,
    /// Yaw rate (radians/s).
    pub turn_rate: f32,
    /// Downward acceleration (units/s²).
    pub gravity: f32,
    /// Fraction of velocity kept after one second.
    pub damping: f32,
    /// Camera offset in the ship's frame (behind and above).
    pub follow_offset: Vec3,
    /// Follow smoothing, 0 = snap, towards 1 = lazy.
    pub follow_smoothing: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::new(0.0, 12.0, -32.0),
            half_extents: Vec3::new(0.3, 0.15, 0.5),
            thrust: 12.0,
            lift: 8.0,
            turn_rate: 1.5,
            gravity: 2.0,
            damping: 0.2,
            follow_offset: Vec3::new(0.0, 1.5, 5.0),
            follow_smoothing: 0.85,
        }
    }
}

// ── Scene ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Ratio b/a shared by every planetary orbit.
    pub minor_axis_ratio: f32,
    pub planets: Vec<PlanetConfig>,
    pub belts: Vec<BeltConfig>,
    /// World position of the solar-system root.
    pub system_origin: Vec3,
    /// Euler orientation of the solar-system root (radians).
    pub system_tilt: Vec3,
    pub sun_radius: f32,
    pub corridor: Viewpoint,
    pub planetarium: Viewpoint,
    pub door: DoorConfig,
    pub panels: Vec<PanelConfig>,
    pub transitions: TransitionConfig,
    pub camera: CameraConfig,
    pub ship: ShipConfig,
    /// Lifetime of a collision explosion.
    pub explosion_ms: f32,
    /// Music track started on entering the planetarium.
    pub music: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mut terra = planet("Terra", 0.5, 6.0, 0.01, 0.03, 23.5);
        terra.moon = Some(MoonConfig::default());
        let mut saturno = planet("Saturno", 0.8, 12.0, 0.004, 0.05, 26.7);
        saturno.ring = true;

        Self {
            minor_axis_ratio: 0.8,
            planets: vec![
                planet("Mercurio", 0.4, 3.0, 0.02, 0.01, 3.0),
                planet("Venere", 0.5, 4.5, 0.015, 0.009, 177.0),
                terra,
                planet("Marte", 0.4, 7.5, 0.008, 0.03, 25.0),
                planet("Giove", 0.9, 10.0, 0.005, 0.05, 3.0),
                saturno,
                planet("Urano", 0.7, 14.0, 0.003, 0.03, 97.8),
                planet("Nettuno", 0.6, 16.0, 0.002, 0.03, 28.0),
            ],
            belts: vec![
                BeltConfig {
                    name: "main".into(),
                    count: 600,
                    inner_radius: 7.5,
                    outer_radius: 8.3,
                    thickness: 1.5,
                    ..BeltConfig::default()
                },
                BeltConfig {
                    name: "perpendicular".into(),
                    count: 500,
                    inner_radius: 7.0,
                    outer_radius: 8.0,
                    thickness: 1.5,
                    tilt: Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0),
                    ..BeltConfig::default()
                },
            ],
            system_origin: Vec3::new(-3.0, 19.0, -45.0),
            system_tilt: Vec3::new(0.0, 0.0, 20f32.to_radians()),
            sun_radius: 1.5,
            corridor: Viewpoint::new(Vec3::new(0.0, 5.0, -5.0), Vec3::new(0.0, 5.0, -12.5)),
            planetarium: Viewpoint::new(Vec3::new(0.0, 7.0, -35.0), Vec3::new(0.0, 7.0, -40.0)),
            door: DoorConfig::default(),
            panels: vec![
                PanelConfig {
                    name: "apolloPanel".into(),
                    center: Vec3::new(-10.0, 4.0, -24.9),
                    video: "apollo".into(),
                    ..PanelConfig::default()
                },
                PanelConfig {
                    name: "sputnikPanel".into(),
                    center: Vec3::new(10.0, 4.0, -24.9),
                    video: "sputnik".into(),
                    ..PanelConfig::default()
                },
            ],
            transitions: TransitionConfig::default(),
            camera: CameraConfig::default(),
            ship: ShipConfig::default(),
            explosion_ms: 1000.0,
            music: "planetarium".into(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a scene from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameters the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = self.check();
        if let Err(e) = &result {
            error!("invalid scene config: {e}");
        }
        result
    }

    fn check(&self) -> Result<(), ConfigError> {
        if !(self.minor_axis_ratio > 0.0 && self.minor_axis_ratio <= 1.0) {
            return Err(ConfigError::InvalidAxisRatio(self.minor_axis_ratio));
        }

        let mut names: Vec<&str> = Vec::with_capacity(self.planets.len() + self.panels.len());
        for p in &self.planets {
            if !(p.distance > 0.0) {
                return Err(ConfigError::NonPositiveAxis { name: p.name.clone(), value: p.distance });
            }
            if !(p.radius > 0.0) {
                return Err(ConfigError::NonPositiveRadius { name: p.name.clone(), value: p.radius });
            }
            if let Some(moon) = &p.moon {
                if !(moon.orbit_radius > 0.0) {
                    return Err(ConfigError::InvalidMoonOrbit { name: p.name.clone(), value: moon.orbit_radius });
                }
                if !(moon.body_radius > 0.0) {
                    return Err(ConfigError::NonPositiveRadius {
                        name: format!("{} moon", p.name),
                        value: moon.body_radius,
                    });
                }
            }
            names.push(&p.name);
        }
        for panel in &self.panels {
            names.push(&panel.name);
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(ConfigError::DuplicateName((*name).to_string()));
            }
        }

        if !(self.sun_radius > 0.0) {
            return Err(ConfigError::NonPositiveRadius { name: "sun".into(), value: self.sun_radius });
        }

        for belt in &self.belts {
            if !(belt.inner_radius > 0.0 && belt.inner_radius < belt.outer_radius) {
                return Err(ConfigError::InvalidBeltRadii {
                    name: belt.name.clone(),
                    inner: belt.inner_radius,
                    outer: belt.outer_radius,
                });
            }
            if !(belt.min_size > 0.0 && belt.min_size <= belt.max_size) {
                return Err(ConfigError::InvalidAsteroidSize {
                    name: belt.name.clone(),
                    min: belt.min_size,
                    max: belt.max_size,
                });
            }
        }

        let t = &self.transitions;
        let durations = [
            ("planetarium", t.planetarium_ms),
            ("corridor", t.corridor_ms),
            ("planet", t.planet_ms),
            ("media", t.media_ms),
            ("explosion", self.explosion_ms),
        ];
        for (name, value) in durations {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveDuration { name, value });
            }
        }
        Ok(())
    }
}

// ── Panel parameters ─────────────────────────────────────────────────

/// Lowest simulation-speed multiplier the panel allows.
pub const MIN_SIMULATION_SPEED: f32 = 0.1;
/// Highest simulation-speed multiplier the panel allows.
pub const MAX_SIMULATION_SPEED: f32 = 5.0;

/// Values owned by the host debug panel. The kernel reads
/// `simulation_speed` and `show_orbits` every frame; the rest are
/// forwarded to the renderer through the render header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugParams {
    pub simulation_speed: f32,
    pub show_orbits: bool,
    pub music_volume: f32,
    pub bloom_strength: f32,
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub planet_light_intensity: f32,
    /// Radians per second of sun self-rotation.
    pub sun_rotation_speed: f32,
}

impl Default for DebugParams {
    fn default() -> Self {
        Self {
            simulation_speed: 1.0,
            show_orbits: true,
            music_volume: 0.5,
            bloom_strength: 0.5,
            ambient_intensity: 0.2,
            directional_intensity: 1.0,
            planet_light_intensity: 1.2,
            sun_rotation_speed: per_frame(0.002),
        }
    }
}

impl DebugParams {
    pub fn set_simulation_speed(&mut self, speed: f32) {
        if speed.is_finite() {
            self.simulation_speed = speed.clamp(MIN_SIMULATION_SPEED, MAX_SIMULATION_SPEED);
        }
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        if volume.is_finite() {
            self.music_volume = volume.clamp(0.0, 1.0);
        }
    }

    pub fn set_bloom_strength(&mut self, strength: f32) {
        if strength.is_finite() {
            self.bloom_strength = strength.clamp(0.0, 3.0);
        }
    }

    pub fn set_ambient_intensity(&mut self, intensity: f32) {
        if intensity.is_finite() {
            self.ambient_intensity = intensity.clamp(0.0, 2.0);
        }
    }

    pub fn set_directional_intensity(&mut self, intensity: f32) {
        if intensity.is_finite() {
            self.directional_intensity = intensity.clamp(0.0, 2.0);
        }
    }

    pub fn set_planet_light_intensity(&mut self, intensity: f32) {
        if intensity.is_finite() {
            self.planet_light_intensity = intensity.clamp(0.0, 5.0);
        }
    }

    /// Serialize for the host panel.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
