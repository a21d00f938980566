//! Click routing: pointer ray → nearest interactive target.
//!
//! Targets are classified once, when the router is built. Hit volumes are
//! re-derived on every click from the current world state, since planets
//! move and the door swings.

use glam::Vec3;
use log::debug;

use crate::components::door::Door;
use crate::components::target::{HitVolume, InteractiveTarget, TargetKind};
use crate::config::{PanelConfig, DOOR_MESH};
use crate::core::scene::BodyRegistry;
use crate::renderer::camera::Ray;

/// Half depth of a video panel's hit box.
const PANEL_HALF_DEPTH: f32 = 0.05;

/// A resolved click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub kind: TargetKind,
    /// Distance along the ray.
    pub distance: f32,
}

/// The fixed candidate list: door, video panels, then every planet.
#[derive(Debug, Clone)]
pub struct Router {
    targets: Vec<InteractiveTarget>,
    /// (center, half extents) of each panel, indexed like the panels.
    panels: Vec<(Vec3, Vec3)>,
}

impl Router {
    pub fn new(panels: &[PanelConfig], registry: &BodyRegistry) -> Self {
        let panel_names: Vec<&str> = panels.iter().map(|p| p.name.as_str()).collect();
        let mut targets = Vec::with_capacity(1 + panels.len() + registry.len());
        targets.push(InteractiveTarget::new(DOOR_MESH, TargetKind::from_name(DOOR_MESH, &panel_names, 0)));
        for p in panels {
            targets.push(InteractiveTarget::new(p.name.clone(), TargetKind::from_name(&p.name, &panel_names, 0)));
        }
        for (i, body) in registry.planets().iter().enumerate() {
            targets.push(InteractiveTarget::new(body.name.clone(), TargetKind::from_name(&body.name, &panel_names, i)));
        }
        let panels = panels
            .iter()
            .map(|p| (p.center, Vec3::new(p.width * 0.5, p.height * 0.5, PANEL_HALF_DEPTH)))
            .collect();
        Self { targets, panels }
    }

    pub fn targets(&self) -> &[InteractiveTarget] {
        &self.targets
    }

    /// Target name for a resolved kind.
    pub fn name_of(&self, kind: TargetKind) -> Option<&str> {
        self.targets.iter().find(|t| t.kind == kind).map(|t| t.name.as_str())
    }

    /// World-space hit volume of one target right now. Hidden planets have
    /// none.
    fn volume(&self, kind: TargetKind, registry: &BodyRegistry, door: &Door) -> Option<HitVolume> {
        match kind {
            TargetKind::Door => {
                let (min, max) = door.leaf_bounds();
                Some(HitVolume::Aabb { min, max })
            }
            TargetKind::VideoPanel(i) => {
                let &(center, half) = self.panels.get(i)?;
                Some(HitVolume::Aabb { min: center - half, max: center + half })
            }
            TargetKind::Planet(i) => {
                let body = registry.planets().get(i)?;
                if !body.visible {
                    return None;
                }
                let center = registry.planet_world_position(i)?;
                Some(HitVolume::Sphere { center, radius: body.radius })
            }
        }
    }

    /// Nearest target along the ray, if any.
    pub fn resolve(&self, ray: &Ray, registry: &BodyRegistry, door: &Door) -> Option<Hit> {
        let hit = self
            .targets
            .iter()
            .filter_map(|t| {
                let distance = self.volume(t.kind, registry, door)?.intersect(ray)?;
                Some(Hit { kind: t.kind, distance })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance));
        match &hit {
            Some(h) => debug!("click hit {:?} at {:.2}", h.kind, h.distance),
            None => debug!("click hit nothing"),
        }
        hit
    }
}
