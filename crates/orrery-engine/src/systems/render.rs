use log::debug;

use crate::api::game::EngineContext;
use crate::bridge::protocol::*;
use crate::core::scene::BodyRegistry;
use crate::renderer::instance::{AsteroidInstance, BodyInstance, ExplosionInstance, RenderBuffer};

/// Build the render buffer from the current simulation state.
/// Bodies go sun first, then each planet followed by its moon. Positions
/// are in world space; spin and tilt are relative to the system root.
pub fn build_render_buffer(ctx: &EngineContext, buffer: &mut RenderBuffer) {
    buffer.clear();
    let registry = &ctx.registry;

    let sun = registry.sun_world_position();
    buffer.push_body(BodyInstance {
        x: sun.x,
        y: sun.y,
        z: sun.z,
        spin: registry.sun_spin(),
        tilt: 0.0,
        radius: registry.sun_radius(),
        visible: 1.0,
        kind: BodyInstance::KIND_SUN,
    });

    for (i, body) in registry.planets().iter().enumerate() {
        let Some(p) = registry.planet_world_position(i) else {
            continue;
        };
        let visible = if body.visible { 1.0 } else { 0.0 };
        buffer.push_body(BodyInstance {
            x: p.x,
            y: p.y,
            z: p.z,
            spin: body.spin,
            tilt: body.tilt,
            radius: body.radius,
            visible,
            kind: if body.ring { BodyInstance::KIND_RINGED_PLANET } else { BodyInstance::KIND_PLANET },
        });
        if let (Some(moon), Some(m)) = (body.moon.as_ref(), registry.moon_world_position(i)) {
            buffer.push_body(BodyInstance {
                x: m.x,
                y: m.y,
                z: m.z,
                spin: 0.0,
                tilt: 0.0,
                radius: moon.body_radius,
                visible,
                kind: BodyInstance::KIND_MOON,
            });
        }
    }

    'belts: for (belt_index, belt) in registry.belts().iter().enumerate() {
        let Some(world) = registry.belt_world_matrix(belt_index) else {
            continue;
        };
        for asteroid in &belt.asteroids {
            let p = BodyRegistry::asteroid_world_position(&world, asteroid);
            let pushed = buffer.push_asteroid(AsteroidInstance {
                x: p.x,
                y: p.y,
                z: p.z,
                rx: asteroid.rotation.x,
                ry: asteroid.rotation.y,
                rz: asteroid.rotation.z,
                radius: asteroid.radius,
                belt: belt_index as f32,
            });
            if !pushed {
                debug!("asteroid section full");
                break 'belts;
            }
        }
    }

    for e in &ctx.effects.explosions {
        buffer.push_explosion(ExplosionInstance {
            x: e.position.x,
            y: e.position.y,
            z: e.position.z,
            size: e.size,
            scale: e.scale(),
            opacity: e.opacity(),
        });
    }
}

/// Refresh the per-frame header fields.
pub fn write_header(ctx: &EngineContext, buffer: &RenderBuffer, frame: u64, header: &mut FrameHeader) {
    let flag = |b: bool| if b { 1.0 } else { 0.0 };
    header.set(HEADER_FRAME_COUNTER, frame as f32);
    header.set(HEADER_BODY_COUNT, buffer.body_count() as f32);
    header.set(HEADER_ASTEROID_COUNT, buffer.asteroid_count() as f32);
    header.set(HEADER_EXPLOSION_COUNT, buffer.explosion_count() as f32);
    // The pruner may push past the event capacity; the host only reads up to it.
    header.set(HEADER_EVENT_COUNT, (ctx.events.len() as f32).min(header.get(HEADER_MAX_EVENTS)));
    header.set(HEADER_MEDIA_COUNT, (ctx.media.len() as f32).min(header.get(HEADER_MAX_MEDIA)));
    header.set(HEADER_BUSY, flag(ctx.is_busy()));
    header.set(HEADER_DOOR_ANGLE, ctx.door.angle());
    header.set(HEADER_SHOW_ORBITS, flag(ctx.params.show_orbits));
    header.set(HEADER_SHIP_MODE, flag(ctx.ship.active));
    header.set(HEADER_SHIP_X, ctx.ship.position.x);
    header.set(HEADER_SHIP_Y, ctx.ship.position.y);
    header.set(HEADER_SHIP_Z, ctx.ship.position.z);
    header.set(HEADER_SHIP_YAW, ctx.ship.yaw);
    header.set(HEADER_SUN_SPIN, ctx.registry.sun_spin());
    header.set(HEADER_MUSIC_VOLUME, ctx.params.music_volume);
    header.set(HEADER_BLOOM_STRENGTH, ctx.params.bloom_strength);
    header.set(HEADER_AMBIENT_INTENSITY, ctx.params.ambient_intensity);
    header.set(HEADER_DIRECTIONAL_INTENSITY, ctx.params.directional_intensity);
    header.set(HEADER_PLANET_LIGHT_INTENSITY, ctx.params.planet_light_intensity);
    header.set(HEADER_SIMULATION_SPEED, ctx.params.simulation_speed);
}
