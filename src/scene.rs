//! Initial particle layouts.

use rand::Rng;

use crate::{
    config,
    core::World,
    error::Result,
    types::{Color, ParticleId, Position, Vec2, Velocity},
};

pub const PLANET_MASS: f64 = 1000.0;
pub const PLANET_RADIUS: f64 = 15.0;
pub const MOON_MASS: f64 = 10.0;
pub const MOON_RADIUS: f64 = 8.0;
pub const MOON_DISTANCE: f64 = 100.0;
pub const MOON_SPEED: f64 = 6.0;
pub const SCATTER_MAX_SPEED: i32 = 6;

/// A blue planet at rest with four moons on tangential courses around it.
pub fn moons(world: &mut World, center: Position) -> Result<Vec<ParticleId>> {
    let moons = [
        (Vec2::new(MOON_DISTANCE, 0.0), Vec2::new(0.0, MOON_SPEED), Color::rgb(220, 220, 220)),
        (Vec2::new(0.0, MOON_DISTANCE), Vec2::new(MOON_SPEED, 0.0), Color::rgb(255, 200, 0)),
        (Vec2::new(-MOON_DISTANCE, 0.0), Vec2::new(0.0, -MOON_SPEED), Color::rgb(255, 80, 80)),
        (Vec2::new(0.0, -MOON_DISTANCE), Vec2::new(-MOON_SPEED, 0.0), Color::rgb(80, 255, 80)),
    ];

    let mut ids = Vec::with_capacity(moons.len() + 1);
    ids.push(world.spawn_particle(
        PLANET_MASS,
        center,
        Vec2::ZERO,
        PLANET_RADIUS,
        Color::rgb(0, 100, 255),
    )?);
    for (offset, vel, color) in moons {
        ids.push(world.spawn_particle(MOON_MASS, center + offset, vel, MOON_RADIUS, color)?);
    }
    Ok(ids)
}

/// `count` identical bodies. Missing positions are drawn uniformly over the domain and
/// missing velocities get integer components in `[-6, 6]`.
pub fn scatter<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    count: usize,
    mass: f64,
    radius: f64,
    position: Option<Position>,
    velocity: Option<Velocity>,
) -> Result<Vec<ParticleId>> {
    let bounds = world.bounds();
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let pos = position.unwrap_or_else(|| {
            Vec2::new(
                rng.gen_range(0.0..=bounds.width),
                rng.gen_range(0.0..=bounds.height),
            )
        });
        let vel = velocity.unwrap_or_else(|| {
            Vec2::new(
                rng.gen_range(-SCATTER_MAX_SPEED..=SCATTER_MAX_SPEED) as f64,
                rng.gen_range(-SCATTER_MAX_SPEED..=SCATTER_MAX_SPEED) as f64,
            )
        });
        ids.push(world.spawn_particle(mass, pos, vel, radius, config::DEFAULT_PARTICLE_COLOR)?);
    }
    Ok(ids)
}
