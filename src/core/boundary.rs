//! Wall reflection for the rectangular domain `[0, width] x [0, height]`.

use crate::error::Result;
use crate::types::{Axis, Particle};

#[derive(Clone, Copy, Debug)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn limit(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Reflects `particle` off every wall it crossed.
    pub fn reflect(&self, particle: &mut Particle) {
        for axis in Axis::ALL {
            reflect_axis(particle, axis, self.limit(axis));
        }
    }
}

/// Mirrors the position back inside `[0, bound]` on `axis` and inverts the velocity
/// component when the particle has left that interval.
pub fn reflect_axis(particle: &mut Particle, axis: Axis, bound: f64) {
    let pos = particle.position.get(axis);
    let mirrored = if pos < 0.0 {
        -pos
    } else if pos > bound {
        2.0 * bound - pos
    } else {
        return;
    };
    // a crossing deeper than the domain itself lands on the wall
    *particle.position.get_mut(axis) = mirrored.clamp(0.0, bound);
    let vel = particle.velocity.get_mut(axis);
    *vel = -*vel;
}

/// Index-based entry point; anything other than 0 (x) or 1 (y) is a caller bug.
pub fn reflect_axis_index(particle: &mut Particle, axis: usize, bound: f64) -> Result<()> {
    let axis = Axis::try_from(axis)?;
    reflect_axis(particle, axis, bound);
    Ok(())
}
