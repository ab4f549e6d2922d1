//! Pairwise Newtonian attraction with a softened distance metric.

use crate::types::{Particle, Vec2};

#[derive(Clone, Copy, Debug)]
pub struct ForceModel {
    pub g: f64,
    pub softening: f64,
}

impl ForceModel {
    pub fn new(g: f64, softening: f64) -> Self {
        Self { g, softening }
    }

    /// sqrt(dx^2 + dy^2 + eps^2)
    pub fn distance(&self, a: &Particle, b: &Particle) -> f64 {
        let delta = a.position - b.position;
        (delta.length_sq() + self.softening * self.softening).sqrt()
    }

    /// Force magnitude G m1 m2 / d^2, or 0 when the softened distance is 0.
    pub fn gravitational_force(&self, a: &Particle, b: &Particle) -> f64 {
        let dist = self.distance(a, b);
        if dist == 0.0 {
            return 0.0;
        }
        self.g * a.mass * b.mass / (dist * dist)
    }

    /// Force exerted on `on` by `by`, pointing from `on` toward `by`.
    pub fn force_vector(&self, on: &Particle, by: &Particle) -> Vec2 {
        let dist = self.distance(on, by);
        if dist == 0.0 {
            return Vec2::ZERO;
        }
        let force = self.gravitational_force(on, by);
        (by.position - on.position) * (force / dist)
    }

    /// Net force on `particles[i]` from every other particle not accepted by `skip`.
    pub fn net_force<F>(&self, particles: &[Particle], i: usize, mut skip: F) -> Vec2
    where
        F: FnMut(&Particle, &Particle) -> bool,
    {
        let on = &particles[i];
        let mut total = Vec2::ZERO;
        for (j, by) in particles.iter().enumerate() {
            if i == j || skip(on, by) {
                continue;
            }
            total += self.force_vector(on, by);
        }
        total
    }

    /// Pairwise potential energy -G m1 m2 / d summed over unordered pairs.
    pub fn potential_energy(&self, particles: &[Particle]) -> f64 {
        let mut total = 0.0;
        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                let dist = self.distance(&particles[i], &particles[j]);
                if dist > 0.0 {
                    total -= self.g * particles[i].mass * particles[j].mass / dist;
                }
            }
        }
        total
    }
}
