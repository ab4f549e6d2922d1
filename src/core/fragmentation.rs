//! Energy-threshold catastrophic disruption.
//!
//! A collision whose kinetic energy (in the center-of-mass frame) exceeds the
//! lighter body's strength `q_star * m` chips part of that body off into a
//! handful of short-lived fragments. Everything below the threshold is a plain
//! elastic bounce.

use std::f64::consts::TAU;

use log::debug;
use rand::Rng;

use crate::config::FragmentationConfig;
use crate::core::collision::resolve_elastic;
use crate::types::{Particle, ParticleId, Vec2};

/// Collision kinetic energy 1/2 mu |v1 - v2|^2 with reduced mass mu.
pub fn collision_energy(a: &Particle, b: &Particle) -> f64 {
    let total = a.mass + b.mass;
    if total <= 0.0 {
        return 0.0;
    }
    let mu = a.mass * b.mass / total;
    0.5 * mu * (a.velocity - b.velocity).length_sq()
}

#[derive(Clone, Debug)]
pub struct FragmentationModel {
    pub cfg: FragmentationConfig,
    pub trail_len: usize,
}

impl FragmentationModel {
    pub fn new(cfg: FragmentationConfig, trail_len: usize) -> Self {
        Self { cfg, trail_len }
    }

    /// Disruption threshold E* for a body of the given mass.
    pub fn threshold(&self, victim_mass: f64) -> f64 {
        self.cfg.q_star * victim_mass
    }

    /// Share of the victim's mass turned into fragments, capped at `max_breakup_fraction`.
    pub fn breakup_fraction(&self, ratio: f64) -> f64 {
        let r = self.cfg.c_n * (ratio - 1.0).max(0.0).powf(self.cfg.beta);
        r.min(self.cfg.max_breakup_fraction).max(0.0)
    }

    pub fn fragment_count(&self, ratio: f64) -> usize {
        let n_min = self.cfg.n_min as f64;
        let extra = (self.cfg.c_n * ratio.powf(self.cfg.alpha)).floor();
        (n_min + extra).max(n_min).min(self.cfg.max_fragments as f64) as usize
    }

    pub fn fragment_radius(&self, mass: f64) -> f64 {
        self.cfg.radius_for_mass(mass)
    }

    /// `n` masses drawn from a Pareto(shape) law, each shifted by `min_mass`, rescaled so
    /// they sum to `total`.
    pub fn pareto_masses<R: Rng + ?Sized>(&self, n: usize, total: f64, rng: &mut R) -> Vec<f64> {
        if n == 0 {
            return Vec::new();
        }
        let inv_shape = 1.0 / self.cfg.pareto_shape;
        let raw: Vec<f64> = (0..n)
            .map(|_| {
                // u in (0, 1]
                let u: f64 = 1.0 - rng.gen_range(0.0..1.0);
                self.cfg.min_mass + u.powf(-inv_shape)
            })
            .collect();
        let sum: f64 = raw.iter().sum();
        raw.into_iter().map(|m| m * total / sum).collect()
    }

    /// Resolves a contact between `a` and `b`, breaking the lighter body up when the
    /// collision energy strictly exceeds its threshold. Returns the spawned fragments;
    /// ids are drawn from `next_id`.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        a: &mut Particle,
        b: &mut Particle,
        rng: &mut R,
        next_id: &mut ParticleId,
    ) -> Vec<Particle> {
        let energy = collision_energy(a, b);
        // ties go to the first argument
        let (victim, impactor) = if a.mass <= b.mass { (a, b) } else { (b, a) };
        let threshold = self.threshold(victim.mass);

        if energy <= threshold {
            resolve_elastic(victim, impactor);
            return Vec::new();
        }

        let ratio = if threshold > 0.0 {
            energy / threshold
        } else {
            f64::INFINITY
        };
        let fraction = self.breakup_fraction(ratio);
        let original_mass = victim.mass;
        let frag_mass = fraction * original_mass;
        let surviving_mass = original_mass - frag_mass;
        let count = self.fragment_count(ratio);

        let origin = victim.position;
        let base_velocity = victim.velocity;

        let mut fragments = Vec::with_capacity(count);
        if frag_mass > 0.0 {
            for mass in self.pareto_masses(count, frag_mass, rng) {
                let dir = Vec2::from_angle(rng.gen_range(0.0..TAU));
                let speed = self.cfg.k_ej * (energy / mass).sqrt();
                let id = *next_id;
                *next_id += 1;
                let mut fragment = Particle::new(
                    id,
                    mass,
                    origin,
                    base_velocity + dir * speed,
                    self.fragment_radius(mass),
                    victim.color,
                    self.trail_len,
                );
                fragment.lifetime = Some(self.cfg.fragment_lifetime);
                fragments.push(fragment);
            }
        }

        victim.radius *= surviving_mass / original_mass;
        victim.mass = surviving_mass;
        if victim.radius < self.cfg.min_particle_radius {
            victim.lifetime = Some(0);
        }

        debug!(
            "disruption of #{} by #{}: E={:.3} E*={:.3} r={:.4} fragments={}",
            victim.id,
            impactor.id,
            energy,
            threshold,
            fraction,
            fragments.len()
        );

        resolve_elastic(victim, impactor);
        fragments
    }
}
