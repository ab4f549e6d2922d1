pub mod boundary;
pub mod collision;
pub mod forces;
pub mod fragmentation;

use log::{info, trace};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    config::SimConfig,
    error::{Error, Result},
    types::{Color, Particle, ParticleId, ParticleSnapshot, Position, Vec2, Velocity, WorldStats},
};

use self::{
    boundary::Bounds,
    collision::{contact_normal, is_colliding},
    forces::ForceModel,
    fragmentation::FragmentationModel,
};

/// The particle collection plus everything needed to advance it one frame at a time.
///
/// Per frame (`step`): gravity -> velocity, pairwise collisions (possibly spawning
/// fragments), fragment insertion, position + wall reflection, lifetime pruning.
pub struct World {
    particles: Vec<Particle>,
    config: SimConfig,
    forces: ForceModel,
    fragmentation: FragmentationModel,
    bounds: Bounds,
    rng: StdRng,
    next_id: ParticleId,
    frame: u64,
    acc: Vec<Vec2>,
    spawned: Vec<Particle>,
}

impl World {
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::build(config, StdRng::from_entropy())
    }

    /// Same as [`World::new`] with reproducible fragmentation.
    pub fn with_seed(config: SimConfig, seed: u64) -> Result<Self> {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: SimConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        info!(
            "world {}x{} G={} softening={} trail={}",
            config.width, config.height, config.gravity, config.softening, config.trail_len
        );
        Ok(Self {
            particles: Vec::new(),
            forces: ForceModel::new(config.gravity, config.softening),
            fragmentation: FragmentationModel::new(config.fragmentation.clone(), config.trail_len),
            bounds: Bounds::new(config.width, config.height),
            config,
            rng,
            next_id: 1,
            frame: 0,
            acc: Vec::new(),
            spawned: Vec::new(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Adds a primary body between frames.
    pub fn spawn_particle(
        &mut self,
        mass: f64,
        position: Position,
        velocity: Velocity,
        radius: f64,
        color: Color,
    ) -> Result<ParticleId> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !position.is_finite() {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !velocity.is_finite() {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        let id = self.next_id();
        self.particles.push(Particle::new(
            id,
            mass,
            position,
            velocity,
            radius,
            color,
            self.config.trail_len,
        ));
        Ok(id)
    }

    pub fn step(&mut self, dt: f64) {
        self.accumulate_forces(dt);
        self.resolve_collisions();
        self.particles.append(&mut self.spawned);
        self.integrate(dt);
        self.prune_expired();
        self.frame += 1;
    }

    /// Post-step view of every live particle, in storage order.
    pub fn snapshot(&self, out: &mut Vec<ParticleSnapshot>) {
        out.clear();
        out.extend(self.particles.iter().map(Particle::snapshot));
    }

    pub fn stats(&self) -> WorldStats {
        let mut stats = WorldStats {
            particle_count: self.particles.len(),
            potential_energy: self.forces.potential_energy(&self.particles),
            frame: self.frame,
            ..WorldStats::default()
        };
        for p in &self.particles {
            stats.total_mass += p.mass;
            stats.kinetic_energy += p.kinetic_energy();
            stats.momentum += p.momentum();
            if p.lifetime.is_some() {
                stats.fragment_count += 1;
            }
        }
        stats
    }

    fn next_id(&mut self) -> ParticleId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn accumulate_forces(&mut self, dt: f64) {
        let forces = self.forces;
        self.acc.clear();
        self.acc.resize(self.particles.len(), Vec2::ZERO);

        // all forces come from the frozen start-of-frame state
        for i in 0..self.particles.len() {
            self.acc[i] = forces.net_force(&self.particles, i, |a, b| is_colliding(&forces, a, b));
        }

        for (p, force) in self.particles.iter_mut().zip(self.acc.iter()) {
            p.velocity += *force * (dt / p.mass);
        }
    }

    fn resolve_collisions(&mut self) {
        let n = self.particles.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (left, right) = self.particles.split_at_mut(j);
                let a = &mut left[i];
                let b = &mut right[0];

                if !is_colliding(&self.forces, a, b) {
                    continue;
                }
                if self.config.skip_separating && is_separating(a, b) {
                    continue;
                }
                let fragments = self
                    .fragmentation
                    .resolve(a, b, &mut self.rng, &mut self.next_id);
                self.spawned.extend(fragments);
            }
        }
    }

    fn integrate(&mut self, dt: f64) {
        for p in &mut self.particles {
            p.position += p.velocity * dt;
            self.bounds.reflect(p);
            p.record_trail();
        }
    }

    fn prune_expired(&mut self) {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired());
        let removed = before - self.particles.len();
        if removed > 0 {
            trace!("frame {}: pruned {} expired particles", self.frame, removed);
        }
        for p in &mut self.particles {
            if let Some(t) = p.lifetime.as_mut() {
                *t = t.saturating_sub(1);
            }
        }
    }
}

/// True when the pair is already moving apart along the line of centers.
fn is_separating(a: &Particle, b: &Particle) -> bool {
    if a.position == b.position {
        return false;
    }
    (a.velocity - b.velocity).dot(contact_normal(a, b)) > 0.0
}
