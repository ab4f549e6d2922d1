use std::collections::VecDeque;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const X: Vec2 = Vec2 { x: 1.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn length_sq(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }

    /// Unit vector along `self`, or `fallback` when `self` has zero length.
    pub fn normalize_or(self, fallback: Vec2) -> Vec2 {
        let len = self.length();
        if len > 0.0 {
            Vec2::new(self.x / len, self.y / len)
        } else {
            fallback
        }
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn get(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Point in simulation space.
pub type Position = Vec2;
/// Velocity in simulation units per time unit.
pub type Velocity = Vec2;

/// Spatial axis of the 2D domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];
}

impl TryFrom<usize> for Axis {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            other => Err(Error::InvalidAxis(other)),
        }
    }
}

/// Display color. The engine only carries it from parents to fragments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Bounded history of past positions; pushing onto a full trail evicts the oldest point.
#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<Position>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, pos: Position) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(pos);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest point first.
    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.points.iter()
    }
}

pub type ParticleId = u64;

#[derive(Clone, Debug)]
pub struct Particle {
    pub id: ParticleId,
    pub mass: f64,
    pub position: Position,
    pub velocity: Velocity,
    pub radius: f64,
    pub color: Color,
    pub trail: Trail,
    /// Frames left before removal; `None` for bodies that persist indefinitely.
    pub lifetime: Option<u32>,
}

impl Particle {
    pub fn new(
        id: ParticleId,
        mass: f64,
        position: Position,
        velocity: Velocity,
        radius: f64,
        color: Color,
        trail_len: usize,
    ) -> Self {
        let mut trail = Trail::new(trail_len);
        trail.push(position);
        Self {
            id,
            mass,
            position,
            velocity,
            radius,
            color,
            trail,
            lifetime: None,
        }
    }

    /// 1/2 m |v|^2
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_sq()
    }

    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime == Some(0)
    }

    pub fn record_trail(&mut self) {
        self.trail.push(self.position);
    }

    pub fn snapshot(&self) -> ParticleSnapshot {
        ParticleSnapshot {
            id: self.id,
            position: self.position,
            velocity: self.velocity,
            radius: self.radius,
            mass: self.mass,
            color: self.color,
            trail: self.trail.iter().copied().collect(),
        }
    }
}

/// Read-only view of one particle, as handed to a renderer after a step.
#[derive(Clone, Debug)]
pub struct ParticleSnapshot {
    pub id: ParticleId,
    pub position: Position,
    pub velocity: Velocity,
    pub radius: f64,
    pub mass: f64,
    pub color: Color,
    pub trail: Vec<Position>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WorldStats {
    pub particle_count: usize,
    pub fragment_count: usize,
    pub total_mass: f64,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    pub momentum: Vec2,
    pub frame: u64,
}

impl WorldStats {
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod vec2_length {
        use super::*;

        #[test]
        fn calculates_length() {
            let v = Vec2::new(3.0, 4.0);
            assert_eq!(v.length_sq(), 25.0);
            assert_eq!(v.length(), 5.0);
        }

        #[test]
        fn zero_vector_has_zero_length() {
            assert_eq!(Vec2::ZERO.length(), 0.0);
        }
    }

    mod vec2_normalize_or {
        use super::*;

        #[test]
        fn normalizes_non_zero_vector() {
            let v = Vec2::new(3.0, 4.0).normalize_or(Vec2::X);
            assert!((v.x - 0.6).abs() < 1e-12);
            assert!((v.y - 0.8).abs() < 1e-12);
        }

        #[test]
        fn zero_vector_uses_fallback() {
            assert_eq!(Vec2::ZERO.normalize_or(Vec2::X), Vec2::X);
        }
    }

    mod vec2_ops {
        use super::*;

        #[test]
        fn arithmetic_is_componentwise() {
            let a = Vec2::new(1.0, 2.0);
            let b = Vec2::new(3.0, 5.0);
            assert_eq!(a + b, Vec2::new(4.0, 7.0));
            assert_eq!(b - a, Vec2::new(2.0, 3.0));
            assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
            assert_eq!(a.dot(b), 13.0);
        }

        #[test]
        fn add_assign_modifies_in_place() {
            let mut a = Vec2::new(1.0, 2.0);
            a += Vec2::new(3.0, 4.0);
            assert_eq!(a, Vec2::new(4.0, 6.0));
        }

        #[test]
        fn axis_access() {
            let mut v = Vec2::new(1.0, 2.0);
            assert_eq!(v.get(Axis::Y), 2.0);
            *v.get_mut(Axis::X) = 9.0;
            assert_eq!(v.x, 9.0);
        }
    }

    mod axis_try_from {
        use super::*;

        #[test]
        fn accepts_two_axes() {
            assert_eq!(Axis::try_from(0).ok(), Some(Axis::X));
            assert_eq!(Axis::try_from(1).ok(), Some(Axis::Y));
        }

        #[test]
        fn rejects_third_axis() {
            let err = Axis::try_from(2).unwrap_err();
            assert!(matches!(err, Error::InvalidAxis(2)));
        }
    }

    mod trail {
        use super::*;

        #[test]
        fn evicts_oldest_when_full() {
            let mut trail = Trail::new(3);
            for i in 0..5 {
                trail.push(Vec2::new(i as f64, 0.0));
            }
            assert_eq!(trail.len(), 3);
            let xs: Vec<f64> = trail.iter().map(|p| p.x).collect();
            assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        }

        #[test]
        fn zero_capacity_stays_empty() {
            let mut trail = Trail::new(0);
            trail.push(Vec2::ZERO);
            assert!(trail.is_empty());
        }
    }

    mod particle {
        use super::*;

        fn body() -> Particle {
            Particle::new(1, 2.0, Vec2::new(1.0, 1.0), Vec2::new(3.0, 4.0), 1.0, Color::WHITE, 4)
        }

        #[test]
        fn starts_with_current_position_in_trail() {
            let p = body();
            assert_eq!(p.trail.len(), 1);
            assert_eq!(p.trail.iter().next().copied(), Some(Vec2::new(1.0, 1.0)));
            assert_eq!(p.lifetime, None);
        }

        #[test]
        fn kinetic_energy_and_momentum() {
            let p = body();
            assert!((p.kinetic_energy() - 25.0).abs() < 1e-12);
            assert_eq!(p.momentum(), Vec2::new(6.0, 8.0));
        }

        #[test]
        fn expired_only_at_zero() {
            let mut p = body();
            assert!(!p.is_expired());
            p.lifetime = Some(1);
            assert!(!p.is_expired());
            p.lifetime = Some(0);
            assert!(p.is_expired());
        }

        #[test]
        fn snapshot_copies_trail() {
            let mut p = body();
            p.position = Vec2::new(2.0, 2.0);
            p.record_trail();
            let snap = p.snapshot();
            assert_eq!(snap.trail, vec![Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)]);
            assert_eq!(snap.color, Color::WHITE);
        }
    }
}
