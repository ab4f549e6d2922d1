//! Overlap detection and frictionless elastic impulse exchange.

use crate::core::forces::ForceModel;
use crate::types::{Particle, Vec2};

/// Two particles collide when their (softened) separation does not exceed the sum of radii.
pub fn is_colliding(model: &ForceModel, a: &Particle, b: &Particle) -> bool {
    model.distance(a, b) <= a.radius + b.radius
}

/// Unit normal from `b` to `a`; coincident centers fall back to +x.
pub fn contact_normal(a: &Particle, b: &Particle) -> Vec2 {
    (a.position - b.position).normalize_or(Vec2::X)
}

/// 1D elastic collision along the line of centers. Tangential components, masses and
/// positions are left untouched.
pub fn resolve_elastic(a: &mut Particle, b: &mut Particle) {
    let normal = contact_normal(a, b);
    let (m1, m2) = (a.mass, b.mass);
    let total = m1 + m2;
    if total <= 0.0 {
        return;
    }

    let v1 = a.velocity.dot(normal);
    let v2 = b.velocity.dot(normal);
    let v1_new = (v1 * (m1 - m2) + 2.0 * m2 * v2) / total;
    let v2_new = (v2 * (m2 - m1) + 2.0 * m1 * v1) / total;

    a.velocity += normal * (v1_new - v1);
    b.velocity += normal * (v2_new - v2);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn body(mass: f64, radius: f64, pos: Vec2, vel: Vec2) -> Particle {
        Particle::new(0, mass, pos, vel, radius, Color::WHITE, 0)
    }

    fn momentum(a: &Particle, b: &Particle) -> Vec2 {
        a.momentum() + b.momentum()
    }

    mod is_colliding {
        use super::*;

        #[test]
        fn overlap_and_touching_collide() {
            let model = ForceModel::new(1.0, 0.0);
            let a = body(1.0, 2.0, Vec2::new(0.0, 0.0), Vec2::ZERO);
            let touching = body(1.0, 3.0, Vec2::new(5.0, 0.0), Vec2::ZERO);
            let apart = body(1.0, 3.0, Vec2::new(5.1, 0.0), Vec2::ZERO);
            assert!(is_colliding(&model, &a, &touching));
            assert!(!is_colliding(&model, &a, &apart));
        }

        #[test]
        fn is_symmetric() {
            let model = ForceModel::new(1.0, 0.0);
            let a = body(1.0, 2.0, Vec2::new(0.0, 0.0), Vec2::ZERO);
            let b = body(1.0, 1.0, Vec2::new(2.0, 2.0), Vec2::ZERO);
            assert_eq!(is_colliding(&model, &a, &b), is_colliding(&model, &b, &a));
        }
    }

    mod resolve_elastic {
        use super::*;

        #[test]
        fn equal_masses_swap_normal_velocity() {
            let mut a = body(10.0, 8.0, Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.5));
            let mut b = body(10.0, 8.0, Vec2::new(115.0, 100.0), Vec2::new(-1.0, -0.25));
            resolve_elastic(&mut a, &mut b);
            assert!((a.velocity.x + 1.0).abs() < 1e-12);
            assert!((b.velocity.x - 1.0).abs() < 1e-12);
            // tangential components untouched
            assert_eq!(a.velocity.y, 0.5);
            assert_eq!(b.velocity.y, -0.25);
        }

        #[test]
        fn conserves_momentum_and_energy() {
            let mut a = body(3.0, 2.0, Vec2::new(0.0, 0.0), Vec2::new(2.0, 1.0));
            let mut b = body(7.0, 2.0, Vec2::new(2.0, 1.5), Vec2::new(-1.0, 0.5));
            let p0 = momentum(&a, &b);
            let e0 = a.kinetic_energy() + b.kinetic_energy();

            resolve_elastic(&mut a, &mut b);

            let p1 = momentum(&a, &b);
            let e1 = a.kinetic_energy() + b.kinetic_energy();
            assert!((p1 - p0).length() < 1e-9);
            assert!((e1 - e0).abs() < 1e-9);
        }

        #[test]
        fn light_body_bounces_off_heavy_one() {
            let mut light = body(1.0, 1.0, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
            let mut heavy = body(1e9, 1.0, Vec2::new(1.5, 0.0), Vec2::ZERO);
            resolve_elastic(&mut light, &mut heavy);
            assert!((light.velocity.x + 1.0).abs() < 1e-6);
            assert!(heavy.velocity.length() < 1e-6);
        }

        #[test]
        fn coincident_centers_use_fallback_normal() {
            let mut a = body(1.0, 1.0, Vec2::new(5.0, 5.0), Vec2::new(1.0, 2.0));
            let mut b = body(1.0, 1.0, Vec2::new(5.0, 5.0), Vec2::new(-1.0, 0.0));
            resolve_elastic(&mut a, &mut b);
            assert!(a.velocity.is_finite() && b.velocity.is_finite());
            assert_eq!(a.velocity, Vec2::new(-1.0, 2.0));
            assert_eq!(b.velocity, Vec2::new(1.0, 0.0));
        }

        #[test]
        fn leaves_mass_and_position_alone() {
            let mut a = body(2.0, 1.0, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
            let mut b = body(4.0, 1.0, Vec2::new(1.0, 0.0), Vec2::ZERO);
            resolve_elastic(&mut a, &mut b);
            assert_eq!((a.mass, b.mass), (2.0, 4.0));
            assert_eq!(a.position, Vec2::ZERO);
            assert_eq!(b.position, Vec2::new(1.0, 0.0));
        }
    }
}
