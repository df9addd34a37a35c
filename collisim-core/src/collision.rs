//! Pairwise collision detection and the x-axis elastic exchange
//!
//! Every unordered pair (i, j) with i < j is checked once per sweep, in
//! ascending order. Velocities are written back immediately, so a later pair
//! sharing a particle with an earlier one sees the already-updated velocity.
//! Only the x component of velocity is ever changed here.

use crate::engine::{Particle, World};

/// True when the two circles strictly overlap (touching does not count)
pub fn overlapping(a: &Particle, b: &Particle) -> bool {
    let d = a.pos.distance(b.pos);
    d < a.radius() + b.radius()
}

/// One-dimensional elastic collision of two bodies
///
/// Returns the post-collision velocities `(v1, v2)` for bodies of mass `m1`,
/// `m2` moving at `u1`, `u2`. `m1 + m2` must be non-zero, which positive
/// particle masses guarantee.
pub fn elastic_1d(m1: f64, u1: f64, m2: f64, u2: f64) -> (f64, f64) {
    let total = m1 + m2;
    let v1 = ((m1 - m2) * u1 + 2.0 * m2 * u2) / total;
    let v2 = ((m2 - m1) * u2 + 2.0 * m1 * u1) / total;
    (v1, v2)
}

/// Resolve all colliding pairs in a single in-place sweep
///
/// Returns the number of pairs that collided.
pub fn resolve_collisions(world: &mut World) -> usize {
    let particles = &mut world.particles;
    let mut collisions = 0;

    for i in 0..particles.len() {
        // Split so particle i and every j > i can be borrowed mutably together
        let (head, tail) = particles.split_at_mut(i + 1);
        let a = &mut head[i];
        for (offset, b) in tail.iter_mut().enumerate() {
            if !overlapping(a, b) {
                continue;
            }

            let (v1, v2) = elastic_1d(a.mass(), a.vel.x, b.mass(), b.vel.x);
            a.vel.x = v1;
            b.vel.x = v2;
            collisions += 1;

            tracing::trace!(i, j = i + 1 + offset, v1, v2, "resolved collision");
        }
    }

    collisions
}
