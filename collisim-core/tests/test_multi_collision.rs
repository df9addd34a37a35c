//! Tests for in-place sweep ordering when one particle hits two others

use collisim_core::tests::test_helpers::{approx_eq, particle};
use collisim_core::{elastic_1d, resolve_collisions, World};

fn chain() -> World {
    // Middle particle overlaps both neighbours; the outer two are 3 apart
    World {
        particles: vec![
            particle(0.0, 0.0, 1.0, 1.0, 3.0, 0.0),
            particle(1.5, 0.0, 1.0, 2.0, 0.0, 0.0),
            particle(3.0, 0.0, 1.0, 3.0, -1.0, 0.0),
        ],
    }
}

#[test]
fn test_later_pair_sees_updated_velocity() {
    let mut world = chain();
    let collisions = resolve_collisions(&mut world);
    assert_eq!(collisions, 2);

    // (0, 1): u = (3, 0) -> (-1, 2)
    // (0, 2): no overlap
    // (1, 2): u = (2, -1) -> (-1.6, 1.4), using the updated 2
    let v: Vec<f64> = world.particles.iter().map(|p| p.vel.x).collect();
    assert!(approx_eq(v[0], -1.0, 1e-12));
    assert!(approx_eq(v[1], -1.6, 1e-12));
    assert!(approx_eq(v[2], 1.4, 1e-12));
}

#[test]
fn test_sweep_differs_from_snapshot_update() {
    let mut world = chain();
    resolve_collisions(&mut world);

    // What (1, 2) would give if it read the pre-sweep velocity of particle 1
    let (snap_v1, snap_v2) = elastic_1d(2.0, 0.0, 3.0, -1.0);
    assert!(!approx_eq(world.particles[1].vel.x, snap_v1, 1e-6));
    assert!(!approx_eq(world.particles[2].vel.x, snap_v2, 1e-6));
}

#[test]
fn test_sweep_matches_manual_ordered_application() {
    let mut world = chain();
    resolve_collisions(&mut world);

    let (a, b) = elastic_1d(1.0, 3.0, 2.0, 0.0);
    let (b, c) = elastic_1d(2.0, b, 3.0, -1.0);
    assert_eq!(world.particles[0].vel.x, a);
    assert_eq!(world.particles[1].vel.x, b);
    assert_eq!(world.particles[2].vel.x, c);
}

#[test]
fn test_all_pairs_overlapping_follow_sweep_order() {
    // Every pair overlaps, so (0, 2) reads particle 0 after (0, 1) wrote it
    // and (1, 2) reads both 1 and 2 after earlier pairs wrote them
    let mut world = World {
        particles: vec![
            particle(0.0, 0.0, 2.0, 1.0, 3.0, 0.0),
            particle(1.0, 0.0, 2.0, 2.0, 0.0, 0.0),
            particle(2.0, 0.0, 2.0, 3.0, -1.0, 0.0),
        ],
    };
    assert_eq!(resolve_collisions(&mut world), 3);

    let (a, b) = elastic_1d(1.0, 3.0, 2.0, 0.0);
    let (a, c) = elastic_1d(1.0, a, 3.0, -1.0);
    let (b, c) = elastic_1d(2.0, b, 3.0, c);
    assert_eq!(world.particles[0].vel.x, a);
    assert_eq!(world.particles[1].vel.x, b);
    assert_eq!(world.particles[2].vel.x, c);

    // Reading the pre-sweep velocity of particle 0 in (0, 2) gives a different answer
    let (stale_a, _) = elastic_1d(1.0, 3.0, 3.0, -1.0);
    assert!(!approx_eq(world.particles[0].vel.x, stale_a, 1e-6));
}
