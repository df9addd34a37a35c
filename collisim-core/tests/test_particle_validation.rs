//! Construction-time validation of particles and timesteps

use collisim_core::{Color, Particle, SimError, Simulation};
use glam::DVec2;

#[test]
fn test_particle_defaults_to_rest() {
    let p = Particle::new(DVec2::new(1.0, 2.0), 3.0, 4.0, Color::CYAN).unwrap();
    assert_eq!(p.vel, DVec2::ZERO);
    assert_eq!(p.radius(), 3.0);
    assert_eq!(p.mass(), 4.0);
    assert_eq!(p.color(), Color::CYAN);
}

#[test]
fn test_non_positive_radius_rejected() {
    for radius in [0.0, -1.0, f64::NAN] {
        let err = Particle::new(DVec2::ZERO, radius, 1.0, Color::BLACK).unwrap_err();
        assert!(matches!(err, SimError::InvalidParticle { field: "radius", .. }));
    }
}

#[test]
fn test_non_positive_mass_rejected() {
    for mass in [0.0, -2.0, f64::INFINITY] {
        let err = Particle::new(DVec2::ZERO, 1.0, mass, Color::BLACK).unwrap_err();
        assert!(matches!(err, SimError::InvalidParticle { field: "mass", .. }));
    }
}

#[test]
fn test_non_finite_kinematics_rejected() {
    let err = Particle::with_velocity(
        DVec2::new(f64::NAN, 0.0),
        DVec2::ZERO,
        1.0,
        1.0,
        Color::BLACK,
    )
    .unwrap_err();
    assert!(matches!(err, SimError::InvalidParticle { field: "position", .. }));

    let err = Particle::with_velocity(
        DVec2::ZERO,
        DVec2::new(0.0, f64::INFINITY),
        1.0,
        1.0,
        Color::BLACK,
    )
    .unwrap_err();
    assert!(matches!(err, SimError::InvalidParticle { field: "velocity", .. }));
}

#[test]
fn test_add_particle_rejects_and_leaves_simulation_unchanged() {
    let mut sim = Simulation::new(0.1).unwrap();
    sim.add_particle(DVec2::ZERO, DVec2::ZERO, 1.0, 1.0, Color::BLACK)
        .unwrap();

    let result = sim.add_particle(DVec2::ZERO, DVec2::ZERO, 1.0, 0.0, Color::BLACK);
    assert!(result.is_err());
    assert_eq!(sim.particles().len(), 1);
}

#[test]
fn test_add_particle_returns_index() {
    let mut sim = Simulation::new(0.1).unwrap();
    let a = sim
        .add_particle(DVec2::ZERO, DVec2::ZERO, 1.0, 1.0, Color::BLACK)
        .unwrap();
    let b = sim
        .add_particle(DVec2::X, DVec2::ZERO, 1.0, 1.0, Color::BLACK)
        .unwrap();
    assert_eq!((a, b), (0, 1));
}

#[test]
fn test_invalid_timestep_rejected() {
    for dt in [0.0, -0.1, f64::NAN] {
        assert!(matches!(
            Simulation::new(dt),
            Err(SimError::InvalidTimestep(_))
        ));
    }
}
