use crate::color::Color;
use crate::error::{Result, SimError};
use glam::DVec2;

/// A circular body in the simulation
///
/// Radius, mass and color are fixed at construction. Position and velocity
/// are owned by the [`World`] and updated every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    radius: f64,
    mass: f64,
    color: Color,
}

impl Particle {
    /// Create a particle at rest, rejecting non-positive radius or mass
    pub fn new(pos: DVec2, radius: f64, mass: f64, color: Color) -> Result<Self> {
        Self::with_velocity(pos, DVec2::ZERO, radius, mass, color)
    }

    pub fn with_velocity(
        pos: DVec2,
        vel: DVec2,
        radius: f64,
        mass: f64,
        color: Color,
    ) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::InvalidParticle {
                field: "radius",
                value: radius,
            });
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimError::InvalidParticle {
                field: "mass",
                value: mass,
            });
        }
        if !pos.is_finite() {
            return Err(SimError::InvalidParticle {
                field: "position",
                value: if pos.x.is_finite() { pos.y } else { pos.x },
            });
        }
        if !vel.is_finite() {
            return Err(SimError::InvalidParticle {
                field: "velocity",
                value: if vel.x.is_finite() { vel.y } else { vel.x },
            });
        }

        Ok(Self {
            pos,
            vel,
            radius,
            mass,
            color,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Kinetic energy: 1/2 m |v|^2
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.length_squared()
    }
}

/// The ordered particle collection a simulation steps over
///
/// Insertion order is the pair iteration order used by collision resolution.
#[derive(Debug, Clone, Default)]
pub struct World {
    pub particles: Vec<Particle>,
}

impl World {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Sum of m * vx over all particles
    pub fn total_momentum_x(&self) -> f64 {
        self.particles.iter().map(|p| p.mass * p.vel.x).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }
}
