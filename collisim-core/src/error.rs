use thiserror::Error;

/// Errors raised when building or configuring a simulation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A particle attribute violates its invariant (radius and mass must be
    /// finite and > 0, position and velocity must be finite)
    #[error("invalid particle {field}: {value}")]
    InvalidParticle { field: &'static str, value: f64 },

    #[error("invalid timestep: {0} (must be finite and > 0)")]
    InvalidTimestep(f64),

    #[error("unknown color '{0}'")]
    UnknownColor(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
