pub mod analyzer;
pub mod ast;
pub mod collision;
pub mod color;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod parser;
pub mod runtime;

pub use analyzer::analyze_scenario;
pub use ast::Scenario;
pub use collision::{elastic_1d, overlapping, resolve_collisions};
pub use color::Color;
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics, Span};
pub use engine::{Particle, World};
pub use error::SimError;
pub use parser::{parse_scenario, ParseError};
pub use runtime::{
    build_simulation, build_simulation_context_from_source, format_scenario_error,
    get_particle_states,
    reference_simulation, run_scenario, ParticleState, ScenarioError, Simulation,
    SimulationContext, SimulationResult, StepReport, REFERENCE_SCENARIO,
};
