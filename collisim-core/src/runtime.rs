use crate::analyzer::analyze_scenario;
use crate::ast::Scenario;
use crate::collision::resolve_collisions;
use crate::color::Color;
use crate::diagnostics::{
    format_diagnostics, format_parse_error, format_runtime_error, Diagnostics,
};
use crate::engine::{Particle, World};
use crate::error::{Result, SimError};
use crate::integrator::integrate;
use crate::parser::{parse_scenario, ParseError};
use glam::DVec2;
use thiserror::Error;

/// The two-particle scene the binary opens with when given no scenario file
pub const REFERENCE_SCENARIO: &str = r#"# Two circles on a horizontal line, closing at 5 units per time unit
window 800 x 600 title "Collisions Simulation"
particle a at (100, 300) radius 20 mass 1 color cyan velocity (4, 0)
particle b at (700, 300) radius 30 mass 2 color black velocity (-1, 0)
simulate dt = 0.1 steps = 2000 delay = 10
"#;

pub const REFERENCE_DT: f64 = 0.1;

/// Outcome of a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Frame number after this step (the first step reports 1)
    pub frame: u64,
    /// Pairs that collided during this step
    pub collisions: usize,
}

/// Fixed-timestep simulation over an ordered set of particles
#[derive(Debug, Clone)]
pub struct Simulation {
    world: World,
    dt: f64,
    frame: u64,
}

impl Simulation {
    /// Create an empty simulation; `dt` must be finite and > 0
    pub fn new(dt: f64) -> Result<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimError::InvalidTimestep(dt));
        }
        Ok(Self {
            world: World::new(),
            dt,
            frame: 0,
        })
    }

    /// Validate and append a particle, returning its index
    pub fn add_particle(
        &mut self,
        pos: DVec2,
        vel: DVec2,
        radius: f64,
        mass: f64,
        color: Color,
    ) -> Result<usize> {
        let particle = Particle::with_velocity(pos, vel, radius, mass, color)?;
        Ok(self.push(particle))
    }

    /// Append an already-constructed particle, returning its index
    pub fn push(&mut self, particle: Particle) -> usize {
        tracing::debug!(
            index = self.world.len(),
            x = particle.pos.x,
            y = particle.pos.y,
            radius = particle.radius(),
            mass = particle.mass(),
            color = %particle.color(),
            "added particle"
        );
        self.world.particles.push(particle);
        self.world.len() - 1
    }

    /// Advance one frame: resolve collisions, then integrate positions
    pub fn step(&mut self) -> StepReport {
        let collisions = resolve_collisions(&mut self.world);
        integrate(&mut self.world, self.dt);
        self.frame += 1;
        StepReport {
            frame: self.frame,
            collisions,
        }
    }

    /// Step `frames` times, returning the total number of collisions
    pub fn run(&mut self, frames: u32) -> usize {
        (0..frames).map(|_| self.step().collisions).sum()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.world.particles
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Build the two-particle reference scene directly
pub fn reference_simulation() -> Result<Simulation> {
    let mut sim = Simulation::new(REFERENCE_DT)?;
    sim.add_particle(
        DVec2::new(100.0, 300.0),
        DVec2::new(4.0, 0.0),
        20.0,
        1.0,
        Color::CYAN,
    )?;
    sim.add_particle(
        DVec2::new(700.0, 300.0),
        DVec2::new(-1.0, 0.0),
        30.0,
        2.0,
        Color::BLACK,
    )?;
    Ok(sim)
}

/// Failure to turn scenario source into a running simulation
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("scenario has errors:\n{0}")]
    Analysis(Diagnostics),
    #[error(transparent)]
    Simulation(#[from] SimError),
}

/// Render a scenario failure for the user, with source lines where known
pub fn format_scenario_error(error: &ScenarioError, source: &str) -> String {
    match error {
        ScenarioError::Parse(e) => format_parse_error(e, source),
        ScenarioError::Analysis(diagnostics) => format_diagnostics(diagnostics, source),
        ScenarioError::Simulation(e) => format_runtime_error(e),
    }
}

/// A simulation together with the scenario it was built from
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub scenario: Scenario,
    pub simulation: Simulation,
}

/// Snapshot of one particle for rendering and reporting
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    pub name: String,
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    pub mass: f64,
    pub color: Color,
}

/// Result of a headless run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub frames: u64,
    pub collisions: usize,
    pub particles: Vec<ParticleState>,
    /// Total x momentum at the end of the run
    pub momentum_x: f64,
    pub kinetic_energy: f64,
}

/// Build a simulation from a parsed scenario
pub fn build_simulation(scenario: &Scenario) -> Result<Simulation> {
    let mut sim = Simulation::new(scenario.simulate.dt)?;
    for decl in &scenario.particles {
        sim.add_particle(decl.position, decl.velocity, decl.radius, decl.mass, decl.color)?;
    }
    Ok(sim)
}

/// Parse, analyze and build a simulation context from source
///
/// Warnings are returned alongside the context; any error diagnostic aborts.
pub fn build_simulation_context_from_source(
    source: &str,
) -> std::result::Result<(SimulationContext, Diagnostics), ScenarioError> {
    let scenario = parse_scenario(source)?;
    let diagnostics = analyze_scenario(&scenario);
    if diagnostics.has_errors() {
        return Err(ScenarioError::Analysis(diagnostics));
    }

    let simulation = build_simulation(&scenario)?;
    Ok((
        SimulationContext {
            scenario,
            simulation,
        },
        diagnostics,
    ))
}

/// Current state of every particle, labelled with its scenario name
pub fn get_particle_states(ctx: &SimulationContext) -> Vec<ParticleState> {
    ctx.scenario
        .particles
        .iter()
        .zip(ctx.simulation.particles())
        .map(|(decl, p)| ParticleState {
            name: decl.name.clone(),
            pos: p.pos,
            vel: p.vel,
            radius: p.radius(),
            mass: p.mass(),
            color: p.color(),
        })
        .collect()
}

/// Run a scenario headless for `frames` steps (the scenario's `steps` if none)
pub fn run_scenario(
    source: &str,
    frames: Option<u32>,
) -> std::result::Result<SimulationResult, ScenarioError> {
    let (mut ctx, _diagnostics) = build_simulation_context_from_source(source)?;
    let frames = frames.unwrap_or(ctx.scenario.simulate.steps);
    let collisions = ctx.simulation.run(frames);

    let world = ctx.simulation.world();
    Ok(SimulationResult {
        frames: ctx.simulation.frame(),
        collisions,
        particles: get_particle_states(&ctx),
        momentum_x: world.total_momentum_x(),
        kinetic_energy: world.kinetic_energy(),
    })
}
