use crate::color::Color;
use crate::diagnostics::Span;
use glam::DVec2;

pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;
pub const DEFAULT_WINDOW_TITLE: &str = "Collisions Simulation";
pub const DEFAULT_STEPS: u32 = 1000;
pub const DEFAULT_FRAME_DELAY_MS: u64 = 10;

/// A parsed scenario file
#[derive(Debug, Clone)]
pub struct Scenario {
    pub window: WindowDecl,
    pub particles: Vec<ParticleDecl>,
    pub simulate: SimulateDecl,
}

/// Window declaration: `window W x H title "..."`
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDecl {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowDecl {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            title: DEFAULT_WINDOW_TITLE.to_string(),
        }
    }
}

/// Particle declaration:
/// `particle name at (x, y) radius r mass m color c velocity (vx, vy)`
#[derive(Debug, Clone)]
pub struct ParticleDecl {
    pub name: String,
    pub position: DVec2,
    pub radius: f64,
    pub mass: f64,
    pub color: Color,
    pub velocity: DVec2,
    pub span: Option<Span>,
}

/// Simulation parameters: `simulate dt = 0.1 steps = 1000 delay = 10`
#[derive(Debug, Clone, PartialEq)]
pub struct SimulateDecl {
    pub dt: f64,
    /// Frame count for headless runs
    pub steps: u32,
    /// Wall-clock pause between rendered frames, in milliseconds.
    /// Has no effect on `dt`.
    pub delay_ms: u64,
    pub span: Option<Span>,
}
