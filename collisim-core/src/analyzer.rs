//! Static checks for scenarios
//!
//! Runs after parsing and before a simulation is built, so that bad particle
//! attributes are reported with their source line instead of surfacing as a
//! construction failure.

use crate::ast::Scenario;
use crate::diagnostics::{Diagnostic, Diagnostics};
use std::collections::HashMap;

/// Analyze a scenario and return diagnostics
pub fn analyze_scenario(scenario: &Scenario) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    let window = &scenario.window;
    if window.width == 0 || window.height == 0 {
        diagnostics.push(Diagnostic::error(
            format!(
                "window dimensions must be non-zero, got {} x {}",
                window.width, window.height
            ),
            None,
        ));
    }

    let dt = scenario.simulate.dt;
    if !dt.is_finite() || dt <= 0.0 {
        diagnostics.push(Diagnostic::error(
            format!("timestep must be positive, got {}", dt),
            scenario.simulate.span,
        ));
    }

    let mut names = HashMap::new();
    for (idx, particle) in scenario.particles.iter().enumerate() {
        if names.insert(particle.name.as_str(), idx).is_some() {
            diagnostics.push(Diagnostic::error(
                format!("duplicate particle name '{}'", particle.name),
                particle.span,
            ));
        }

        if !particle.radius.is_finite() || particle.radius <= 0.0 {
            diagnostics.push(Diagnostic::error(
                format!(
                    "particle '{}' radius must be positive, got {}",
                    particle.name, particle.radius
                ),
                particle.span,
            ));
        }
        if !particle.mass.is_finite() || particle.mass <= 0.0 {
            diagnostics.push(Diagnostic::error(
                format!(
                    "particle '{}' mass must be positive, got {}",
                    particle.name, particle.mass
                ),
                particle.span,
            ));
        }
    }

    // Overlap at frame 0 is legal physics; flag it because the pair will
    // exchange velocities on the very first step.
    for (i, a) in scenario.particles.iter().enumerate() {
        for b in &scenario.particles[i + 1..] {
            if a.position.distance(b.position) < a.radius + b.radius {
                diagnostics.push(Diagnostic::warning(
                    format!("particles '{}' and '{}' overlap initially", a.name, b.name),
                    b.span,
                ));
            }
        }
    }

    diagnostics
}
