use collisim_core::{
    build_simulation_context_from_source, format_scenario_error, SimulationContext,
};

/// Build a simulation context, logging warnings and rendering errors with
/// source context so they can be shown to the user as-is.
pub fn load_context(source: &str) -> Result<SimulationContext, String> {
    match build_simulation_context_from_source(source) {
        Ok((ctx, diagnostics)) => {
            for warning in diagnostics.warnings() {
                tracing::warn!("{}", warning);
            }
            tracing::info!(
                particles = ctx.simulation.particles().len(),
                dt = ctx.simulation.dt(),
                "scenario loaded"
            );
            Ok(ctx)
        }
        Err(e) => Err(format_scenario_error(&e, source)),
    }
}
