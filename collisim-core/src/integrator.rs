use crate::engine::World;

/// Advance every particle by its current velocity over one timestep
///
/// Plain uniform motion: `pos += vel * dt`. There are no forces and no
/// boundaries, so particles are free to leave any visible area.
pub fn integrate(world: &mut World, dt: f64) {
    for particle in world.particles.iter_mut() {
        particle.pos.x += particle.vel.x * dt;
        particle.pos.y += particle.vel.y * dt;
    }
}
