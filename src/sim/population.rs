//! Population management
//!
//! Keeps the field between its bounds: shatter runaway blobs, trim the
//! oldest entries above the cap, and trickle in new particles below the floor.

use rand::Rng;

use super::state::SimulationEngine;

/// Replace every field particle larger than `super_blob_radius` with fresh small ones.
/// Returns how many blobs were shattered.
pub fn shatter_super_blobs(engine: &mut SimulationEngine) -> usize {
    let ceiling = engine.config.super_blob_radius;
    let (blobs, keep): (Vec<_>, Vec<_>) = engine
        .particles
        .drain(..)
        .partition(|p| p.radius() > ceiling);
    engine.particles = keep;

    for blob in &blobs {
        log::debug!(
            "Shattering blob {} (r={:.1}) into {}",
            blob.id,
            blob.radius(),
            engine.config.shatter_count
        );
        engine.pop_at(blob.pos, blob.radius(), blob.hue);
        for _ in 0..engine.config.shatter_count {
            engine.spawn_random();
        }
    }

    blobs.len()
}

/// Remove the oldest particles above `max_particles`. Returns how many were removed.
pub fn enforce_cap(engine: &mut SimulationEngine) -> usize {
    let excess = engine.particles.len().saturating_sub(engine.config.max_particles);
    if excess > 0 {
        engine.particles.drain(..excess);
        log::debug!("Evicted {} oldest particles", excess);
    }
    excess
}

/// Below the floor (never above the cap), spawn one particle with the current
/// policy's per-frame chance
pub fn maybe_respawn(engine: &mut SimulationEngine) -> bool {
    let (floor, chance) = if engine.phase.is_ambient() {
        (engine.config.ambient_min_particles, engine.config.ambient_spawn_chance)
    } else {
        (engine.config.min_particles, engine.config.spawn_chance)
    };

    let floor = floor.min(engine.config.max_particles);
    if engine.particles.len() < floor && engine.rng.random::<f32>() < chance {
        engine.spawn_random();
        true
    } else {
        false
    }
}
