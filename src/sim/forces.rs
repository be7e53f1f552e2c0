//! External forces
//!
//! All forces are velocity impulses for an implicit unit timestep. Every
//! distance-based denominator is clamped by `min_force_distance`.

use glam::Vec2;

use super::config::SimConfig;
use super::particle::Particle;

/// Which side of a pair feels pairwise gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullPolicy {
    /// Both particles are pulled together
    Mutual,
    /// Only the lighter particle moves toward the heavier one
    Dominant,
}

/// Unit direction from `from` to `to` and their distance, `None` when coincident
#[inline]
fn direction(from: Vec2, to: Vec2) -> Option<(Vec2, f32)> {
    let delta = to - from;
    let dist = delta.length();
    if dist > f32::EPSILON {
        Some((delta / dist, dist))
    } else {
        None
    }
}

/// Pairwise attraction inside `interaction_radius`, magnitude `gravity / d`
pub fn apply_mutual_gravity(particles: &mut [Particle], config: &SimConfig, policy: PullPolicy) {
    let range_sq = config.interaction_radius * config.interaction_radius;

    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let (a, b) = (particles[i].pos, particles[j].pos);
            if a.distance_squared(b) > range_sq {
                continue;
            }
            let Some((dir, dist)) = direction(a, b) else {
                continue;
            };
            let pull = dir * (config.gravity / dist.max(config.min_force_distance));

            match policy {
                PullPolicy::Mutual => {
                    particles[i].vel += pull;
                    particles[j].vel -= pull;
                }
                PullPolicy::Dominant => {
                    // Ties go to the first-indexed particle
                    if particles[i].mass() >= particles[j].mass() {
                        particles[j].vel -= pull;
                    } else {
                        particles[i].vel += pull;
                    }
                }
            }
        }
    }
}

/// Pointer push/pull: repel up close, attract further out
pub fn apply_pointer_force(
    particles: &mut [Particle],
    pointer: Vec2,
    pressed: bool,
    config: &SimConfig,
) {
    let attract = if pressed {
        config.pointer_attract * config.pressed_multiplier
    } else {
        config.pointer_attract
    };

    for particle in particles.iter_mut() {
        let Some((to_pointer, dist)) = direction(particle.pos, pointer) else {
            continue;
        };

        if dist < config.pointer_repel_radius {
            // Strongest at the pointer, fading to zero at the radius edge
            let falloff = 1.0 - dist / config.pointer_repel_radius;
            particle.vel -= to_pointer * config.pointer_repel * falloff;
        } else if dist < config.pointer_attract_radius {
            particle.vel += to_pointer * (attract / dist.max(config.min_force_distance));
        }
    }
}

/// Player gravity: the heavier side of each player/particle pair pulls the other
pub fn apply_player_gravity(player: &mut Particle, particles: &mut [Particle], config: &SimConfig) {
    let range_sq = config.interaction_radius * config.interaction_radius;

    for particle in particles.iter_mut() {
        if player.pos.distance_squared(particle.pos) > range_sq {
            continue;
        }
        let Some((to_particle, dist)) = direction(player.pos, particle.pos) else {
            continue;
        };
        let pull = to_particle * (config.gravity / dist.max(config.min_force_distance));

        if player.mass() >= particle.mass() {
            particle.vel -= pull;
        } else {
            player.vel += pull;
        }
    }
}
