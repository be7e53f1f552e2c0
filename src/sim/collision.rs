//! Collision detection and merge response
//!
//! Overlapping discs merge: the larger absorbs the smaller, conserving mass
//! (up to an optional cap) and momentum.

use glam::Vec2;

use super::particle::{Hue, Particle};

/// Record of one merge, used to place a pop ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeEvent {
    pub pos: Vec2,
    pub radius: f32,
    pub hue: Hue,
}

/// Absorb `small` into `big`.
///
/// Mass is summed and clamped to `max_mass` when given; the excess is simply
/// discarded. Velocity is the mass-weighted average of the two pre-cap
/// masses, so the capped body still carries the momentum of both inputs
/// divided by their true combined mass.
pub fn merge(big: &mut Particle, small: &Particle, max_mass: Option<f32>) {
    let (m1, m2) = (big.mass(), small.mass());
    let total = m1 + m2;

    big.vel = (big.vel * m1 + small.vel * m2) / total;
    big.set_mass(match max_mass {
        Some(cap) => total.min(cap),
        None => total,
    });
}

/// Index of the pair member that absorbs the other (first index wins ties)
#[inline]
pub fn absorber(particles: &[Particle], i: usize, j: usize) -> (usize, usize) {
    if particles[j].radius() > particles[i].radius() {
        (j, i)
    } else {
        (i, j)
    }
}

/// Merge every overlapping pair in place.
///
/// Absorbed particles are flagged during the scan and removed after it, so no
/// particle is compared against a removed partner and none is skipped. A
/// winner's grown radius is used for the rest of the scan.
pub fn resolve_merges(particles: &mut Vec<Particle>, max_mass: Option<f32>) -> Vec<MergeEvent> {
    let mut absorbed = vec![false; particles.len()];
    let mut events = Vec::new();

    for i in 0..particles.len() {
        if absorbed[i] {
            continue;
        }
        for j in (i + 1)..particles.len() {
            if absorbed[j] || absorbed[i] {
                continue;
            }
            if !particles[i].overlaps(&particles[j]) {
                continue;
            }

            let (big, small) = absorber(particles, i, j);
            let eaten = particles[small].clone();
            merge(&mut particles[big], &eaten, max_mass);
            absorbed[small] = true;

            events.push(MergeEvent {
                pos: particles[big].pos,
                radius: particles[big].radius(),
                hue: particles[big].hue,
            });
        }
    }

    if !events.is_empty() {
        let mut flags = absorbed.into_iter();
        particles.retain(|_| !flags.next().unwrap_or(false));
    }

    events
}

/// Outcome of the player touching a field particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerContact {
    /// Player absorbed the particle with the given radius
    Absorbed { radius: f32 },
    /// The particle was larger: the run is over
    Defeated,
}

/// Resolve player contacts against the field.
///
/// Absorbed particles are removed. Scanning stops at the first particle the
/// player cannot swallow, which ends the run.
pub fn resolve_player_contacts(
    player: &mut Particle,
    particles: &mut Vec<Particle>,
    max_mass: f32,
) -> Vec<PlayerContact> {
    let mut contacts = Vec::new();
    let mut eaten = vec![false; particles.len()];

    for (idx, particle) in particles.iter().enumerate() {
        if !player.overlaps(particle) {
            continue;
        }
        if player.radius() >= particle.radius() {
            merge(player, particle, Some(max_mass));
            eaten[idx] = true;
            contacts.push(PlayerContact::Absorbed {
                radius: particle.radius(),
            });
        } else {
            contacts.push(PlayerContact::Defeated);
            break;
        }
    }

    if eaten.iter().any(|&e| e) {
        let mut flags = eaten.into_iter();
        particles.retain(|_| !flags.next().unwrap_or(false));
    }

    contacts
}
