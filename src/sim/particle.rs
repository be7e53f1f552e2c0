//! Particle and player bodies
//!
//! Radius is the ground truth. Mass is derived from it and the two are only
//! ever changed together through [`Particle::set_radius`] / [`Particle::set_mass`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Viewport;
use crate::{mass_from_radius, radius_from_mass, wrap_position};

/// Smallest radius a body can hold
pub const MIN_RADIUS: f32 = 0.1;

/// Opaque color token (hue in degrees, 0-360)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hue(pub f32);

/// Hue reserved for the player
pub const PLAYER_HUE: Hue = Hue(190.0);

/// A single blob in the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: u64,
    pub pos: Vec2,
    pub vel: Vec2,
    pub hue: Hue,
    radius: f32,
    mass: f32,
}

impl Particle {
    pub fn new(id: u64, pos: Vec2, vel: Vec2, radius: f32, hue: Hue) -> Self {
        let mut particle = Self {
            id,
            pos,
            vel,
            hue,
            radius: MIN_RADIUS,
            mass: mass_from_radius(MIN_RADIUS),
        };
        particle.set_radius(radius);
        particle
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Set radius and recompute mass
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = if radius.is_finite() {
            radius.max(MIN_RADIUS)
        } else {
            MIN_RADIUS
        };
        self.mass = mass_from_radius(self.radius);
    }

    /// Set mass and recompute radius
    pub fn set_mass(&mut self, mass: f32) {
        self.set_radius(radius_from_mass(mass));
    }

    /// True if the two discs overlap
    pub fn overlaps(&self, other: &Particle) -> bool {
        self.pos.distance_squared(other.pos) < (self.radius + other.radius).powi(2)
    }

    /// Integrate one frame: move, wrap around the field edges, then apply drag
    pub fn update(&mut self, viewport: Viewport, damping: f32, max_speed: f32) {
        self.pos += self.vel;
        self.pos = wrap_position(self.pos, self.radius, viewport.width, viewport.height);
        self.vel = (self.vel * damping).clamp_length_max(max_speed);
    }
}

/// The player-controlled blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Particle,
    /// Fraction of the pointer offset blended into velocity each frame
    pub steering: f32,
}

impl Player {
    pub fn new(id: u64, pos: Vec2, radius: f32, steering: f32) -> Self {
        Self {
            body: Particle::new(id, pos, Vec2::ZERO, radius, PLAYER_HUE),
            steering,
        }
    }

    /// Steer toward `target` (if any), then integrate with the player's own drag
    pub fn update(&mut self, target: Option<Vec2>, viewport: Viewport, damping: f32, max_speed: f32) {
        if let Some(target) = target {
            self.body.vel += (target - self.body.pos) * self.steering;
        }
        self.body.update(viewport, damping, max_speed);
    }
}
