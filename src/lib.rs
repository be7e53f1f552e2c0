//! Blob Drift - a drifting, merging particle field
//!
//! Core modules:
//! - `sim`: Simulation engine (forces, integration, merging, population, phases)
//! - `renderer`: Draw-call surface the engine renders through
//! - `settings`: Render preferences and quality presets

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};
pub use sim::{SimConfig, SimulationEngine, TickInput, tick};

use glam::Vec2;
use std::f32::consts::PI;

/// Default simulation tuning
pub mod consts {
    /// Ambient drag applied to every particle each frame
    pub const DAMPING: f32 = 0.995;
    /// Stronger drag on the player for tight steering
    pub const PLAYER_DAMPING: f32 = 0.85;
    /// Fraction of the pointer offset blended into player velocity per frame
    pub const PLAYER_STEERING: f32 = 0.02;
    /// Hard speed ceiling (units per frame)
    pub const MAX_SPEED: f32 = 12.0;

    /// Pairwise gravity range
    pub const INTERACTION_RADIUS: f32 = 150.0;
    /// Pairwise gravity strength (velocity change = GRAVITY / distance)
    pub const GRAVITY: f32 = 0.05;
    /// Force denominators never drop below this
    pub const MIN_FORCE_DISTANCE: f32 = 5.0;

    /// Pointer pushes particles away inside this radius
    pub const POINTER_REPEL_RADIUS: f32 = 40.0;
    pub const POINTER_REPEL: f32 = 0.6;
    /// Pointer pulls particles in inside this radius
    pub const POINTER_ATTRACT_RADIUS: f32 = 200.0;
    pub const POINTER_ATTRACT: f32 = 1.5;
    /// Attraction multiplier while the pointer is held down
    pub const PRESSED_MULTIPLIER: f32 = 3.0;

    /// Population bounds
    pub const MAX_PARTICLES: usize = 300;
    pub const MIN_PARTICLES: usize = 50;
    pub const SPAWN_CHANCE: f32 = 0.1;
    pub const AMBIENT_MIN_PARTICLES: usize = 120;
    pub const AMBIENT_SPAWN_CHANCE: f32 = 0.5;
    pub const INITIAL_PARTICLES: usize = 120;

    /// Fresh particles
    pub const SPAWN_RADIUS_MIN: f32 = 2.0;
    pub const SPAWN_RADIUS_MAX: f32 = 6.0;
    pub const SPAWN_JITTER: f32 = 0.5;
    pub const SAFE_SPAWN_DISTANCE: f32 = 120.0;
    pub const SPAWN_ATTEMPTS: u32 = 16;

    /// Particles above this radius shatter
    pub const SUPER_BLOB_RADIUS: f32 = 60.0;
    pub const SHATTER_COUNT: usize = 6;

    /// Player
    pub const PLAYER_START_RADIUS: f32 = 10.0;
    pub const MAX_PLAYER_RADIUS: f32 = 150.0;
    pub const DEBRIS_COUNT: usize = 24;

    /// One simulation frame (forces are tuned per frame at 60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Max frames to catch up per animation callback
    pub const MAX_SUBSTEPS: u32 = 4;
}

/// Mass of a disc with the given radius
#[inline]
pub fn mass_from_radius(radius: f32) -> f32 {
    PI * radius * radius
}

/// Radius of a disc with the given mass
#[inline]
pub fn radius_from_mass(mass: f32) -> f32 {
    (mass / PI).sqrt()
}

/// Wrap a single coordinate around a `[0, extent]` axis, allowing `radius` of overhang
#[inline]
pub fn wrap_coord(value: f32, radius: f32, extent: f32) -> f32 {
    if value > extent + radius {
        -radius
    } else if value < -radius {
        extent + radius
    } else {
        value
    }
}

/// Wrap a position on a toroidal `width x height` field
#[inline]
pub fn wrap_position(pos: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        wrap_coord(pos.x, radius, width),
        wrap_coord(pos.y, radius, height),
    )
}
