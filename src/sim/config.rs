//! Simulation tuning
//!
//! Every knob the engine reads each frame. Missing JSON fields fall back to
//! the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Integration ===
    pub damping: f32,
    pub player_damping: f32,
    pub player_steering: f32,
    pub max_speed: f32,

    // === Forces ===
    pub interaction_radius: f32,
    pub gravity: f32,
    pub min_force_distance: f32,
    pub pointer_repel_radius: f32,
    pub pointer_repel: f32,
    pub pointer_attract_radius: f32,
    pub pointer_attract: f32,
    pub pressed_multiplier: f32,

    // === Population ===
    pub max_particles: usize,
    pub min_particles: usize,
    pub spawn_chance: f32,
    pub ambient_min_particles: usize,
    pub ambient_spawn_chance: f32,
    pub initial_particles: usize,
    pub spawn_radius_min: f32,
    pub spawn_radius_max: f32,
    pub spawn_jitter: f32,
    pub safe_spawn_distance: f32,
    pub spawn_attempts: u32,
    pub super_blob_radius: f32,
    pub shatter_count: usize,

    // === Player ===
    pub player_start_radius: f32,
    pub max_player_radius: f32,
    pub debris_count: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            player_damping: PLAYER_DAMPING,
            player_steering: PLAYER_STEERING,
            max_speed: MAX_SPEED,

            interaction_radius: INTERACTION_RADIUS,
            gravity: GRAVITY,
            min_force_distance: MIN_FORCE_DISTANCE,
            pointer_repel_radius: POINTER_REPEL_RADIUS,
            pointer_repel: POINTER_REPEL,
            pointer_attract_radius: POINTER_ATTRACT_RADIUS,
            pointer_attract: POINTER_ATTRACT,
            pressed_multiplier: PRESSED_MULTIPLIER,

            max_particles: MAX_PARTICLES,
            min_particles: MIN_PARTICLES,
            spawn_chance: SPAWN_CHANCE,
            ambient_min_particles: AMBIENT_MIN_PARTICLES,
            ambient_spawn_chance: AMBIENT_SPAWN_CHANCE,
            initial_particles: INITIAL_PARTICLES,
            spawn_radius_min: SPAWN_RADIUS_MIN,
            spawn_radius_max: SPAWN_RADIUS_MAX,
            spawn_jitter: SPAWN_JITTER,
            safe_spawn_distance: SAFE_SPAWN_DISTANCE,
            spawn_attempts: SPAWN_ATTEMPTS,
            super_blob_radius: SUPER_BLOB_RADIUS,
            shatter_count: SHATTER_COUNT,

            player_start_radius: PLAYER_START_RADIUS,
            max_player_radius: MAX_PLAYER_RADIUS,
            debris_count: DEBRIS_COUNT,
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Maximum mass a player can reach (excess is discarded on absorb)
    pub fn max_player_mass(&self) -> f32 {
        crate::mass_from_radius(self.max_player_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{ "max_particles": 80, "gravity": 0.1 }"#).unwrap();
        assert_eq!(config.max_particles, 80);
        assert!((config.gravity - 0.1).abs() < 1e-6);
        assert_eq!(config.min_particles, MIN_PARTICLES);
        assert_eq!(config.damping, DAMPING);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(SimConfig::from_json("{ not json").is_err());
        assert!(SimConfig::from_json(r#"{ "max_particles": "many" }"#).is_err());
    }

    #[test]
    fn test_json_roundtrip_preserves_config() {
        let config = SimConfig {
            super_blob_radius: 42.0,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }
}
