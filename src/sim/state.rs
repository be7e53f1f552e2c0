//! Engine state and core simulation types
//!
//! Everything a frame reads or writes lives on [`SimulationEngine`]. There is
//! no ambient global state, so independent engines can run side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::particle::{Hue, Particle, Player};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started yet; ambient mode
    Idle,
    /// Player is alive and scoring
    Running,
    /// Player was absorbed; ambient mode until restart
    GameOver,
}

impl GamePhase {
    /// Idle and GameOver keep the field animating without a player
    pub fn is_ambient(&self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}

/// Visible field size in logical units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Cosmetic effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Expanding ring at a merge site
    Pop,
    /// Small dot thrown out when the player is absorbed
    Debris,
}

/// A purely visual effect (never affects the simulation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hue: Hue,
    /// 1.0 when spawned, removed at 0
    pub life: f32,
}

impl Effect {
    /// Advance one frame
    pub fn update(&mut self) {
        match self.kind {
            EffectKind::Pop => {
                self.radius += 1.5;
                self.life -= 0.05;
            }
            EffectKind::Debris => {
                self.pos += self.vel;
                self.vel *= 0.96;
                self.life -= 0.02;
            }
        }
    }
}

/// Maximum live effects
pub const MAX_EFFECTS: usize = 256;

/// The simulation context: particles, optional player, score and phase
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    pub config: SimConfig,
    pub viewport: Viewport,
    pub phase: GamePhase,
    /// Field particles in insertion order (oldest first)
    pub particles: Vec<Particle>,
    pub player: Option<Player>,
    pub score: u64,
    /// Frames advanced since construction
    pub time_ticks: u64,
    /// Visual effects (not gameplay-affecting)
    pub effects: Vec<Effect>,
    pub(crate) rng: Pcg32,
    next_id: u64,
}

impl SimulationEngine {
    /// Create an idle engine seeded for reproducibility and fill the initial field
    pub fn new(config: SimConfig, viewport: Viewport, seed: u64) -> Self {
        Self::with_rng(config, viewport, Pcg32::seed_from_u64(seed))
    }

    /// Create an engine around an existing random source
    pub fn with_rng(config: SimConfig, viewport: Viewport, rng: Pcg32) -> Self {
        let mut engine = Self {
            config,
            viewport,
            phase: GamePhase::Idle,
            particles: Vec::new(),
            player: None,
            score: 0,
            time_ticks: 0,
            effects: Vec::new(),
            rng,
            next_id: 1,
        };
        for _ in 0..engine.config.initial_particles {
            engine.spawn_random();
        }
        engine
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Apply a new viewport size; wrapping and spawning use it from the next frame
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Add a particle at an exact position (at rest, random hue)
    pub fn spawn_particle_at(&mut self, pos: Vec2, radius: f32) -> u64 {
        let id = self.next_entity_id();
        let hue = Hue(self.rng.random_range(0.0..360.0));
        self.particles.push(Particle::new(id, pos, Vec2::ZERO, radius, hue));
        id
    }

    /// Add a freshly randomized particle, kept clear of the player
    pub fn spawn_random(&mut self) -> u64 {
        let pos = self.random_spawn_position();
        let config = &self.config;
        let (r_min, r_max) = (config.spawn_radius_min, config.spawn_radius_max.max(config.spawn_radius_min));
        let jitter = config.spawn_jitter;

        let radius = if r_max > r_min {
            self.rng.random_range(r_min..r_max)
        } else {
            r_min
        };
        let vel = if jitter > 0.0 {
            Vec2::new(
                self.rng.random_range(-jitter..jitter),
                self.rng.random_range(-jitter..jitter),
            )
        } else {
            Vec2::ZERO
        };
        let hue = Hue(self.rng.random_range(0.0..360.0));

        let id = self.next_entity_id();
        self.particles.push(Particle::new(id, pos, vel, radius, hue));
        id
    }

    /// Uniform-random point; rejects points too close to the player and
    /// falls back to the player's toroidal antipode
    pub fn random_spawn_position(&mut self) -> Vec2 {
        let Viewport { width, height } = self.viewport;
        let Some(player_pos) = self.player.as_ref().map(|p| p.body.pos) else {
            return Vec2::new(self.rng.random_range(0.0..width), self.rng.random_range(0.0..height));
        };

        let safe = self.config.safe_spawn_distance;
        for _ in 0..self.config.spawn_attempts {
            let candidate =
                Vec2::new(self.rng.random_range(0.0..width), self.rng.random_range(0.0..height));
            if candidate.distance(player_pos) >= safe {
                return candidate;
            }
        }

        Vec2::new(
            (player_pos.x + width / 2.0).rem_euclid(width),
            (player_pos.y + height / 2.0).rem_euclid(height),
        )
    }

    /// Queue a cosmetic effect, evicting the oldest when full
    pub fn push_effect(&mut self, effect: Effect) {
        if self.effects.len() >= MAX_EFFECTS {
            self.effects.remove(0);
        }
        self.effects.push(effect);
    }

    /// Ring at a merge site
    pub fn pop_at(&mut self, pos: Vec2, radius: f32, hue: Hue) {
        self.push_effect(Effect {
            kind: EffectKind::Pop,
            pos,
            vel: Vec2::ZERO,
            radius,
            hue,
            life: 1.0,
        });
    }

    /// Burst of debris thrown outward from `pos`
    pub fn debris_burst(&mut self, pos: Vec2, hue: Hue) {
        for _ in 0..self.config.debris_count {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(1.0..6.0);
            let radius = self.rng.random_range(1.0..3.5);
            self.push_effect(Effect {
                kind: EffectKind::Debris,
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                radius,
                hue,
                life: 1.0,
            });
        }
    }

    /// Total mass of field particles plus the player
    pub fn total_mass(&self) -> f32 {
        let field: f32 = self.particles.iter().map(Particle::mass).sum();
        field + self.player.as_ref().map_or(0.0, |p| p.body.mass())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_config() -> SimConfig {
        SimConfig {
            initial_particles: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_engine_is_idle_and_populated() {
        let engine = SimulationEngine::new(SimConfig::default(), Viewport::new(800.0, 600.0), 7);
        assert_eq!(engine.phase, GamePhase::Idle);
        assert!(engine.player.is_none());
        assert_eq!(engine.particles.len(), SimConfig::default().initial_particles);
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = SimulationEngine::new(SimConfig::default(), Viewport::new(800.0, 600.0), 42);
        let b = SimulationEngine::new(SimConfig::default(), Viewport::new(800.0, 600.0), 42);
        for (pa, pb) in a.particles.iter().zip(&b.particles) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.radius(), pb.radius());
        }
    }

    #[test]
    fn test_spawns_stay_in_bounds_and_in_radius_range() {
        let mut engine = SimulationEngine::new(empty_config(), Viewport::new(320.0, 240.0), 3);
        for _ in 0..200 {
            engine.spawn_random();
        }
        let config = &engine.config;
        for p in &engine.particles {
            assert!(p.pos.x >= 0.0 && p.pos.x <= 320.0);
            assert!(p.pos.y >= 0.0 && p.pos.y <= 240.0);
            assert!(p.radius() >= config.spawn_radius_min && p.radius() <= config.spawn_radius_max);
        }
    }

    #[test]
    fn test_spawns_avoid_player() {
        let mut engine = SimulationEngine::new(empty_config(), Viewport::new(800.0, 600.0), 11);
        engine.player = Some(Player::new(999, Vec2::new(400.0, 300.0), 10.0, 0.02));
        for _ in 0..300 {
            let pos = engine.random_spawn_position();
            assert!(pos.distance(Vec2::new(400.0, 300.0)) >= engine.config.safe_spawn_distance);
        }
    }

    #[test]
    fn test_spawn_relocates_when_field_is_crowded() {
        // Safe zone covers the whole field: every candidate is rejected
        let config = SimConfig {
            safe_spawn_distance: 10_000.0,
            ..empty_config()
        };
        let mut engine = SimulationEngine::new(config, Viewport::new(800.0, 600.0), 5);
        engine.player = Some(Player::new(999, Vec2::new(100.0, 50.0), 10.0, 0.02));
        assert_eq!(engine.random_spawn_position(), Vec2::new(500.0, 350.0));
    }

    #[test]
    fn test_effects_are_capped() {
        let mut engine = SimulationEngine::new(empty_config(), Viewport::new(800.0, 600.0), 1);
        for i in 0..(MAX_EFFECTS + 10) {
            engine.pop_at(Vec2::new(i as f32, 0.0), 1.0, Hue(0.0));
        }
        assert_eq!(engine.effects.len(), MAX_EFFECTS);
        // Oldest evicted first
        assert_eq!(engine.effects[0].pos.x, 10.0);
    }

    #[test]
    fn test_resize_clamps_to_positive() {
        let mut engine = SimulationEngine::new(empty_config(), Viewport::new(800.0, 600.0), 1);
        engine.resize(0.0, -5.0);
        assert!(engine.viewport.width > 0.0 && engine.viewport.height > 0.0);
    }
}
