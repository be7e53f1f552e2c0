//! Per-frame simulation step
//!
//! One call to [`tick`] is one atomic pass: phase input, forces, integration,
//! merges, player contacts, population fixup, effects.

use glam::Vec2;

use super::collision::{PlayerContact, resolve_merges, resolve_player_contacts};
use super::forces::{PullPolicy, apply_mutual_gravity, apply_player_gravity, apply_pointer_force};
use super::particle::Player;
use super::population::{enforce_cap, maybe_respawn, shatter_super_blobs};
use super::state::{GamePhase, SimulationEngine};

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in field coordinates (mouse or touch)
    pub pointer: Option<Vec2>,
    /// Pointer button / touch held
    pub pressed: bool,
    /// Start or restart gesture (one-shot)
    pub start: bool,
}

/// Advance the engine by one frame
pub fn tick(engine: &mut SimulationEngine, input: &TickInput) {
    if input.start && engine.phase.is_ambient() {
        start_run(engine, input.pointer);
    }

    engine.time_ticks += 1;

    // --- FORCES ---
    let config = &engine.config;
    match engine.phase {
        GamePhase::Running => {
            apply_mutual_gravity(&mut engine.particles, config, PullPolicy::Dominant);
            if let Some(player) = engine.player.as_mut() {
                apply_player_gravity(&mut player.body, &mut engine.particles, config);
            }
        }
        GamePhase::Idle | GamePhase::GameOver => {
            apply_mutual_gravity(&mut engine.particles, config, PullPolicy::Mutual);
            if let Some(pointer) = input.pointer {
                apply_pointer_force(&mut engine.particles, pointer, input.pressed, config);
            }
        }
    }

    // --- INTEGRATION ---
    let viewport = engine.viewport;
    for particle in engine.particles.iter_mut() {
        particle.update(viewport, config.damping, config.max_speed);
    }
    if let Some(player) = engine.player.as_mut() {
        player.update(input.pointer, viewport, config.player_damping, config.max_speed);
    }

    // --- MERGES ---
    for event in resolve_merges(&mut engine.particles, None) {
        engine.pop_at(event.pos, event.radius, event.hue);
    }

    if engine.phase == GamePhase::Running {
        resolve_player(engine);
    }

    // --- POPULATION ---
    shatter_super_blobs(engine);
    enforce_cap(engine);
    maybe_respawn(engine);

    // --- EFFECTS ---
    for effect in engine.effects.iter_mut() {
        effect.update();
    }
    engine.effects.retain(|e| e.life > 0.0);
}

/// Enter `Running`: fresh score, player at the pointer (or center), and a
/// cleared safe zone around it
pub fn start_run(engine: &mut SimulationEngine, pointer: Option<Vec2>) {
    let pos = pointer.unwrap_or_else(|| engine.viewport.center());
    let id = engine.next_entity_id();
    engine.player = Some(Player::new(
        id,
        pos,
        engine.config.player_start_radius,
        engine.config.player_steering,
    ));
    engine.score = 0;
    engine.phase = GamePhase::Running;

    // Relocate anything inside the safe zone so the run can't end on frame one
    let safe = engine.config.safe_spawn_distance;
    let crowded: Vec<usize> = engine
        .particles
        .iter()
        .enumerate()
        .filter(|(_, p)| p.pos.distance(pos) < safe)
        .map(|(idx, _)| idx)
        .collect();
    for idx in crowded {
        let new_pos = engine.random_spawn_position();
        engine.particles[idx].pos = new_pos;
    }

    log::info!("Run started at ({:.0}, {:.0})", pos.x, pos.y);
}

/// Player vs field: absorb smaller particles, lose to a larger one
fn resolve_player(engine: &mut SimulationEngine) {
    let max_mass = engine.config.max_player_mass();
    let Some(player) = engine.player.as_mut() else {
        return;
    };
    let contacts = resolve_player_contacts(&mut player.body, &mut engine.particles, max_mass);
    let (pos, radius, hue) = (player.body.pos, player.body.radius(), player.body.hue);

    let mut defeated = false;
    for contact in contacts {
        match contact {
            PlayerContact::Absorbed { radius: eaten } => {
                engine.score += (eaten.round() as u64).max(1);
                engine.pop_at(pos, radius, hue);
                // One in, one out: keeps the population roughly constant
                engine.spawn_random();
            }
            PlayerContact::Defeated => defeated = true,
        }
    }

    if defeated {
        engine.player = None;
        engine.phase = GamePhase::GameOver;
        engine.debris_burst(pos, hue);
        log::info!("Game over: score {} (r={:.1})", engine.score, radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::SimConfig;
    use crate::sim::state::{EffectKind, Viewport};
    use std::f32::consts::PI;

    /// Empty field, no spontaneous respawns
    fn quiet_config() -> SimConfig {
        SimConfig {
            initial_particles: 0,
            min_particles: 0,
            ambient_min_particles: 0,
            ..Default::default()
        }
    }

    fn quiet_engine() -> SimulationEngine {
        SimulationEngine::new(quiet_config(), Viewport::new(800.0, 600.0), 12345)
    }

    fn running_engine(player_pos: Vec2, player_radius: f32) -> SimulationEngine {
        let mut engine = quiet_engine();
        start_run(&mut engine, Some(player_pos));
        if let Some(player) = engine.player.as_mut() {
            player.body.set_radius(player_radius);
        }
        engine
    }

    #[test]
    fn test_stationary_pair_merges_next_frame() {
        let mut engine = quiet_engine();
        engine.spawn_particle_at(Vec2::new(400.0, 300.0), 5.0);
        engine.spawn_particle_at(Vec2::new(408.0, 300.0), 5.0);

        tick(&mut engine, &TickInput::default());

        assert_eq!(engine.particles.len(), 1);
        let merged = &engine.particles[0];
        assert!((merged.mass() - 2.0 * PI * 25.0).abs() < 1e-2);
        assert!((merged.radius() - 50f32.sqrt()).abs() < 1e-3);
        assert!(engine.effects.iter().any(|e| e.kind == EffectKind::Pop));
    }

    #[test]
    fn test_idle_to_running_on_start() {
        let mut engine = quiet_engine();
        assert_eq!(engine.phase, GamePhase::Idle);

        tick(&mut engine, &TickInput::default());
        assert_eq!(engine.phase, GamePhase::Idle);
        assert!(engine.player.is_none());

        let start = TickInput {
            pointer: Some(Vec2::new(200.0, 150.0)),
            start: true,
            ..Default::default()
        };
        tick(&mut engine, &start);
        assert_eq!(engine.phase, GamePhase::Running);
        let player = engine.player.as_ref().unwrap();
        assert!(player.body.pos.distance(Vec2::new(200.0, 150.0)) < 1.0);
        assert_eq!(engine.score, 0);
    }

    #[test]
    fn test_start_clears_safe_zone() {
        let mut engine = quiet_engine();
        engine.spawn_particle_at(Vec2::new(405.0, 300.0), 40.0);
        start_run(&mut engine, Some(Vec2::new(400.0, 300.0)));
        let safe = engine.config.safe_spawn_distance;
        assert!(engine.particles[0].pos.distance(Vec2::new(400.0, 300.0)) >= safe);
    }

    #[test]
    fn test_player_absorbs_smaller_particle() {
        let center = Vec2::new(400.0, 300.0);
        let mut engine = running_engine(center, 15.0);
        engine.spawn_particle_at(Vec2::new(410.0, 300.0), 10.0);
        let before = engine.player.as_ref().unwrap().body.mass();

        tick(&mut engine, &TickInput {
            pointer: Some(center),
            ..Default::default()
        });

        assert_eq!(engine.phase, GamePhase::Running);
        let player = engine.player.as_ref().unwrap();
        assert!((player.body.mass() - (before + PI * 100.0)).abs() < 1e-2);
        // Replacement keeps the count unchanged
        assert_eq!(engine.particles.len(), 1);
        assert!(engine.particles[0].pos.distance(player.body.pos) >= engine.config.safe_spawn_distance - 1.0);
        assert_eq!(engine.score, 10);
    }

    #[test]
    fn test_larger_particle_ends_run() {
        let center = Vec2::new(400.0, 300.0);
        let mut engine = running_engine(center, 15.0);
        engine.spawn_particle_at(Vec2::new(430.0, 300.0), 30.0);
        engine.score = 7;

        tick(&mut engine, &TickInput {
            pointer: Some(center),
            ..Default::default()
        });

        assert_eq!(engine.phase, GamePhase::GameOver);
        assert!(engine.player.is_none());
        assert_eq!(
            engine.effects.iter().filter(|e| e.kind == EffectKind::Debris).count(),
            engine.config.debris_count
        );

        // Ambient frames never touch the score
        engine.spawn_particle_at(Vec2::new(100.0, 100.0), 3.0);
        engine.spawn_particle_at(Vec2::new(104.0, 100.0), 3.0);
        for _ in 0..30 {
            tick(&mut engine, &TickInput {
                pointer: Some(Vec2::new(100.0, 100.0)),
                pressed: true,
                ..Default::default()
            });
        }
        assert_eq!(engine.score, 7);
        assert_eq!(engine.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_after_game_over() {
        let center = Vec2::new(400.0, 300.0);
        let mut engine = running_engine(center, 15.0);
        engine.spawn_particle_at(Vec2::new(430.0, 300.0), 30.0);
        engine.score = 3;
        tick(&mut engine, &TickInput::default());
        assert_eq!(engine.phase, GamePhase::GameOver);

        tick(&mut engine, &TickInput {
            pointer: Some(Vec2::new(100.0, 100.0)),
            start: true,
            ..Default::default()
        });
        assert_eq!(engine.phase, GamePhase::Running);
        assert_eq!(engine.score, 0);
        assert!(engine.player.is_some());
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut engine = running_engine(Vec2::new(400.0, 300.0), 15.0);
        let id = engine.player.as_ref().unwrap().body.id;
        engine.score = 5;
        tick(&mut engine, &TickInput {
            start: true,
            ..Default::default()
        });
        assert_eq!(engine.player.as_ref().unwrap().body.id, id);
        assert_eq!(engine.score, 5);
    }

    #[test]
    fn test_cap_holds_after_frame() {
        let config = SimConfig {
            max_particles: 40,
            initial_particles: 100,
            ..Default::default()
        };
        let mut engine = SimulationEngine::new(config, Viewport::new(800.0, 600.0), 9);
        for _ in 0..5 {
            tick(&mut engine, &TickInput::default());
            assert!(engine.particles.len() <= 40);
        }
    }

    #[test]
    fn test_effects_fade_out() {
        let mut engine = quiet_engine();
        engine.pop_at(Vec2::new(10.0, 10.0), 5.0, crate::sim::particle::Hue(0.0));
        for _ in 0..100 {
            tick(&mut engine, &TickInput::default());
        }
        assert!(engine.effects.is_empty());
    }

    #[test]
    fn test_determinism() {
        let config = SimConfig::default();
        let mut a = SimulationEngine::new(config.clone(), Viewport::new(800.0, 600.0), 99999);
        let mut b = SimulationEngine::new(config, Viewport::new(800.0, 600.0), 99999);

        let inputs = [
            TickInput {
                pointer: Some(Vec2::new(300.0, 200.0)),
                ..Default::default()
            },
            TickInput {
                pointer: Some(Vec2::new(310.0, 210.0)),
                start: true,
                ..Default::default()
            },
            TickInput {
                pointer: Some(Vec2::new(320.0, 220.0)),
                pressed: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..20 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.particles.len(), b.particles.len());
        for (pa, pb) in a.particles.iter().zip(&b.particles) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.radius(), pb.radius());
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::sim::config::SimConfig;
    use crate::sim::state::Viewport;
    use proptest::prelude::*;

    fn input_strategy() -> impl Strategy<Value = TickInput> {
        (
            proptest::option::of((0.0f32..800.0, 0.0f32..600.0)),
            any::<bool>(),
            proptest::bool::weighted(0.05),
        )
            .prop_map(|(pointer, pressed, start)| TickInput {
                pointer: pointer.map(|(x, y)| Vec2::new(x, y)),
                pressed,
                start,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn frames_preserve_invariants(
            seed in any::<u64>(),
            max_particles in 20usize..120,
            inputs in proptest::collection::vec(input_strategy(), 1..60),
        ) {
            let config = SimConfig {
                max_particles,
                initial_particles: max_particles + 10,
                ..Default::default()
            };
            let mut engine = SimulationEngine::new(config, Viewport::new(800.0, 600.0), seed);

            for input in &inputs {
                tick(&mut engine, input);

                prop_assert!(engine.particles.len() <= max_particles);
                let bodies = engine
                    .particles
                    .iter()
                    .chain(engine.player.as_ref().map(|p| &p.body));
                for body in bodies {
                    prop_assert!(body.radius() > 0.0);
                    prop_assert!(body.pos.is_finite() && body.vel.is_finite());
                    let derived = crate::radius_from_mass(body.mass());
                    prop_assert!((derived - body.radius()).abs() <= 1e-3 * body.radius().max(1.0));
                }
                if engine.phase.is_ambient() {
                    prop_assert!(engine.player.is_none());
                } else {
                    prop_assert!(engine.player.is_some());
                }
            }
        }

        #[test]
        fn ambient_merges_conserve_mass(seed in any::<u64>()) {
            // No caps, spawns, or shatters: total mass only moves between particles
            let config = SimConfig {
                initial_particles: 60,
                max_particles: 1000,
                ambient_min_particles: 0,
                super_blob_radius: f32::MAX,
                ..Default::default()
            };
            let mut engine = SimulationEngine::new(config, Viewport::new(400.0, 300.0), seed);
            let before = engine.total_mass();
            for _ in 0..30 {
                tick(&mut engine, &TickInput::default());
            }
            let after = engine.total_mass();
            prop_assert!((before - after).abs() <= before * 1e-4);
        }
    }
}
