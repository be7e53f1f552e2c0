//! Simulation module
//!
//! All field logic lives here. This module stays free of rendering and
//! platform code:
//! - Implicit unit timestep (one call to `tick` per displayed frame)
//! - Seeded RNG only
//! - Stable iteration order (insertion order, oldest first)

pub mod collision;
pub mod config;
pub mod forces;
pub mod particle;
pub mod population;
pub mod state;
pub mod tick;

pub use collision::{MergeEvent, PlayerContact, merge, resolve_merges, resolve_player_contacts};
pub use config::SimConfig;
pub use forces::{PullPolicy, apply_mutual_gravity, apply_player_gravity, apply_pointer_force};
pub use particle::{Hue, PLAYER_HUE, Particle, Player};
pub use population::{enforce_cap, maybe_respawn, shatter_super_blobs};
pub use state::{Effect, EffectKind, GamePhase, MAX_EFFECTS, SimulationEngine, Viewport};
pub use tick::{TickInput, start_run, tick};
