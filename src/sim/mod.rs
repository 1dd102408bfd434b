//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the frame delta passed to `tick`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod grid;
pub mod obstacles;
pub mod particles;
pub mod scene;
pub mod snake;
pub mod state;
pub mod tick;

pub use grid::{Cell, Direction, Grid};
pub use obstacles::{generate_obstacles, obstacle_count, place_food};
pub use particles::{MAX_PARTICLES, Particle, ParticleSystem};
pub use scene::{Decoration, Fade, SceneKind};
pub use snake::Snake;
pub use state::{DeathCause, GameEvent, GamePhase, GameState, SessionConfig};
pub use tick::{TickInput, step, tick};
