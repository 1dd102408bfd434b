//! Pixel Snake - a grid arcade game with scrolling scenes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid movement, collisions, obstacles, particles)
//! - `app`: Screen flow (menu, playing, game over) on top of the simulation
//! - `menu`: Main menu, difficulty picker and highscore view
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native storage abstraction
//! - `audio`: Procedural tones and sound effects

pub mod app;
pub mod audio;
pub mod difficulty;
pub mod highscore;
pub mod menu;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, Key, Screen};
pub use difficulty::Difficulty;
pub use highscore::HighScore;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Edge length of one grid cell in pixels
    pub const CELL_SIZE: i32 = 20;
    /// Target render rate
    pub const RENDER_FPS: u32 = 60;
    /// Nominal frame duration in milliseconds
    pub const FRAME_MS: f32 = 1000.0 / RENDER_FPS as f32;
    /// Largest frame delta fed to the simulation (tab switches, hitches)
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Tick interval never drops below this
    pub const MIN_MOVE_DELAY_MS: u32 = 60;
    /// Tick interval reduction per level
    pub const MOVE_DELAY_STEP_MS: u32 = 10;
    /// Points needed for each level up
    pub const POINTS_PER_LEVEL: u32 = 5;

    /// Hard cap on obstacles per level
    pub const MAX_OBSTACLES: usize = 30;
    /// Placement attempts allowed per requested obstacle
    pub const OBSTACLE_ATTEMPTS_PER_SLOT: usize = 10;

    /// Particles emitted when food is eaten
    pub const EAT_PARTICLES: usize = 18;
    /// How long the game over screen holds before returning to the menu
    pub const GAME_OVER_HOLD_MS: f32 = 2000.0;

    /// Starting body in grid coordinates, head first
    pub const INITIAL_SNAKE: [(i32, i32); 3] = [(5, 5), (4, 5), (3, 5)];
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate two 8-bit RGB colors, truncating like integer pixel math
pub fn lerp_color(c1: [u8; 3], c2: [u8; 3], t: f32) -> [u8; 3] {
    [
        lerp(c1[0] as f32, c2[0] as f32, t) as u8,
        lerp(c1[1] as f32, c2[1] as f32, t) as u8,
        lerp(c1[2] as f32, c2[2] as f32, t) as u8,
    ]
}

/// Convert an 8-bit RGB color into a normalized RGBA array for the GPU
#[inline]
pub fn rgba(c: [u8; 3], alpha: f32) -> [f32; 4] {
    [
        c[0] as f32 / 255.0,
        c[1] as f32 / 255.0,
        c[2] as f32 / 255.0,
        alpha,
    ]
}
