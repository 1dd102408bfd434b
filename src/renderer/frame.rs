//! CPU side of a frame: pack the app state into GPU structs
//!
//! Everything here is plain data so it can be unit tested without a device.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::app::{App, Screen};
use crate::consts::CELL_SIZE;
use crate::difficulty::Difficulty;
use crate::sim::{GamePhase, GameState, MAX_PARTICLES};
use crate::{lerp_color, rgba};

/// Most decorations any scene produces
pub const MAX_DECORATIONS: usize = 32;

/// Cell kinds in the low byte of each grid word
pub const CELL_EMPTY: u32 = 0;
pub const CELL_OBSTACLE: u32 = 1;
pub const CELL_HEAD: u32 = 2;
pub const CELL_BODY: u32 = 3;

/// Draw modes
pub const MODE_MENU: u32 = 0;
pub const MODE_PLAYING: u32 = 1;
pub const MODE_PAUSED: u32 = 2;
pub const MODE_GAME_OVER: u32 = 3;

const SNAKE_GREEN: [u8; 3] = [50, 220, 100];
const SNAKE_DARK: [u8; 3] = [20, 120, 60];
const SNAKE_HEAD: [u8; 3] = [255, 80, 80];

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct Globals {
    pub resolution: [f32; 2], // offset 0
    pub playfield: [f32; 2],  // offset 8 - playfield size in pixels
    pub grid_size: [u32; 2],  // offset 16
    pub time: f32,            // offset 24
    pub cell_size: f32,       // offset 28
    pub food_pos: [f32; 2],   // offset 32 - food cell top-left
    pub eye_pos: [f32; 2],    // offset 40
    pub dim: f32,             // offset 48 - darken for pause/game over
    pub _pad0: f32,           // offset 52
    pub fade: f32,            // offset 56 - scene change overlay
    pub food_scale: f32,      // offset 60
    pub background: [f32; 4], // offset 64
    pub particle_count: u32,  // offset 80
    pub decoration_count: u32, // offset 84
    pub mode: u32,            // offset 88
    pub show_food: u32,       // offset 92
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct ParticleData {
    pub pos: [f32; 2],
    pub radius: f32,
    pub alpha: f32,
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct DecorationData {
    pub pos: [f32; 2],
    pub half_size: [f32; 2],
    pub color: [f32; 4],
}

/// Everything uploaded for one frame
#[derive(Debug, Clone)]
pub struct FrameData {
    pub globals: Globals,
    /// One word per grid cell, row-major
    pub cells: Vec<u32>,
    pub particles: Vec<ParticleData>,
    pub decorations: Vec<DecorationData>,
}

/// Pack a cell kind and its color into one word
pub fn pack_cell(kind: u32, color: [u8; 3]) -> u32 {
    kind | (color[0] as u32) << 8 | (color[1] as u32) << 16 | (color[2] as u32) << 24
}

/// Body color for segment `i` of `len`, head first
pub fn segment_color(i: usize, len: usize) -> [u8; 3] {
    let t = i as f32 / len.saturating_sub(1).max(1) as f32;
    let target = if i == 0 { SNAKE_HEAD } else { SNAKE_DARK };
    lerp_color(SNAKE_GREEN, target, 1.0 - t * 0.6)
}

/// Food size multiplier at time `t` seconds
pub fn food_pulse(t: f32) -> f32 {
    1.0 + 0.15 * (t * 8.0).sin()
}

/// Eye center in pixels, pushed toward the heading
fn eye_position(state: &GameState) -> [f32; 2] {
    const EYE_OFFSET: f32 = 6.0;
    let head = state.snake.head();
    let eye = head.center() + state.snake.direction().unit() * EYE_OFFSET - Vec2::splat(4.0);
    [eye.x, eye.y]
}

/// Build the frame for the current screen
pub fn build_frame(app: &App, resolution: (u32, u32)) -> FrameData {
    let time = app.time_s();
    let settings = app.settings();
    let resolution = [resolution.0 as f32, resolution.1 as f32];

    let game = match (app.screen(), app.game()) {
        (Screen::Menu, _) | (_, None) => {
            let grid = Difficulty::default().grid();
            return FrameData {
                globals: Globals {
                    resolution,
                    playfield: [grid.width() as f32, grid.height() as f32],
                    grid_size: [grid.cols, grid.rows],
                    time,
                    cell_size: CELL_SIZE as f32,
                    background: [6.0 / 255.0, 6.0 / 255.0, 12.0 / 255.0, 1.0],
                    mode: MODE_MENU,
                    ..Globals::default()
                },
                cells: Vec::new(),
                particles: Vec::new(),
                decorations: Vec::new(),
            };
        }
        (_, Some(game)) => game,
    };

    let grid = *game.grid();
    let mut cells = vec![CELL_EMPTY; grid.cell_count()];
    let index = |x: i32, y: i32| (y / CELL_SIZE) as usize * grid.cols as usize + (x / CELL_SIZE) as usize;

    for obstacle in &game.obstacles {
        if grid.contains(*obstacle) {
            cells[index(obstacle.x, obstacle.y)] = pack_cell(CELL_OBSTACLE, [60, 60, 70]);
        }
    }
    let len = game.snake.len();
    // Tail first so the head wins if anything overlaps
    for (i, cell) in game.snake.cells().enumerate().collect::<Vec<_>>().into_iter().rev() {
        if grid.contains(*cell) {
            let kind = if i == 0 { CELL_HEAD } else { CELL_BODY };
            cells[index(cell.x, cell.y)] = pack_cell(kind, segment_color(i, len));
        }
    }

    let particles: Vec<ParticleData> = game
        .particles
        .iter()
        .take(MAX_PARTICLES)
        .map(|p| ParticleData {
            pos: [p.pos.x, p.pos.y],
            radius: p.radius(),
            alpha: p.fade(),
            color: rgba(p.color, 1.0),
        })
        .collect();

    let decorations: Vec<DecorationData> = if settings.quality.decorations_enabled() {
        game.scene
            .decorations(time, grid.width(), grid.height())
            .into_iter()
            .take(MAX_DECORATIONS)
            .map(|d| DecorationData {
                pos: [d.center.x, d.center.y],
                half_size: [d.half_size.x, d.half_size.y],
                color: rgba(d.color, 1.0),
            })
            .collect()
    } else {
        Vec::new()
    };

    let (mode, dim) = match (app.screen(), game.phase) {
        (Screen::GameOver { .. }, _) | (_, GamePhase::GameOver) => (MODE_GAME_OVER, 0.6),
        (_, GamePhase::Paused) => (MODE_PAUSED, 0.4),
        _ => (MODE_PLAYING, 0.0),
    };

    let fade = if settings.scene_fade { game.fade.opacity() } else { 0.0 };

    FrameData {
        globals: Globals {
            resolution,
            playfield: [grid.width() as f32, grid.height() as f32],
            grid_size: [grid.cols, grid.rows],
            time,
            cell_size: CELL_SIZE as f32,
            food_pos: [game.food.x as f32, game.food.y as f32],
            eye_pos: eye_position(game),
            dim,
            _pad0: 0.0,
            fade,
            food_scale: food_pulse(time),
            background: rgba(game.scene.background(), 1.0),
            particle_count: particles.len() as u32,
            decoration_count: decorations.len() as u32,
            mode,
            show_food: u32::from(!game.is_over()),
        },
        cells,
        particles,
        decorations,
    }
}
