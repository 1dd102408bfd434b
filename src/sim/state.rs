//! Game state and core simulation types

use std::collections::HashSet;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, Grid};
use super::obstacles::{generate_obstacles, place_food};
use super::particles::ParticleSystem;
use super::scene::{Fade, SceneKind};
use super::snake::Snake;

/// Per-session configuration, fixed for the lifetime of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub grid: Grid,
    /// Tick interval at level 1
    pub start_move_delay_ms: u32,
    /// Upper bound on live particles
    pub max_particles: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: Grid::new(40, 28),
            start_move_delay_ms: 140,
            max_particles: super::particles::MAX_PARTICLES,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Snake is moving
    Playing,
    /// Frozen until resumed
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Head ran into the body
    SelfCollision,
    /// Head ran into an obstacle
    Obstacle,
    /// No free cell left for food
    BoardFull,
}

/// Notable things that happened during a tick, drained by the app layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    AteFood { cell: Cell },
    LevelUp { level: u32 },
    Died { cause: DeathCause },
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SessionConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (food, obstacles)
    pub(crate) rng: Pcg32,
    /// Cosmetic RNG (particles), kept apart so visuals never shift gameplay
    pub(crate) fx_rng: Pcg32,
    pub snake: Snake,
    /// Direction applied at the next tick
    pub pending_direction: Direction,
    pub food: Cell,
    pub obstacles: Vec<Cell>,
    pub score: u32,
    pub level: u32,
    /// Current tick interval
    pub move_delay_ms: u32,
    /// Time accumulated toward the next tick
    pub move_timer_ms: f32,
    /// Logic ticks executed
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub death: Option<DeathCause>,
    pub scene: SceneKind,
    pub fade: Fade,
    pub particles: ParticleSystem,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run: spawn the snake, place food, then level 1 obstacles
    pub fn new(config: SessionConfig, seed: u64) -> Self {
        let grid = config.grid;
        let mut rng = Pcg32::seed_from_u64(seed);
        let fx_rng = Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);

        let snake = Snake::spawn(&grid);
        let occupied: HashSet<Cell> = snake.cells().copied().collect();
        let placed = place_food(&grid, &occupied, &mut rng);
        // Only reachable on a board the snake already fills
        let food = placed.unwrap_or_else(|| snake.head());

        let mut avoid = occupied;
        avoid.insert(food);
        let level = 1;
        let obstacles = generate_obstacles(level, &grid, &avoid, &mut rng);

        log::debug!(
            "New run: seed {} grid {}x{} delay {}ms, {} obstacles",
            seed,
            grid.cols,
            grid.rows,
            config.start_move_delay_ms,
            obstacles.len()
        );

        let mut state = Self {
            config,
            seed,
            rng,
            fx_rng,
            pending_direction: snake.direction(),
            snake,
            food,
            obstacles,
            score: 0,
            level,
            move_delay_ms: config.start_move_delay_ms,
            move_timer_ms: 0.0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            death: None,
            scene: SceneKind::default(),
            fade: Fade::default(),
            particles: ParticleSystem::new(config.max_particles),
            events: Vec::new(),
        };
        if placed.is_none() {
            state.end(DeathCause::BoardFull);
        }
        state
    }

    pub fn grid(&self) -> &Grid {
        &self.config.grid
    }

    /// Buffer a direction for the next tick
    ///
    /// A direct reversal of the current heading is refused and the snake
    /// keeps going straight.
    pub fn steer(&mut self, direction: Direction) {
        let current = self.snake.direction();
        self.pending_direction = if direction.is_opposite(current) {
            current
        } else {
            direction
        };
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    /// Cells that block the head: body and obstacles
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.snake.contains(cell) || self.is_obstacle(cell)
    }

    /// Moves per second at the current tick interval
    pub fn speed(&self) -> u32 {
        (1000.0 / self.move_delay_ms.max(1) as f32).round() as u32
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn end(&mut self, cause: DeathCause) {
        log::info!(
            "Game over ({:?}) - score {}, level {}, length {}",
            cause,
            self.score,
            self.level,
            self.snake.len()
        );
        self.phase = GamePhase::GameOver;
        self.death = Some(cause);
        self.events.push(GameEvent::Died { cause });
    }
}
