//! Frame update and fixed-interval logic tick
//!
//! `tick` is called once per rendered frame with the elapsed milliseconds;
//! the snake only moves when the accumulated time reaches the tick interval.

use std::collections::HashSet;

use super::autopilot;
use super::grid::{Cell, Direction};
use super::obstacles::{generate_obstacles, place_food};
use super::state::{DeathCause, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Food burst color
pub const PARTICLE_COLOR: [u8; 3] = [255, 200, 50];

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Last direction key pressed this frame
    pub direction: Option<Direction>,
    /// Pause toggle
    pub pause: bool,
    /// Let the autopilot steer
    pub autopilot: bool,
}

/// Advance the game state by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused at tick {}", state.time_ticks);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::debug!("Resumed at tick {}", state.time_ticks);
            }
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    if let Some(direction) = input.direction {
        state.steer(direction);
    }
    if input.autopilot {
        let direction = autopilot::choose_direction(state);
        state.steer(direction);
    }

    state.move_timer_ms += dt_ms;
    if state.move_timer_ms >= state.move_delay_ms as f32 {
        state.move_timer_ms = 0.0;
        step(state);
    }

    state.particles.update(dt_ms);
    state.fade.update(dt_ms);
}

/// One logic tick: move, collide, eat
pub fn step(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    let direction = state.pending_direction;
    state.snake.set_direction(direction);
    let new_head = state.grid().step(state.snake.head(), direction);

    if state.snake.contains(new_head) {
        state.end(DeathCause::SelfCollision);
        return;
    }
    if state.is_obstacle(new_head) {
        state.end(DeathCause::Obstacle);
        return;
    }

    let ate = new_head == state.food;
    state.snake.advance(new_head, ate);

    if ate {
        eat(state, new_head);
    }
}

fn occupied_cells(state: &GameState) -> HashSet<Cell> {
    state.snake.cells().copied().collect()
}

fn eat(state: &mut GameState, cell: Cell) {
    state.score += 1;
    state.events.push(GameEvent::AteFood { cell });
    state
        .particles
        .burst(cell.center(), PARTICLE_COLOR, EAT_PARTICLES, &mut state.fx_rng);

    let mut occupied = occupied_cells(state);
    occupied.extend(state.obstacles.iter().copied());
    let grid = state.config.grid;
    match place_food(&grid, &occupied, &mut state.rng) {
        Some(food) => state.food = food,
        None => {
            state.end(DeathCause::BoardFull);
            return;
        }
    }

    if state.score % POINTS_PER_LEVEL == 0 {
        level_up(state);
    }
}

fn level_up(state: &mut GameState) {
    state.move_delay_ms = state
        .move_delay_ms
        .saturating_sub(MOVE_DELAY_STEP_MS)
        .max(MIN_MOVE_DELAY_MS);
    state.scene = state.scene.next();
    state.fade.start();
    state.level += 1;

    let mut avoid = occupied_cells(state);
    avoid.insert(state.food);
    let grid = state.config.grid;
    state.obstacles = generate_obstacles(state.level, &grid, &avoid, &mut state.rng);

    log::info!(
        "Level {} - delay {}ms, scene {}, {} obstacles",
        state.level,
        state.move_delay_ms,
        state.scene.name(),
        state.obstacles.len()
    );
    state.events.push(GameEvent::LevelUp { level: state.level });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Grid;
    use crate::sim::scene::SceneKind;
    use crate::sim::snake::Snake;
    use crate::sim::state::SessionConfig;

    fn state() -> GameState {
        let mut state = GameState::new(SessionConfig::default(), 12345);
        state.obstacles.clear();
        state.food = Cell::at(20, 20);
        state
    }

    /// Put food right in front of the head and take one step
    fn feed(state: &mut GameState) {
        let ahead = state.grid().step(state.snake.head(), state.pending_direction);
        state.food = ahead;
        state.obstacles.retain(|o| *o != ahead);
        step(state);
    }

    #[test]
    fn test_waits_for_interval() {
        let mut state = state();
        let input = TickInput::default();
        tick(&mut state, &input, 100.0);
        assert_eq!(state.snake.head(), Cell::at(5, 5));
        tick(&mut state, &input, 40.0);
        assert_eq!(state.snake.head(), Cell::at(6, 5));
        assert_eq!(state.move_timer_ms, 0.0);
    }

    #[test]
    fn test_reversal_input_ignored() {
        let mut state = state();
        let input = TickInput {
            direction: Some(Direction::Left),
            ..Default::default()
        };
        tick(&mut state, &input, 140.0);
        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.snake.head(), Cell::at(6, 5));
    }

    #[test]
    fn test_turn_applies_on_next_tick() {
        let mut state = state();
        state.steer(Direction::Down);
        assert_eq!(state.snake.direction(), Direction::Right);
        step(&mut state);
        assert_eq!(state.snake.head(), Cell::at(5, 6));
        assert_eq!(state.snake.direction(), Direction::Down);
    }

    #[test]
    fn test_wraps_instead_of_dying() {
        let mut state = state();
        state.snake = Snake::new([Cell::at(39, 3), Cell::at(38, 3)], Direction::Right).expect("body");
        state.pending_direction = Direction::Right;
        step(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.snake.head(), Cell::at(0, 3));
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = state();
        feed(&mut state);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
        assert!(!state.snake.contains(state.food));
        assert_eq!(state.particles.len(), EAT_PARTICLES);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::AteFood { cell: Cell::at(6, 5) }]
        );
    }

    #[test]
    fn test_plain_step_does_not_score() {
        let mut state = state();
        step(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_level_up_every_five_points() {
        let mut state = state();
        for _ in 0..4 {
            feed(&mut state);
        }
        assert_eq!(state.level, 1);
        assert_eq!(state.scene, SceneKind::Stars);

        feed(&mut state);
        assert_eq!(state.score, 5);
        assert_eq!(state.level, 2);
        assert_eq!(state.move_delay_ms, 130);
        assert_eq!(state.scene, SceneKind::Leaves);
        assert!(state.fade.is_active());
        assert!(state.obstacles.len() <= 5);
        assert!(state.obstacles.iter().all(|o| !state.snake.contains(*o) && *o != state.food));
        assert!(state.drain_events().contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_delay_floor() {
        let mut state = GameState::new(
            SessionConfig {
                start_move_delay_ms: 90,
                ..Default::default()
            },
            8,
        );
        for _ in 0..40 {
            feed(&mut state);
            // Feeding can end the run if the wrapped path hits the body
            if state.is_over() {
                break;
            }
        }
        assert!(state.move_delay_ms >= MIN_MOVE_DELAY_MS);
        assert!(state.score >= 20);
        assert_eq!(state.move_delay_ms, MIN_MOVE_DELAY_MS);
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut state = state();
        // Head at (5,5) moving up into its own body
        state.snake = Snake::new(
            [
                Cell::at(5, 5),
                Cell::at(6, 5),
                Cell::at(6, 4),
                Cell::at(5, 4),
                Cell::at(4, 4),
            ],
            Direction::Left,
        )
        .expect("body");
        state.pending_direction = Direction::Up;
        step(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.death, Some(DeathCause::SelfCollision));
    }

    #[test]
    fn test_tail_cell_counts_as_body() {
        let mut state = state();
        state.snake = Snake::new(
            [Cell::at(5, 5), Cell::at(5, 6), Cell::at(6, 6), Cell::at(6, 5)],
            Direction::Up,
        )
        .expect("body");
        state.pending_direction = Direction::Right;
        step(&mut state);
        assert_eq!(state.death, Some(DeathCause::SelfCollision));
    }

    #[test]
    fn test_obstacle_collision_ends_game() {
        let mut state = state();
        state.obstacles = vec![Cell::at(6, 5)];
        step(&mut state);
        assert_eq!(state.death, Some(DeathCause::Obstacle));
        assert!(state.drain_events().contains(&GameEvent::Died {
            cause: DeathCause::Obstacle
        }));

        // Further ticks do nothing
        let head = state.snake.head();
        tick(&mut state, &TickInput::default(), 1000.0);
        assert_eq!(state.snake.head(), head);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = state();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 200.0);
        assert_eq!(state.phase, GamePhase::Paused);
        tick(&mut state, &TickInput::default(), 1000.0);
        assert_eq!(state.snake.head(), Cell::at(5, 5));

        tick(&mut state, &pause, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_board_full_ends_game() {
        let grid = Grid::new(2, 2);
        let mut state = GameState::new(
            SessionConfig {
                grid,
                ..Default::default()
            },
            1,
        );
        state.obstacles.clear();
        state.snake = Snake::new([Cell::at(0, 0), Cell::at(1, 0), Cell::at(1, 1)], Direction::Left)
            .expect("body");
        state.pending_direction = Direction::Down;
        state.food = Cell::at(0, 1);
        step(&mut state);
        assert_eq!(state.score, 1);
        assert_eq!(state.death, Some(DeathCause::BoardFull));
    }

    #[test]
    fn test_autopilot_input_steers() {
        let mut state = state();
        state.food = Cell::at(5, 12);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input, 140.0);
        assert_eq!(state.snake.head(), Cell::at(5, 6));
    }
}
