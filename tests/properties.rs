//! Property tests for the simulation rules

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use pixel_snake::consts::{CELL_SIZE, MIN_MOVE_DELAY_MS, MOVE_DELAY_STEP_MS};
use pixel_snake::sim::{
    Cell, Direction, GameEvent, GameState, Grid, SessionConfig, Snake, generate_obstacles,
    obstacle_count, step,
};

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn grid() -> impl Strategy<Value = Grid> {
    (8u32..60, 8u32..40).prop_map(|(cols, rows)| Grid::new(cols, rows))
}

fn session(grid: Grid, delay: u32) -> SessionConfig {
    SessionConfig {
        grid,
        start_move_delay_ms: delay,
        ..Default::default()
    }
}

fn has_duplicates(state: &GameState) -> bool {
    let cells: HashSet<Cell> = state.snake.cells().copied().collect();
    cells.len() != state.snake.len()
}

proptest! {
    #[test]
    fn wrap_stays_on_the_board(grid in grid(), x in -10_000i32..10_000, y in -10_000i32..10_000) {
        let cell = grid.wrap(x, y);
        prop_assert!(cell.x >= 0 && cell.x < grid.width());
        prop_assert!(cell.y >= 0 && cell.y < grid.height());
        prop_assert_eq!(cell.x % CELL_SIZE, 0);
        prop_assert_eq!(cell.y % CELL_SIZE, 0);
        prop_assert!(grid.contains(cell));
    }

    #[test]
    fn obstacles_respect_cap_and_avoid_cells(grid in grid(), level in 1u32..40, seed in any::<u64>()) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let snake = Snake::spawn(&grid);
        let mut avoid: HashSet<Cell> = snake.cells().copied().collect();
        avoid.insert(grid.random_cell(&mut rng));

        let obstacles = generate_obstacles(level, &grid, &avoid, &mut rng);

        prop_assert!(obstacles.len() <= obstacle_count(level));
        prop_assert!(obstacle_count(level) <= 30);
        let unique: HashSet<Cell> = obstacles.iter().copied().collect();
        prop_assert_eq!(unique.len(), obstacles.len());
        for cell in &obstacles {
            prop_assert!(!avoid.contains(cell));
            prop_assert!(grid.contains(*cell));
        }
    }

    #[test]
    fn reversal_is_ignored(first in direction(), seed in any::<u64>()) {
        let mut state = GameState::new(SessionConfig::default(), seed);
        state.steer(first);
        step(&mut state);
        prop_assume!(!state.is_over());

        let heading = state.snake.direction();
        state.steer(heading.opposite());
        prop_assert_eq!(state.pending_direction, heading);
    }

    #[test]
    fn random_play_keeps_invariants(
        grid in grid(),
        seed in any::<u64>(),
        moves in prop::collection::vec(direction(), 1..200),
    ) {
        let mut state = GameState::new(session(grid, 140), seed);
        prop_assert!(!state.is_blocked(state.food));

        for dir in moves {
            let score = state.score;
            let len = state.snake.len();

            state.steer(dir);
            step(&mut state);
            let events = state.drain_events();
            let ate = events.iter().any(|e| matches!(e, GameEvent::AteFood { .. }));

            if ate {
                prop_assert_eq!(state.score, score + 1);
                prop_assert_eq!(state.snake.len(), len + 1);
            } else {
                prop_assert_eq!(state.score, score);
            }
            prop_assert!(state.move_delay_ms >= MIN_MOVE_DELAY_MS);

            if state.is_over() {
                break;
            }
            prop_assert!(!has_duplicates(&state));
            prop_assert!(!state.is_obstacle(state.snake.head()));
            prop_assert!(!state.is_blocked(state.food));
        }
    }

    #[test]
    fn small_boards_start_clean(cols in 1u32..8, rows in 1u32..8, seed in any::<u64>()) {
        let state = GameState::new(session(Grid::new(cols, rows), 140), seed);
        prop_assert!(!has_duplicates(&state));
        prop_assert!(state.snake.cells().all(|c| state.grid().contains(*c)));
        if !state.is_over() {
            prop_assert!(!state.is_blocked(state.food));
        }
    }

    #[test]
    fn delay_floor_under_constant_eating(seed in any::<u64>(), start in 60u32..200) {
        let mut state = GameState::new(session(Grid::new(50, 36), start), seed);

        for _ in 0..80 {
            let ahead = state.grid().step(state.snake.head(), state.pending_direction);
            if state.is_blocked(ahead) {
                break;
            }
            state.food = ahead;
            let score = state.score;
            step(&mut state);
            if state.is_over() {
                break;
            }
            prop_assert_eq!(state.score, score + 1);

            let expected = start
                .saturating_sub(MOVE_DELAY_STEP_MS * (state.level - 1))
                .max(MIN_MOVE_DELAY_MS);
            prop_assert_eq!(state.move_delay_ms, expected);
            prop_assert!(state.move_delay_ms >= MIN_MOVE_DELAY_MS);
        }
    }
}
