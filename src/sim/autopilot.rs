//! Demo/headless autopilot
//!
//! Greedy: take the safe move that closes the wrapped distance to the food,
//! breaking ties by how much room the destination leaves.

use super::grid::{Cell, Direction};
use super::state::GameState;

/// Pick the direction for the next tick
pub fn choose_direction(state: &GameState) -> Direction {
    let grid = state.grid();
    let head = state.snake.head();
    let current = state.snake.direction();

    let best = Direction::ALL
        .into_iter()
        .filter(|d| !d.is_opposite(current))
        .map(|d| (d, grid.step(head, d)))
        .filter(|(_, cell)| !state.is_blocked(*cell))
        .min_by_key(|&(d, cell)| {
            let distance = grid.wrapped_distance(cell, state.food);
            let room = free_neighbors(state, cell);
            // Dead ends are a last resort; straight ahead wins ties
            (room == 0, distance, std::cmp::Reverse(room), d != current)
        });

    best.map(|(d, _)| d).unwrap_or(current)
}

fn free_neighbors(state: &GameState, cell: Cell) -> usize {
    Direction::ALL
        .into_iter()
        .map(|d| state.grid().step(cell, d))
        .filter(|c| !state.is_blocked(*c))
        .count()
}
