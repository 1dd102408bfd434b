//! Obstacle and food placement

use std::collections::HashSet;

use rand::Rng;

use super::grid::{Cell, Grid};
use crate::consts::{MAX_OBSTACLES, OBSTACLE_ATTEMPTS_PER_SLOT};

/// Random tries before food placement falls back to a scan of free cells
const FOOD_RANDOM_ATTEMPTS: usize = 64;

/// Number of obstacles requested for a level
pub fn obstacle_count(level: u32) -> usize {
    MAX_OBSTACLES.min(1 + level as usize * 2)
}

/// Scatter obstacles for `level`, never on an `avoid` cell
///
/// Gives up after `10 * count` attempts, so a crowded grid yields fewer
/// obstacles rather than stalling.
pub fn generate_obstacles<R: Rng>(
    level: u32,
    grid: &Grid,
    avoid: &HashSet<Cell>,
    rng: &mut R,
) -> Vec<Cell> {
    let count = obstacle_count(level);
    let max_tries = count * OBSTACLE_ATTEMPTS_PER_SLOT;
    let mut obstacles = Vec::with_capacity(count);
    let mut taken = HashSet::with_capacity(count);
    let mut tries = 0;

    while obstacles.len() < count && tries < max_tries {
        tries += 1;
        let cell = grid.random_cell(rng);
        if avoid.contains(&cell) || !taken.insert(cell) {
            continue;
        }
        obstacles.push(cell);
    }

    if obstacles.len() < count {
        log::debug!(
            "Placed {}/{} obstacles for level {} after {} tries",
            obstacles.len(),
            count,
            level,
            tries
        );
    }

    obstacles
}

/// Pick a free cell for food
///
/// Random probing first, then a row-major scan so a nearly full board still
/// terminates. `None` means every cell is occupied.
pub fn place_food<R: Rng>(grid: &Grid, occupied: &HashSet<Cell>, rng: &mut R) -> Option<Cell> {
    for _ in 0..FOOD_RANDOM_ATTEMPTS {
        let cell = grid.random_cell(rng);
        if !occupied.contains(&cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = grid.cells().filter(|c| !occupied.contains(c)).collect();
    if free.is_empty() {
        None
    } else {
        Some(free[rng.random_range(0..free.len())])
    }
}
