//! Grid geometry: cells, directions and toroidal wrapping

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::CELL_SIZE;

/// A grid-aligned position in playfield pixels (top-left corner of the cell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell at grid column/row
    pub const fn at(col: i32, row: i32) -> Self {
        Self {
            x: col * CELL_SIZE,
            y: row * CELL_SIZE,
        }
    }

    /// Center of the cell in pixels
    pub fn center(&self) -> Vec2 {
        let half = CELL_SIZE as f32 / 2.0;
        Vec2::new(self.x as f32 + half, self.y as f32 + half)
    }

    /// Grid column/row of this cell
    pub fn grid_coords(&self) -> (i32, i32) {
        (self.x / CELL_SIZE, self.y / CELL_SIZE)
    }
}

/// Movement direction, screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Step in grid cells
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit vector for rendering (eye offset etc.)
    pub fn unit(self) -> Vec2 {
        let (dx, dy) = self.delta();
        Vec2::new(dx as f32, dy as f32)
    }
}

/// Playfield dimensions; positions wrap at the edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub cols: u32,
    pub rows: u32,
}

impl Grid {
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Pixel width of the playfield
    pub fn width(&self) -> i32 {
        self.cols as i32 * CELL_SIZE
    }

    /// Pixel height of the playfield
    pub fn height(&self) -> i32 {
        self.rows as i32 * CELL_SIZE
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Wrap a pixel position onto the torus and snap it to its cell
    pub fn wrap(&self, x: i32, y: i32) -> Cell {
        let wx = x.rem_euclid(self.width());
        let wy = y.rem_euclid(self.height());
        Cell::new(wx - wx % CELL_SIZE, wy - wy % CELL_SIZE)
    }

    /// Neighbor of `from` one cell in `dir`, wrapped
    pub fn step(&self, from: Cell, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        self.wrap(from.x + dx * CELL_SIZE, from.y + dy * CELL_SIZE)
    }

    /// True if the cell is aligned and inside the playfield
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < self.width()
            && cell.y < self.height()
            && cell.x % CELL_SIZE == 0
            && cell.y % CELL_SIZE == 0
    }

    /// Uniformly random cell
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        let col = rng.random_range(0..self.cols) as i32;
        let row = rng.random_range(0..self.rows) as i32;
        Cell::at(col, row)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows as i32).flat_map(move |row| (0..self.cols as i32).map(move |col| Cell::at(col, row)))
    }

    /// Manhattan distance in cells, taking the shorter way around each axis
    pub fn wrapped_distance(&self, a: Cell, b: Cell) -> u32 {
        let (ax, ay) = a.grid_coords();
        let (bx, by) = b.grid_coords();
        let dx = (ax - bx).unsigned_abs();
        let dy = (ay - by).unsigned_abs();
        dx.min(self.cols - dx) + dy.min(self.rows - dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_wrap_negative_and_overflow() {
        let grid = Grid::new(40, 28);
        assert_eq!(grid.wrap(-CELL_SIZE, 0), Cell::at(39, 0));
        assert_eq!(grid.wrap(grid.width(), grid.height()), Cell::at(0, 0));
        assert_eq!(grid.wrap(0, -CELL_SIZE), Cell::at(0, 27));
    }

    #[test]
    fn test_step_wraps_every_edge() {
        let grid = Grid::new(10, 8);
        assert_eq!(grid.step(Cell::at(9, 3), Direction::Right), Cell::at(0, 3));
        assert_eq!(grid.step(Cell::at(0, 3), Direction::Left), Cell::at(9, 3));
        assert_eq!(grid.step(Cell::at(4, 0), Direction::Up), Cell::at(4, 7));
        assert_eq!(grid.step(Cell::at(4, 7), Direction::Down), Cell::at(4, 0));
    }

    #[test]
    fn test_opposites() {
        for dir in Direction::ALL {
            assert!(dir.is_opposite(dir.opposite()));
            assert!(!dir.is_opposite(dir));
        }
    }

    #[test]
    fn test_random_cell_is_aligned() {
        let grid = Grid::new(30, 20);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            assert!(grid.contains(grid.random_cell(&mut rng)));
        }
    }

    #[test]
    fn test_wrapped_distance_takes_short_way() {
        let grid = Grid::new(10, 10);
        assert_eq!(grid.wrapped_distance(Cell::at(0, 0), Cell::at(9, 0)), 1);
        assert_eq!(grid.wrapped_distance(Cell::at(2, 2), Cell::at(4, 5)), 5);
    }

    #[test]
    fn test_cells_covers_grid() {
        let grid = Grid::new(3, 2);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Cell::at(0, 0));
        assert_eq!(cells[5], Cell::at(2, 1));
    }
}
