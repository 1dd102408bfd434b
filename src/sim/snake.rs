//! The snake body

use std::collections::VecDeque;

use super::grid::{Cell, Direction, Grid};
use crate::consts::INITIAL_SNAKE;

/// Ordered body cells, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    /// Build a snake from explicit cells (head first)
    ///
    /// Returns `None` for an empty body.
    pub fn new(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    /// The standard three-cell snake heading right
    ///
    /// On grids too small for the usual layout the head is pulled inside the
    /// board and the body is cut to the column count, so no cell repeats.
    pub fn spawn(grid: &Grid) -> Self {
        let (head_col, head_row) = INITIAL_SNAKE[0];
        let col = head_col.min(grid.cols.max(1) as i32 - 1);
        let row = head_row.min(grid.rows.max(1) as i32 - 1);
        let len = INITIAL_SNAKE.len().min(grid.cols.max(1) as usize);
        let body = (0..len as i32).map(|i| Cell::at(col - i, row)).collect();
        Self {
            body,
            direction: Direction::Right,
        }
    }

    pub fn head(&self) -> Cell {
        // Body is never empty: constructors reject it and `advance` pushes before popping
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Body cells, head first
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    /// True if any body cell (tail included) occupies `cell`
    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Prepend `new_head`; drop the tail unless growing
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// True if two body cells share a position
    pub fn overlaps_itself(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.body.len());
        !self.body.iter().all(|c| seen.insert(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_layout() {
        let snake = Snake::spawn(&Grid::new(40, 28));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::at(5, 5));
        assert_eq!(snake.tail(), Cell::at(3, 5));
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn test_spawn_fits_tiny_grid() {
        let grid = Grid::new(4, 4);
        let snake = Snake::spawn(&grid);
        assert!(snake.cells().all(|c| grid.contains(*c)));
        assert_eq!(snake.head(), Cell::at(3, 3));
        assert_eq!(snake.len(), 3);
        assert!(!snake.overlaps_itself());
    }

    #[test]
    fn test_spawn_never_repeats_cells() {
        for cols in 1..8 {
            for rows in 1..8 {
                let grid = Grid::new(cols, rows);
                let snake = Snake::spawn(&grid);
                assert!(!snake.overlaps_itself(), "{}x{}", cols, rows);
                assert!(snake.cells().all(|c| grid.contains(*c)), "{}x{}", cols, rows);
            }
        }
    }

    #[test]
    fn test_advance_without_growth_keeps_length() {
        let mut snake = Snake::spawn(&Grid::new(40, 28));
        snake.advance(Cell::at(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::at(6, 5));
        assert!(!snake.contains(Cell::at(3, 5)));
    }

    #[test]
    fn test_advance_with_growth() {
        let mut snake = Snake::spawn(&Grid::new(40, 28));
        snake.advance(Cell::at(6, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Cell::at(3, 5));
    }

    #[test]
    fn test_empty_body_rejected() {
        assert!(Snake::new(Vec::new(), Direction::Up).is_none());
    }

    #[test]
    fn test_overlap_detection() {
        let snake = Snake::new([Cell::at(1, 1), Cell::at(2, 1), Cell::at(1, 1)], Direction::Left)
            .expect("non-empty");
        assert!(snake.overlaps_itself());
        assert!(!Snake::spawn(&Grid::new(40, 28)).overlaps_itself());
    }
}
