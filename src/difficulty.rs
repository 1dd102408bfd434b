//! Difficulty presets

use serde::{Deserialize, Serialize};

use crate::sim::{Grid, SessionConfig};

/// Difficulty preset: playfield size and starting speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "med" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Playfield in cells
    pub fn grid(&self) -> Grid {
        match self {
            Difficulty::Easy => Grid::new(30, 20),
            Difficulty::Normal => Grid::new(40, 28),
            Difficulty::Hard => Grid::new(50, 36),
        }
    }

    /// Tick interval at level 1
    pub fn start_move_delay_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 180,
            Difficulty::Normal => 140,
            Difficulty::Hard => 90,
        }
    }

    /// Session configuration for a run at this difficulty
    pub fn session(&self, max_particles: usize) -> SessionConfig {
        SessionConfig {
            grid: self.grid(),
            start_move_delay_ms: self.start_move_delay_ms(),
            max_particles,
        }
    }

    /// Largest cell count over all presets (GPU buffer sizing)
    pub fn max_cells() -> usize {
        Self::ALL
            .iter()
            .map(|d| d.grid().cell_count())
            .max()
            .unwrap_or(0)
    }
}
