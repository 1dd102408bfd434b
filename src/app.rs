//! Screen flow on top of the simulation
//!
//! `App` owns the settings, persistence and the current run. Entry points
//! feed it keys and frame deltas, then read back what to draw and play.

use crate::audio::SoundEffect;
use crate::consts::{GAME_OVER_HOLD_MS, MAX_FRAME_MS};
use crate::difficulty::Difficulty;
use crate::highscore::HighScore;
use crate::menu::{Menu, MenuAction, MenuKey};
use crate::platform::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{Direction, GameEvent, GamePhase, GameState, TickInput, tick};

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Menu,
    Playing,
    /// Final score shown until the hold runs out
    GameOver { remaining_ms: f32, score: u32 },
}

/// Logical keys, already mapped from physical ones by the entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Pause,
    Back,
    ToggleAutopilot,
    ToggleMute,
    Other,
}

impl Key {
    fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }

    fn menu_key(self) -> MenuKey {
        match self {
            Key::Up => MenuKey::Up,
            Key::Down => MenuKey::Down,
            Key::Confirm => MenuKey::Confirm,
            Key::Back | Key::Pause => MenuKey::Back,
            _ => MenuKey::Other,
        }
    }
}

pub struct App {
    settings: Settings,
    store: Box<dyn KeyValueStore>,
    highscore: HighScore,
    menu: Menu,
    screen: Screen,
    game: Option<GameState>,
    input: TickInput,
    autopilot: bool,
    next_seed: u64,
    /// Seconds since start, drives menu and scene animation
    time_s: f32,
    sounds: Vec<SoundEffect>,
    quit_requested: bool,
    last_was_best: bool,
}

impl App {
    pub fn new(settings: Settings, store: Box<dyn KeyValueStore>, seed: u64) -> Self {
        let highscore = HighScore::load(store.as_ref());
        Self {
            settings,
            store,
            highscore,
            menu: Menu::new(),
            screen: Screen::Menu,
            game: None,
            input: TickInput::default(),
            autopilot: false,
            next_seed: seed,
            time_s: 0.0,
            sounds: Vec::new(),
            quit_requested: false,
            last_was_best: false,
        }
    }

    /// Handle a key press for the current screen
    pub fn key_down(&mut self, key: Key) {
        if key == Key::ToggleMute {
            self.settings.muted = !self.settings.muted;
            self.settings.save(self.store.as_mut());
            return;
        }

        match self.screen {
            Screen::Menu => self.menu_key(key),
            Screen::Playing => match key {
                Key::Pause | Key::Back => self.input.pause = true,
                Key::ToggleAutopilot => self.set_autopilot(!self.autopilot),
                _ => {
                    if let Some(direction) = key.direction() {
                        self.input.direction = Some(direction);
                    }
                }
            },
            Screen::GameOver { .. } => {}
        }
    }

    fn menu_key(&mut self, key: Key) {
        match self.menu.handle(key.menu_key(), self.settings.difficulty) {
            MenuAction::None => {}
            MenuAction::Moved => self.sounds.push(SoundEffect::MenuMove),
            MenuAction::Opened => self.sounds.push(SoundEffect::MenuSelect),
            MenuAction::Start => {
                self.sounds.push(SoundEffect::MenuSelect);
                self.start_game();
            }
            MenuAction::Quit => {
                log::info!("Quit requested");
                self.quit_requested = true;
                self.menu.reset();
            }
            MenuAction::DifficultyChanged(difficulty) => {
                self.sounds.push(SoundEffect::MenuSelect);
                self.set_difficulty(difficulty);
            }
        }
    }

    /// Advance by one rendered frame
    pub fn frame(&mut self, dt_ms: f32) {
        let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_MS);
        self.time_s += dt_ms / 1000.0;

        match self.screen {
            Screen::Menu => {}
            Screen::Playing => self.update_playing(dt_ms),
            Screen::GameOver {
                remaining_ms,
                score,
            } => {
                let remaining_ms = remaining_ms - dt_ms;
                if remaining_ms <= 0.0 {
                    self.finish_run(score);
                } else {
                    self.screen = Screen::GameOver {
                        remaining_ms,
                        score,
                    };
                }
            }
        }
    }

    fn update_playing(&mut self, dt_ms: f32) {
        let Some(game) = self.game.as_mut() else {
            self.screen = Screen::Menu;
            return;
        };

        let mut input = std::mem::take(&mut self.input);
        input.autopilot = self.autopilot;
        tick(game, &input, dt_ms);

        for event in game.drain_events() {
            match event {
                GameEvent::AteFood { .. } => self.sounds.push(SoundEffect::Eat),
                GameEvent::LevelUp { .. } => self.sounds.push(SoundEffect::LevelUp),
                GameEvent::Died { .. } => {
                    self.sounds.push(SoundEffect::GameOver);
                    self.screen = Screen::GameOver {
                        remaining_ms: GAME_OVER_HOLD_MS,
                        score: game.score,
                    };
                }
            }
        }
    }

    fn finish_run(&mut self, score: u32) {
        self.last_was_best = self.highscore.submit(score, self.store.as_mut());
        if self.last_was_best {
            self.sounds.push(SoundEffect::HighScore);
        }
        self.game = None;
        self.menu.reset();
        self.screen = Screen::Menu;
    }

    /// Begin a new run at the selected difficulty
    pub fn start_game(&mut self) {
        let config = self
            .settings
            .difficulty
            .session(self.settings.max_particles());
        let seed = self.next_seed;
        self.next_seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        log::info!(
            "Starting {} run (seed {})",
            self.settings.difficulty.as_str(),
            seed
        );
        self.game = Some(GameState::new(config, seed));
        self.input = TickInput::default();
        self.last_was_best = false;
        self.screen = Screen::Playing;
    }

    /// Stop the current run now, recording its score
    pub fn end_run(&mut self) {
        let score = match (self.screen, self.game.as_ref()) {
            (Screen::GameOver { score, .. }, _) => score,
            (_, Some(game)) => game.score,
            (_, None) => return,
        };
        self.finish_run(score);
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot != enabled {
            log::info!("Autopilot {}", if enabled { "on" } else { "off" });
        }
        self.autopilot = enabled;
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.settings.difficulty != difficulty {
            self.settings.difficulty = difficulty;
            self.settings.save(self.store.as_mut());
        }
    }

    /// Sounds queued since the last call
    pub fn drain_sounds(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.sounds)
    }

    /// True once after Quit is chosen
    pub fn take_quit_request(&mut self) -> bool {
        std::mem::take(&mut self.quit_requested)
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn highscore(&self) -> &HighScore {
        &self.highscore
    }

    pub fn time_s(&self) -> f32 {
        self.time_s
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn is_paused(&self) -> bool {
        self.game
            .as_ref()
            .is_some_and(|g| g.phase == GamePhase::Paused)
    }

    /// Whether the run that just ended set a new best
    pub fn last_was_best(&self) -> bool {
        self.last_was_best
    }
}
