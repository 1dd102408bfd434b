//! Main menu, difficulty picker and highscore view
//!
//! Pure navigation state. The web entry point mirrors it into the DOM and
//! the renderer draws the animated backdrop behind it.

use crate::difficulty::Difficulty;

/// Entries on the main menu, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainEntry {
    Start,
    Highscore,
    Difficulty,
    Quit,
}

impl MainEntry {
    pub const ALL: [MainEntry; 4] = [
        MainEntry::Start,
        MainEntry::Highscore,
        MainEntry::Difficulty,
        MainEntry::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MainEntry::Start => "Start",
            MainEntry::Highscore => "Highscore",
            MainEntry::Difficulty => "Difficulty",
            MainEntry::Quit => "Quit",
        }
    }
}

/// Which menu page is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    Main { selected: usize },
    Difficulty { selected: usize },
    Highscore,
}

/// Menu-level key meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Confirm,
    Back,
    Other,
}

/// Outcome of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    /// Cursor moved or page changed back
    Moved,
    /// A sub-page was opened
    Opened,
    Start,
    Quit,
    DifficultyChanged(Difficulty),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    screen: MenuScreen,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub fn new() -> Self {
        Self {
            screen: MenuScreen::Main { selected: 0 },
        }
    }

    pub fn screen(&self) -> MenuScreen {
        self.screen
    }

    /// Back to the top of the main menu
    pub fn reset(&mut self) {
        self.screen = MenuScreen::Main { selected: 0 };
    }

    /// Entries for the current page, for display
    pub fn entries(&self) -> Vec<&'static str> {
        match self.screen {
            MenuScreen::Main { .. } => MainEntry::ALL.iter().map(|e| e.label()).collect(),
            MenuScreen::Difficulty { .. } => Difficulty::ALL.iter().map(|d| d.as_str()).collect(),
            MenuScreen::Highscore => Vec::new(),
        }
    }

    /// Highlighted row on list pages
    pub fn selected(&self) -> Option<usize> {
        match self.screen {
            MenuScreen::Main { selected } | MenuScreen::Difficulty { selected } => Some(selected),
            MenuScreen::Highscore => None,
        }
    }

    pub fn handle(&mut self, key: MenuKey, current: Difficulty) -> MenuAction {
        match self.screen {
            MenuScreen::Main { selected } => self.handle_main(key, selected, current),
            MenuScreen::Difficulty { selected } => self.handle_difficulty(key, selected),
            MenuScreen::Highscore => {
                self.screen = MenuScreen::Main { selected: 1 };
                MenuAction::Moved
            }
        }
    }

    fn handle_main(&mut self, key: MenuKey, selected: usize, current: Difficulty) -> MenuAction {
        let n = MainEntry::ALL.len();
        match key {
            MenuKey::Up => {
                self.screen = MenuScreen::Main {
                    selected: (selected + n - 1) % n,
                };
                MenuAction::Moved
            }
            MenuKey::Down => {
                self.screen = MenuScreen::Main {
                    selected: (selected + 1) % n,
                };
                MenuAction::Moved
            }
            MenuKey::Confirm => match MainEntry::ALL[selected] {
                MainEntry::Start => MenuAction::Start,
                MainEntry::Highscore => {
                    self.screen = MenuScreen::Highscore;
                    MenuAction::Opened
                }
                MainEntry::Difficulty => {
                    self.screen = MenuScreen::Difficulty {
                        selected: current.index(),
                    };
                    MenuAction::Opened
                }
                MainEntry::Quit => MenuAction::Quit,
            },
            MenuKey::Back | MenuKey::Other => MenuAction::None,
        }
    }

    fn handle_difficulty(&mut self, key: MenuKey, selected: usize) -> MenuAction {
        let n = Difficulty::ALL.len();
        let back_to_main = MenuScreen::Main { selected: 2 };
        match key {
            MenuKey::Up => {
                self.screen = MenuScreen::Difficulty {
                    selected: (selected + n - 1) % n,
                };
                MenuAction::Moved
            }
            MenuKey::Down => {
                self.screen = MenuScreen::Difficulty {
                    selected: (selected + 1) % n,
                };
                MenuAction::Moved
            }
            MenuKey::Confirm => {
                self.screen = back_to_main;
                MenuAction::DifficultyChanged(Difficulty::ALL[selected])
            }
            MenuKey::Back => {
                self.screen = back_to_main;
                MenuAction::Moved
            }
            MenuKey::Other => MenuAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps() {
        let mut menu = Menu::new();
        assert_eq!(menu.handle(MenuKey::Up, Difficulty::Normal), MenuAction::Moved);
        assert_eq!(menu.selected(), Some(3));
        menu.handle(MenuKey::Down, Difficulty::Normal);
        assert_eq!(menu.selected(), Some(0));
    }

    #[test]
    fn test_start_and_quit() {
        let mut menu = Menu::new();
        assert_eq!(menu.handle(MenuKey::Confirm, Difficulty::Normal), MenuAction::Start);
        menu.handle(MenuKey::Up, Difficulty::Normal);
        assert_eq!(menu.handle(MenuKey::Confirm, Difficulty::Normal), MenuAction::Quit);
    }

    #[test]
    fn test_difficulty_picker() {
        let mut menu = Menu::new();
        menu.handle(MenuKey::Down, Difficulty::Easy);
        menu.handle(MenuKey::Down, Difficulty::Easy);
        assert_eq!(menu.handle(MenuKey::Confirm, Difficulty::Easy), MenuAction::Opened);
        assert_eq!(menu.screen(), MenuScreen::Difficulty { selected: 0 });
        assert_eq!(menu.entries(), vec!["Easy", "Normal", "Hard"]);

        menu.handle(MenuKey::Up, Difficulty::Easy);
        assert_eq!(
            menu.handle(MenuKey::Confirm, Difficulty::Easy),
            MenuAction::DifficultyChanged(Difficulty::Hard)
        );
        assert_eq!(menu.screen(), MenuScreen::Main { selected: 2 });
    }

    #[test]
    fn test_difficulty_back_keeps_preset() {
        let mut menu = Menu::new();
        menu.handle(MenuKey::Down, Difficulty::Normal);
        menu.handle(MenuKey::Down, Difficulty::Normal);
        menu.handle(MenuKey::Confirm, Difficulty::Normal);
        assert_eq!(menu.handle(MenuKey::Back, Difficulty::Normal), MenuAction::Moved);
        assert_eq!(menu.selected(), Some(2));
    }

    #[test]
    fn test_highscore_any_key_returns() {
        let mut menu = Menu::new();
        menu.handle(MenuKey::Down, Difficulty::Normal);
        menu.handle(MenuKey::Confirm, Difficulty::Normal);
        assert_eq!(menu.screen(), MenuScreen::Highscore);
        assert!(menu.entries().is_empty());
        menu.handle(MenuKey::Other, Difficulty::Normal);
        assert_eq!(menu.screen(), MenuScreen::Main { selected: 1 });
    }
}
