//! Pixel Snake entry point
//!
//! On the web this wires the canvas, keyboard and DOM to the game loop.
//! Natively it is a headless runner that lets the autopilot play one round.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use pixel_snake::audio::AudioManager;
    use pixel_snake::consts::FRAME_MS;
    use pixel_snake::menu::MenuScreen;
    use pixel_snake::platform::LocalStore;
    use pixel_snake::renderer::{SdfRenderState, SetupError, build_frame};
    use pixel_snake::{App, Key, Screen, Settings};

    const STORAGE_PREFIX: &str = "pixel_snake_";

    /// Game instance holding all state
    struct Game {
        app: App,
        render_state: SdfRenderState,
        audio: AudioManager,
        canvas: HtmlCanvasElement,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Last menu markup, to avoid rewriting the DOM every frame
        menu_html: String,
    }

    impl Game {
        fn new(app: App, render_state: SdfRenderState, canvas: HtmlCanvasElement) -> Self {
            Self {
                app,
                render_state,
                audio: AudioManager::new(),
                canvas,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                menu_html: String::new(),
            }
        }

        fn update(&mut self, dt_ms: f32, time: f64) {
            self.app.frame(dt_ms);

            if self.app.take_quit_request() {
                // A page cannot close itself; the menu is already back at the top
                log::info!("Quit selected - staying on the title screen");
            }

            let sounds = self.app.drain_sounds();
            if !sounds.is_empty() {
                self.audio.set_volume(self.app.settings().effective_volume());
                for sound in sounds {
                    self.audio.play(sound);
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Keep the drawing buffer matched to the displayed size
        fn sync_canvas_size(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            if self.render_state.size != (width, height) && width > 0 && height > 0 {
                self.canvas.set_width(width);
                self.canvas.set_height(height);
                self.render_state.resize(width, height);
            }
        }

        fn render(&mut self) {
            self.sync_canvas_size();
            let render_state = &mut self.render_state;
            let frame = build_frame(&self.app, render_state.size);
            match render_state.render(&frame) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD and menu elements in DOM
        fn update_dom(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let screen = self.app.screen();
            let in_menu = screen == Screen::Menu;

            set_visible(&document, "hud", !in_menu);
            set_visible(&document, "menu", in_menu);
            set_visible(&document, "pause-menu", self.app.is_paused());
            set_visible(
                &document,
                "hud-fps",
                self.app.settings().show_fps && !in_menu,
            );
            set_visible(&document, "hud-auto", self.app.autopilot() && !in_menu);
            set_visible(&document, "hud-muted", self.app.settings().muted);

            if let Some(game) = self.app.game() {
                set_text(&document, "#hud-score .hud-value", &game.score.to_string());
                set_text(&document, "#hud-speed .hud-value", &game.speed().to_string());
                set_text(&document, "#hud-level .hud-value", &game.level.to_string());
            }
            set_text(&document, "#hud-fps .hud-value", &self.fps.to_string());
            set_text(
                &document,
                "#best-score",
                &self.app.highscore().best().to_string(),
            );

            match screen {
                Screen::GameOver { score, .. } => {
                    set_visible(&document, "game-over", true);
                    set_text(&document, "#final-score", &score.to_string());
                    let best = self.app.highscore();
                    set_visible(&document, "new-best", best.qualifies(score));
                }
                _ => set_visible(&document, "game-over", false),
            }

            if in_menu {
                self.update_menu(&document);
            }
        }

        fn update_menu(&mut self, document: &Document) {
            // Bobbing title
            let bob = ((self.app.time_s() * 2.0).sin() * 6.0) as i32;
            if let Some(title) = document.get_element_by_id("menu-title") {
                let _ = title.set_attribute("style", &format!("transform: translateY({}px)", bob));
            }

            let menu = self.app.menu();
            let on_highscore = menu.screen() == MenuScreen::Highscore;
            set_visible(document, "highscore-view", on_highscore);
            set_visible(document, "menu-list", !on_highscore);
            set_text(
                document,
                "#menu-difficulty",
                &format!("Difficulty: {}", self.app.settings().difficulty.as_str()),
            );

            let html: String = menu
                .entries()
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    if menu.selected() == Some(i) {
                        format!("<li class=\"selected\">&gt; {} &lt;</li>", label)
                    } else {
                        format!("<li>{}</li>", label)
                    }
                })
                .collect();
            if html != self.menu_html {
                if let Some(list) = document.get_element_by_id("menu-list") {
                    list.set_inner_html(&html);
                }
                self.menu_html = html;
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if visible {
                classes.remove_1("hidden")
            } else {
                classes.add_1("hidden")
            };
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten()
            && el.text_content().as_deref() != Some(text)
        {
            el.set_text_content(Some(text));
        }
    }

    /// Physical key to game key
    fn map_key(key: &str) -> Key {
        match key {
            "ArrowUp" | "w" | "W" => Key::Up,
            "ArrowDown" | "s" | "S" => Key::Down,
            "ArrowLeft" | "a" | "A" => Key::Left,
            "ArrowRight" | "d" | "D" => Key::Right,
            "Enter" | " " => Key::Confirm,
            "p" | "P" => Key::Pause,
            "Escape" => Key::Back,
            "i" | "I" => Key::ToggleAutopilot,
            "m" | "M" => Key::ToggleMute,
            _ => Key::Other,
        }
    }

    fn show_error(message: &str) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            // Nothing runs after a failed start, so the static menu would be dead
            set_visible(&document, "menu", false);
            set_text(&document, "#error-message", message);
            set_visible(&document, "error", true);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Pixel Snake starting...");

        if let Err(e) = start().await {
            log::error!("Startup failed: {}", e);
            show_error(&e.to_string());
        }
    }

    async fn start() -> Result<(), SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoWindow)?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(SetupError::NoCanvas("canvas"))?;

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let store = LocalStore::new(STORAGE_PREFIX);
        let settings = Settings::load(&store);
        let seed = js_sys::Date::now() as u64;
        let app = App::new(settings, Box::new(store), seed);
        log::info!("Game initialized with seed: {}", seed);

        let render_state = SdfRenderState::from_canvas(canvas.clone(), width, height).await?;
        let game = Rc::new(RefCell::new(Game::new(app, render_state, canvas)));

        setup_keyboard(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Pixel Snake running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = map_key(event.key().as_str());
            if key != Key::Other {
                event.prevent_default();
            }
            let mut g = game.borrow_mut();
            // Browsers only allow audio after a user gesture
            g.audio.resume();
            g.app.key_down(key);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt_ms = if g.last_time > 0.0 {
                (time - g.last_time) as f32
            } else {
                FRAME_MS
            };
            g.last_time = time;

            g.update(dt_ms, time);
            g.render();
            g.update_dom();
        }

        request_animation_frame(game);
    }

    fn pause_if_playing(game: &Rc<RefCell<Game>>, reason: &str) {
        let mut g = game.borrow_mut();
        if g.app.screen() == Screen::Playing && !g.app.is_paused() {
            g.app.key_down(Key::Pause);
            log::info!("Auto-paused ({})", reason);
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    pause_if_playing(&game, "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                pause_if_playing(&game, "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::{Path, PathBuf};
    use std::process::ExitCode;

    use clap::Parser;

    use pixel_snake::audio::{self, SoundEffect};
    use pixel_snake::consts::FRAME_MS;
    use pixel_snake::platform::FileStore;
    use pixel_snake::{App, Difficulty, QualityPreset, Screen, Settings};

    #[derive(Parser, Debug)]
    #[command(name = "pixel-snake")]
    #[command(version, about = "Headless Pixel Snake: the autopilot plays one round")]
    struct Cli {
        /// Difficulty preset (easy, normal, hard)
        #[arg(short, long, default_value = "normal", value_parser = parse_difficulty)]
        difficulty: Difficulty,

        /// Quality preset (low, medium, high); caps live particles
        #[arg(short, long, value_parser = parse_quality)]
        quality: Option<QualityPreset>,

        /// RNG seed; defaults to the current time
        #[arg(short, long)]
        seed: Option<u64>,

        /// Directory holding highscore.txt and settings.json
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,

        /// Stop after this many logic ticks
        #[arg(long, default_value_t = 5000)]
        max_steps: u64,

        /// Write the synthesized tones as WAV files into this directory and exit
        #[arg(long, value_name = "DIR")]
        export_sounds: Option<PathBuf>,
    }

    fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
        Difficulty::parse(s).ok_or_else(|| format!("unknown difficulty '{}'", s))
    }

    fn parse_quality(s: &str) -> Result<QualityPreset, String> {
        QualityPreset::parse(s).ok_or_else(|| format!("unknown quality '{}'", s))
    }

    fn export_sounds(dir: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(dir)?;
        for effect in SoundEffect::ALL {
            if let Some(tone) = effect.tone() {
                let path = dir.join(format!("{}.wav", effect.file_stem()));
                audio::write_wav(&path, &tone)?;
                log::info!("Wrote {}", path.display());
            }
        }
        Ok(())
    }

    fn time_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let cli = Cli::parse();

        if let Some(dir) = &cli.export_sounds {
            return match export_sounds(dir) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    log::error!("Failed to export sounds: {}", e);
                    ExitCode::FAILURE
                }
            };
        }

        let store = FileStore::new(&cli.data_dir);
        let mut settings = Settings::load(&store);
        settings.difficulty = cli.difficulty;
        if let Some(quality) = cli.quality {
            settings.quality = quality;
        }
        let seed = cli.seed.unwrap_or_else(time_seed);

        log::info!(
            "Pixel Snake (headless) - {} seed {}",
            cli.difficulty.as_str(),
            seed
        );

        let mut app = App::new(settings, Box::new(store), seed);
        app.start_game();
        app.set_autopilot(true);

        let mut summary = None;
        loop {
            app.frame(FRAME_MS);

            if let Some(game) = app.game() {
                summary = Some((game.score, game.level, game.snake.len(), game.death));
                if !game.is_over() && game.time_ticks >= cli.max_steps {
                    log::info!("Step limit {} reached", cli.max_steps);
                    app.end_run();
                }
            }
            if app.screen() == Screen::Menu {
                break;
            }
        }

        let Some((score, level, length, death)) = summary else {
            log::error!("Run never started");
            return ExitCode::FAILURE;
        };
        let outcome = death.map_or("stopped".to_string(), |cause| format!("{:?}", cause));
        println!("score {score}  level {level}  length {length}  ({outcome})");
        println!(
            "best {}{}",
            app.highscore().best(),
            if app.last_was_best() { "  (new!)" } else { "" }
        );
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    headless::run()
}
