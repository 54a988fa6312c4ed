//! The application model: main menu and game sessions.

use std::ops::ControlFlow;

use delve_core::{Console, Effect, Model, messages::Msg};

use crate::config::GameConfig;
use crate::engine::Engine;
use crate::input::{Command, MenuChoice, Mode};
use crate::menu::{self, MenuBackground};
use crate::procgen::{DungeonGenerator, RoomsDungeon};
use crate::session::{NoSavedGame, SessionStore};
use crate::setup::new_game;

/// What is on screen.
enum Screen {
    Menu { notice: Option<String> },
    Session(Box<Engine>),
}

/// The delve game model.
pub struct DelveModel {
    config: GameConfig,
    generator: Box<dyn DungeonGenerator>,
    store: Box<dyn SessionStore>,
    background: MenuBackground,
    screen: Screen,
}

impl DelveModel {
    /// Start on the main menu.
    pub fn new(config: GameConfig, generator: impl DungeonGenerator + 'static) -> Self {
        let background = MenuBackground::gradient(
            config.screen_width,
            config.screen_height,
            crate::colors::MENU_BG_TOP,
            crate::colors::MENU_BG_BOTTOM,
        );
        Self {
            config,
            generator: Box::new(generator),
            store: Box::new(NoSavedGame),
            background,
            screen: Screen::Menu { notice: None },
        }
    }

    /// Start on the main menu with rooms-and-corridors levels drawn from
    /// `config.seed`. An unset seed is picked at random and written back.
    pub fn seeded(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("dungeon seed {seed}");
        Self::new(config.with_seed(seed), RoomsDungeon::seeded(seed))
    }

    pub fn with_store(mut self, store: impl SessionStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    pub fn with_background(mut self, background: MenuBackground) -> Self {
        self.background = background;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current input mode.
    pub fn mode(&self) -> Mode {
        match &self.screen {
            Screen::Menu { .. } => Mode::MainMenu,
            Screen::Session(engine) => engine.mode(),
        }
    }

    /// The running session, if any.
    pub fn engine(&self) -> Option<&Engine> {
        match &self.screen {
            Screen::Session(engine) => Some(engine.as_ref()),
            Screen::Menu { .. } => None,
        }
    }

    /// The notice shown on the main menu, if any.
    pub fn notice(&self) -> Option<&str> {
        match &self.screen {
            Screen::Menu { notice } => notice.as_deref(),
            Screen::Session(_) => None,
        }
    }

    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    fn update_menu(&mut self, msg: &Msg) -> Option<Effect> {
        let Some(Command::Menu(choice)) = Mode::MainMenu.dispatch(msg) else {
            return None;
        };
        match choice {
            MenuChoice::NewGame => {
                log::info!("starting a new game");
                let engine = new_game(&self.config, self.generator.as_mut());
                self.screen = Screen::Session(Box::new(engine));
            }
            MenuChoice::Continue => match self.store.load() {
                Ok(engine) => {
                    log::info!("continuing saved game");
                    self.screen = Screen::Session(Box::new(engine));
                }
                Err(err) => {
                    log::warn!("continue failed: {err}");
                    self.screen = Screen::Menu {
                        notice: Some(err.to_string()),
                    };
                }
            },
            MenuChoice::Quit => {
                log::info!("quit from the main menu");
                return Some(Effect::End);
            }
        }
        None
    }
}

impl Model for DelveModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        let Screen::Session(engine) = &mut self.screen else {
            return self.update_menu(&msg);
        };
        match engine.process_input(&msg) {
            ControlFlow::Break(_) => {
                log::info!("leaving the game on turn {}", engine.turn());
                Some(Effect::End)
            }
            ControlFlow::Continue(_) => None,
        }
    }

    fn draw(&self, console: &mut Console) {
        match &self.screen {
            Screen::Menu { notice } => {
                menu::render(console, &self.background, notice.as_deref());
            }
            Screen::Session(engine) => {
                engine.render(console);
                let status_row = engine.world().map.height() + 1;
                engine.render_status(console, status_row);
            }
        }
    }
}
