//! Input modes: which keys mean what on each screen.

use delve_core::messages::{Key, ModMask, Msg};

use crate::action::Action;

/// The screen the player is on. Decides how input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    MainMenu,
    Playing,
    GameOver,
}

/// A main menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    NewGame,
    Continue,
    Quit,
}

/// What an input message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Act(Action),
    Menu(MenuChoice),
}

/// Direction for a movement key, covering arrows with Home/End/PgUp/PgDn,
/// WASD with q/e/z/c, and vi keys.
pub fn move_delta(key: Key) -> Option<(i32, i32)> {
    let d = match key {
        // Arrows and the keypad corners.
        Key::ArrowUp => (0, -1),
        Key::ArrowDown => (0, 1),
        Key::ArrowLeft => (-1, 0),
        Key::ArrowRight => (1, 0),
        Key::Home => (-1, -1),
        Key::End => (-1, 1),
        Key::PageUp => (1, -1),
        Key::PageDown => (1, 1),
        // WASD
        Key::Char('w') => (0, -1),
        Key::Char('s') => (0, 1),
        Key::Char('a') => (-1, 0),
        Key::Char('d') => (1, 0),
        Key::Char('q') => (-1, -1),
        Key::Char('e') => (1, -1),
        Key::Char('z') => (-1, 1),
        Key::Char('c') => (1, 1),
        // Vi keys
        Key::Char('h') => (-1, 0),
        Key::Char('j') => (0, 1),
        Key::Char('k') => (0, -1),
        Key::Char('l') => (1, 0),
        Key::Char('y') => (-1, -1),
        Key::Char('u') => (1, -1),
        Key::Char('b') => (-1, 1),
        Key::Char('n') => (1, 1),
        _ => return None,
    };
    Some(d)
}

/// Letters are matched in lowercase.
fn fold_case(key: Key) -> Key {
    match key {
        Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

pub fn is_wait_key(key: Key) -> bool {
    matches!(key, Key::Char('.') | Key::Char('x') | Key::Char(' '))
}

impl Mode {
    /// Translate one input message into at most one command.
    ///
    /// [`Msg::Quit`] is honoured everywhere: it is [`Action::Escape`] during
    /// play and [`MenuChoice::Quit`] on the menu.
    pub fn dispatch(self, msg: &Msg) -> Option<Command> {
        if let Msg::Quit = msg {
            return Some(match self {
                Mode::MainMenu => Command::Menu(MenuChoice::Quit),
                Mode::Playing | Mode::GameOver => Command::Act(Action::Escape),
            });
        }
        let Msg::KeyDown { key, modifiers } = *msg else {
            return None;
        };
        // Ctrl and Alt chords are not commands. Shift and Caps Lock only
        // change the case of a letter.
        if modifiers.contains(ModMask::CTRL) || modifiers.contains(ModMask::ALT) {
            return None;
        }
        let key = fold_case(key);
        match self {
            Mode::MainMenu => Self::menu_key(key).map(Command::Menu),
            Mode::Playing => Self::play_key(key).map(Command::Act),
            Mode::GameOver => (key == Key::Escape).then_some(Command::Act(Action::Escape)),
        }
    }

    fn menu_key(key: Key) -> Option<MenuChoice> {
        match key {
            Key::Char('n') => Some(MenuChoice::NewGame),
            Key::Char('c') => Some(MenuChoice::Continue),
            Key::Char('q') | Key::Escape => Some(MenuChoice::Quit),
            _ => None,
        }
    }

    fn play_key(key: Key) -> Option<Action> {
        if key == Key::Escape {
            return Some(Action::Escape);
        }
        if is_wait_key(key) {
            return Some(Action::Wait);
        }
        move_delta(key).map(|(dx, dy)| Action::bump(dx, dy))
    }
}
