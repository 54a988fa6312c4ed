//! Crossterm terminal driver for delve.
//!
//! Provides a [`CrosstermDriver`] that implements [`delve_core::Driver`]:
//! raw mode and the alternate screen for the lifetime of the app, one blocking
//! read per input message, and changed cells written with absolute cursor
//! moves.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Attribute, Color as CtColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use delve_core::{
    app::{Driver, Error},
    console::Frame,
    messages::{Key, ModMask, Msg},
    style::{AttrMask, Color},
};

/// Maps a [`delve_core::Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        let (r, g, b) = (c.r(), c.g(), c.b());
        CtColor::Rgb { r, g, b }
    }
}

/// Maps crossterm key modifiers to delve's [`ModMask`].
fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    m
}

/// Maps a crossterm [`KeyCode`] to a delve [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Translate one terminal event. Events with no delve counterpart (mouse,
/// focus, paste, key releases) yield `None`.
fn translate(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if kind == KeyEventKind::Release {
                return None;
            }
            // Raw mode swallows SIGINT, so Ctrl-C arrives as a key.
            if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                return Some(Msg::Quit);
            }
            to_key(code).map(|key| Msg::key_mod(key, to_mod_mask(modifiers)))
        }
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
        }),
        _ => None,
    }
}

/// A terminal back-end for delve using crossterm.
#[derive(Debug, Default)]
pub struct CrosstermDriver {
    _private: (),
}

impl CrosstermDriver {
    /// Create a new driver.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Error> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        log::debug!("terminal initialised");
        Ok(())
    }

    fn wait_msg(&mut self) -> Result<Msg, Error> {
        loop {
            if let Some(msg) = translate(event::read()?) {
                return Ok(msg);
            }
        }
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Error> {
        let mut stdout = io::stdout().lock();

        for fc in &frame.cells {
            let p = fc.pos;
            let cell = &fc.cell;

            queue!(
                stdout,
                cursor::MoveTo(p.x as u16, p.y as u16),
                SetForegroundColor(to_ct_color(cell.style.fg)),
                SetBackgroundColor(to_ct_color(cell.style.bg))
            )?;

            let bold = cell.style.attrs.contains(AttrMask::BOLD);
            if bold {
                queue!(stdout, style::SetAttribute(Attribute::Bold))?;
            }
            write!(stdout, "{}", cell.ch)?;
            if bold {
                queue!(stdout, style::SetAttribute(Attribute::NormalIntensity))?;
            }
        }

        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::debug!("terminal restored");
    }
}
