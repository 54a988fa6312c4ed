//! Input events: [`Msg`], [`Key`], [`ModMask`].

/// A keyboard key.
///
/// Printable keys, including space, arrive as [`Key::Char`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Tab,
    Backspace,
    Home,
    End,
    PageUp,
    PageDown,
    Char(char),
}

/// Bitmask of modifier keys held during an input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModMask(pub u8);

impl ModMask {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CTRL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ModMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// An input message delivered to the model.
#[derive(Clone, Debug)]
pub enum Msg {
    /// A key was pressed.
    KeyDown {
        key: Key,
        modifiers: ModMask,
    },
    /// The terminal was resized.
    Screen {
        width: i32,
        height: i32,
    },
    /// Sent once before the first frame.
    Init,
    /// The user asked to close the program (window close, Ctrl-C).
    Quit,
}

impl Msg {
    /// A `KeyDown` with no modifiers.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: ModMask::NONE,
        }
    }

    pub fn key_mod(key: Key, modifiers: ModMask) -> Self {
        Self::KeyDown { key, modifiers }
    }

    /// The pressed key, if this is a `KeyDown`.
    pub fn pressed(&self) -> Option<Key> {
        match self {
            Self::KeyDown { key, .. } => Some(*key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_extracts_key() {
        assert_eq!(Msg::key(Key::Escape).pressed(), Some(Key::Escape));
        assert_eq!(Msg::Quit.pressed(), None);
        assert_eq!(Msg::Init.pressed(), None);
    }

    #[test]
    fn mod_mask_ops() {
        let m = ModMask::SHIFT | ModMask::CTRL;
        assert!(m.contains(ModMask::CTRL));
        assert!(!m.contains(ModMask::ALT));
        assert!(ModMask::NONE.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn key_serde_round_trip() {
        let json = serde_json::to_string(&Key::Char('h')).unwrap();
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Key::Char('h'));
    }
}
