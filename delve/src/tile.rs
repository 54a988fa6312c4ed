//! Static tile data: walkability, transparency and graphics.

use delve_core::style::Color;

use crate::colors::*;

/// How a tile looks: a glyph with foreground and background colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Graphic {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Graphic {
    pub const fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg }
    }
}

/// One map cell. Immutable once the map is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub walkable: bool,
    pub transparent: bool,
    /// Drawn when explored but out of sight.
    pub dark: Graphic,
    /// Drawn when in sight.
    pub light: Graphic,
}

/// Unexplored tiles.
pub const SHROUD: Graphic = Graphic::new(' ', WHITE, BLACK);

pub const FLOOR: Tile = Tile {
    walkable: true,
    transparent: true,
    dark: Graphic::new(' ', WHITE, FLOOR_DARK_BG),
    light: Graphic::new(' ', WHITE, FLOOR_LIGHT_BG),
};

pub const WALL: Tile = Tile {
    walkable: false,
    transparent: false,
    dark: Graphic::new(' ', WHITE, WALL_DARK_BG),
    light: Graphic::new(' ', WHITE, WALL_LIGHT_BG),
};
