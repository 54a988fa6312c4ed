//! Colour palette.

use delve_core::style::Color;

// -- Map tiles --

pub const FLOOR_DARK_BG: Color = Color::from_rgb(50, 50, 150);
pub const FLOOR_LIGHT_BG: Color = Color::from_rgb(200, 180, 50);
pub const WALL_DARK_BG: Color = Color::from_rgb(0, 0, 100);
pub const WALL_LIGHT_BG: Color = Color::from_rgb(130, 110, 50);

// -- Entities --

pub const PLAYER_FG: Color = Color::WHITE;
pub const ORC_FG: Color = Color::from_rgb(63, 127, 63);
pub const TROLL_FG: Color = Color::from_rgb(0, 127, 0);
pub const POTION_FG: Color = Color::from_rgb(127, 0, 255);

// -- Text --

pub const WHITE: Color = Color::WHITE;
pub const BLACK: Color = Color::BLACK;
pub const MENU_TITLE: Color = Color::from_rgb(255, 255, 63);
pub const MENU_TEXT: Color = WHITE;
pub const MENU_NOTICE: Color = Color::from_rgb(255, 160, 100);
pub const WELCOME_TEXT: Color = Color::from_rgb(0x20, 0xA0, 0xFF);
pub const STATUS_TEXT: Color = Color::from_rgb(180, 180, 180);
pub const GAME_OVER: Color = Color::from_rgb(255, 48, 48);

// -- Menu background gradient --

pub const MENU_BG_TOP: Color = Color::from_rgb(24, 8, 40);
pub const MENU_BG_BOTTOM: Color = Color::from_rgb(90, 20, 20);
