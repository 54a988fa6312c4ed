//! The title screen.

use delve_core::{Console, Point, Style, style::Color};
use delve_rl::Grid;

use crate::colors;

pub const TITLE: &str = "HOMO MALEDICTUS";
pub const AUTHOR: &str = "by The Cursed Ape";
pub const OPTIONS: [&str; 3] = ["[N] Play a new game", "[C] Continue last game", "[Q] Quit"];

const MENU_WIDTH: usize = 24;
/// How far the option rows darken the picture behind them.
const OPTION_SHADE: f32 = 0.25;

/// Background picture painted behind the main menu.
///
/// Built once at startup and owned by the game model for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBackground {
    colors: Grid<Color>,
}

impl MenuBackground {
    pub fn new(colors: Grid<Color>) -> Self {
        Self { colors }
    }

    /// A vertical blend from `top` to `bottom`.
    pub fn gradient(width: i32, height: i32, top: Color, bottom: Color) -> Self {
        let span = (height - 1).max(1) as f32;
        Self::new(Grid::from_fn(width, height, |p| {
            top.lerp(bottom, p.y as f32 / span)
        }))
    }

    pub fn color_at(&self, p: Point) -> Option<Color> {
        self.colors.at(p)
    }

    /// Tint the console with the picture. Cells beyond the picture are left
    /// alone.
    pub fn paint(&self, console: &mut Console) {
        for (p, c) in self.colors.iter() {
            console.tint(p, c);
        }
    }
}

impl Default for MenuBackground {
    fn default() -> Self {
        Self::gradient(80, 50, colors::MENU_BG_TOP, colors::MENU_BG_BOTTOM)
    }
}

/// Draw the main menu over `background`, with an optional notice below the
/// options.
pub fn render(console: &mut Console, background: &MenuBackground, notice: Option<&str>) {
    background.paint(console);
    let h = console.height();
    let title = Style::default().with_fg(colors::MENU_TITLE);
    console.print_centered(h / 2 - 4, TITLE, title);
    console.print_centered(h - 2, AUTHOR, title);

    let x = ((console.width() - MENU_WIDTH as i32) / 2).max(0);
    for (i, text) in OPTIONS.iter().enumerate() {
        let line = format!("{text:<MENU_WIDTH$}");
        let start = Point::new(x, h / 2 - 2 + i as i32);
        for (dx, ch) in line.chars().enumerate() {
            let p = start.shift(dx as i32, 0);
            let under = background.color_at(p).unwrap_or(colors::BLACK);
            let bg = under.lerp(colors::BLACK, OPTION_SHADE);
            console.draw_glyph(p, ch, colors::MENU_TEXT, Some(bg));
        }
    }

    if let Some(notice) = notice {
        let style = Style::default().with_fg(colors::MENU_NOTICE);
        console.print_centered(h / 2 + 2, notice, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(c: &Console, y: i32) -> String {
        (0..c.width()).map(|x| c.at(Point::new(x, y)).ch).collect()
    }

    #[test]
    fn gradient_runs_top_to_bottom() {
        let bg = MenuBackground::gradient(4, 3, Color::BLACK, Color::WHITE);
        assert_eq!(bg.color_at(Point::new(0, 0)), Some(Color::BLACK));
        assert_eq!(bg.color_at(Point::new(3, 2)), Some(Color::WHITE));
        let mid = bg.color_at(Point::new(1, 1)).unwrap();
        assert!(mid.r() > 100 && mid.r() < 160);
    }

    #[test]
    fn menu_lines_are_placed() {
        let mut c = Console::new(80, 50);
        render(&mut c, &MenuBackground::default(), None);
        assert!(row(&c, 21).contains(TITLE));
        assert!(row(&c, 23).contains("[N] Play a new game"));
        assert!(row(&c, 24).contains("[C] Continue last game"));
        assert!(row(&c, 25).contains("[Q] Quit"));
        assert!(row(&c, 48).contains(AUTHOR));
        assert_eq!(row(&c, 27).trim(), "");
    }

    #[test]
    fn options_share_a_padded_column() {
        let mut c = Console::new(80, 50);
        render(&mut c, &MenuBackground::default(), None);
        let starts: Vec<usize> = (23..26).map(|y| row(&c, y).find('[').unwrap()).collect();
        assert!(starts.iter().all(|&x| x == starts[0]));
        // The padding shades the picture rather than hiding it.
        let p = Point::new(starts[0] as i32 + 20, 25);
        let under = MenuBackground::default().color_at(p).unwrap();
        assert_eq!(c.at(p).style.bg, under.lerp(colors::BLACK, 0.25));
        assert_ne!(c.at(p).style.bg, colors::BLACK);
    }

    #[test]
    fn options_shade_a_flat_picture() {
        let grey = Color::from_rgb(200, 200, 200);
        let bg = MenuBackground::new(Grid::new(80, 50, grey));
        let mut c = Console::new(80, 50);
        render(&mut c, &bg, None);
        let x = row(&c, 23).find('[').unwrap() as i32;
        assert_eq!(c.at(Point::new(x, 23)).style.bg, Color::from_rgb(150, 150, 150));
        assert_eq!(c.at(Point::new(x, 23)).style.fg, colors::MENU_TEXT);
        assert_eq!(c.at(Point::new(0, 23)).style.bg, grey);
    }

    #[test]
    fn notice_and_background() {
        let mut c = Console::new(80, 50);
        let bg = MenuBackground::default();
        render(&mut c, &bg, Some("No saved game to load."));
        assert!(row(&c, 27).contains("No saved game to load."));
        assert_eq!(c.at(Point::new(0, 0)).style.bg, colors::MENU_BG_TOP);
    }
}
