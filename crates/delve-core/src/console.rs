//! The [`Console`] drawing surface and frame diffing.
//!
//! Game code never touches the terminal. It draws glyph+colour cells into a
//! `Console`; the app loop diffs the console against the previously presented
//! one and hands only the changed cells to the [`Driver`](crate::app::Driver).

use crate::cell::Cell;
use crate::geom::{Point, Range};
use crate::style::{Color, Style};

/// A fixed-size 2D buffer of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Console {
    cells: Vec<Cell>,
    width: i32,
    height: i32,
}

impl Console {
    /// Create a console filled with default (blank) cells.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![Cell::default(); (width * height) as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        self.bounds()
            .contains(p)
            .then(|| (p.y * self.width + p.x) as usize)
    }

    /// Read the cell at `p`. Out of bounds reads a default cell.
    pub fn at(&self, p: Point) -> Cell {
        self.index(p).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Set the cell at `p`. No-op if `p` is outside bounds.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Draw `ch` at `p` with foreground `fg`. With `bg == None` the cell keeps
    /// whatever background is already there, so glyphs layer over map tiles.
    pub fn draw_glyph(&mut self, p: Point, ch: char, fg: Color, bg: Option<Color>) {
        if let Some(i) = self.index(p) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.style.fg = fg;
            if let Some(bg) = bg {
                cell.style.bg = bg;
            }
        }
    }

    /// Set only the background colour at `p`.
    pub fn tint(&mut self, p: Point, bg: Color) {
        if let Some(i) = self.index(p) {
            self.cells[i].style.bg = bg;
        }
    }

    /// Print `text` left to right from `p`, clipped at the right edge.
    pub fn print(&mut self, p: Point, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            let q = p.shift(i as i32, 0);
            if q.x >= self.width {
                break;
            }
            self.set(q, Cell::new(ch, style));
        }
    }

    /// Print `text` horizontally centred on row `y`.
    pub fn print_centered(&mut self, y: i32, text: &str, style: Style) {
        let len = text.chars().count() as i32;
        let x = ((self.width - len) / 2).max(0);
        self.print(Point::new(x, y), text, style);
    }

    /// Reset every cell to the default blank cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Copy all cells from a console of the same size.
    pub fn copy_from(&mut self, src: &Console) {
        debug_assert_eq!((self.width, self.height), (src.width, src.height));
        self.cells.copy_from_slice(&src.cells);
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// The set of cell changes to present.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Every cell of `console`, for repainting a screen whose contents are lost.
pub fn full_frame(console: &Console) -> Frame {
    Frame {
        cells: console
            .iter()
            .map(|(pos, cell)| FrameCell { cell, pos })
            .collect(),
        width: console.width,
        height: console.height,
    }
}

/// Cells of `curr` that differ from `prev`. Both consoles must share a size.
pub fn compute_frame(prev: &Console, curr: &Console) -> Frame {
    let cells = curr
        .iter()
        .zip(prev.cells.iter())
        .filter(|((_, c), p)| c != *p)
        .map(|((pos, cell), _)| FrameCell { cell, pos })
        .collect();
    Frame {
        cells,
        width: curr.width,
        height: curr.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut c = Console::new(4, 3);
        c.set(Point::new(10, 10), Cell::default().with_char('X'));
        assert_eq!(c.at(Point::new(10, 10)), Cell::default());
        assert_eq!(c.at(Point::new(-1, 0)), Cell::default());
    }

    #[test]
    fn draw_glyph_keeps_background_when_unset() {
        let mut c = Console::new(3, 3);
        let bg = Color::from_rgb(1, 2, 3);
        let p = Point::new(1, 1);
        c.tint(p, bg);
        c.draw_glyph(p, '@', Color::WHITE, None);
        let cell = c.at(p);
        assert_eq!(cell.ch, '@');
        assert_eq!(cell.style.fg, Color::WHITE);
        assert_eq!(cell.style.bg, bg);

        c.draw_glyph(p, 'o', Color::WHITE, Some(Color::BLACK));
        assert_eq!(c.at(p).style.bg, Color::BLACK);
    }

    #[test]
    fn print_clips_and_centres() {
        let mut c = Console::new(5, 2);
        c.print(Point::new(3, 0), "abc", Style::default());
        assert_eq!(c.at(Point::new(3, 0)).ch, 'a');
        assert_eq!(c.at(Point::new(4, 0)).ch, 'b');

        c.print_centered(1, "x", Style::default());
        assert_eq!(c.at(Point::new(2, 1)).ch, 'x');
    }

    #[test]
    fn clear_resets_cells() {
        let mut c = Console::new(2, 2);
        c.draw_glyph(Point::new(0, 0), '#', Color::WHITE, Some(Color::BLACK));
        c.clear();
        assert!(c.iter().all(|(_, cell)| cell == Cell::default()));
    }

    #[test]
    fn compute_frame_reports_changes_only() {
        let a = Console::new(3, 2);
        let mut b = Console::new(3, 2);
        b.set(Point::new(1, 0), Cell::default().with_char('A'));
        let frame = compute_frame(&a, &b);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].pos, Point::new(1, 0));
        assert_eq!(frame.cells[0].cell.ch, 'A');
        assert_eq!((frame.width, frame.height), (3, 2));
    }

    #[test]
    fn full_frame_covers_unchanged_cells() {
        let c = Console::new(3, 2);
        let frame = full_frame(&c);
        assert_eq!(frame.cells.len(), 6);
        assert_eq!(frame.cells[4].pos, Point::new(1, 1));
        assert!(compute_frame(&c, &c).cells.is_empty());
    }
}
