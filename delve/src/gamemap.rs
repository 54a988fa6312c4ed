//! The dungeon level: tiles plus the visible and explored overlays.

use delve_core::{Console, Point, Range};
use delve_rl::Grid;

use crate::tile::{self, Tile};

/// A fixed-size map of [`Tile`]s with per-tile visibility state.
///
/// `visible` is replaced wholesale by [`GameMap::set_visible`], which also
/// merges it into `explored`, so `explored ⊇ visible` holds after every call
/// and explored tiles never revert.
#[derive(Debug, Clone)]
pub struct GameMap {
    tiles: Grid<Tile>,
    visible: Grid<bool>,
    explored: Grid<bool>,
    generation: u64,
}

impl GameMap {
    /// A map of solid wall.
    pub fn new(width: i32, height: i32) -> Self {
        Self::from_tiles(Grid::new(width, height, tile::WALL))
    }

    pub fn from_tiles(tiles: Grid<Tile>) -> Self {
        let (w, h) = (tiles.width(), tiles.height());
        Self {
            tiles,
            visible: Grid::new(w, h, false),
            explored: Grid::new(w, h, false),
            generation: 0,
        }
    }

    /// Floor where `floor` is `true`, wall elsewhere.
    pub fn from_floor(floor: &Grid<bool>) -> Self {
        Self::from_tiles(floor.map(|open| if open { tile::FLOOR } else { tile::WALL }))
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.tiles.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.tiles.height()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.tiles.bounds()
    }

    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        self.tiles.contains(p)
    }

    pub fn tile(&self, p: Point) -> Option<Tile> {
        self.tiles.at(p)
    }

    /// Replace a tile. Used while building a level.
    pub fn set_tile(&mut self, p: Point, t: Tile) {
        self.tiles.set(p, t);
    }

    /// Out of bounds is never walkable.
    pub fn is_walkable(&self, p: Point) -> bool {
        self.tiles.at(p).is_some_and(|t| t.walkable)
    }

    /// Out of bounds is opaque.
    pub fn is_transparent(&self, p: Point) -> bool {
        self.tiles.at(p).is_some_and(|t| t.transparent)
    }

    /// Per-tile transparency, the input of the field of vision.
    pub fn transparency(&self) -> Grid<bool> {
        self.tiles.map(|t| t.transparent)
    }

    pub fn is_visible(&self, p: Point) -> bool {
        self.visible.at(p).unwrap_or(false)
    }

    pub fn is_explored(&self, p: Point) -> bool {
        self.explored.at(p).unwrap_or(false)
    }

    pub fn visible(&self) -> &Grid<bool> {
        &self.visible
    }

    pub fn explored(&self) -> &Grid<bool> {
        &self.explored
    }

    /// Number of [`set_visible`](Self::set_visible) calls so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Install a freshly computed visible set and merge it into the explored
    /// set.
    ///
    /// # Panics
    ///
    /// Panics if `mask` does not have the map's dimensions.
    pub fn set_visible(&mut self, mask: Grid<bool>) {
        assert_eq!(
            mask.size(),
            self.tiles.size(),
            "visibility mask does not match the map size"
        );
        self.explored.union_with(&mask);
        self.visible = mask;
        self.generation += 1;
    }

    /// Draw every tile: lit if visible, dark if only explored, shroud
    /// otherwise.
    pub fn render(&self, console: &mut Console) {
        for (p, t) in self.tiles.iter() {
            let g = if self.is_visible(p) {
                t.light
            } else if self.is_explored(p) {
                t.dark
            } else {
                tile::SHROUD
            };
            console.draw_glyph(p, g.ch, g.fg, Some(g.bg));
        }
    }
}
