//! Rooms-and-corridors dungeon layout.
//!
//! Rectangular rooms are placed at random positions, rejected when they touch
//! an earlier room, and each new room is joined to the previous one by an
//! L-shaped tunnel. The result is a floor mask plus the room interiors in
//! placement order.

use delve_core::{Point, Range};
use rand::{Rng, RngExt};

use crate::grid::Grid;

/// Parameters of the rooms-and-corridors generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomsAndCorridors {
    /// Number of placement attempts.
    pub max_rooms: usize,
    /// Smallest outer room side, walls included.
    pub room_min_size: i32,
    /// Largest outer room side, walls included.
    pub room_max_size: i32,
}

impl Default for RoomsAndCorridors {
    fn default() -> Self {
        Self {
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
        }
    }
}

/// Output of [`RoomsAndCorridors::generate`].
#[derive(Debug, Clone)]
pub struct Layout {
    /// `true` where the map is open floor.
    pub floor: Grid<bool>,
    /// Room interiors in placement order. The first one is where the player
    /// usually starts.
    pub rooms: Vec<Range>,
}

impl RoomsAndCorridors {
    /// Carve a `width × height` layout. The outermost ring of the map always
    /// stays wall.
    pub fn generate(&self, width: i32, height: i32, rng: &mut impl Rng) -> Layout {
        let mut floor = Grid::new(width, height, false);
        let mut outers: Vec<Range> = Vec::new();
        let mut rooms: Vec<Range> = Vec::new();
        let min = self.room_min_size.max(3);
        let max = self.room_max_size.max(min);

        for _ in 0..self.max_rooms {
            let w = rng.random_range(min..=max);
            let h = rng.random_range(min..=max);
            if w > width - 1 || h > height - 1 {
                continue;
            }
            let x = rng.random_range(0..=width - w - 1);
            let y = rng.random_range(0..=height - h - 1);
            let outer = Range::new(x, y, x + w, y + h);
            if outers.iter().any(|&o| touches(o, outer)) {
                continue;
            }
            let interior = outer.shift(1, 1, 0, 0);
            floor.fill_range(interior, true);
            if let Some(prev) = rooms.last() {
                tunnel_between(&mut floor, prev.center(), interior.center(), rng);
            }
            outers.push(outer);
            rooms.push(interior);
        }
        log::debug!("carved {} rooms in a {width}x{height} map", rooms.len());
        Layout { floor, rooms }
    }
}

/// Whether two outer room rectangles overlap or share an edge.
fn touches(a: Range, b: Range) -> bool {
    a.shift(0, 0, 1, 1).overlaps(b.shift(0, 0, 1, 1))
}

/// Carve an L-shaped tunnel from `a` to `b`, turning at a random corner.
fn tunnel_between(floor: &mut Grid<bool>, a: Point, b: Point, rng: &mut impl Rng) {
    let corner = if rng.random_bool(0.5) {
        Point::new(b.x, a.y)
    } else {
        Point::new(a.x, b.y)
    };
    carve_straight(floor, a, corner);
    carve_straight(floor, corner, b);
}

/// Carve an axis-aligned segment, both ends included.
fn carve_straight(floor: &mut Grid<bool>, from: Point, to: Point) {
    let r = Range::new(from.x, from.y, to.x, to.y).shift(0, 0, 1, 1);
    floor.fill_range(r, true);
}
