//! Field of vision by symmetric shadow casting.
//!
//! Iterative implementation of Albert Ford's symmetric shadow casting:
//! floor tiles are visible from each other symmetrically, walls bounding the
//! visible area are lit, and shadows are expansive. Results can be clipped to
//! a Euclidean radius.
//!
//! [`compute_fov`] is the one-shot entry point used by the game. [`Fov`] keeps
//! its buffers between calls for repeated use on the same map.

use delve_core::{Point, Range};

use crate::grid::Grid;

/// Compute the visible set from `pov` over a transparency mask.
///
/// A tile is visible if shadow casting reaches it and it lies within
/// Euclidean distance `radius` of `pov` (`dx² + dy² <= radius²`). A radius of
/// zero or less means no distance limit. `pov` itself is always visible.
///
/// # Panics
///
/// Panics if `pov` lies outside `transparency`.
pub fn compute_fov(transparency: &Grid<bool>, pov: Point, radius: i32) -> Grid<bool> {
    assert!(
        transparency.contains(pov),
        "point of view {pov} outside the {}x{} map",
        transparency.width(),
        transparency.height()
    );
    let mut fov = Fov::new(transparency.bounds());
    let passable = |p: Point| transparency.at(p).unwrap_or(false);
    if radius > 0 {
        fov.vision_map_circular(pov, radius, passable);
    } else {
        let depth = transparency.width().max(transparency.height());
        fov.vision_map(pov, depth, passable);
    }
    fov.into_mask()
}

/// Reusable shadow-casting state for one map range.
#[derive(Debug, Clone)]
pub struct Fov {
    range: Range,
    lit: Grid<bool>,
    visibles: Vec<Point>,
    tiles_buf: Vec<Point>,
}

impl Fov {
    /// Create a FOV for positions inside `range`. The range must start at the
    /// origin; map coordinates are used directly as indices.
    pub fn new(range: Range) -> Self {
        debug_assert_eq!(range.min, Point::ZERO);
        Self {
            range,
            lit: Grid::new(range.width(), range.height(), false),
            visibles: Vec::new(),
            tiles_buf: Vec::new(),
        }
    }

    pub fn range(&self) -> Range {
        self.range
    }

    /// Shadow-cast from `src` up to `max_depth` rows in each quadrant. The
    /// result is square (Chebyshev) shaped.
    ///
    /// `passable` returns `true` if the given point does not block vision.
    /// A source outside the range yields an empty result.
    pub fn vision_map(
        &mut self,
        src: Point,
        max_depth: i32,
        passable: impl Fn(Point) -> bool,
    ) -> &[Point] {
        self.lit.fill(false);
        self.visibles.clear();
        if !self.range.contains(src) {
            return &self.visibles;
        }
        self.reveal_at(src);
        for quadrant in Quadrant::ALL {
            self.cast_quadrant(Octant { quadrant, origin: src }, max_depth, &passable);
        }
        &self.visibles
    }

    /// [`vision_map`](Self::vision_map) clipped to the Euclidean disc of
    /// `radius` around `src`.
    pub fn vision_map_circular(
        &mut self,
        src: Point,
        radius: i32,
        passable: impl Fn(Point) -> bool,
    ) -> &[Point] {
        self.vision_map(src, radius, passable);
        self.retain_circular(src, radius);
        &self.visibles
    }

    /// Drop every visible point farther than `radius` from `center`.
    pub fn retain_circular(&mut self, center: Point, radius: i32) {
        let r_sq = (radius as i64) * (radius as i64);
        let lit = &mut self.lit;
        self.visibles.retain(|&p| {
            let keep = p.distance_sq(center) <= r_sq;
            if !keep {
                lit.set(p, false);
            }
            keep
        });
    }

    /// Whether `p` was visible in the last computation.
    pub fn visible(&self, p: Point) -> bool {
        self.lit.at(p).unwrap_or(false)
    }

    /// Visible points of the last computation, in discovery order.
    pub fn iter_visible(&self) -> impl Iterator<Item = Point> + '_ {
        self.visibles.iter().copied()
    }

    /// Consume the FOV, returning the visibility mask of the last computation.
    pub fn into_mask(self) -> Grid<bool> {
        self.lit
    }

    fn reveal_at(&mut self, p: Point) {
        if self.lit.at(p) == Some(false) {
            self.lit.set(p, true);
            self.visibles.push(p);
        }
    }

    fn cast_quadrant(&mut self, oc: Octant, max_depth: i32, passable: &impl Fn(Point) -> bool) {
        let (colmin, colmax) = oc.max_cols(self.range);
        let dmax = oc.max_depth(self.range).min(max_depth);
        if dmax <= 0 {
            return;
        }

        let mut rows = vec![Row {
            depth: 1,
            slope_start: Slope::new(-1, 1),
            slope_end: Slope::new(1, 1),
        }];
        let blocks = |tile: Point| !passable(oc.transform(tile));

        while let Some(mut row) = rows.pop() {
            self.tiles_buf.clear();
            row.tiles(&mut self.tiles_buf, colmin, colmax);
            let mut prev: Option<Point> = None;
            for i in 0..self.tiles_buf.len() {
                let tile = self.tiles_buf[i];
                let wall = blocks(tile);
                if wall || row.is_symmetric(tile) {
                    self.reveal_at(oc.transform(tile));
                }
                if let Some(ptile) = prev {
                    let pwall = blocks(ptile);
                    if pwall && !wall {
                        row.slope_start = Slope::of(tile);
                    }
                    if !pwall && wall {
                        let mut next = row.next();
                        next.slope_end = Slope::of(tile);
                        if next.depth <= dmax {
                            rows.push(next);
                        }
                    }
                }
                prev = Some(tile);
            }
            if let Some(ptile) = prev {
                if !blocks(ptile) && row.depth < dmax {
                    rows.push(row.next());
                }
            }
        }
    }
}

// ── SSC helper types ──────────────────────────────────────────────

/// One of the four cardinal quadrants scanned from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quadrant {
    North,
    East,
    South,
    West,
}

impl Quadrant {
    const ALL: [Quadrant; 4] = [Self::North, Self::East, Self::South, Self::West];
}

/// A quadrant anchored at a source. Local tiles are `(depth, col)` pairs
/// stored as `Point { x: depth, y: col }`.
#[derive(Debug, Clone, Copy)]
struct Octant {
    quadrant: Quadrant,
    origin: Point,
}

impl Octant {
    fn transform(&self, tile: Point) -> Point {
        let (depth, col) = (tile.x, tile.y);
        let o = self.origin;
        match self.quadrant {
            Quadrant::North => Point::new(o.x + col, o.y - depth),
            Quadrant::East => Point::new(o.x + depth, o.y + col),
            Quadrant::South => Point::new(o.x + col, o.y + depth),
            Quadrant::West => Point::new(o.x - depth, o.y + col),
        }
    }

    /// Column bounds that keep transformed tiles inside `rg`.
    fn max_cols(&self, rg: Range) -> (i32, i32) {
        let o = self.origin;
        match self.quadrant {
            Quadrant::North | Quadrant::South => (rg.min.x - o.x, rg.max.x - o.x - 1),
            Quadrant::East | Quadrant::West => (rg.min.y - o.y, rg.max.y - o.y - 1),
        }
    }

    /// Deepest row that stays inside `rg`.
    fn max_depth(&self, rg: Range) -> i32 {
        let o = self.origin;
        match self.quadrant {
            Quadrant::North => o.y - rg.min.y,
            Quadrant::East => rg.max.x - o.x - 1,
            Quadrant::South => rg.max.y - o.y - 1,
            Quadrant::West => o.x - rg.min.x,
        }
    }
}

/// A rational slope `num / den` with `den > 0`.
#[derive(Debug, Clone, Copy)]
struct Slope {
    num: i32,
    den: i32,
}

impl Slope {
    const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Slope through the near edge of `tile`: `(2 * col - 1) / (2 * depth)`.
    fn of(tile: Point) -> Self {
        Self::new(2 * tile.y - 1, 2 * tile.x)
    }
}

#[derive(Debug, Clone, Copy)]
struct Row {
    depth: i32,
    slope_start: Slope,
    slope_end: Slope,
}

impl Row {
    fn tiles(&self, ts: &mut Vec<Point>, colmin: i32, colmax: i32) {
        let min = round_ties_up(self.depth * self.slope_start.num, self.slope_start.den).max(colmin);
        let max = round_ties_down(self.depth * self.slope_end.num, self.slope_end.den).min(colmax);
        ts.extend((min..=max).map(|col| Point::new(self.depth, col)));
    }

    fn next(self) -> Row {
        Row {
            depth: self.depth + 1,
            ..self
        }
    }

    fn is_symmetric(&self, tile: Point) -> bool {
        let col = tile.y;
        col * self.slope_start.den >= self.depth * self.slope_start.num
            && col * self.slope_end.den <= self.depth * self.slope_end.num
    }
}

/// `n / d` rounded to the nearest integer, halves toward +∞ (`d > 0`).
fn round_ties_up(n: i32, d: i32) -> i32 {
    (2 * n + d).div_euclid(2 * d)
}

/// `n / d` rounded to the nearest integer, halves toward −∞ (`d > 0`).
fn round_ties_down(n: i32, d: i32) -> i32 {
    -round_ties_up(-n, d)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    use super::*;

    fn open(w: i32, h: i32) -> Grid<bool> {
        Grid::new(w, h, true)
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round_ties_up(3, 2), 2);
        assert_eq!(round_ties_up(-3, 2), -1);
        assert_eq!(round_ties_up(1, 3), 0);
        assert_eq!(round_ties_down(3, 2), 1);
        assert_eq!(round_ties_down(-3, 2), -2);
        assert_eq!(round_ties_down(2, 3), 1);
    }

    #[test]
    fn source_is_always_visible() {
        let mut walls = Grid::new(5, 5, false);
        walls.set(Point::new(0, 0), true);
        let vis = compute_fov(&walls, Point::new(2, 2), 8);
        assert_eq!(vis.at(Point::new(2, 2)), Some(true));
        // Every neighbour is an opaque wall, and walls are lit.
        assert_eq!(vis.at(Point::new(3, 2)), Some(true));
        assert_eq!(vis.at(Point::new(4, 2)), Some(false));
    }

    #[test]
    fn open_field_is_euclidean_disc() {
        let radius = 8;
        let size = 2 * radius + 5;
        let pov = Point::new(radius + 2, radius + 2);
        let vis = compute_fov(&open(size, size), pov, radius);
        for (p, seen) in vis.iter() {
            let inside = p.distance_sq(pov) <= (radius * radius) as i64;
            assert_eq!(seen, inside, "mismatch at {p}");
        }
        // (8,0) and (3,7) are inside the disc, (6,6) is not.
        assert!(vis.at(pov.shift(8, 0)).unwrap());
        assert!(vis.at(pov.shift(3, 7)).unwrap());
        assert!(!vis.at(pov.shift(6, 6)).unwrap());
    }

    #[test]
    fn walls_cast_shadows() {
        let mut mask = open(11, 11);
        let wall = Point::new(6, 5);
        mask.set(wall, false);
        let vis = compute_fov(&mask, Point::new(5, 5), 5);
        assert!(vis.at(wall).unwrap());
        assert!(!vis.at(Point::new(7, 5)).unwrap());
        assert!(!vis.at(Point::new(8, 5)).unwrap());
        assert!(vis.at(Point::new(4, 5)).unwrap());
    }

    #[test]
    fn non_positive_radius_is_unlimited() {
        let vis = compute_fov(&open(40, 3), Point::new(0, 1), 0);
        assert_eq!(vis.count(|v| v), 120);
    }

    #[test]
    fn pov_on_map_edge() {
        let vis = compute_fov(&open(3, 3), Point::new(0, 0), 8);
        assert_eq!(vis.count(|v| v), 9);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn pov_outside_map_panics() {
        compute_fov(&open(3, 3), Point::new(3, 0), 8);
    }

    #[test]
    fn fov_reuse_resets_previous_result() {
        let mask = open(20, 20);
        let mut fov = Fov::new(mask.bounds());
        let passable = |p: Point| mask.at(p).unwrap_or(false);
        fov.vision_map_circular(Point::new(2, 2), 3, passable);
        assert!(fov.visible(Point::new(2, 5)));
        fov.vision_map_circular(Point::new(15, 15), 3, passable);
        assert!(!fov.visible(Point::new(2, 5)));
        assert!(fov.visible(Point::new(15, 15)));
        assert!(fov.iter_visible().all(|p| p.distance_sq(Point::new(15, 15)) <= 9));
    }

    #[test]
    fn square_versus_circular() {
        let mask = open(20, 20);
        let src = Point::new(10, 10);
        let mut fov = Fov::new(mask.bounds());
        let square = fov.vision_map(src, 5, |_| true).len();
        assert_eq!(square, 121);
        let circle = fov.vision_map_circular(src, 5, |_| true).len();
        assert!(circle < square);
        assert!(!fov.visible(Point::new(15, 15)));
        assert!(fov.visible(Point::new(15, 10)));
    }

    #[test]
    fn symmetric_on_random_masks() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mask = Grid::from_fn(16, 16, |_| rng.random_range(0..100) < 70);
            let floors: Vec<Point> = mask.points().collect();
            let fovs: Vec<(Point, Grid<bool>)> = floors
                .iter()
                .map(|&p| (p, compute_fov(&mask, p, 8)))
                .collect();
            for (a, va) in &fovs {
                for (b, vb) in &fovs {
                    assert_eq!(
                        va.at(*b),
                        vb.at(*a),
                        "asymmetric visibility between {a} and {b}"
                    );
                }
            }
        }
    }
}
