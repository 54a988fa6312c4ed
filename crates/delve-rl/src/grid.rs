//! A dense, owned 2D grid for map layers.
//!
//! [`Grid<T>`] stores one value per map position in row-major order. It backs
//! tile layers, the transparency mask handed to the FOV, and the visible /
//! explored overlays.

use delve_core::{Point, Range};

/// A `width × height` grid of `T` values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    cells: Vec<T>,
    width: i32,
    height: i32,
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `fill`.
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![fill; (width * height) as usize],
            width,
            height,
        }
    }

    /// Create a grid from a function of each position.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let cells = Range::new(0, 0, width, height).iter().map(&mut f).collect();
        Self {
            cells,
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
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        self.contains(p).then(|| (p.y * self.width + p.x) as usize)
    }

    /// Value at `p`, or `None` outside the grid.
    #[inline]
    pub fn at(&self, p: Point) -> Option<T> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the value at `p`. Does nothing outside the grid.
    #[inline]
    pub fn set(&mut self, p: Point, v: T) {
        if let Some(i) = self.index(p) {
            self.cells[i] = v;
        }
    }

    pub fn fill(&mut self, v: T) {
        self.cells.fill(v);
    }

    /// Set every position inside `r` (clipped to the grid) to `v`.
    pub fn fill_range(&mut self, r: Range, v: T) {
        for p in r.intersect(self.bounds()) {
            self.set(p, v);
        }
    }

    /// Build a same-shaped grid by mapping every value.
    pub fn map<U: Copy>(&self, mut f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.iter().map(|&v| f(v)).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Row-major iterator over `(Point, T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, T)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    /// Count the values satisfying `f`.
    pub fn count(&self, mut f: impl FnMut(T) -> bool) -> usize {
        self.cells.iter().filter(|&&v| f(v)).count()
    }
}

impl Grid<bool> {
    /// Cell-wise `self |= other`. Both grids must have the same size.
    ///
    /// # Panics
    ///
    /// Panics if the sizes differ.
    pub fn union_with(&mut self, other: &Grid<bool>) {
        assert_eq!(self.size(), other.size(), "grid size mismatch");
        for (a, &b) in self.cells.iter_mut().zip(&other.cells) {
            *a |= b;
        }
    }

    /// Positions holding `true`, in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.iter().filter_map(|(p, v)| v.then_some(p))
    }
}
