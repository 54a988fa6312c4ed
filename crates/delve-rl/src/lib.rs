//! Roguelike utilities for delve: dense grids, field of view, room layouts.

pub mod fov;
pub mod grid;
pub mod mapgen;

pub use fov::{Fov, compute_fov};
pub use grid::Grid;
pub use mapgen::{Layout, RoomsAndCorridors};
