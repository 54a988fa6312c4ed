//! **delve-core**: foundational types for the delve roguelike.
//!
//! Geometry primitives, styled cells, the [`Console`] drawing surface, input
//! messages and the blocking, single-threaded application loop.

pub mod app;
pub mod cell;
pub mod console;
pub mod geom;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Driver, Effect, Model};
pub use cell::Cell;
pub use console::{Console, Frame, FrameCell};
pub use geom::{Point, Range};
pub use messages::*;
pub use style::{AttrMask, Color, Style};
