//! Delve: a turn-based dungeon crawler on a tile grid.
//!
//! The crate wires the pieces of a session together: the [`GameMap`] with its
//! visibility overlays, the entity [`Registry`], the [`Action`] pipeline, the
//! turn-sequencing [`Engine`] and the input [`Mode`]s, all driven by
//! [`DelveModel`] inside the `delve-core` application loop.

pub mod action;
pub mod colors;
pub mod config;
pub mod engine;
pub mod entity;
pub mod gamemap;
pub mod input;
pub mod menu;
pub mod model;
pub mod procgen;
pub mod session;
pub mod setup;
pub mod tile;
pub mod world;

pub use action::{Action, Exit, Outcome, Rejection};
pub use config::{DungeonConfig, GameConfig};
pub use engine::{Engine, Idle, NpcTurns, Progress};
pub use entity::{Entity, EntityId, Registry};
pub use gamemap::GameMap;
pub use input::{Command, MenuChoice, Mode};
pub use menu::MenuBackground;
pub use model::DelveModel;
pub use procgen::{Dungeon, DungeonGenerator, RoomsDungeon};
pub use session::{NoSavedGame, SessionError, SessionStore};
pub use world::World;
