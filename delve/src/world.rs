//! The mutable game state a turn operates on.

use crate::entity::Registry;
use crate::gamemap::GameMap;

/// Map and entities of one session. Passed by `&mut` into whatever mutates
/// it for the duration of a single call.
#[derive(Debug, Clone)]
pub struct World {
    pub map: GameMap,
    pub entities: Registry,
}

impl World {
    pub fn new(map: GameMap, entities: Registry) -> Self {
        Self { map, entities }
    }
}
