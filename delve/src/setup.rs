//! Starting a new session.

use crate::config::GameConfig;
use crate::engine::Engine;
use crate::entity::{self, Registry};
use crate::procgen::DungeonGenerator;
use crate::world::World;

/// Generate a level, place the player and hand back a running engine.
pub fn new_game(config: &GameConfig, generator: &mut dyn DungeonGenerator) -> Engine {
    let dungeon = generator.generate(&config.dungeon);
    let mut entities = Registry::new();
    let player = entities.spawn(entity::player().at(dungeon.player_start));
    for e in dungeon.placements {
        entities.spawn(e);
    }
    log::info!(
        "new game: player at {}, {} other entities",
        dungeon.player_start,
        entities.len() - 1
    );
    Engine::new(World::new(dungeon.map, entities), player, config.fov_radius)
}
