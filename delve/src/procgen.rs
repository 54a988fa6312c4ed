//! Dungeon generation: a level map plus where things start.

use delve_core::{Point, Range};
use delve_rl::RoomsAndCorridors;
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

use crate::config::DungeonConfig;
use crate::entity::{self, Entity};
use crate::gamemap::GameMap;
use crate::tile;

/// A freshly generated level.
#[derive(Debug, Clone)]
pub struct Dungeon {
    pub map: GameMap,
    /// Monsters and items, already positioned.
    pub placements: Vec<Entity>,
    /// Walkable tile where the player begins.
    pub player_start: Point,
}

/// Produces new levels.
pub trait DungeonGenerator {
    fn generate(&mut self, config: &DungeonConfig) -> Dungeon;
}

/// Rooms joined by corridors, populated with orcs, trolls and potions.
#[derive(Debug, Clone)]
pub struct RoomsDungeon<R: Rng> {
    rng: R,
}

impl<R: Rng> RoomsDungeon<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RoomsDungeon<StdRng> {
    /// A generator with a reproducible sequence of levels.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DungeonGenerator for RoomsDungeon<R> {
    fn generate(&mut self, config: &DungeonConfig) -> Dungeon {
        let layout = RoomsAndCorridors {
            max_rooms: config.max_rooms,
            room_min_size: config.room_min_size,
            room_max_size: config.room_max_size,
        }
        .generate(config.map_width, config.map_height, &mut self.rng);

        let mut map = GameMap::from_floor(&layout.floor);
        let player_start = match layout.rooms.first() {
            Some(room) => room.center(),
            None => {
                let c = map.bounds().center();
                log::warn!(
                    "no room fits a {}x{} map, starting on a lone tile at {c}",
                    config.map_width,
                    config.map_height
                );
                map.set_tile(c, tile::FLOOR);
                c
            }
        };

        let mut placements = Vec::new();
        for room in &layout.rooms {
            place_entities(&mut self.rng, *room, config, player_start, &mut placements);
        }
        log::info!(
            "generated {} rooms with {} entities",
            layout.rooms.len(),
            placements.len()
        );
        Dungeon {
            map,
            placements,
            player_start,
        }
    }
}

/// Scatter up to the configured number of monsters and items in `room`,
/// never two on the same tile and never on the player.
fn place_entities(
    rng: &mut impl Rng,
    room: Range,
    config: &DungeonConfig,
    player_start: Point,
    out: &mut Vec<Entity>,
) {
    let free = |p: Point, out: &[Entity]| p != player_start && out.iter().all(|e| e.pos != p);

    let monsters = rng.random_range(0..=config.max_monsters_per_room);
    for _ in 0..monsters {
        let p = random_point(rng, room);
        if free(p, out.as_slice()) {
            let e = if rng.random_bool(0.8) {
                entity::orc()
            } else {
                entity::troll()
            };
            out.push(e.at(p));
        }
    }

    let items = rng.random_range(0..=config.max_items_per_room);
    for _ in 0..items {
        let p = random_point(rng, room);
        if free(p, out.as_slice()) {
            out.push(entity::health_potion().at(p));
        }
    }
}

fn random_point(rng: &mut impl Rng, room: Range) -> Point {
    Point::new(
        rng.random_range(room.min.x..room.max.x),
        rng.random_range(room.min.y..room.max.y),
    )
}
