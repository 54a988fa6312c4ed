//! Game and dungeon configuration.

/// Parameters handed to a [`DungeonGenerator`](crate::procgen::DungeonGenerator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DungeonConfig {
    pub max_rooms: usize,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub map_width: i32,
    pub map_height: i32,
    pub max_monsters_per_room: usize,
    pub max_items_per_room: usize,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
            map_width: 80,
            map_height: 43,
            max_monsters_per_room: 2,
            max_items_per_room: 2,
        }
    }
}

/// Top-level settings for a run of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    /// Euclidean sight radius. Zero or less sees the whole map.
    pub fov_radius: i32,
    pub dungeon: DungeonConfig,
    /// Seed for dungeon generation. `None` picks one at startup.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 80,
            screen_height: 50,
            fov_radius: 8,
            dungeon: DungeonConfig::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_fov_radius(mut self, radius: i32) -> Self {
        self.fov_radius = radius;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_game() {
        let c = GameConfig::default();
        assert_eq!((c.screen_width, c.screen_height), (80, 50));
        assert_eq!(c.fov_radius, 8);
        assert_eq!((c.dungeon.map_width, c.dungeon.map_height), (80, 43));
        assert_eq!(c.dungeon.max_rooms, 30);
        assert!(c.dungeon.map_height < c.screen_height);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let c: GameConfig = serde_json::from_str(r#"{"fov_radius": 5, "seed": 7}"#).unwrap();
        assert_eq!(c.fov_radius, 5);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.dungeon, DungeonConfig::default());
    }
}
