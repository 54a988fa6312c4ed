//! Entities and the registry that owns them.

use std::fmt;
use std::ops::BitOr;

use delve_core::{Point, style::Color};

use crate::colors;

/// Stable handle to an entity in a [`Registry`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capability tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tags(pub u8);

impl Tags {
    pub const NONE: Self = Self(0);
    pub const PLAYER: Self = Self(1 << 0);
    pub const BLOCKS_MOVEMENT: Self = Self(1 << 1);
    pub const ITEM: Self = Self(1 << 2);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for Tags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Render order for drawing precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderOrder {
    Item = 0,
    Actor = 1,
    Player = 2,
}

/// A game object on the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub ch: char,
    pub color: Color,
    pub pos: Point,
    pub tags: Tags,
}

impl Entity {
    pub fn new(name: impl Into<String>, ch: char, color: Color, tags: Tags) -> Self {
        Self {
            name: name.into(),
            ch,
            color,
            pos: Point::ZERO,
            tags,
        }
    }

    /// Same entity placed at `pos`.
    pub fn at(mut self, pos: Point) -> Self {
        self.pos = pos;
        self
    }

    pub fn is_player(&self) -> bool {
        self.tags.contains(Tags::PLAYER)
    }

    pub fn blocks_movement(&self) -> bool {
        self.tags.contains(Tags::BLOCKS_MOVEMENT)
    }

    pub fn is_item(&self) -> bool {
        self.tags.contains(Tags::ITEM)
    }

    pub fn render_order(&self) -> RenderOrder {
        if self.is_player() {
            RenderOrder::Player
        } else if self.is_item() {
            RenderOrder::Item
        } else {
            RenderOrder::Actor
        }
    }
}

// ---------------------------------------------------------------------------
// Factories
// ---------------------------------------------------------------------------

pub fn player() -> Entity {
    Entity::new(
        "Player",
        '@',
        colors::PLAYER_FG,
        Tags::PLAYER | Tags::BLOCKS_MOVEMENT,
    )
}

pub fn orc() -> Entity {
    Entity::new("Orc", 'o', colors::ORC_FG, Tags::BLOCKS_MOVEMENT)
}

pub fn troll() -> Entity {
    Entity::new("Troll", 'T', colors::TROLL_FG, Tags::BLOCKS_MOVEMENT)
}

pub fn health_potion() -> Entity {
    Entity::new("Health Potion", '!', colors::POTION_FG, Tags::ITEM)
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Sparse, id-indexed entity storage. Removing an entity leaves a hole so ids
/// stay valid and are never handed out twice.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    slots: Vec<Option<Entity>>,
    live: usize,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.slots.len() as u32);
        self.slots.push(Some(entity));
        self.live += 1;
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let e = self.slots.get_mut(id.0 as usize)?.take();
        if e.is_some() {
            self.live -= 1;
        }
        e
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(id.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.get_mut(id.0 as usize)?.as_mut()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (EntityId(i as u32), e)))
    }

    /// Every entity standing on `p`.
    pub fn at(&self, p: Point) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.iter().filter(move |(_, e)| e.pos == p)
    }

    /// The movement-blocking entity on `p`, if any.
    pub fn blocking_at(&self, p: Point) -> Option<EntityId> {
        self.at(p).find(|(_, e)| e.blocks_movement()).map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_get_remove() {
        let mut reg = Registry::new();
        let a = reg.spawn(orc().at(Point::new(1, 1)));
        let b = reg.spawn(health_potion().at(Point::new(1, 1)));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(a).map(|e| e.ch), Some('o'));

        assert_eq!(reg.remove(a).map(|e| e.name), Some("Orc".to_string()));
        assert!(reg.get(a).is_none());
        assert!(reg.remove(a).is_none());
        assert_eq!(reg.len(), 1);
        assert!(reg.contains(b));
    }

    #[test]
    fn ids_are_not_reused() {
        let mut reg = Registry::new();
        let a = reg.spawn(orc());
        reg.remove(a);
        let b = reg.spawn(troll());
        assert_ne!(a, b);
        assert!(reg.get(a).is_none());
    }

    #[test]
    fn spatial_queries() {
        let mut reg = Registry::new();
        let p = Point::new(3, 4);
        let potion = reg.spawn(health_potion().at(p));
        assert_eq!(reg.blocking_at(p), None);
        let grunt = reg.spawn(orc().at(p));
        reg.spawn(troll().at(Point::new(0, 0)));

        let here: Vec<EntityId> = reg.at(p).map(|(id, _)| id).collect();
        assert_eq!(here, vec![potion, grunt]);
        assert_eq!(reg.blocking_at(p), Some(grunt));
    }

    #[test]
    fn get_mut_moves_entity() {
        let mut reg = Registry::new();
        let id = reg.spawn(player());
        if let Some(e) = reg.get_mut(id) {
            e.pos = Point::new(7, 2);
        }
        assert_eq!(reg.at(Point::new(7, 2)).count(), 1);
    }

    #[test]
    fn render_order_layers() {
        assert!(health_potion().render_order() < orc().render_order());
        assert!(troll().render_order() < player().render_order());
        assert!(player().is_player() && player().blocks_movement());
        assert!(!health_potion().blocks_movement());
    }
}
