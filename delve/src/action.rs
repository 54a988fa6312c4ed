//! Player and monster commands and how they change the world.

use std::ops::ControlFlow;

use delve_core::Point;

use crate::entity::EntityId;
use crate::world::World;

/// Request to leave the game. Travels up the call chain as
/// `ControlFlow::Break` and ends the app loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit;

/// Why an action did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The actor is not in the registry.
    NoActor,
    OutOfBounds,
    /// The destination tile cannot be walked on.
    Blocked,
    /// Another entity blocks the destination.
    Occupied(EntityId),
}

/// Result of applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The world changed (or time passed); the turn is consumed.
    Performed,
    /// Nothing happened and no time passes.
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_performed(self) -> bool {
        self == Outcome::Performed
    }
}

/// A single command issued on behalf of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Step by `(dx, dy)`.
    Bump { dx: i32, dy: i32 },
    Wait,
    /// Leave the game.
    Escape,
}

impl Action {
    pub const fn bump(dx: i32, dy: i32) -> Self {
        Self::Bump { dx, dy }
    }

    /// Apply the action for `actor`.
    ///
    /// Returns `Break(Exit)` for [`Action::Escape`]; every other variant
    /// continues with the outcome.
    pub fn perform(self, world: &mut World, actor: EntityId) -> ControlFlow<Exit, Outcome> {
        let outcome = match self {
            Action::Escape => return ControlFlow::Break(Exit),
            Action::Wait => Outcome::Performed,
            Action::Bump { dx, dy } => bump(world, actor, dx, dy),
        };
        if let Outcome::Rejected(why) = outcome {
            log::debug!("{self:?} by {actor} rejected: {why:?}");
        }
        ControlFlow::Continue(outcome)
    }
}

fn bump(world: &mut World, actor: EntityId, dx: i32, dy: i32) -> Outcome {
    let Some(from) = world.entities.get(actor).map(|e| e.pos) else {
        return Outcome::Rejected(Rejection::NoActor);
    };
    let dest: Point = from.shift(dx, dy);
    if !world.map.in_bounds(dest) {
        return Outcome::Rejected(Rejection::OutOfBounds);
    }
    if !world.map.is_walkable(dest) {
        return Outcome::Rejected(Rejection::Blocked);
    }
    if let Some(other) = world.entities.blocking_at(dest).filter(|&id| id != actor) {
        return Outcome::Rejected(Rejection::Occupied(other));
    }
    if let Some(e) = world.entities.get_mut(actor) {
        e.pos = dest;
    }
    Outcome::Performed
}
