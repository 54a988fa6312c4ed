//! Turn sequencing for one game session.
//!
//! The [`Engine`] owns the [`World`] and runs the fixed turn order: the
//! player's action, then the non-player hook, then exactly one visibility
//! recompute. Rejected actions skip the rest of the turn.

use std::ops::ControlFlow;

use delve_core::{AttrMask, Console, Point, Style, messages::Msg};
use delve_rl::compute_fov;

use crate::action::{Exit, Outcome};
use crate::colors;
use crate::entity::EntityId;
use crate::input::{Command, Mode};
use crate::world::World;

/// Opening line shown until the first turn passes.
pub const WELCOME: &str = "Hello and welcome, adventurer, to yet another dungeon!";

/// What the non-player hook reports back after running its turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Continue,
    /// The session is over; the engine switches to [`Mode::GameOver`].
    PlayerDefeated,
}

/// Hook that lets every non-player entity act once per turn.
pub trait NpcTurns {
    fn take_turns(&mut self, world: &mut World, player: EntityId) -> Progress;
}

/// Non-player entities do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl NpcTurns for Idle {
    fn take_turns(&mut self, _world: &mut World, _player: EntityId) -> Progress {
        Progress::Continue
    }
}

/// A running game session.
pub struct Engine {
    world: World,
    player: EntityId,
    mode: Mode,
    fov_radius: i32,
    turn: u64,
    npcs: Box<dyn NpcTurns>,
}

impl Engine {
    /// Install `world` and compute the initial field of view.
    ///
    /// # Panics
    ///
    /// Panics if `player` is not in the world's registry or stands outside
    /// the map.
    pub fn new(world: World, player: EntityId, fov_radius: i32) -> Self {
        let mut engine = Self {
            world,
            player,
            mode: Mode::Playing,
            fov_radius,
            turn: 0,
            npcs: Box::new(Idle),
        };
        engine.recompute_visibility();
        engine
    }

    /// Replace the non-player hook.
    pub fn with_npc_turns(mut self, npcs: impl NpcTurns + 'static) -> Self {
        self.npcs = Box::new(npcs);
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Turns completed so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn fov_radius(&self) -> i32 {
        self.fov_radius
    }

    /// # Panics
    ///
    /// Panics if the player entity was removed from the registry.
    pub fn player_pos(&self) -> Point {
        match self.world.entities.get(self.player) {
            Some(e) => e.pos,
            None => panic!("player {} missing from the registry", self.player),
        }
    }

    /// Handle one input message.
    ///
    /// Returns `Continue(None)` when the message maps to no action,
    /// `Continue(Some(outcome))` after applying one and `Break(Exit)` when
    /// the player leaves.
    pub fn process_input(&mut self, msg: &Msg) -> ControlFlow<Exit, Option<Outcome>> {
        let Some(Command::Act(action)) = self.mode.dispatch(msg) else {
            return ControlFlow::Continue(None);
        };
        let outcome = action.perform(&mut self.world, self.player)?;
        if outcome.is_performed() && self.mode == Mode::Playing {
            self.end_turn();
        }
        ControlFlow::Continue(Some(outcome))
    }

    fn end_turn(&mut self) {
        self.turn += 1;
        let progress = self.npcs.take_turns(&mut self.world, self.player);
        self.recompute_visibility();
        if progress == Progress::PlayerDefeated {
            log::info!("player defeated on turn {}", self.turn);
            self.mode = Mode::GameOver;
        }
    }

    /// Recompute the player's field of view and store it on the map.
    pub fn recompute_visibility(&mut self) {
        let pov = self.player_pos();
        let visible = compute_fov(&self.world.map.transparency(), pov, self.fov_radius);
        log::trace!(
            "turn {}: {} tiles visible from {pov}",
            self.turn,
            visible.count(|v| v)
        );
        self.world.map.set_visible(visible);
    }

    /// Draw the map, then the entities in sight, items below actors and the
    /// player on top.
    pub fn render(&self, console: &mut Console) {
        let map = &self.world.map;
        map.render(console);
        let mut in_sight: Vec<_> = self
            .world
            .entities
            .iter()
            .filter(|(_, e)| map.is_visible(e.pos))
            .map(|(_, e)| e)
            .collect();
        in_sight.sort_by_key(|e| e.render_order());
        for e in in_sight {
            console.draw_glyph(e.pos, e.ch, e.color, None);
        }
    }

    /// One line of session status on row `y`.
    pub fn render_status(&self, console: &mut Console, y: i32) {
        let left = Point::new(1, y);
        match self.mode {
            Mode::GameOver => {
                let text = format!("You died on turn {}. Press Esc to leave.", self.turn);
                let style = Style::default()
                    .with_fg(colors::GAME_OVER)
                    .with_attrs(AttrMask::BOLD);
                console.print(left, &text, style);
            }
            _ if self.turn == 0 => {
                console.print(left, WELCOME, Style::default().with_fg(colors::WELCOME_TEXT));
            }
            _ => {
                let p = self.player_pos();
                let text = format!("Turn {}  Position {}", self.turn, p);
                console.print(left, &text, Style::default().with_fg(colors::STATUS_TEXT));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use delve_core::{Key, Range};
    use delve_rl::Grid;

    use super::*;
    use crate::action::Rejection;
    use crate::entity::{self, Registry};
    use crate::gamemap::GameMap;
    use crate::tile;

    /// Counts hook calls and reports defeat once `defeat_after` is reached.
    struct Counting {
        calls: Rc<Cell<u32>>,
        defeat_after: Option<u32>,
    }

    impl NpcTurns for Counting {
        fn take_turns(&mut self, _world: &mut World, _player: EntityId) -> Progress {
            self.calls.set(self.calls.get() + 1);
            match self.defeat_after {
                Some(n) if self.calls.get() >= n => Progress::PlayerDefeated,
                _ => Progress::Continue,
            }
        }
    }

    fn open_world(w: i32, h: i32, at: Point) -> (World, EntityId) {
        let map = GameMap::from_floor(&Grid::new(w, h, true));
        let mut entities = Registry::new();
        let player = entities.spawn(entity::player().at(at));
        (World::new(map, entities), player)
    }

    /// 11×11 room with walls around it and one more wall at (6, 5).
    fn walled_world() -> (World, EntityId) {
        let mut map = GameMap::new(11, 11);
        for p in Range::new(1, 1, 10, 10) {
            map.set_tile(p, tile::FLOOR);
        }
        map.set_tile(Point::new(6, 5), tile::WALL);
        let mut entities = Registry::new();
        let player = entities.spawn(entity::player().at(Point::new(5, 5)));
        (World::new(map, entities), player)
    }

    fn counting(engine: Engine, defeat_after: Option<u32>) -> (Engine, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let engine = engine.with_npc_turns(Counting {
            calls: Rc::clone(&calls),
            defeat_after,
        });
        (engine, calls)
    }

    fn press(engine: &mut Engine, key: Key) -> ControlFlow<Exit, Option<Outcome>> {
        engine.process_input(&Msg::key(key))
    }

    fn assert_explored_covers_visible(engine: &Engine) {
        let map = &engine.world().map;
        for (p, v) in map.visible().iter() {
            assert!(!v || map.is_explored(p), "{p} visible but not explored");
        }
    }

    #[test]
    fn three_by_three_sees_everything() {
        let (world, player) = open_world(3, 3, Point::new(1, 1));
        let engine = Engine::new(world, player, 8);
        let map = &engine.world().map;
        assert_eq!(map.generation(), 1);
        assert_eq!(map.visible().count(|v| v), 9);
        assert_eq!(map.explored().count(|v| v), 9);
    }

    #[test]
    fn bump_into_wall_costs_nothing() {
        let (world, player) = walled_world();
        let (mut engine, calls) = counting(Engine::new(world, player, 8), None);
        let r = press(&mut engine, Key::ArrowRight);
        assert_eq!(r, ControlFlow::Continue(Some(Outcome::Rejected(Rejection::Blocked))));
        assert_eq!(engine.player_pos(), Point::new(5, 5));
        assert_eq!(engine.world().map.generation(), 1);
        assert_eq!(engine.turn(), 0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn valid_move_runs_one_full_turn() {
        let (world, player) = walled_world();
        let (mut engine, calls) = counting(Engine::new(world, player, 8), None);
        let r = press(&mut engine, Key::Char('j'));
        assert_eq!(r, ControlFlow::Continue(Some(Outcome::Performed)));
        assert_eq!(engine.player_pos(), Point::new(5, 6));
        assert_eq!(engine.world().map.generation(), 2);
        assert_eq!(engine.turn(), 1);
        assert_eq!(calls.get(), 1);
        assert!(engine.world().map.is_visible(Point::new(5, 9)));
    }

    #[test]
    fn wait_consumes_a_turn() {
        let (world, player) = walled_world();
        let (mut engine, calls) = counting(Engine::new(world, player, 8), None);
        press(&mut engine, Key::Char('.'));
        assert_eq!(engine.player_pos(), Point::new(5, 5));
        assert_eq!(engine.turn(), 1);
        assert_eq!(calls.get(), 1);
        assert_eq!(engine.world().map.generation(), 2);
    }

    #[test]
    fn unmapped_input_does_nothing() {
        let (world, player) = walled_world();
        let mut engine = Engine::new(world, player, 8);
        assert_eq!(press(&mut engine, Key::Char('?')), ControlFlow::Continue(None));
        assert_eq!(engine.process_input(&Msg::Init), ControlFlow::Continue(None));
        assert_eq!(engine.world().map.generation(), 1);
    }

    #[test]
    fn escape_breaks_out() {
        let (world, player) = walled_world();
        let mut engine = Engine::new(world, player, 8);
        assert_eq!(press(&mut engine, Key::Escape), ControlFlow::Break(Exit));
        assert_eq!(engine.process_input(&Msg::Quit), ControlFlow::Break(Exit));
        assert_eq!(engine.turn(), 0);
    }

    #[test]
    fn explored_grows_monotonically() {
        let (world, player) = open_world(40, 5, Point::new(2, 2));
        let mut engine = Engine::new(world, player, 3);
        let mut prev = engine.world().map.explored().clone();
        for _ in 0..30 {
            press(&mut engine, Key::ArrowRight);
            let now = engine.world().map.explored();
            for (p, was) in prev.iter() {
                assert!(!was || now.at(p) == Some(true), "{p} forgotten");
            }
            assert_explored_covers_visible(&engine);
            prev = now.clone();
        }
        assert_eq!(engine.player_pos(), Point::new(32, 2));
        assert!(engine.world().map.is_explored(Point::new(2, 2)));
        assert!(!engine.world().map.is_visible(Point::new(2, 2)));
    }

    #[test]
    fn defeat_switches_to_game_over() {
        let (world, player) = walled_world();
        let (mut engine, calls) = counting(Engine::new(world, player, 8), Some(1));
        press(&mut engine, Key::Char('h'));
        assert_eq!(engine.mode(), Mode::GameOver);
        assert_eq!(engine.world().map.generation(), 2);

        // Movement keys are ignored; the world stays put.
        assert_eq!(press(&mut engine, Key::Char('h')), ControlFlow::Continue(None));
        assert_eq!(press(&mut engine, Key::Char('.')), ControlFlow::Continue(None));
        assert_eq!(engine.player_pos(), Point::new(4, 5));
        assert_eq!(engine.turn(), 1);
        assert_eq!(calls.get(), 1);
        assert_eq!(press(&mut engine, Key::Escape), ControlFlow::Break(Exit));
    }

    #[test]
    fn render_hides_entities_out_of_sight() {
        let (mut world, player) = open_world(30, 3, Point::new(1, 1));
        world.entities.spawn(entity::orc().at(Point::new(3, 1)));
        world.entities.spawn(entity::troll().at(Point::new(25, 1)));
        world.entities.spawn(entity::health_potion().at(Point::new(1, 1)));
        let engine = Engine::new(world, player, 8);

        let mut c = Console::new(30, 3);
        engine.render(&mut c);
        assert_eq!(c.at(Point::new(3, 1)).ch, 'o');
        assert_eq!(c.at(Point::new(25, 1)).ch, ' ');
        // Player drawn over the potion, keeping the lit floor background.
        let cell = c.at(Point::new(1, 1));
        assert_eq!(cell.ch, '@');
        assert_eq!(cell.style.bg, tile::FLOOR.light.bg);
    }

    #[test]
    fn remembered_tiles_hide_entities() {
        let (mut world, player) = open_world(30, 3, Point::new(1, 1));
        let orc = world.entities.spawn(entity::orc().at(Point::new(4, 0)));
        let mut engine = Engine::new(world, player, 4);
        // Walk away until the orc's tile is explored but out of sight.
        for _ in 0..10 {
            press(&mut engine, Key::ArrowRight);
        }
        let orc_pos = engine.world().entities.get(orc).map(|e| e.pos).unwrap();
        assert!(engine.world().map.is_explored(orc_pos));
        assert!(!engine.world().map.is_visible(orc_pos));

        let mut c = Console::new(30, 3);
        engine.render(&mut c);
        assert_eq!(c.at(orc_pos).ch, ' ');
        assert_eq!(c.at(orc_pos).style.bg, tile::FLOOR.dark.bg);
    }

    #[test]
    fn status_line_follows_mode() {
        let (world, player) = walled_world();
        let (mut engine, _) = counting(Engine::new(world, player, 8), Some(2));
        let mut c = Console::new(60, 1);
        engine.render_status(&mut c, 0);
        assert_eq!(c.at(Point::new(1, 0)).ch, 'H');

        press(&mut engine, Key::Char('.'));
        c.clear();
        engine.render_status(&mut c, 0);
        assert_eq!(c.at(Point::new(1, 0)).ch, 'T');
        assert!(c.at(Point::new(1, 0)).style.attrs.is_empty());

        press(&mut engine, Key::Char('.'));
        c.clear();
        engine.render_status(&mut c, 0);
        assert_eq!(c.at(Point::new(1, 0)).ch, 'Y');
        assert!(c.at(Point::new(1, 0)).style.attrs.contains(AttrMask::BOLD));
    }

    #[test]
    #[should_panic(expected = "missing from the registry")]
    fn engine_requires_registered_player() {
        let (mut world, player) = open_world(3, 3, Point::new(1, 1));
        world.entities.remove(player);
        Engine::new(world, player, 8);
    }
}
