//! Frame orchestration for the Lane Defence binary.
//!
//! A [`Session`] owns the world and every pure system, and advances them by
//! exactly one frame per call: captured input becomes session and placement
//! commands, the clock ticks, the spawner reacts to the tick's events, and
//! the scoreboard folds the frame's display updates. The same path drives
//! both the windowed loop and headless runs.

use std::time::Duration;

use lane_defence_core::{Command, Event, SessionPhase};
use lane_defence_rendering::{
    AttackerPresentation, DefenderPresentation, FrameInput, HudPresentation,
    ProjectilePresentation, Scene,
};
use lane_defence_system_placement::{Placement, PlacementInput};
use lane_defence_system_scoreboard::Scoreboard;
use lane_defence_system_spawning::{Config as SpawnConfig, Spawning};
use lane_defence_world::{self as world, query, World};
use serde::Serialize;

/// Fixed frame delta used by headless runs.
const HEADLESS_TICK: Duration = Duration::from_millis(16);

/// Configuration for constructing a [`Session`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct SessionConfig {
    pub(crate) columns: u32,
    pub(crate) rows: u32,
    pub(crate) cell_length: f32,
    pub(crate) spawn_interval: Duration,
    pub(crate) rng_seed: u64,
}

/// Owns the world and systems, advancing them one frame at a time.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    spawning: Spawning,
    placement: Placement,
    scoreboard: Scoreboard,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Session {
    pub(crate) fn new(config: SessionConfig) -> Self {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::ConfigureGrid {
                columns: config.columns,
                rows: config.rows,
                cell_length: config.cell_length,
            },
            &mut events,
        );

        let mut scoreboard = Scoreboard::new();
        scoreboard.handle(&events);

        Self {
            world,
            spawning: Spawning::new(SpawnConfig::new(config.spawn_interval, config.rng_seed)),
            placement: Placement::new(),
            scoreboard,
            events,
            commands: Vec::new(),
        }
    }

    /// Advances the simulation by one frame using the captured input.
    pub(crate) fn advance_frame(&mut self, dt: Duration, input: &FrameInput) {
        self.events.clear();

        if input.start_pressed {
            world::apply(&mut self.world, Command::StartSession, &mut self.events);
        }
        if input.pause_pressed {
            world::apply(&mut self.world, Command::TogglePause, &mut self.events);
        }

        let click_cell = input
            .click
            .and_then(|click| query::grid(&self.world).cell_at(click.x, click.y));
        self.commands.clear();
        self.placement
            .handle(PlacementInput::new(input.select, click_cell), &mut self.commands);
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }

        world::apply(&mut self.world, Command::Tick { dt }, &mut self.events);

        let rows = query::grid(&self.world).rows();
        self.spawning.handle(&self.events, rows, &mut self.commands);
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }

        self.scoreboard.handle(&self.events);
    }

    /// Rebuilds the scene's entity and HUD channels from the world state.
    pub(crate) fn populate_scene(&self, scene: &mut Scene) {
        scene.defenders.clear();
        scene.defenders.extend(
            query::defender_view(&self.world)
                .iter()
                .map(|snapshot| DefenderPresentation::new(snapshot.cell, snapshot.kind)),
        );

        scene.attackers.clear();
        scene.attackers.extend(
            query::attacker_view(&self.world)
                .iter()
                .map(|snapshot| AttackerPresentation::new(snapshot.x, snapshot.row)),
        );

        scene.projectiles.clear();
        scene.projectiles.extend(
            query::projectile_view(&self.world)
                .iter()
                .map(|snapshot| ProjectilePresentation::new(snapshot.x, snapshot.y)),
        );

        let display = self.scoreboard.view();
        scene.hud = HudPresentation::new(
            display.score,
            display.currency,
            self.placement.selection(),
            query::phase(&self.world),
        );
    }

    /// Starts a session and drives it for the provided number of fixed ticks.
    pub(crate) fn run_headless(&mut self, ticks: u64) -> HeadlessSummary {
        let mut input = FrameInput {
            start_pressed: true,
            ..FrameInput::default()
        };

        for _ in 0..ticks {
            self.advance_frame(HEADLESS_TICK, &input);
            input = FrameInput::default();
        }

        HeadlessSummary {
            ticks,
            phase: query::phase(&self.world),
            score: query::score(&self.world),
            currency: query::currency(&self.world),
            defenders: query::defender_view(&self.world).len(),
            attackers: query::attacker_view(&self.world).len(),
            projectiles: query::projectile_view(&self.world).len(),
        }
    }

    pub(crate) fn welcome_banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }
}

/// Outcome summary printed as JSON after a headless run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct HeadlessSummary {
    pub(crate) ticks: u64,
    pub(crate) phase: SessionPhase,
    pub(crate) score: u32,
    pub(crate) currency: u32,
    pub(crate) defenders: usize,
    pub(crate) attackers: usize,
    pub(crate) projectiles: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use lane_defence_core::{CellCoord, DefenderKind};
    use lane_defence_rendering::{Color, GridPresentation, Scene};

    fn test_config() -> SessionConfig {
        SessionConfig {
            columns: 9,
            rows: 5,
            cell_length: 80.0,
            spawn_interval: Duration::from_millis(5000),
            rng_seed: 1,
        }
    }

    fn empty_scene() -> Scene {
        let grid = GridPresentation::new(9, 5, 80.0, Color::from_rgb_u8(0xcc, 0xcc, 0xcc))
            .expect("valid grid");
        let hud = HudPresentation::new(0, 0, None, SessionPhase::Idle);
        Scene::new(grid, Vec::new(), Vec::new(), Vec::new(), hud)
    }

    fn frame(session: &mut Session, input: FrameInput) {
        session.advance_frame(HEADLESS_TICK, &input);
    }

    #[test]
    fn start_select_and_click_places_a_defender() {
        let mut session = Session::new(test_config());
        let mut scene = empty_scene();

        frame(
            &mut session,
            FrameInput {
                start_pressed: true,
                ..FrameInput::default()
            },
        );
        frame(
            &mut session,
            FrameInput {
                select: Some(DefenderKind::Gunner),
                ..FrameInput::default()
            },
        );
        session.populate_scene(&mut scene);
        assert_eq!(scene.hud.selection, Some(DefenderKind::Gunner));
        assert_eq!(scene.hud.currency, 50);

        frame(
            &mut session,
            FrameInput {
                click: Some(Vec2::new(250.0, 170.0)),
                ..FrameInput::default()
            },
        );
        session.populate_scene(&mut scene);

        assert_eq!(scene.defenders.len(), 1);
        assert_eq!(scene.defenders[0].cell, CellCoord::new(3, 2));
        assert_eq!(scene.hud.currency, 0);
        assert_eq!(scene.hud.selection, None);
    }

    #[test]
    fn clicks_outside_the_field_leave_the_selection_armed() {
        let mut session = Session::new(test_config());
        let mut scene = empty_scene();

        frame(
            &mut session,
            FrameInput {
                start_pressed: true,
                select: Some(DefenderKind::Harvester),
                ..FrameInput::default()
            },
        );
        frame(
            &mut session,
            FrameInput {
                click: Some(Vec2::new(10_000.0, 10.0)),
                ..FrameInput::default()
            },
        );
        session.populate_scene(&mut scene);

        assert!(scene.defenders.is_empty());
        assert_eq!(scene.hud.selection, Some(DefenderKind::Harvester));
    }

    #[test]
    fn headless_runs_with_one_seed_are_identical() {
        let mut first = Session::new(test_config());
        let mut second = Session::new(test_config());

        assert_eq!(first.run_headless(400), second.run_headless(400));
    }

    #[test]
    fn undefended_headless_session_ends_in_game_over() {
        let mut session = Session::new(test_config());
        let summary = session.run_headless(2000);

        assert_eq!(summary.phase, SessionPhase::GameOver);
        assert!(summary.attackers >= 1, "the breaching attacker remains");
        assert_eq!(summary.score, 0);
    }

    #[test]
    fn spawner_injects_attackers_on_its_interval() {
        let mut session = Session::new(test_config());
        let mut scene = empty_scene();

        // 16 ms frames cross the 5000 ms interval on frame 313.
        let summary = session.run_headless(320);
        assert_eq!(summary.attackers, 1);

        session.populate_scene(&mut scene);
        assert_eq!(scene.attackers.len(), 1);
        assert!(scene.attackers[0].x < 720.0, "the attacker has begun advancing");
    }
}
