#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lane Defence.
//!
//! The world owns every piece of mutable simulation state: the placement
//! grid, the three entity collections, the score and currency balances, and
//! the session phase. All mutation flows through [`apply`], which executes
//! one [`Command`] and appends the resulting [`Event`]s for systems and
//! adapters to consume. Read access goes through the snapshot views in
//! [`query`].

use std::time::Duration;

use lane_defence_core::{
    AttackerId, CellCoord, Command, DefenderId, DefenderKind, Event, FieldPoint, LaneGrid,
    PlacementError, ProjectileId, SessionPhase, WELCOME_BANNER,
};

const DEFAULT_GRID_COLUMNS: u32 = 9;
const DEFAULT_GRID_ROWS: u32 = 5;
const DEFAULT_CELL_LENGTH: f32 = 80.0;

const STARTING_CURRENCY: u32 = 50;
const DEFENDER_START_HEALTH: i32 = 100;
const ATTACKER_START_HEALTH: i32 = 100;
const ATTACKER_SPEED: f32 = 0.5;
const PROJECTILE_SPEED: f32 = 5.0;
const FIRE_INTERVAL_TICKS: u32 = 60;
const PROJECTILE_HIT_DAMAGE: i32 = 20;
const KILL_SCORE_REWARD: u32 = 10;
const KILL_CURRENCY_REWARD: u32 = 50;

#[derive(Clone, Debug)]
struct Defender {
    id: DefenderId,
    kind: DefenderKind,
    cell: CellCoord,
    health: i32,
    cooldown_ticks: u32,
}

#[derive(Clone, Debug)]
struct Attacker {
    id: AttackerId,
    row: u32,
    x: f32,
    speed: f32,
    health: i32,
}

#[derive(Clone, Debug)]
struct Projectile {
    id: ProjectileId,
    x: f32,
    y: f32,
    speed: f32,
}

/// Represents the authoritative Lane Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: LaneGrid,
    phase: SessionPhase,
    defenders: Vec<Defender>,
    attackers: Vec<Attacker>,
    projectiles: Vec<Projectile>,
    score: u32,
    currency: u32,
    next_defender_id: u32,
    next_attacker_id: u32,
    next_projectile_id: u32,
}

impl World {
    /// Creates a new Lane Defence world ready for simulation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid: LaneGrid::new(DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS, DEFAULT_CELL_LENGTH),
            phase: SessionPhase::Idle,
            defenders: Vec::new(),
            attackers: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            currency: STARTING_CURRENCY,
            next_defender_id: 0,
            next_attacker_id: 0,
            next_projectile_id: 0,
        }
    }

    fn reset_session_state(&mut self) {
        self.defenders.clear();
        self.attackers.clear();
        self.projectiles.clear();
        self.score = 0;
        self.currency = STARTING_CURRENCY;
        self.next_defender_id = 0;
        self.next_attacker_id = 0;
        self.next_projectile_id = 0;
    }

    fn start_session(&mut self, out_events: &mut Vec<Event>) {
        self.reset_session_state();
        self.phase = SessionPhase::Running;

        out_events.push(Event::SessionStarted);
        out_events.push(Event::PhaseChanged {
            phase: SessionPhase::Running,
        });
        out_events.push(Event::ScoreChanged { score: self.score });
        out_events.push(Event::CurrencyChanged {
            currency: self.currency,
        });
    }

    fn toggle_pause(&mut self, out_events: &mut Vec<Event>) {
        let next = match self.phase {
            SessionPhase::Running => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Running,
            SessionPhase::Idle | SessionPhase::GameOver => return,
        };

        self.phase = next;
        out_events.push(Event::PhaseChanged { phase: next });
    }

    fn spawn_attacker(&mut self, row: u32, out_events: &mut Vec<Event>) {
        if self.phase != SessionPhase::Running {
            return;
        }
        if row >= self.grid.rows() {
            return;
        }

        let id = AttackerId::new(self.next_attacker_id);
        self.next_attacker_id += 1;
        self.attackers.push(Attacker {
            id,
            row,
            x: self.grid.width(),
            speed: ATTACKER_SPEED,
            health: ATTACKER_START_HEALTH,
        });
        out_events.push(Event::AttackerSpawned { attacker: id, row });
    }

    fn place_defender(&mut self, kind: DefenderKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        if !self.grid.contains(cell) {
            out_events.push(Event::DefenderPlacementRejected {
                kind,
                cell,
                reason: PlacementError::OutOfBounds,
            });
            return;
        }

        let cost = kind.cost();
        if self.currency < cost {
            out_events.push(Event::DefenderPlacementRejected {
                kind,
                cell,
                reason: PlacementError::InsufficientFunds {
                    cost,
                    available: self.currency,
                },
            });
            return;
        }

        self.currency -= cost;
        let id = DefenderId::new(self.next_defender_id);
        self.next_defender_id += 1;
        self.defenders.push(Defender {
            id,
            kind,
            cell,
            health: DEFENDER_START_HEALTH,
            cooldown_ticks: 0,
        });

        out_events.push(Event::DefenderPlaced {
            defender: id,
            kind,
            cell,
        });
        out_events.push(Event::CurrencyChanged {
            currency: self.currency,
        });
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });

        if self.phase != SessionPhase::Running {
            return;
        }

        let fired = self.update_defenders(out_events);
        self.update_attackers(out_events);
        self.update_projectiles();
        self.resolve_collisions(out_events);
        self.reap_exited_projectiles();

        // Fresh projectiles join the field only after collision resolution
        // and reaping: they neither move nor hit on the tick they are fired.
        self.projectiles.extend(fired);
    }

    fn update_defenders(&mut self, out_events: &mut Vec<Event>) -> Vec<Projectile> {
        let grid = self.grid;
        let mut fired = Vec::new();

        for defender in &mut self.defenders {
            match defender.kind {
                DefenderKind::Gunner => {
                    defender.cooldown_ticks += 1;
                    if defender.cooldown_ticks < FIRE_INTERVAL_TICKS {
                        continue;
                    }
                    defender.cooldown_ticks = 0;

                    let muzzle = gunner_muzzle(&grid, defender.cell);
                    let id = ProjectileId::new(self.next_projectile_id);
                    self.next_projectile_id += 1;
                    fired.push(Projectile {
                        id,
                        x: muzzle.x(),
                        y: muzzle.y(),
                        speed: PROJECTILE_SPEED,
                    });
                    out_events.push(Event::ProjectileFired {
                        projectile: id,
                        defender: defender.id,
                    });
                }
                DefenderKind::Harvester => {}
            }
        }

        fired
    }

    fn update_attackers(&mut self, out_events: &mut Vec<Event>) {
        for attacker in &mut self.attackers {
            attacker.x -= attacker.speed;

            if attacker.x < 0.0 && self.phase != SessionPhase::GameOver {
                self.phase = SessionPhase::GameOver;
                out_events.push(Event::AttackerBreached {
                    attacker: attacker.id,
                    row: attacker.row,
                });
                out_events.push(Event::PhaseChanged {
                    phase: SessionPhase::GameOver,
                });
            }
        }
    }

    fn update_projectiles(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.x += projectile.speed;
        }
    }

    /// Pairwise projectile/attacker resolution.
    ///
    /// Both scans run in reverse index order so removals never skip an
    /// entity, and the inner scan breaks after the first containing
    /// projectile, so each attacker absorbs at most one hit per tick.
    fn resolve_collisions(&mut self, out_events: &mut Vec<Event>) {
        let cell = self.grid.cell_length();

        let mut i = self.attackers.len();
        while i > 0 {
            i -= 1;

            let (left, top) = {
                let attacker = &self.attackers[i];
                (attacker.x, attacker.row as f32 * cell)
            };

            let mut j = self.projectiles.len();
            while j > 0 {
                j -= 1;

                let projectile = &self.projectiles[j];
                let contained = projectile.x > left
                    && projectile.x < left + cell
                    && projectile.y > top
                    && projectile.y < top + cell;
                if !contained {
                    continue;
                }

                let projectile_id = projectile.id;
                let _ = self.projectiles.remove(j);

                let attacker = &mut self.attackers[i];
                attacker.health -= PROJECTILE_HIT_DAMAGE;
                if attacker.health <= 0 {
                    let attacker_id = attacker.id;
                    let _ = self.attackers.remove(i);
                    self.score += KILL_SCORE_REWARD;
                    self.currency += KILL_CURRENCY_REWARD;
                    out_events.push(Event::AttackerKilled {
                        attacker: attacker_id,
                        score_reward: KILL_SCORE_REWARD,
                        currency_reward: KILL_CURRENCY_REWARD,
                    });
                    out_events.push(Event::ScoreChanged { score: self.score });
                    out_events.push(Event::CurrencyChanged {
                        currency: self.currency,
                    });
                } else {
                    out_events.push(Event::AttackerHit {
                        attacker: attacker.id,
                        projectile: projectile_id,
                        remaining_health: attacker.health,
                    });
                }

                break;
            }
        }
    }

    fn reap_exited_projectiles(&mut self) {
        let width = self.grid.width();
        self.projectiles.retain(|projectile| projectile.x < width);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Pixel position at which a gunner in the provided cell emits projectiles:
/// the cell's right edge, vertically centered.
fn gunner_muzzle(grid: &LaneGrid, cell: CellCoord) -> FieldPoint {
    let origin = grid.cell_origin(cell);
    FieldPoint::new(
        origin.x() + grid.cell_length(),
        origin.y() + grid.cell_length() / 2.0,
    )
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid {
            columns,
            rows,
            cell_length,
        } => {
            world.grid = LaneGrid::new(columns, rows, cell_length);
            world.phase = SessionPhase::Idle;
            world.reset_session_state();

            out_events.push(Event::ScoreChanged { score: world.score });
            out_events.push(Event::CurrencyChanged {
                currency: world.currency,
            });
        }
        Command::StartSession => world.start_session(out_events),
        Command::TogglePause => world.toggle_pause(out_events),
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::SpawnAttacker { row } => world.spawn_attacker(row, out_events),
        Command::PlaceDefender { kind, cell } => world.place_defender(kind, cell, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use lane_defence_core::{
        AttackerId, CellCoord, DefenderId, DefenderKind, LaneGrid, ProjectileId, SessionPhase,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the world's placement grid.
    #[must_use]
    pub fn grid(world: &World) -> &LaneGrid {
        &world.grid
    }

    /// Reports the currently active session phase.
    #[must_use]
    pub fn phase(world: &World) -> SessionPhase {
        world.phase
    }

    /// Reports the current score total.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Reports the current currency balance.
    #[must_use]
    pub fn currency(world: &World) -> u32 {
        world.currency
    }

    /// Captures a read-only view of the defenders on the field.
    #[must_use]
    pub fn defender_view(world: &World) -> DefenderView {
        let mut snapshots: Vec<DefenderSnapshot> = world
            .defenders
            .iter()
            .map(|defender| DefenderSnapshot {
                id: defender.id,
                kind: defender.kind,
                cell: defender.cell,
                health: defender.health,
                cooldown_ticks: defender.cooldown_ticks,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        DefenderView { snapshots }
    }

    /// Captures a read-only view of the attackers advancing on the field.
    #[must_use]
    pub fn attacker_view(world: &World) -> AttackerView {
        let mut snapshots: Vec<AttackerSnapshot> = world
            .attackers
            .iter()
            .map(|attacker| AttackerSnapshot {
                id: attacker.id,
                row: attacker.row,
                x: attacker.x,
                speed: attacker.speed,
                health: attacker.health,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        AttackerView { snapshots }
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        let mut snapshots: Vec<ProjectileSnapshot> = world
            .projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                x: projectile.x,
                y: projectile.y,
                speed: projectile.speed,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        ProjectileView { snapshots }
    }

    /// Read-only collection of defender snapshots ordered by identifier.
    #[derive(Clone, Debug)]
    pub struct DefenderView {
        snapshots: Vec<DefenderSnapshot>,
    }

    impl DefenderView {
        /// Iterates over the defenders captured by the view.
        pub fn iter(&self) -> impl Iterator<Item = &DefenderSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, returning the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<DefenderSnapshot> {
            self.snapshots
        }

        /// Number of defenders captured by the view.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether the view captured no defenders.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }
    }

    /// Immutable description of one defender.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct DefenderSnapshot {
        /// Identifier allocated by the world.
        pub id: DefenderId,
        /// Category the defender was placed as.
        pub kind: DefenderKind,
        /// Cell anchoring the defender.
        pub cell: CellCoord,
        /// Remaining health. No mechanic currently reduces it.
        pub health: i32,
        /// Ticks accumulated toward the next projectile emission.
        pub cooldown_ticks: u32,
    }

    /// Read-only collection of attacker snapshots ordered by identifier.
    #[derive(Clone, Debug)]
    pub struct AttackerView {
        snapshots: Vec<AttackerSnapshot>,
    }

    impl AttackerView {
        /// Iterates over the attackers captured by the view.
        pub fn iter(&self) -> impl Iterator<Item = &AttackerSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, returning the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<AttackerSnapshot> {
            self.snapshots
        }

        /// Number of attackers captured by the view.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether the view captured no attackers.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }
    }

    /// Immutable description of one attacker.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct AttackerSnapshot {
        /// Identifier allocated by the world.
        pub id: AttackerId,
        /// Row the attacker advances along.
        pub row: u32,
        /// Horizontal pixel position of the attacker's leading (left) edge.
        pub x: f32,
        /// Distance travelled leftward per tick, in pixels.
        pub speed: f32,
        /// Remaining health.
        pub health: i32,
    }

    /// Read-only collection of projectile snapshots ordered by identifier.
    #[derive(Clone, Debug)]
    pub struct ProjectileView {
        snapshots: Vec<ProjectileSnapshot>,
    }

    impl ProjectileView {
        /// Iterates over the projectiles captured by the view.
        pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, returning the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
            self.snapshots
        }

        /// Number of projectiles captured by the view.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether the view captured no projectiles.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }
    }

    /// Immutable description of one projectile.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ProjectileSnapshot {
        /// Identifier allocated by the world.
        pub id: ProjectileId,
        /// Horizontal pixel position.
        pub x: f32,
        /// Vertical pixel position.
        pub y: f32,
        /// Distance travelled rightward per tick, in pixels.
        pub speed: f32,
    }
}
