#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lane Defence.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Configures the world's placement grid using the provided dimensions.
    ConfigureGrid {
        /// Number of grid columns laid out along the attack axis.
        columns: u32,
        /// Number of grid rows (lanes) crossing the field.
        rows: u32,
        /// Length of each square cell measured in field pixels.
        cell_length: f32,
    },
    /// Starts a fresh defence session, discarding any previous one entirely.
    StartSession,
    /// Toggles the session between its running and paused phases.
    TogglePause,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of wall-clock time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that one attacker enter the field at the trailing edge.
    SpawnAttacker {
        /// Zero-based row the attacker should advance along.
        row: u32,
    },
    /// Requests placement of a defender anchored at the provided cell.
    PlaceDefender {
        /// Category of defender to construct.
        kind: DefenderKind,
        /// Cell that will anchor the defender.
        cell: CellCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of wall-clock time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a fresh session replaced all previous state.
    SessionStarted,
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that became active after processing commands.
        phase: SessionPhase,
    },
    /// Confirms that an attacker entered the field.
    AttackerSpawned {
        /// Identifier assigned to the attacker by the world.
        attacker: AttackerId,
        /// Row the attacker advances along for its whole lifetime.
        row: u32,
    },
    /// Reports that an attacker crossed the leading edge of the field.
    AttackerBreached {
        /// Identifier of the attacker that crossed the boundary.
        attacker: AttackerId,
        /// Row along which the breach occurred.
        row: u32,
    },
    /// Confirms that a defender was placed into the world.
    DefenderPlaced {
        /// Identifier assigned to the defender by the world.
        defender: DefenderId,
        /// Category of defender that was placed.
        kind: DefenderKind,
        /// Cell anchoring the defender.
        cell: CellCoord,
    },
    /// Reports that a defender placement request was rejected.
    DefenderPlacementRejected {
        /// Category of defender requested for placement.
        kind: DefenderKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a gunner emitted a new projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile by the world.
        projectile: ProjectileId,
        /// Defender whose cooldown expiry produced the projectile.
        defender: DefenderId,
    },
    /// Reports that a projectile struck an attacker without destroying it.
    AttackerHit {
        /// Attacker that absorbed the projectile.
        attacker: AttackerId,
        /// Projectile consumed by the hit.
        projectile: ProjectileId,
        /// Health the attacker retains after the hit.
        remaining_health: i32,
    },
    /// Confirms that an attacker was destroyed and rewards were granted.
    AttackerKilled {
        /// Attacker removed from the field.
        attacker: AttackerId,
        /// Score granted for the kill.
        score_reward: u32,
        /// Currency granted for the kill.
        currency_reward: u32,
    },
    /// Reports the score after a change, for synchronous display refresh.
    ScoreChanged {
        /// Score total after the change.
        score: u32,
    },
    /// Reports the currency balance after a change, for synchronous display refresh.
    CurrencyChanged {
        /// Currency balance after the change.
        currency: u32,
    },
}

/// Lifecycle phases of a defence session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No session has been started yet.
    #[default]
    Idle,
    /// The session is live and ticks advance the simulation.
    Running,
    /// The session is frozen; rendering continues but ticks are inert.
    Paused,
    /// An attacker breached the leading edge; the phase is terminal until
    /// the next session start.
    GameOver,
}

/// Categories of defender available for placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenderKind {
    /// Damage dealer that emits a projectile whenever its cooldown expires.
    Gunner,
    /// Resource generator. Its per-tick economy is not implemented; the
    /// category exists only as a cheaper placement choice.
    Harvester,
}

impl DefenderKind {
    /// Currency cost deducted when a defender of this category is placed.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        match self {
            Self::Gunner => 50,
            Self::Harvester => 25,
        }
    }
}

/// Reasons a defender placement request can be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies outside the configured grid bounds.
    OutOfBounds,
    /// The current balance cannot cover the defender's cost.
    InsufficientFunds {
        /// Cost of the requested defender.
        cost: u32,
        /// Balance available when the request was processed.
        available: u32,
    },
}

/// Unique identifier assigned to a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefenderId(u32);

impl DefenderId {
    /// Creates a new defender identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttackerId(u32);

impl AttackerId {
    /// Creates a new attacker identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Position expressed in field pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPoint {
    x: f32,
    y: f32,
}

impl FieldPoint {
    /// Creates a new field-space position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal position in pixels, increasing toward the trailing edge.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical position in pixels, increasing downward.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// Describes the discrete placement lattice of the field.
///
/// The grid is a pure value type: converting between pixel positions and
/// cells never fails for in-bounds input and carries no mutable state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneGrid {
    columns: u32,
    rows: u32,
    cell_length: f32,
}

impl LaneGrid {
    /// Creates a new grid description.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, cell_length: f32) -> Self {
        Self {
            columns,
            rows,
            cell_length,
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square cell expressed in field pixels.
    #[must_use]
    pub const fn cell_length(&self) -> f32 {
        self.cell_length
    }

    /// Total width of the field measured in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Total height of the field measured in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Reports whether the provided cell lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Resolves the cell enclosing the provided pixel position.
    ///
    /// Returns `None` when the position lies outside the field.
    #[must_use]
    pub fn cell_at(&self, x: f32, y: f32) -> Option<CellCoord> {
        if x < 0.0 || y < 0.0 || x >= self.width() || y >= self.height() {
            return None;
        }

        let column = (x / self.cell_length) as u32;
        let row = (y / self.cell_length) as u32;
        let cell = CellCoord::new(column.min(self.columns - 1), row.min(self.rows - 1));
        Some(cell)
    }

    /// Top-left pixel position of the provided cell.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> FieldPoint {
        FieldPoint::new(
            cell.column() as f32 * self.cell_length,
            cell.row() as f32 * self.cell_length,
        )
    }

    /// Center pixel position of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> FieldPoint {
        let origin = self.cell_origin(cell);
        let half = self.cell_length / 2.0;
        FieldPoint::new(origin.x() + half, origin.y() + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_grid() -> LaneGrid {
        LaneGrid::new(9, 5, 80.0)
    }

    #[test]
    fn field_dimensions_multiply_cells() {
        let grid = reference_grid();
        assert_eq!(grid.width(), 720.0);
        assert_eq!(grid.height(), 400.0);
    }

    #[test]
    fn cell_lookup_snaps_to_enclosing_cell() {
        let grid = reference_grid();
        assert_eq!(grid.cell_at(0.0, 0.0), Some(CellCoord::new(0, 0)));
        assert_eq!(grid.cell_at(79.9, 79.9), Some(CellCoord::new(0, 0)));
        assert_eq!(grid.cell_at(80.0, 80.0), Some(CellCoord::new(1, 1)));
        assert_eq!(grid.cell_at(719.0, 399.0), Some(CellCoord::new(8, 4)));
    }

    #[test]
    fn cell_lookup_rejects_positions_outside_the_field() {
        let grid = reference_grid();
        assert_eq!(grid.cell_at(-0.1, 10.0), None);
        assert_eq!(grid.cell_at(10.0, -0.1), None);
        assert_eq!(grid.cell_at(720.0, 10.0), None);
        assert_eq!(grid.cell_at(10.0, 400.0), None);
    }

    #[test]
    fn cell_origin_and_center_are_consistent() {
        let grid = reference_grid();
        let cell = CellCoord::new(2, 3);
        let origin = grid.cell_origin(cell);
        let center = grid.cell_center(cell);

        assert_eq!(origin, FieldPoint::new(160.0, 240.0));
        assert_eq!(center, FieldPoint::new(200.0, 280.0));
        assert!(grid.contains(cell));
        assert!(!grid.contains(CellCoord::new(9, 0)));
        assert!(!grid.contains(CellCoord::new(0, 5)));
    }

    #[test]
    fn gunner_costs_twice_as_much_as_harvester() {
        assert_eq!(DefenderKind::Gunner.cost(), 50);
        assert_eq!(DefenderKind::Harvester.cost(), 25);
    }

    #[test]
    fn session_phase_defaults_to_idle() {
        assert_eq!(SessionPhase::default(), SessionPhase::Idle);
    }
}
