#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Lane Defence adapters.
//!
//! Backends receive a [`Presentation`] describing the initial frame and a
//! per-frame closure that consumes captured input, advances the simulation,
//! and repopulates the [`Scene`] before it is drawn. The contract keeps the
//! world and systems free of any concrete windowing dependency.

use anyhow::Result as AnyResult;
use glam::Vec2;
use lane_defence_core::{CellCoord, DefenderKind, SessionPhase};
use std::{error::Error, fmt, time::Duration};

/// Radius used when presenting projectiles, in field pixels.
pub const PROJECTILE_RADIUS: f32 = 5.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            red: self.red,
            green: self.green,
            blue: self.blue,
            alpha,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Whether the adapter detected a session-start press on this frame.
    pub start_pressed: bool,
    /// Whether the adapter detected a pause-toggle press on this frame.
    pub pause_pressed: bool,
    /// Defender category selected by a control press on this frame, if any.
    pub select: Option<DefenderKind>,
    /// Pointer click position in field pixels, if a click landed inside the
    /// field on this frame.
    pub click: Option<Vec2>,
}

/// Presentation description of the placement grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of cell columns in the grid.
    pub columns: u32,
    /// Number of cell rows in the grid.
    pub rows: u32,
    /// Side length of one square cell in field pixels.
    pub cell_length: f32,
    /// Color used when stroking the grid lines.
    pub line_color: Color,
}

impl GridPresentation {
    /// Creates a new grid presentation, validating the dimensions.
    pub fn new(
        columns: u32,
        rows: u32,
        cell_length: f32,
        line_color: Color,
    ) -> Result<Self, RenderingError> {
        if columns == 0 || rows == 0 {
            return Err(RenderingError::InvalidGridDimensions { columns, rows });
        }
        if cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            columns,
            rows,
            cell_length,
            line_color,
        })
    }

    /// Total width of the field in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Total height of the field in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Number of horizontal lines required to stroke the grid.
    #[must_use]
    pub const fn horizontal_line_count(&self) -> u32 {
        self.rows + 1
    }

    /// Number of vertical lines required to stroke the grid.
    #[must_use]
    pub const fn vertical_line_count(&self) -> u32 {
        self.columns + 1
    }

    /// Radius used when presenting defenders, in field pixels.
    #[must_use]
    pub fn defender_radius(&self) -> f32 {
        self.cell_length / 3.0
    }
}

/// Defender currently visible on the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderPresentation {
    /// Cell anchoring the defender; it is drawn at the cell's center.
    pub cell: CellCoord,
    /// Category that keys the defender's fill color.
    pub kind: DefenderKind,
}

impl DefenderPresentation {
    /// Creates a new defender presentation descriptor.
    #[must_use]
    pub const fn new(cell: CellCoord, kind: DefenderKind) -> Self {
        Self { cell, kind }
    }
}

/// Attacker currently visible on the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackerPresentation {
    /// Horizontal pixel position of the attacker's leading (left) edge.
    pub x: f32,
    /// Row whose vertical band the attacker occupies.
    pub row: u32,
}

impl AttackerPresentation {
    /// Creates a new attacker presentation descriptor.
    #[must_use]
    pub const fn new(x: f32, row: u32) -> Self {
        Self { x, row }
    }
}

/// Projectile currently visible on the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectilePresentation {
    /// Horizontal pixel position of the projectile's center.
    pub x: f32,
    /// Vertical pixel position of the projectile's center.
    pub y: f32,
}

impl ProjectilePresentation {
    /// Creates a new projectile presentation descriptor.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Values presented by the HUD strip below the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudPresentation {
    /// Score total to display.
    pub score: u32,
    /// Currency balance to display.
    pub currency: u32,
    /// Defender category currently armed for placement, if any.
    pub selection: Option<DefenderKind>,
    /// Session phase, which also decides the game-over overlay.
    pub phase: SessionPhase,
}

impl HudPresentation {
    /// Creates a new HUD descriptor.
    #[must_use]
    pub const fn new(
        score: u32,
        currency: u32,
        selection: Option<DefenderKind>,
        phase: SessionPhase,
    ) -> Self {
        Self {
            score,
            currency,
            selection,
            phase,
        }
    }

    /// Whether the backend should draw the game-over overlay.
    #[must_use]
    pub fn game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }
}

/// Scene description combining the grid and every visible entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Placement grid composing the play area.
    pub grid: GridPresentation,
    /// Defenders currently placed on the field.
    pub defenders: Vec<DefenderPresentation>,
    /// Attackers currently advancing across the field.
    pub attackers: Vec<AttackerPresentation>,
    /// Projectiles currently in flight.
    pub projectiles: Vec<ProjectilePresentation>,
    /// HUD values shown alongside the field.
    pub hud: HudPresentation,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        grid: GridPresentation,
        defenders: Vec<DefenderPresentation>,
        attackers: Vec<AttackerPresentation>,
        projectiles: Vec<ProjectilePresentation>,
        hud: HudPresentation,
    ) -> Self {
        Self {
            grid,
            defenders,
            attackers,
            projectiles,
            hud,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Lane Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered. The closure runs every frame regardless of session phase,
    /// so paused and finished sessions keep presenting their frozen state.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Grid dimensions must both be positive to present a field.
    InvalidGridDimensions {
        /// Provided column count that failed validation.
        columns: u32,
        /// Provided row count that failed validation.
        rows: u32,
    },
    /// Cell length must be positive to avoid a zero-sized field.
    InvalidCellLength {
        /// Provided cell length that failed validation.
        cell_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGridDimensions { columns, rows } => {
                write!(
                    f,
                    "grid dimensions must be positive (received {columns}x{rows})"
                )
            }
            Self::InvalidCellLength { cell_length } => {
                write!(f, "cell length must be positive (received {cell_length})")
            }
        }
    }
}

impl Error for RenderingError {}
