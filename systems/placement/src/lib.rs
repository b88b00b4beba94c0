#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement system that translates selection and click input into
//! defender placement commands.

use lane_defence_core::{CellCoord, Command, DefenderKind};

/// Input snapshot distilled from adapter-provided frame input data.
///
/// The adapter resolves the raw pointer position to the enclosing grid cell
/// before handing it to the system; clicks outside the field never arrive
/// here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PlacementInput {
    /// Defender category selected by a control press on this frame, if any.
    pub select: Option<DefenderKind>,
    /// Grid cell enclosing a pointer click on this frame, if any.
    pub click_cell: Option<CellCoord>,
}

impl PlacementInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(select: Option<DefenderKind>, click_cell: Option<CellCoord>) -> Self {
        Self { select, click_cell }
    }
}

/// Placement system that turns the active selection plus a click into a
/// placement command.
///
/// Every click consumes the selection, whether or not the world ultimately
/// accepts the placement: an unaffordable click cancels the selection
/// without placing anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Placement {
    selection: Option<DefenderKind>,
}

impl Placement {
    /// Creates a new placement system with no active selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { selection: None }
    }

    /// Defender category currently armed for placement, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<DefenderKind> {
        self.selection
    }

    /// Consumes adapter-derived input to emit placement commands.
    pub fn handle(&mut self, input: PlacementInput, out: &mut Vec<Command>) {
        if let Some(kind) = input.select {
            self.selection = Some(kind);
        }

        if let Some(cell) = input.click_cell {
            if let Some(kind) = self.selection.take() {
                out.push(Command::PlaceDefender { kind, cell });
            }
        }
    }
}
