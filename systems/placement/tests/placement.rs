use lane_defence_core::{CellCoord, Command, DefenderKind};
use lane_defence_system_placement::{Placement, PlacementInput};

#[test]
fn click_with_an_active_selection_emits_a_placement() {
    let mut placement = Placement::new();
    let mut commands = Vec::new();

    placement.handle(
        PlacementInput::new(Some(DefenderKind::Gunner), None),
        &mut commands,
    );
    assert!(commands.is_empty());
    assert_eq!(placement.selection(), Some(DefenderKind::Gunner));

    placement.handle(
        PlacementInput::new(None, Some(CellCoord::new(3, 1))),
        &mut commands,
    );
    assert_eq!(
        commands,
        vec![Command::PlaceDefender {
            kind: DefenderKind::Gunner,
            cell: CellCoord::new(3, 1),
        }],
    );
}

#[test]
fn every_click_clears_the_selection() {
    let mut placement = Placement::new();
    let mut commands = Vec::new();

    placement.handle(
        PlacementInput::new(Some(DefenderKind::Harvester), Some(CellCoord::new(0, 0))),
        &mut commands,
    );
    assert_eq!(commands.len(), 1);
    assert_eq!(placement.selection(), None);

    // A second click without reselection places nothing.
    placement.handle(
        PlacementInput::new(None, Some(CellCoord::new(1, 0))),
        &mut commands,
    );
    assert_eq!(commands.len(), 1);
}

#[test]
fn click_without_a_selection_is_ignored() {
    let mut placement = Placement::new();
    let mut commands = Vec::new();

    placement.handle(
        PlacementInput::new(None, Some(CellCoord::new(4, 4))),
        &mut commands,
    );
    assert!(commands.is_empty());
    assert_eq!(placement.selection(), None);
}

#[test]
fn reselecting_replaces_the_previous_choice() {
    let mut placement = Placement::new();
    let mut commands = Vec::new();

    placement.handle(
        PlacementInput::new(Some(DefenderKind::Gunner), None),
        &mut commands,
    );
    placement.handle(
        PlacementInput::new(Some(DefenderKind::Harvester), None),
        &mut commands,
    );
    placement.handle(
        PlacementInput::new(None, Some(CellCoord::new(2, 2))),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::PlaceDefender {
            kind: DefenderKind::Harvester,
            cell: CellCoord::new(2, 2),
        }],
    );
}

#[test]
fn selection_survives_frames_without_clicks() {
    let mut placement = Placement::new();
    let mut commands = Vec::new();

    placement.handle(
        PlacementInput::new(Some(DefenderKind::Gunner), None),
        &mut commands,
    );
    for _ in 0..10 {
        placement.handle(PlacementInput::default(), &mut commands);
    }
    assert_eq!(placement.selection(), Some(DefenderKind::Gunner));

    placement.handle(
        PlacementInput::new(None, Some(CellCoord::new(5, 3))),
        &mut commands,
    );
    assert_eq!(commands.len(), 1);
}
