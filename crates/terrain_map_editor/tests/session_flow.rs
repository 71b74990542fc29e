use terrain_map_core::{
    MapSettings, PieceCatalog, PieceDefinition, Rotation, TerrainMap, TerrainType,
};
use terrain_map_editor::{EditorPreferences, KeyBindings, MapSession};
use terrain_map_placement::{PlacementController, PlacementEvent, PlacementOutcome, PlacementStore};

fn catalog() -> PieceCatalog {
    PieceCatalog::from_parts(
        vec![PieceDefinition::new("wall", 2.0, 4.0).with_terrain("stone")],
        vec![TerrainType::new("stone", "Stone", "#808080")],
    )
}

fn press(
    key: &str,
    keys: &KeyBindings,
    ctl: &mut PlacementController,
    session: &mut MapSession,
    catalog: &PieceCatalog,
) -> PlacementOutcome {
    let action = keys.action_for(key).unwrap();
    ctl.handle(PlacementEvent::Key(action), session, catalog)
}

#[test]
fn place_rotate_delete_through_key_bindings() {
    let catalog = catalog();
    let prefs = EditorPreferences::default();
    let keys = KeyBindings::with_overrides(&prefs.keybindings);
    let mut session = MapSession::new(TerrainMap::new("Ruins", prefs.new_map_settings(24.0, 24.0)));
    let mut ctl = PlacementController::new(prefs.viewport());

    // 20 px per inch: cursor at (5", 5")
    ctl.handle(
        PlacementEvent::EnterPlacementMode { piece_id: "wall".into() },
        &mut session,
        &catalog,
    );
    ctl.handle(PlacementEvent::PointerMove { position: [100.0, 100.0] }, &mut session, &catalog);
    let placed = ctl.handle(
        PlacementEvent::PointerDown { position: [100.0, 100.0] },
        &mut session,
        &catalog,
    );
    let PlacementOutcome::Placed(id) = placed else {
        panic!("expected a placement, got {placed:?}");
    };
    assert!(session.is_dirty());
    let piece = session.placed_piece(id).unwrap();
    assert_eq!((piece.x, piece.y, piece.rotation), (3.0, 3.0, Rotation::R0));

    // Click it to select, then rotate in place
    ctl.handle(PlacementEvent::PointerDown { position: [90.0, 90.0] }, &mut session, &catalog);
    ctl.handle(PlacementEvent::PointerUp { position: [90.0, 90.0] }, &mut session, &catalog);
    assert_eq!(ctl.selected(), Some(id));
    assert_eq!(press("R", &keys, &mut ctl, &mut session, &catalog), PlacementOutcome::Rotated(id));
    assert_eq!(session.placed_piece(id).unwrap().rotation, Rotation::R90);

    assert_eq!(
        press("Backspace", &keys, &mut ctl, &mut session, &catalog),
        PlacementOutcome::Deleted(id)
    );
    assert!(session.placed_pieces().is_empty());
    assert_eq!(press("v", &keys, &mut ctl, &mut session, &catalog), PlacementOutcome::Toggle3dView);
}

#[test]
fn catalog_colors_reach_the_session_pieces() {
    let catalog = catalog();
    let wall = catalog.get("wall").unwrap();
    let color = catalog.terrain_color(wall.terrain_id.as_deref().unwrap());
    assert_eq!((color.r, color.g, color.b), (128, 128, 128));

    let settings = MapSettings::new(24.0, 24.0);
    let session = MapSession::new(TerrainMap::new("Empty", settings));
    assert_eq!(session.map_settings(), settings);
}
