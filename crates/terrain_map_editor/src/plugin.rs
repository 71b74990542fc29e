//! Bevy integration
//!
//! Feeds window cursor, mouse buttons and keyboard into the placement
//! controller and draws the map grid, placed pieces and the live preview
//! with gizmos.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use terrain_map_core::{PieceCatalog, TerrainId};
use terrain_map_placement::{
    PieceGeometry, PlacementController, PlacementEvent, PlacementOutcome, PlacementStore, Point,
    Rect as MapRect,
};

use crate::preferences::EditorPreferences;
use crate::session::MapSession;
use crate::shortcuts::KeyBindings;

/// The placement controller as a resource
#[derive(Resource, Debug, Clone, Default)]
pub struct PlacementState(pub PlacementController);

/// Read-only piece catalog snapshot
#[derive(Resource, Debug, Clone, Default)]
pub struct CatalogResource(pub PieceCatalog);

/// Events from the host UI (palette drags, placement-mode selection)
#[derive(Message, Debug, Clone)]
pub struct PlacementRequest(pub PlacementEvent);

/// Result of every handled event that did something
#[derive(Message, Debug, Clone)]
pub struct PlacementOutcomeEvent(pub PlacementOutcome);

/// Last cursor position seen over the canvas, in window pixels
#[derive(Resource, Debug, Clone, Copy, Default)]
struct CursorTracker(Option<Vec2>);

/// Plugin wiring the placement engine into a Bevy app
pub struct TerrainPlacementPlugin;

impl Plugin for TerrainPlacementPlugin {
    fn build(&self, app: &mut App) {
        let prefs = EditorPreferences::load();
        let keys = KeyBindings::with_overrides(&prefs.keybindings);
        let controller = PlacementController::new(prefs.viewport());
        let session = MapSession::restore_last(&prefs).unwrap_or_default();

        app.insert_resource(prefs)
            .insert_resource(keys)
            .insert_resource(PlacementState(controller))
            .insert_resource(session)
            .init_resource::<CatalogResource>()
            .init_resource::<CursorTracker>()
            .add_message::<PlacementRequest>()
            .add_message::<PlacementOutcomeEvent>()
            .add_systems(
                Update,
                (
                    handle_requests,
                    handle_pointer,
                    handle_keyboard,
                    apply_outcomes,
                    draw_map,
                )
                    .chain(),
            );
    }
}

fn dispatch(
    event: PlacementEvent,
    state: &mut PlacementState,
    session: &mut MapSession,
    catalog: &PieceCatalog,
    outcomes: &mut MessageWriter<PlacementOutcomeEvent>,
) {
    let outcome = state.0.handle(event, session, catalog);
    if outcome != PlacementOutcome::Ignored {
        outcomes.write(PlacementOutcomeEvent(outcome));
    }
}

fn handle_requests(
    mut requests: MessageReader<PlacementRequest>,
    mut state: ResMut<PlacementState>,
    mut session: ResMut<MapSession>,
    catalog: Res<CatalogResource>,
    mut outcomes: MessageWriter<PlacementOutcomeEvent>,
) {
    for request in requests.read() {
        dispatch(request.0.clone(), &mut state, &mut session, &catalog.0, &mut outcomes);
    }
}

fn handle_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut tracker: ResMut<CursorTracker>,
    mut state: ResMut<PlacementState>,
    mut session: ResMut<MapSession>,
    catalog: Res<CatalogResource>,
    mut outcomes: MessageWriter<PlacementOutcomeEvent>,
) {
    let Ok(window) = windows.single() else { return };
    let cursor = window.cursor_position();

    let Some(cursor_pos) = cursor else {
        if tracker.0.take().is_some() {
            let leave = PlacementEvent::PointerLeave;
            dispatch(leave, &mut state, &mut session, &catalog.0, &mut outcomes);
        }
        return;
    };
    let position: Point = [f64::from(cursor_pos.x), f64::from(cursor_pos.y)];

    let mut events = Vec::new();
    if tracker.0 != Some(cursor_pos) {
        tracker.0 = Some(cursor_pos);
        events.push(PlacementEvent::PointerMove { position });
    }
    if mouse.just_pressed(MouseButton::Left) {
        events.push(PlacementEvent::PointerDown { position });
    }
    if mouse.just_released(MouseButton::Left) {
        events.push(PlacementEvent::PointerUp { position });
    }
    for event in events {
        dispatch(event, &mut state, &mut session, &catalog.0, &mut outcomes);
    }
}

/// Standard key value for the keys the editor binds
fn key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Space => Some(" ".to_string()),
        KeyCode::Delete => Some("Delete".to_string()),
        KeyCode::Backspace => Some("Backspace".to_string()),
        KeyCode::Escape => Some("Escape".to_string()),
        other => {
            let name = format!("{other:?}");
            name.strip_prefix("Key").map(str::to_lowercase)
        }
    }
}

fn handle_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut state: ResMut<PlacementState>,
    mut session: ResMut<MapSession>,
    catalog: Res<CatalogResource>,
    mut outcomes: MessageWriter<PlacementOutcomeEvent>,
) {
    for code in keyboard.get_just_pressed() {
        let Some(action) = key_name(*code).and_then(|key| bindings.action_for(&key)) else {
            continue;
        };
        dispatch(PlacementEvent::Key(action), &mut state, &mut session, &catalog.0, &mut outcomes);
    }
}

fn apply_outcomes(
    mut outcomes: MessageReader<PlacementOutcomeEvent>,
    mut prefs: ResMut<EditorPreferences>,
) {
    for outcome in outcomes.read() {
        if outcome.0 == PlacementOutcome::Toggle3dView {
            prefs.view_3d = !prefs.view_3d;
            info!("Switched to {} view", if prefs.view_3d { "3D" } else { "2D" });
            if let Err(e) = prefs.save() {
                warn!("Failed to save preferences: {}", e);
            }
        }
    }
}

fn to_world(camera: &Camera, transform: &GlobalTransform, screen: Point) -> Option<Vec2> {
    camera
        .viewport_to_world_2d(transform, Vec2::new(screen[0] as f32, screen[1] as f32))
        .ok()
}

fn draw_map(
    mut gizmos: Gizmos,
    cameras: Query<(&Camera, &GlobalTransform)>,
    state: Res<PlacementState>,
    session: Res<MapSession>,
    catalog: Res<CatalogResource>,
    prefs: Res<EditorPreferences>,
) {
    let Ok((camera, transform)) = cameras.single() else { return };
    let viewport = state.0.viewport();
    let settings = session.map_settings();
    let project = |p: Point| to_world(camera, transform, viewport.to_screen(p));

    if prefs.show_grid && settings.cell_size > 0.0 {
        let grid_color = Color::srgba(1.0, 1.0, 1.0, 0.15);
        let mut x = 0.0;
        while x <= settings.width {
            if let (Some(a), Some(b)) = (project([x, 0.0]), project([x, settings.height])) {
                gizmos.line_2d(a, b, grid_color);
            }
            x += settings.cell_size;
        }
        let mut y = 0.0;
        while y <= settings.height {
            if let (Some(a), Some(b)) = (project([0.0, y]), project([settings.width, y])) {
                gizmos.line_2d(a, b, grid_color);
            }
            y += settings.cell_size;
        }
    }

    let hidden = state.0.hidden_piece();
    for placed in session.active_level_pieces() {
        if Some(placed.id) == hidden {
            continue;
        }
        let Some(definition) = catalog.0.get(&placed.piece_id) else { continue };
        let Some(geometry) = PieceGeometry::of_placed(placed, definition) else { continue };
        if let Some(cells) = &definition.cell_colors {
            draw_cells(&mut gizmos, &geometry.cell_rects(cells), &catalog.0, &project);
        }
        let rgb = definition
            .terrain_id
            .as_deref()
            .map(|id| catalog.0.terrain_color(id))
            .unwrap_or(terrain_map_core::Color::FALLBACK);
        draw_outline(&mut gizmos, &geometry.outline(), &project, gizmo_color(rgb));
        if state.0.selected() == Some(placed.id) {
            let bounds = geometry.bounds();
            let corners = [
                [bounds.x, bounds.y],
                [bounds.right(), bounds.y],
                [bounds.right(), bounds.bottom()],
                [bounds.x, bounds.bottom()],
            ];
            draw_outline(&mut gizmos, &corners, &project, Color::srgb(1.0, 0.85, 0.2));
        }
    }

    if let Some(preview) = state.0.preview().filter(|p| p.visible) {
        let color = if preview.has_collision {
            Color::srgba(0.9, 0.2, 0.2, 0.8)
        } else {
            Color::srgba(0.2, 0.9, 0.3, 0.8)
        };
        if let Some(cells) = preview.cell_rects(&catalog.0) {
            draw_cells(&mut gizmos, &cells, &catalog.0, &project);
        }
        draw_outline(&mut gizmos, &preview.outline(), &project, color);
    }
}

fn gizmo_color(color: terrain_map_core::Color) -> Color {
    let [r, g, b] = color.to_f32_array();
    Color::srgb(r, g, b)
}

/// One rectangle per painted cell, in its terrain's color
fn draw_cells(
    gizmos: &mut Gizmos,
    cells: &[(MapRect, &TerrainId)],
    catalog: &PieceCatalog,
    project: &impl Fn(Point) -> Option<Vec2>,
) {
    for (rect, terrain) in cells {
        let corners = [
            [rect.x, rect.y],
            [rect.right(), rect.y],
            [rect.right(), rect.bottom()],
            [rect.x, rect.bottom()],
        ];
        let color = gizmo_color(catalog.terrain_color(terrain)).with_alpha(0.6);
        draw_outline(gizmos, &corners, project, color);
    }
}

fn draw_outline(
    gizmos: &mut Gizmos,
    outline: &[Point],
    project: &impl Fn(Point) -> Option<Vec2>,
    color: Color,
) {
    let points: Vec<Vec2> = outline.iter().filter_map(|p| project(*p)).collect();
    if points.len() != outline.len() || points.is_empty() {
        return;
    }
    gizmos.linestrip_2d(points.iter().copied().chain(std::iter::once(points[0])), color);
}
