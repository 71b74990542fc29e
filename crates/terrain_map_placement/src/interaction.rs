//! Placement interaction state machine
//!
//! Turns pointer, drag-and-drop and keyboard events into at most one store
//! mutation per gesture. The store is never touched while a gesture is in
//! progress; only the commit step (or an idle-time rotate/delete) mutates it.

use std::mem;

use terrain_map_core::{PieceCatalog, PieceId, PiecePose, PlacedPiece, PlacedPieceUpdate, Rotation};
use uuid::Uuid;

use crate::collision::find_colliding;
use crate::geometry::{PieceGeometry, Point};
use crate::hit::topmost_piece_at;
use crate::input::{KeyAction, PlacementEvent};
use crate::preview::{evaluate_centered, PlacementPreview};
use crate::snap::clamp_to_map;
use crate::store::PlacementStore;
use crate::viewport::Viewport;

/// Pointer travel (canvas pixels, either axis) that turns a press on a placed
/// piece into a drag
pub const DRAG_START_THRESHOLD_PX: f64 = 5.0;

/// The active gesture
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Idle,
    /// Pointer is down on a placed piece but has not moved far enough to drag
    Pressed { placed_id: Uuid, origin: Point },
    /// Dragging a new piece from the palette
    PaletteDrag { piece_id: PieceId, rotation: Rotation },
    /// Dragging an already-placed piece; `original` is restored on cancel
    RepositionDrag {
        placed_id: Uuid,
        piece_id: PieceId,
        original: PiecePose,
        rotation: Rotation,
    },
    /// Click-to-place
    PlacementMode { piece_id: PieceId, rotation: Rotation },
}

impl Interaction {
    /// A drag or placement is in progress
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Interaction::PaletteDrag { .. }
                | Interaction::RepositionDrag { .. }
                | Interaction::PlacementMode { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "Idle",
            Interaction::Pressed { .. } => "Pressed",
            Interaction::PaletteDrag { .. } => "PaletteDrag",
            Interaction::RepositionDrag { .. } => "RepositionDrag",
            Interaction::PlacementMode { .. } => "PlacementMode",
        }
    }

    fn pending(&self) -> Option<(&PieceId, Rotation, Option<Uuid>)> {
        match self {
            Interaction::PaletteDrag { piece_id, rotation }
            | Interaction::PlacementMode { piece_id, rotation } => {
                Some((piece_id, *rotation, None))
            }
            Interaction::RepositionDrag {
                placed_id,
                piece_id,
                rotation,
                ..
            } => Some((piece_id, *rotation, Some(*placed_id))),
            Interaction::Idle | Interaction::Pressed { .. } => None,
        }
    }
}

/// What handling an event did
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementOutcome {
    /// Nothing changed
    Ignored,
    /// A gesture started
    Started,
    PreviewUpdated,
    /// A new piece was added to the store
    Placed(Uuid),
    /// A placed piece was moved (and possibly rotated) by a drag
    Moved(Uuid),
    /// The gesture ended without a mutation (collision or no preview)
    Discarded,
    /// The gesture was aborted by Escape or the pointer leaving the canvas
    Cancelled,
    Selected(Option<Uuid>),
    Rotated(Uuid),
    /// Rotating in place would collide; nothing changed
    RotateRejected(Uuid),
    Deleted(Uuid),
    Toggle3dView,
    OpenRadialMenu { at: Option<Point> },
}

impl PlacementOutcome {
    /// The store was mutated
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            PlacementOutcome::Placed(_)
                | PlacementOutcome::Moved(_)
                | PlacementOutcome::Rotated(_)
                | PlacementOutcome::Deleted(_)
        )
    }
}

/// Owns the gesture state, the preview and the selection
#[derive(Debug, Clone)]
pub struct PlacementController {
    state: Interaction,
    preview: Option<PlacementPreview>,
    selected: Option<Uuid>,
    /// Rotation applied to rectangular pieces picked from the palette
    current_rotation: Rotation,
    /// Last cursor position in map inches
    cursor: Option<Point>,
    viewport: Viewport,
}

impl Default for PlacementController {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl PlacementController {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: Interaction::Idle,
            preview: None,
            selected: None,
            current_rotation: Rotation::R0,
            cursor: None,
            viewport,
        }
    }

    pub fn state(&self) -> &Interaction {
        &self.state
    }

    /// Candidate placement to draw, if any
    pub fn preview(&self) -> Option<&PlacementPreview> {
        self.preview.as_ref()
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    /// Select a placed piece from outside the canvas (tree view, inspector)
    pub fn select(&mut self, id: Option<Uuid>) {
        self.selected = id;
    }

    pub fn current_rotation(&self) -> Rotation {
        self.current_rotation
    }

    pub fn set_current_rotation(&mut self, rotation: Rotation) {
        self.current_rotation = rotation;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Placed piece the committed layer should hide while it is being dragged
    pub fn hidden_piece(&self) -> Option<Uuid> {
        match &self.state {
            Interaction::RepositionDrag { placed_id, .. } => Some(*placed_id),
            _ => None,
        }
    }

    /// Drop any gesture, preview and cursor without touching the store
    pub fn reset(&mut self) {
        self.state = Interaction::Idle;
        self.preview = None;
        self.cursor = None;
    }

    /// Handle one event to completion
    pub fn handle(
        &mut self,
        event: PlacementEvent,
        store: &mut impl PlacementStore,
        catalog: &PieceCatalog,
    ) -> PlacementOutcome {
        match event {
            PlacementEvent::PaletteDragStart { piece_id } => {
                self.begin_palette_drag(piece_id, catalog)
            }
            PlacementEvent::EnterPlacementMode { piece_id } => {
                self.begin_placement_mode(piece_id, catalog)
            }
            PlacementEvent::DragOver { position } | PlacementEvent::PointerMove { position } => {
                self.pointer_move(position, store, catalog)
            }
            PlacementEvent::Drop { position } => self.drop_palette(position, store),
            PlacementEvent::PointerDown { position } => self.pointer_down(position, store, catalog),
            PlacementEvent::PointerUp { .. } => self.pointer_up(store),
            PlacementEvent::DragLeave | PlacementEvent::PointerLeave => {
                let outcome = self.cancel();
                self.cursor = None;
                outcome
            }
            PlacementEvent::Key(action) => self.key(action, store, catalog),
        }
    }

    fn begin_palette_drag(
        &mut self,
        piece_id: PieceId,
        catalog: &PieceCatalog,
    ) -> PlacementOutcome {
        if self.state != Interaction::Idle {
            tracing::debug!("Ignoring palette drag of '{}' during {}", piece_id, self.state.name());
            return PlacementOutcome::Ignored;
        }
        let Some(definition) = catalog.get(&piece_id) else {
            tracing::debug!("Palette drag of unknown piece '{}'", piece_id);
            return PlacementOutcome::Ignored;
        };
        let rotation = definition.initial_rotation(self.current_rotation);
        tracing::debug!("PaletteDrag '{}' at {}", piece_id, rotation);
        self.preview = None;
        self.cursor = None;
        self.state = Interaction::PaletteDrag { piece_id, rotation };
        PlacementOutcome::Started
    }

    fn begin_placement_mode(
        &mut self,
        piece_id: PieceId,
        catalog: &PieceCatalog,
    ) -> PlacementOutcome {
        if self.state != Interaction::Idle {
            tracing::debug!(
                "Ignoring placement mode for '{}' during {}",
                piece_id,
                self.state.name()
            );
            return PlacementOutcome::Ignored;
        }
        let Some(definition) = catalog.get(&piece_id) else {
            tracing::debug!("Placement mode for unknown piece '{}'", piece_id);
            return PlacementOutcome::Ignored;
        };
        let rotation = definition.initial_rotation(self.current_rotation);
        tracing::debug!("PlacementMode '{}' at {}", piece_id, rotation);
        self.preview = None;
        self.cursor = None;
        self.state = Interaction::PlacementMode { piece_id, rotation };
        PlacementOutcome::Started
    }

    fn pointer_move(
        &mut self,
        position: Point,
        store: &mut impl PlacementStore,
        catalog: &PieceCatalog,
    ) -> PlacementOutcome {
        let cursor = self.viewport.to_map(position);
        self.cursor = Some(cursor);

        if let Interaction::Pressed { placed_id, origin } = self.state {
            let dx = (position[0] - origin[0]).abs();
            let dy = (position[1] - origin[1]).abs();
            if dx <= DRAG_START_THRESHOLD_PX && dy <= DRAG_START_THRESHOLD_PX {
                return PlacementOutcome::Ignored;
            }
            let Some(placed) = store.placed_piece(placed_id) else {
                self.reset();
                self.cursor = Some(cursor);
                return PlacementOutcome::Ignored;
            };
            tracing::debug!("RepositionDrag {}", placed.get_display_name());
            self.state = Interaction::RepositionDrag {
                placed_id,
                piece_id: placed.piece_id.clone(),
                original: placed.pose(),
                rotation: placed.rotation,
            };
            self.selected = Some(placed_id);
        }

        if !self.state.is_active() {
            return PlacementOutcome::Ignored;
        }
        if self.refresh_preview(&*store, catalog) {
            PlacementOutcome::PreviewUpdated
        } else {
            self.abort_unknown_piece()
        }
    }

    /// Recompute the preview at the last cursor position
    fn refresh_preview(&mut self, store: &impl PlacementStore, catalog: &PieceCatalog) -> bool {
        let Some((piece_id, rotation, exclude_id)) = self.state.pending() else {
            return false;
        };
        let Some(cursor) = self.cursor else {
            // Nothing to show until the pointer is over the canvas
            return true;
        };
        let preview = catalog
            .get(piece_id)
            .and_then(|def| evaluate_centered(def, rotation, cursor, store, catalog, exclude_id));
        match preview {
            Some(preview) => {
                self.preview = Some(preview);
                true
            }
            None => false,
        }
    }

    fn abort_unknown_piece(&mut self) -> PlacementOutcome {
        tracing::debug!("Aborting {}: piece definition unavailable", self.state.name());
        self.reset();
        PlacementOutcome::Cancelled
    }

    fn drop_palette(
        &mut self,
        position: Point,
        store: &mut impl PlacementStore,
    ) -> PlacementOutcome {
        self.cursor = Some(self.viewport.to_map(position));
        match self.state {
            Interaction::PaletteDrag { .. } => self.commit(store),
            _ => PlacementOutcome::Ignored,
        }
    }

    fn pointer_down(
        &mut self,
        position: Point,
        store: &mut impl PlacementStore,
        catalog: &PieceCatalog,
    ) -> PlacementOutcome {
        let point = self.viewport.to_map(position);
        let hit = topmost_piece_at(point, store.placed_pieces(), store.active_level(), catalog)
            .map(|p| p.id);

        match self.state {
            Interaction::Idle => match hit {
                Some(placed_id) => {
                    self.state = Interaction::Pressed {
                        placed_id,
                        origin: position,
                    };
                    PlacementOutcome::Started
                }
                None if self.selected.is_some() => {
                    self.selected = None;
                    PlacementOutcome::Selected(None)
                }
                None => PlacementOutcome::Ignored,
            },
            Interaction::PlacementMode { .. } => {
                if hit.is_some() {
                    tracing::debug!("Placement click landed on an existing piece");
                    return PlacementOutcome::Ignored;
                }
                self.commit(store)
            }
            _ => PlacementOutcome::Ignored,
        }
    }

    fn pointer_up(&mut self, store: &mut impl PlacementStore) -> PlacementOutcome {
        match self.state {
            Interaction::Pressed { placed_id, .. } => {
                self.state = Interaction::Idle;
                self.selected = Some(placed_id);
                PlacementOutcome::Selected(Some(placed_id))
            }
            Interaction::RepositionDrag { .. } | Interaction::PaletteDrag { .. } => {
                self.commit(store)
            }
            _ => PlacementOutcome::Ignored,
        }
    }

    /// End the gesture, writing the preview verbatim if it is placeable
    fn commit(&mut self, store: &mut impl PlacementStore) -> PlacementOutcome {
        let state = mem::replace(&mut self.state, Interaction::Idle);
        let preview = self.preview.take();

        let Some(preview) = preview.filter(PlacementPreview::can_commit) else {
            tracing::debug!("Discarding {}: no placeable preview", state.name());
            return PlacementOutcome::Discarded;
        };

        match state {
            Interaction::PaletteDrag { .. } | Interaction::PlacementMode { .. } => {
                let piece = PlacedPiece::new(
                    preview.piece_id.clone(),
                    preview.pose(),
                    store.active_level(),
                );
                let id = piece.id;
                tracing::debug!(
                    "Placed {} at ({}, {})",
                    piece.get_display_name(),
                    piece.x,
                    piece.y
                );
                store.add_placed_piece(piece);
                PlacementOutcome::Placed(id)
            }
            Interaction::RepositionDrag { placed_id, .. } => {
                tracing::debug!("Moved {} to ({}, {})", placed_id, preview.x, preview.y);
                store.update_placed_piece(placed_id, PlacedPieceUpdate::pose(preview.pose()));
                self.selected = Some(placed_id);
                PlacementOutcome::Moved(placed_id)
            }
            Interaction::Idle | Interaction::Pressed { .. } => PlacementOutcome::Discarded,
        }
    }

    fn cancel(&mut self) -> PlacementOutcome {
        match self.state {
            Interaction::Idle => PlacementOutcome::Ignored,
            Interaction::Pressed { .. } => {
                self.reset();
                PlacementOutcome::Ignored
            }
            _ => {
                tracing::debug!("Cancelled {}", self.state.name());
                self.reset();
                PlacementOutcome::Cancelled
            }
        }
    }

    fn key(
        &mut self,
        action: KeyAction,
        store: &mut impl PlacementStore,
        catalog: &PieceCatalog,
    ) -> PlacementOutcome {
        match action {
            KeyAction::Cancel => {
                if self.state == Interaction::Idle && self.selected.is_some() {
                    self.selected = None;
                    return PlacementOutcome::Selected(None);
                }
                self.cancel()
            }
            KeyAction::Rotate => self.rotate(store, catalog),
            KeyAction::Delete => match (&self.state, self.selected) {
                (Interaction::Idle, Some(id)) => {
                    self.selected = None;
                    if store.placed_piece(id).is_none() {
                        return PlacementOutcome::Ignored;
                    }
                    store.remove_placed_piece(id);
                    tracing::debug!("Deleted {}", id);
                    PlacementOutcome::Deleted(id)
                }
                _ => PlacementOutcome::Ignored,
            },
            KeyAction::Toggle3d => match self.state {
                Interaction::Idle => PlacementOutcome::Toggle3dView,
                _ => PlacementOutcome::Ignored,
            },
            KeyAction::OpenRadialMenu => match self.state {
                Interaction::Idle => PlacementOutcome::OpenRadialMenu { at: self.cursor },
                _ => PlacementOutcome::Ignored,
            },
        }
    }

    fn rotate(
        &mut self,
        store: &mut impl PlacementStore,
        catalog: &PieceCatalog,
    ) -> PlacementOutcome {
        if self.state == Interaction::Idle {
            return match self.selected {
                Some(id) => self.rotate_placed(id, store, catalog),
                None => PlacementOutcome::Ignored,
            };
        }
        match &mut self.state {
            Interaction::PaletteDrag { piece_id, rotation }
            | Interaction::PlacementMode { piece_id, rotation } => {
                *rotation = rotation.next_clockwise();
                if catalog.get(piece_id).is_some_and(|def| !def.is_diagonal) {
                    self.current_rotation = *rotation;
                }
            }
            Interaction::RepositionDrag { rotation, .. } => {
                *rotation = rotation.next_clockwise();
            }
            Interaction::Idle | Interaction::Pressed { .. } => return PlacementOutcome::Ignored,
        }

        if self.refresh_preview(&*store, catalog) {
            PlacementOutcome::PreviewUpdated
        } else {
            self.abort_unknown_piece()
        }
    }

    /// Rotate a placed piece in place, keeping it on the map
    fn rotate_placed(
        &mut self,
        id: Uuid,
        store: &mut impl PlacementStore,
        catalog: &PieceCatalog,
    ) -> PlacementOutcome {
        let Some(placed) = store.placed_piece(id) else {
            self.selected = None;
            return PlacementOutcome::Ignored;
        };
        let level = placed.level;
        let rotation = placed.rotation.next_clockwise();
        let Some(geometry) = catalog.get(&placed.piece_id).and_then(|def| {
            let (width, height) = def.effective_size(rotation)?;
            let settings = store.map_settings();
            let (x, y) = clamp_to_map(
                placed.x,
                placed.y,
                width,
                height,
                settings.width,
                settings.height,
            );
            PieceGeometry::from_definition(def, PiecePose::new(x, y, rotation))
        }) else {
            return PlacementOutcome::Ignored;
        };

        let blocked = find_colliding(
            &geometry,
            store.placed_pieces().iter().filter(|p| p.level == level),
            catalog,
            Some(id),
        );
        if blocked {
            tracing::debug!("Rotation of {} to {} blocked", id, rotation);
            return PlacementOutcome::RotateRejected(id);
        }

        store.update_placed_piece(
            id,
            PlacedPieceUpdate::pose(PiecePose::new(geometry.x, geometry.y, rotation)),
        );
        PlacementOutcome::Rotated(id)
    }
}
