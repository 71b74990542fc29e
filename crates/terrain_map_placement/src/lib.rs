//! Placement engine for the terrain map designer
//!
//! Everything between a pointer event and a store mutation:
//! - `geometry` / `collision` - occupied outlines and the overlap kernel
//! - `snap` - grid snap, magnetic edge snap and map clamping
//! - `preview` - the candidate placement committed verbatim at the end of a gesture
//! - `interaction` - the palette drag / reposition / placement-mode state machine
//! - `gizmo` - the same pipeline for moves coming from the 3D transform gizmo
//!
//! The engine reads and writes map state only through [`PlacementStore`].

pub mod collision;
pub mod geometry;
pub mod gizmo;
pub mod hit;
pub mod input;
pub mod interaction;
pub mod preview;
pub mod snap;
pub mod store;
pub mod viewport;

pub use collision::{find_colliding, first_colliding, overlaps};
pub use geometry::{Corner, PieceGeometry, Point, Rect};
pub use gizmo::{apply_move, evaluate_move};
pub use hit::topmost_piece_at;
pub use input::{KeyAction, PlacementEvent};
pub use interaction::{Interaction, PlacementController, PlacementOutcome, DRAG_START_THRESHOLD_PX};
pub use preview::{evaluate_at, evaluate_centered, PlacementPreview};
pub use snap::{
    clamp_to_map, magnetic_snap, snap, snap_to_grid, SnapContext, MAGNETIC_SNAP_THRESHOLD,
};
pub use store::{MemoryStore, PlacementStore};
pub use viewport::{Viewport, DEFAULT_PIXELS_PER_INCH};
