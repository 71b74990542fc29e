//! terrain_map_editor - Editing session glue for the terrain map designer
//!
//! This crate ties the placement engine to an open map:
//! - `MapSession` - the open map, its active level and dirty flag
//! - `EditorPreferences` - persisted view settings, recent maps and keybindings
//! - `KeyBindings` - keyboard shortcut table
//! - `TerrainPlacementPlugin` - Bevy systems (with the `bevy` feature)
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use terrain_map_editor::TerrainPlacementPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(TerrainPlacementPlugin)
//!         .run();
//! }
//! ```

pub mod preferences;
pub mod session;
pub mod shortcuts;

#[cfg(feature = "bevy")]
pub mod plugin;

// Re-export the lower layers
pub use terrain_map_core;
pub use terrain_map_placement;

pub use preferences::{EditorPreferences, PreferencesError, RecentMap, MAX_RECENT_MAPS};
pub use session::MapSession;
pub use shortcuts::KeyBindings;

#[cfg(feature = "bevy")]
pub use plugin::{
    CatalogResource, PlacementOutcomeEvent, PlacementRequest, PlacementState,
    TerrainPlacementPlugin,
};
