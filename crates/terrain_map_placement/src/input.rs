//! Input events consumed by the placement controller

use terrain_map_core::PieceId;

use crate::geometry::Point;

/// Keyboard actions the placement controller understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Rotate the pending piece, or the selected placed piece, 90° clockwise
    Rotate,
    /// Delete the selected placed piece
    Delete,
    /// Abort the current gesture
    Cancel,
    /// Switch between the 2D editor and the 3D preview
    Toggle3d,
    /// Open the radial quick-action menu at the cursor
    OpenRadialMenu,
}

impl KeyAction {
    pub const ALL: [KeyAction; 5] = [
        KeyAction::Rotate,
        KeyAction::Delete,
        KeyAction::Cancel,
        KeyAction::Toggle3d,
        KeyAction::OpenRadialMenu,
    ];

    /// Stable name used in keybinding preferences
    pub fn name(&self) -> &'static str {
        match self {
            KeyAction::Rotate => "rotate",
            KeyAction::Delete => "delete",
            KeyAction::Cancel => "cancel",
            KeyAction::Toggle3d => "toggle_3d",
            KeyAction::OpenRadialMenu => "radial_menu",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

/// A pointer, drag-and-drop or keyboard event.
///
/// Positions are canvas pixels; the controller converts them to map inches
/// through its viewport.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementEvent {
    /// A palette item is being dragged onto the canvas
    PaletteDragStart { piece_id: PieceId },
    DragOver { position: Point },
    Drop { position: Point },
    DragLeave,
    /// Click-to-place mode was chosen for a palette item
    EnterPlacementMode { piece_id: PieceId },
    PointerDown { position: Point },
    PointerMove { position: Point },
    PointerUp { position: Point },
    PointerLeave,
    Key(KeyAction),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_round_trip() {
        for action in KeyAction::ALL {
            assert_eq!(KeyAction::from_name(action.name()), Some(action));
        }
        assert_eq!(KeyAction::from_name("jump"), None);
    }
}
