//! Keyboard shortcut table
//!
//! Keys are identified by the standard key value strings ("r", "Delete",
//! "Escape", " "), so hosts can feed either browser-style key names or the
//! names produced from Bevy key codes.

use std::collections::HashMap;

use terrain_map_placement::KeyAction;

const DEFAULT_BINDINGS: [(&str, KeyAction); 6] = [
    ("r", KeyAction::Rotate),
    ("Delete", KeyAction::Delete),
    ("Backspace", KeyAction::Delete),
    ("Escape", KeyAction::Cancel),
    ("v", KeyAction::Toggle3d),
    (" ", KeyAction::OpenRadialMenu),
];

/// Key identifier -> action
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct KeyBindings {
    bindings: HashMap<String, KeyAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            bindings: DEFAULT_BINDINGS
                .iter()
                .map(|(key, action)| (key.to_string(), *action))
                .collect(),
        }
    }
}

impl KeyBindings {
    /// Defaults with user overrides applied.
    ///
    /// `overrides` maps action names (see [`KeyAction::name`]) to a key. An
    /// override replaces every default key for that action.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut bindings = Self::default();
        for (action_name, key) in overrides {
            match KeyAction::from_name(action_name) {
                Some(action) => bindings.rebind(action, key),
                None => tracing::warn!("Ignoring keybinding for unknown action '{}'", action_name),
            }
        }
        bindings
    }

    /// Bind `action` to `key` only
    pub fn rebind(&mut self, action: KeyAction, key: &str) {
        self.bindings.retain(|_, bound| *bound != action);
        self.bindings.insert(normalize(key), action);
    }

    /// Action for a key press. Single letters match regardless of case.
    pub fn action_for(&self, key: &str) -> Option<KeyAction> {
        self.bindings.get(&normalize(key)).copied()
    }

    /// Keys bound to `action`, sorted
    pub fn keys_for(&self, action: KeyAction) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}

fn normalize(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_lowercase().collect(),
        _ => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for("r"), Some(KeyAction::Rotate));
        assert_eq!(keys.action_for("R"), Some(KeyAction::Rotate));
        assert_eq!(keys.action_for("Delete"), Some(KeyAction::Delete));
        assert_eq!(keys.action_for("Backspace"), Some(KeyAction::Delete));
        assert_eq!(keys.action_for("Escape"), Some(KeyAction::Cancel));
        assert_eq!(keys.action_for("v"), Some(KeyAction::Toggle3d));
        assert_eq!(keys.action_for(" "), Some(KeyAction::OpenRadialMenu));
        assert_eq!(keys.action_for("q"), None);
        assert_eq!(keys.keys_for(KeyAction::Delete), vec!["Backspace", "Delete"]);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let mut overrides = HashMap::new();
        overrides.insert("rotate".to_string(), "E".to_string());
        overrides.insert("teleport".to_string(), "t".to_string());

        let keys = KeyBindings::with_overrides(&overrides);
        assert_eq!(keys.action_for("e"), Some(KeyAction::Rotate));
        assert_eq!(keys.action_for("r"), None);
        assert_eq!(keys.action_for("t"), None);
        assert_eq!(keys.action_for("Escape"), Some(KeyAction::Cancel));
    }
}
