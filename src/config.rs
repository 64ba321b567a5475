use serde::Deserialize;

use crate::editor::Keytable;

pub const DEFAULT_MAX_REPEAT: usize = 1000;
pub const DEFAULT_MAX_HISTORY: usize = 256;

fn default_max_repeat() -> usize {
    DEFAULT_MAX_REPEAT
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

/// Editor settings, usually read from a JSON file.
///
/// ```json
/// {
///     "keytable": { "x": { "change_type": "spreader" }, "w": { "move_cursor": "up" } },
///     "max_repeat": 50,
///     "max_history": 64
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub keytable: Keytable,
    /// Upper bound for repeat counts in commands.
    #[serde(default = "default_max_repeat")]
    pub max_repeat: usize,
    /// Number of batches kept for undo, oldest dropped first.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keytable: Keytable::default(),
            max_repeat: DEFAULT_MAX_REPEAT,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}
