pub mod action;
pub mod board;
pub mod clock;
pub mod config;
pub mod editor;
pub mod engine;
pub mod grid;
pub mod module;
pub mod property;
pub mod pulse;
pub mod render;

#[cfg(feature = "cli")]
pub mod app;
#[cfg(feature = "cli")]
pub mod cli;

pub use action::{Action, ActionError, Scope, Undo};
pub use board::Board;
pub use config::Settings;
pub use editor::{Editor, InputEvent, Keytable};
pub use engine::{Control, Engine};
pub use grid::{Direction, Position, Size};
pub use module::{Module, ModuleKind};
pub use pulse::Pulse;
