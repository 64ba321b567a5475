use log::warn;
use thiserror::Error;

use crate::grid::{Direction, Position, Size};
use crate::module::{Module, ModuleError};
use crate::property::{self, Changes, PropMap, PropertyError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Module(#[from] ModuleError),
    #[error(transparent)]
    Property(#[from] PropertyError),
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),
    #[error("{0} cannot be applied to a module")]
    WrongScope(&'static str),
    #[error("tried to undo, but target was '{target}' while the current module is '{current}'")]
    TypeConflict { target: String, current: String },
    #[error("tried to undo, but the properties changed since the edit")]
    PropertyConflict,
}

/// Where an action takes effect.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Scope {
    /// The module under the cursor.
    Module,
    /// Cursor and focus state.
    Editor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ChangeType(String),
    ChangeProperty(Changes),
    MoveCursor(Direction),
}

impl Action {
    pub fn change_type(target: impl Into<String>) -> Self {
        Action::ChangeType(target.into())
    }

    pub fn change_property(name: impl Into<String>, value: impl Into<String>) -> Self {
        Action::ChangeProperty(vec![(name.into(), value.into())])
    }

    pub fn scope(&self) -> Scope {
        match self {
            Action::ChangeType(_) | Action::ChangeProperty(_) => Scope::Module,
            Action::MoveCursor(_) => Scope::Editor,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::ChangeType(_) => "change type",
            Action::ChangeProperty(_) => "change property",
            Action::MoveCursor(_) => "move cursor",
        }
    }

    /// Computes the replacement for `module` together with the way back.
    pub fn apply(&self, module: &Module) -> Result<(Module, Undo), ActionError> {
        match self {
            Action::ChangeType(target) => {
                let replacement = Module::from_name(target, module.position())?;
                let undo = Undo::RestoreModule {
                    target: target.clone(),
                    module: module.clone(),
                };

                Ok((replacement, undo))
            }
            Action::ChangeProperty(changes) => {
                let before = module.exposed_props();
                let mut replacement = module.clone();

                replacement.set_exposed_props(changes)?;

                let after = replacement.exposed_props();

                Ok((replacement, Undo::RestoreProps { before, after }))
            }
            Action::MoveCursor(_) => Err(ActionError::WrongScope(self.name())),
        }
    }

    /// Editor-scope counterpart of [`Action::apply`]. Module-scope actions
    /// leave the cursor where it is. Cursor moves have no inverse and never
    /// enter the undo history.
    pub fn apply_to_cursor(&self, cursor: Position, size: Size) -> Position {
        match self {
            Action::MoveCursor(direction) => (cursor + *direction).crop(size),
            _ => cursor,
        }
    }
}

/// The inverse of an applied [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Undo {
    RestoreModule { target: String, module: Module },
    RestoreProps { before: PropMap, after: PropMap },
}

impl Undo {
    /// Returns the module to put back in place of `current`. Refuses when
    /// `current` no longer looks like what the action produced.
    pub fn apply(&self, current: &Module) -> Result<Module, ActionError> {
        match self {
            Undo::RestoreModule { target, module } => {
                if current.name().trim().to_lowercase() == target.trim().to_lowercase() {
                    Ok(module.clone())
                } else {
                    let err = ActionError::TypeConflict {
                        target: target.clone(),
                        current: current.name().to_string(),
                    };

                    warn!("{}", err);

                    Err(err)
                }
            }
            Undo::RestoreProps { before, after } => {
                let props = current.exposed_props();

                if &props != after {
                    warn!("{}: {:?} != {:?}", ActionError::PropertyConflict, props, after);

                    return Err(ActionError::PropertyConflict);
                }

                let mut restored = current.clone();

                restored.set_exposed_props(&property::as_changes(before))?;

                Ok(restored)
            }
        }
    }
}
