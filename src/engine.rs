use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;

use crate::action::{Action, ActionError, Scope, Undo};
use crate::board::Board;
use crate::clock::Clock;
use crate::config::Settings;
use crate::editor::{CommandError, Editor, Focus, InputEvent, Outcome};
use crate::grid::{Position, Size};
use crate::render::Frame;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Action(#[from] ActionError),
}

/// What the host loop should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// An applied module edit, kept for undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub position: Position,
    pub undo: Undo,
}

/// Owns everything the control loop mutates.
pub struct Engine {
    pub board: Board,
    pub editor: Editor,
    clock: Clock,
    beats: u64,
    history: Vec<Vec<Record>>,
    max_history: usize,
    status: Option<String>,
}

impl Engine {
    pub fn new(size: Size, step: Duration, settings: Settings) -> Self {
        let board = Board::new(size);
        let max_history = settings.max_history;
        let mut editor = Editor::new(settings.keytable, settings.max_repeat);

        editor.update_keymap(&board.get_prop_at(editor.cursor));

        info!("board of {} modules, one beat every {:?}", size, step);

        Self {
            board,
            editor,
            clock: Clock::new(step),
            beats: 0,
            history: Vec::new(),
            max_history,
            status: None,
        }
    }

    pub fn beats(&self) -> u64 {
        self.beats
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Last message for the operator, e.g. a rejected command.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Feeds elapsed time to the clock and runs one tick when it is due.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        if !self.clock.advance(elapsed) {
            return false;
        }

        self.tick();

        true
    }

    /// Runs a single tick regardless of the clock.
    pub fn tick(&mut self) {
        self.board.update(self.beats);
        self.beats += 1;
    }

    /// Handles an input event. Rejected commands are reported through
    /// [`Engine::status`] and never stop the loop.
    pub fn handle_event(&mut self, event: InputEvent) -> Control {
        let result = match event {
            InputEvent::Exit => return Control::Exit,
            InputEvent::Undo => {
                self.undo();
                Ok(())
            }
            _ => self
                .editor
                .handle_input(event)
                .map_err(EngineError::from)
                .and_then(|outcome| match outcome {
                    Some(outcome) => self.dispatch(outcome),
                    None => Ok(()),
                }),
        };

        if let Err(err) = result {
            warn!("{}", err);
            self.status = Some(err.to_string());
        }

        Control::Continue
    }

    /// Interprets and runs a whole command line.
    pub fn submit(&mut self, command: &str) -> Result<(), EngineError> {
        let outcome = self.editor.interpret(command)?;

        self.dispatch(outcome)
    }

    fn dispatch(&mut self, outcome: Outcome) -> Result<(), EngineError> {
        match outcome {
            Outcome::Actions(actions) => {
                self.status = None;
                self.do_actions(&actions)?;
            }
            Outcome::Focused { name, prop } => {
                self.status = Some(format!("{} [{}] = {}", prop.label, prop.kind, prop.value));
                debug!("focused {}", name);
            }
        }

        Ok(())
    }

    /// Applies a batch in order. Cursor moves take effect before the module
    /// edits that follow them. If any action fails, the whole batch is
    /// rolled back.
    pub fn do_actions(&mut self, actions: &[Action]) -> Result<(), ActionError> {
        let cursor = self.editor.cursor;
        let mut staged: Vec<Record> = Vec::new();

        for action in actions {
            let result = match action.scope() {
                Scope::Editor => {
                    self.editor.cursor = action.apply_to_cursor(self.editor.cursor, self.board.size());
                    Ok(())
                }
                Scope::Module => {
                    let position = self.editor.cursor;

                    self.board
                        .apply(action, position)
                        .map(|undo| staged.push(Record { position, undo }))
                }
            };

            if let Err(err) = result {
                self.rollback(&staged);
                self.editor.cursor = cursor;
                self.refresh_keymap();

                return Err(err);
            }
        }

        debug!("applied {} actions, {} module edits", actions.len(), staged.len());

        if !staged.is_empty() {
            self.history.push(staged);

            if self.history.len() > self.max_history {
                let excess = self.history.len() - self.max_history;

                self.history.drain(..excess);
            }
        }

        // A focused property belongs to the module it was taken from
        if self.editor.cursor != cursor {
            self.editor.unfocus();
        }

        self.refresh_keymap();

        Ok(())
    }

    /// Reverts the most recent batch of module edits.
    pub fn undo(&mut self) -> bool {
        let Some(records) = self.history.pop() else {
            self.status = Some("nothing to undo".into());
            return false;
        };

        for record in records.iter().rev() {
            if let Err(err) = self.board.revert(&record.undo, record.position) {
                self.status = Some(err.to_string());
            }
        }

        self.refresh_keymap();

        true
    }

    fn rollback(&mut self, records: &[Record]) {
        for record in records.iter().rev() {
            if let Err(err) = self.board.revert(&record.undo, record.position) {
                warn!("rollback at {} failed: {}", record.position, err);
            }
        }
    }

    /// Rebuilds the shortcuts for the module under the cursor and drops the
    /// focus if its property is gone or was changed underneath it.
    fn refresh_keymap(&mut self) {
        let props = self.board.get_prop_at(self.editor.cursor);

        let stale = match self.editor.focus() {
            Focus::Focused { name, prop } => props.get(name) != Some(prop),
            Focus::Unfocused => false,
        };

        if stale {
            self.editor.unfocus();
        }

        self.editor.update_keymap(&props);
    }

    pub fn frame(&self) -> Frame {
        let prompt = match self.editor.focus() {
            Focus::Unfocused => None,
            Focus::Focused { prop, .. } => Some(format!("{} [{}]: ", prop.label, prop.kind)),
        };

        let mut frame = Frame::new(&self.board, self.editor.cursor, &self.editor.commandline, prompt, self.editor.help());

        frame.status = self.status.clone();
        frame
    }
}
