use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::action::Action;
use crate::grid::{Direction, Position};
use crate::property::{ExposedProp, PropMap};

/// What a key in the [`Keytable`] stands for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    ChangeType(String),
    MoveCursor(Direction),
}

impl Binding {
    pub fn action(&self) -> Action {
        match self {
            Binding::ChangeType(kind) => Action::change_type(kind.as_str()),
            Binding::MoveCursor(direction) => Action::MoveCursor(*direction),
        }
    }
}

/// Single-character commands usable in repeat expressions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Keytable {
    bindings: IndexMap<char, Binding>,
}

impl Keytable {
    pub fn new(bindings: impl IntoIterator<Item = (char, Binding)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    pub fn resolve(&self, key: char) -> Option<Action> {
        self.bindings.get(&key).map(Binding::action)
    }

    pub fn contains(&self, key: char) -> bool {
        self.bindings.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Binding)> + '_ {
        self.bindings.iter().map(|(&key, binding)| (key, binding))
    }
}

impl Default for Keytable {
    fn default() -> Self {
        Keytable::new([
            ('h', Binding::MoveCursor(Direction::Left)),
            ('j', Binding::MoveCursor(Direction::Down)),
            ('k', Binding::MoveCursor(Direction::Up)),
            ('l', Binding::MoveCursor(Direction::Right)),
            ('e', Binding::ChangeType("empty".into())),
            ('m', Binding::ChangeType("spreader".into())),
            ('s', Binding::ChangeType("emitter".into())),
        ])
    }
}

/// Already decoded operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Char(char),
    Backspace,
    Confirm,
    Cancel,
    Arrow(Direction),
    Undo,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    UnknownCommand(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Unfocused,
    /// The next command is taken as the new value of `name`.
    Focused { name: String, prop: ExposedProp },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Actions(Vec<Action>),
    /// A property was selected; its current value is shown for editing.
    Focused { name: String, prop: ExposedProp },
}

pub struct Editor {
    pub cursor: Position,
    pub commandline: String,
    keytable: Keytable,
    shortcuts: IndexMap<char, (String, ExposedProp)>,
    focus: Focus,
    max_repeat: usize,
}

impl Editor {
    pub fn new(keytable: Keytable, max_repeat: usize) -> Self {
        Self {
            cursor: Position::default(),
            commandline: String::new(),
            keytable,
            shortcuts: IndexMap::new(),
            focus: Focus::Unfocused,
            max_repeat,
        }
    }

    pub fn keytable(&self) -> &Keytable {
        &self.keytable
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn shortcut_for(&self, name: &str) -> Option<char> {
        self.shortcuts
            .iter()
            .find(|(_, (prop_name, _))| prop_name == name)
            .map(|(&key, _)| key)
    }

    /// Binds a free letter to every property of the module under the cursor.
    pub fn update_keymap(&mut self, props: &PropMap) {
        let mut free = ('a'..='z')
            .chain('A'..='Z')
            .filter(|&key| !self.keytable.contains(key));

        self.shortcuts = props
            .iter()
            .zip(&mut free)
            .map(|((name, prop), key)| (key, (name.clone(), prop.clone())))
            .collect();

        if self.shortcuts.len() < props.len() {
            warn!("only {} of {} properties got a shortcut", self.shortcuts.len(), props.len());
        }
    }

    /// `key - label` lines for the properties of the current module.
    pub fn help(&self) -> Vec<String> {
        self.shortcuts
            .iter()
            .map(|(key, (_, prop))| format!("{} - {} ({}: {})", key, prop.label, prop.kind, prop.value))
            .collect()
    }

    pub fn cancel(&mut self) {
        self.commandline.clear();
        self.unfocus();
    }

    pub fn unfocus(&mut self) {
        if let Focus::Focused { name, .. } = std::mem::take(&mut self.focus) {
            debug!("dropped focus on {}", name);
        }
    }

    /// Feeds one input event into the command line. Returns an outcome when
    /// the event completed a command.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<Option<Outcome>, CommandError> {
        match event {
            InputEvent::Char(c) => {
                self.commandline.push(c);
                Ok(None)
            }
            InputEvent::Backspace => {
                self.commandline.pop();
                Ok(None)
            }
            InputEvent::Cancel => {
                self.cancel();
                Ok(None)
            }
            InputEvent::Arrow(direction) => Ok(Some(Outcome::Actions(vec![Action::MoveCursor(direction)]))),
            InputEvent::Confirm => {
                let command = std::mem::take(&mut self.commandline);

                self.interpret(&command).map(Some)
            }
            InputEvent::Undo | InputEvent::Exit => Ok(None),
        }
    }

    /// Turns one submitted command into actions.
    pub fn interpret(&mut self, command: &str) -> Result<Outcome, CommandError> {
        debug!("command '{}'", command);

        if let Focus::Focused { name, .. } = std::mem::take(&mut self.focus) {
            return Ok(Outcome::Actions(vec![Action::change_property(name, command)]));
        }

        let mut chars = command.chars();

        if let Some((name, prop)) = chars.next().and_then(|first| self.shortcuts.get(&first)) {
            let rest = chars.as_str();

            if rest.is_empty() {
                self.focus = Focus::Focused {
                    name: name.clone(),
                    prop: prop.clone(),
                };

                return Ok(Outcome::Focused {
                    name: name.clone(),
                    prop: prop.clone(),
                });
            }

            return Ok(Outcome::Actions(vec![Action::change_property(name.as_str(), rest)]));
        }

        self.parse_repeat(command).map(Outcome::Actions)
    }

    /// Parses a repeat expression such as `3h2l`.
    ///
    /// A number repeats every command staged after it up to the next number.
    /// Commands before the first number run once.
    pub fn parse_repeat(&self, command: &str) -> Result<Vec<Action>, CommandError> {
        let mut output = Vec::new();
        let mut staged: Vec<Action> = Vec::new();
        let mut multiplier: usize = 1;
        let mut in_number = false;

        for c in command.chars() {
            if let Some(digit) = c.to_digit(10) {
                let digit = digit as usize;

                if in_number {
                    multiplier = multiplier.saturating_mul(10).saturating_add(digit);
                } else {
                    flush(&mut output, &mut staged, multiplier);
                    multiplier = digit;
                    in_number = true;
                }

                multiplier = multiplier.min(self.max_repeat);
            } else {
                in_number = false;

                let action = self.keytable.resolve(c).ok_or(CommandError::UnknownCommand(c))?;

                staged.push(action);
            }
        }

        flush(&mut output, &mut staged, multiplier);

        Ok(output)
    }
}

fn flush(output: &mut Vec<Action>, staged: &mut Vec<Action>, multiplier: usize) {
    for _ in 0..multiplier {
        output.extend(staged.iter().cloned());
    }

    staged.clear();
}
