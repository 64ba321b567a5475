use core::str::FromStr;
use std::fmt;

use enum_map::{enum_map, EnumMap};
use log::trace;
use thiserror::Error;

use crate::grid::{Direction, Position};
use crate::property::{self, Color, ExposedProp, PropMap, PropValue, PropertyError};
use crate::pulse::Pulse;

pub const BACKGROUND: Color = Color::new(31, 31, 31);
pub const INACTIVE: Color = Color::new(63, 63, 63);
pub const SPREADER_FG: Color = Color::new(255, 63, 0);
pub const EMITTER_FG: Color = Color::new(191, 255, 0);

/// Glyph with foreground and background colour.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Symbol {
    pub glyph: char,
    pub fg: Color,
    pub bg: Color,
}

impl Symbol {
    pub const fn new(glyph: char, fg: Color) -> Self {
        Self { glyph, fg, bg: BACKGROUND }
    }
}

/// 3x3 block of glyphs, indexed `[row][column]`.
pub type Chunk = [[Option<Symbol>; 3]; 3];

pub type DirectionSet = EnumMap<Direction, bool>;

fn directions(set: &DirectionSet) -> impl Iterator<Item = Direction> + '_ {
    set.iter().filter(|(_, on)| **on).map(|(direction, _)| direction)
}

fn only(direction: Direction) -> DirectionSet {
    let mut set = DirectionSet::default();
    set[direction] = true;
    set
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleError {
    #[error("invalid module name '{0}'")]
    UnknownKind(String),
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ModuleKind {
    Empty,
    Spreader,
    Emitter,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 3] = [ModuleKind::Empty, ModuleKind::Spreader, ModuleKind::Emitter];

    pub fn name(self) -> &'static str {
        match self {
            ModuleKind::Empty => "empty",
            ModuleKind::Spreader => "spreader",
            ModuleKind::Emitter => "emitter",
        }
    }
}

impl FromStr for ModuleKind {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();

        ModuleKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or(ModuleError::UnknownKind(name))
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn direction_prop(name: &str, suffix: &str) -> Option<Direction> {
    let prefix = name.strip_suffix(suffix)?.strip_suffix("_is_")?;

    Direction::ALL.into_iter().find(|d| d.name() == prefix)
}

fn expose_directions(props: &mut PropMap, set: &DirectionSet, suffix: &str) {
    for (direction, &on) in set.iter() {
        let name = format!("{}_is_{}", direction.name(), suffix);
        let label = format!("{} is {}", direction.name(), suffix);

        props.insert(name, ExposedProp::new(PropValue::Bool(on), &label));
    }
}

fn expose_symbol(props: &mut PropMap, symbol: &Symbol) {
    props.insert("character".into(), ExposedProp::new(PropValue::Char(symbol.glyph), "character"));
    props.insert("color".into(), ExposedProp::new(PropValue::Color(symbol.fg), "color"));
}

fn assign_symbol(symbol: &mut Symbol, name: &str, value: PropValue) -> bool {
    match (name, value) {
        ("character", PropValue::Char(glyph)) => symbol.glyph = glyph,
        ("color", PropValue::Color(color)) => symbol.fg = color,
        _ => return false,
    }

    true
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Empty {
    pub position: Position,
}

/// Re-routes pulses arriving along one of its inputs to all of its outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spreader {
    pub position: Position,
    pub symbol: Symbol,
    pub inputs: DirectionSet,
    pub outputs: DirectionSet,
}

impl Spreader {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            symbol: Symbol::new(']', SPREADER_FG),
            inputs: enum_map! { _ => true },
            outputs: only(Direction::Right),
        }
    }

    fn on_pulse(&self, pulse: Pulse) -> Vec<Pulse> {
        if !self.inputs[pulse.direction] {
            return vec![pulse.stepped()];
        }

        directions(&self.outputs)
            .map(|direction| Pulse::new(self.position, direction).stepped())
            .collect()
    }

    fn exposed_props(&self) -> PropMap {
        let mut props = PropMap::new();

        expose_symbol(&mut props, &self.symbol);
        expose_directions(&mut props, &self.inputs, "input");
        expose_directions(&mut props, &self.outputs, "output");

        props
    }

    fn assign(&mut self, name: &str, value: PropValue) -> bool {
        if assign_symbol(&mut self.symbol, name, value) {
            return true;
        }

        match value {
            PropValue::Bool(on) => {
                if let Some(direction) = direction_prop(name, "input") {
                    self.inputs[direction] = on;
                } else if let Some(direction) = direction_prop(name, "output") {
                    self.outputs[direction] = on;
                } else {
                    return false;
                }

                true
            }
            _ => false,
        }
    }
}

/// Fires on every beat where `beats % interval == offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitter {
    pub position: Position,
    pub symbol: Symbol,
    pub outputs: DirectionSet,
    pub interval: u32,
    pub offset: u32,
}

impl Emitter {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            symbol: Symbol::new('O', EMITTER_FG),
            outputs: only(Direction::Up),
            interval: 5,
            offset: 0,
        }
    }

    pub fn fires(&self, beats: u64) -> bool {
        // An interval of zero never fires.
        self.interval != 0 && beats % u64::from(self.interval) == u64::from(self.offset)
    }

    fn on_beat(&self, beats: u64) -> Vec<Pulse> {
        if !self.fires(beats) {
            return vec![];
        }

        directions(&self.outputs)
            .map(|direction| Pulse::new(self.position, direction))
            .collect()
    }

    fn exposed_props(&self) -> PropMap {
        let mut props = PropMap::new();

        expose_symbol(&mut props, &self.symbol);
        expose_directions(&mut props, &self.outputs, "output");
        props.insert("interval".into(), ExposedProp::new(PropValue::Int(self.interval), "pulse interval"));
        props.insert("offset".into(), ExposedProp::new(PropValue::Int(self.offset), "pulse offset"));

        props
    }

    fn assign(&mut self, name: &str, value: PropValue) -> bool {
        if assign_symbol(&mut self.symbol, name, value) {
            return true;
        }

        match (name, value) {
            ("interval", PropValue::Int(interval)) => self.interval = interval,
            ("offset", PropValue::Int(offset)) => self.offset = offset,
            (_, PropValue::Bool(on)) => match direction_prop(name, "output") {
                Some(direction) => self.outputs[direction] = on,
                None => return false,
            },
            _ => return false,
        }

        true
    }
}

/// A single board cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Module {
    Empty(Empty),
    Spreader(Spreader),
    Emitter(Emitter),
}

impl Module {
    pub fn new(kind: ModuleKind, position: Position) -> Self {
        match kind {
            ModuleKind::Empty => Module::Empty(Empty { position }),
            ModuleKind::Spreader => Module::Spreader(Spreader::new(position)),
            ModuleKind::Emitter => Module::Emitter(Emitter::new(position)),
        }
    }

    /// Looks `name` up in the kind registry (trimmed, case-insensitive).
    pub fn from_name(name: &str, position: Position) -> Result<Self, ModuleError> {
        Ok(Module::new(name.parse()?, position))
    }

    pub fn kind(&self) -> ModuleKind {
        match self {
            Module::Empty(_) => ModuleKind::Empty,
            Module::Spreader(_) => ModuleKind::Spreader,
            Module::Emitter(_) => ModuleKind::Emitter,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn position(&self) -> Position {
        match self {
            Module::Empty(m) => m.position,
            Module::Spreader(m) => m.position,
            Module::Emitter(m) => m.position,
        }
    }

    /// Whether the module sends out pulses on its own.
    pub fn active(&self) -> bool {
        matches!(self, Module::Emitter(_))
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Module::Empty(_) => None,
            Module::Spreader(m) => Some(m.symbol),
            Module::Emitter(m) => Some(m.symbol),
        }
    }

    /// `None` for empty cells; the renderer draws a placeholder instead.
    pub fn chunk(&self) -> Option<Chunk> {
        let symbol = self.symbol()?;
        let mut chunk: Chunk = Default::default();

        chunk[1][1] = Some(symbol);

        Some(chunk)
    }

    pub fn on_pulse(&self, pulse: Pulse) -> Vec<Pulse> {
        trace!("{} at {} receives pulse {:?}", self.name(), self.position(), pulse);

        match self {
            Module::Spreader(m) => m.on_pulse(pulse),
            _ => vec![pulse.stepped()],
        }
    }

    pub fn on_beat(&self, beats: u64) -> Vec<Pulse> {
        match self {
            Module::Emitter(m) => m.on_beat(beats),
            _ => vec![],
        }
    }

    pub fn exposed_props(&self) -> PropMap {
        match self {
            Module::Empty(_) => PropMap::new(),
            Module::Spreader(m) => m.exposed_props(),
            Module::Emitter(m) => m.exposed_props(),
        }
    }

    /// Applies a batch of textual edits. Either every entry validates and
    /// all of them are written, or the module is left untouched.
    pub fn set_exposed_props(&mut self, changes: &[(String, String)]) -> Result<(), PropertyError> {
        let validated = property::validate(&self.exposed_props(), changes)?;

        for (name, value) in validated {
            let assigned = match self {
                Module::Empty(_) => false,
                Module::Spreader(m) => m.assign(&name, value),
                Module::Emitter(m) => m.assign(&name, value),
            };

            debug_assert!(assigned, "validated property {} was not assigned", name);
        }

        Ok(())
    }
}
