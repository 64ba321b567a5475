//! Typed module properties and their text form.
//!
//! Modules keep their fields typed; the editor only ever sees text. Every
//! literal crossing that boundary goes through the validator table below,
//! one entry per [`PropType`].

use std::fmt;

use enum_map::{enum_map, Enum, EnumMap};
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.r, self.g, self.b)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Enum)]
pub enum PropType {
    Bool,
    Int,
    Char,
    Color,
}

impl PropType {
    pub fn tag(self) -> &'static str {
        match self {
            PropType::Bool => "bool",
            PropType::Int => "int",
            PropType::Char => "char",
            PropType::Color => "color",
        }
    }
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PropValue {
    Bool(bool),
    Int(u32),
    Char(char),
    Color(Color),
}

impl PropValue {
    pub fn kind(&self) -> PropType {
        match self {
            PropValue::Bool(_) => PropType::Bool,
            PropValue::Int(_) => PropType::Int,
            PropValue::Char(_) => PropType::Char,
            PropValue::Color(_) => PropType::Color,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(value) => write!(f, "{}", value),
            PropValue::Int(value) => write!(f, "{}", value),
            PropValue::Char(value) => write!(f, "{}", value),
            PropValue::Color(value) => write!(f, "{}", value),
        }
    }
}

/// One entry of a module's property map: text value, type tag and label.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ExposedProp {
    pub value: String,
    pub kind: PropType,
    pub label: String,
}

impl ExposedProp {
    pub fn new(value: PropValue, label: &str) -> Self {
        Self {
            value: value.to_string(),
            kind: value.kind(),
            label: label.to_string(),
        }
    }
}

pub type PropMap = IndexMap<String, ExposedProp>;

/// A batch of `(name, literal)` edits.
pub type Changes = Vec<(String, String)>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("unknown property '{0}'")]
    Unknown(String),
    #[error("'{value}' is not a valid {kind} for '{name}'")]
    Invalid {
        name: String,
        value: String,
        kind: PropType,
    },
}

pub type Validator = fn(&str) -> Option<PropValue>;

fn all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_bool(text: &str) -> Option<PropValue> {
    match text {
        "true" => Some(PropValue::Bool(true)),
        "false" => Some(PropValue::Bool(false)),
        _ => None,
    }
}

fn parse_int(text: &str) -> Option<PropValue> {
    if !all_digits(text) {
        return None;
    }

    Some(PropValue::Int(text.parse().unwrap_or(u32::MAX)))
}

fn parse_char(text: &str) -> Option<PropValue> {
    let mut chars = text.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(PropValue::Char(c)),
        _ => None,
    }
}

fn parse_color(text: &str) -> Option<PropValue> {
    let inner = text.strip_prefix('(')?.strip_suffix(')')?;
    let mut channels = [0u8; 3];
    let mut fields = inner.split(',');

    for channel in channels.iter_mut() {
        let field = fields.next()?.trim();

        if !all_digits(field) {
            return None;
        }

        *channel = field.parse().unwrap_or(u8::MAX);
    }

    if fields.next().is_some() {
        return None;
    }

    let [r, g, b] = channels;

    Some(PropValue::Color(Color::new(r, g, b)))
}

pub fn validators() -> EnumMap<PropType, Validator> {
    enum_map! {
        PropType::Bool => parse_bool as Validator,
        PropType::Int => parse_int as Validator,
        PropType::Char => parse_char as Validator,
        PropType::Color => parse_color as Validator,
    }
}

pub fn parse(kind: PropType, text: &str) -> Option<PropValue> {
    validators()[kind](text)
}

/// Checks a whole batch against `props`. Nothing is returned unless every
/// entry names a known property and its literal fits the declared type.
pub fn validate(props: &PropMap, changes: &[(String, String)]) -> Result<Vec<(String, PropValue)>, PropertyError> {
    let table = validators();

    changes
        .iter()
        .map(|(name, value)| -> Result<(String, PropValue), PropertyError> {
            let prop = props
                .get(name)
                .ok_or_else(|| PropertyError::Unknown(name.clone()))?;

            let parsed = table[prop.kind](value).ok_or_else(|| PropertyError::Invalid {
                name: name.clone(),
                value: value.clone(),
                kind: prop.kind,
            })?;

            Ok((name.clone(), parsed))
        })
        .collect()
}

/// Turns a property map back into a change batch carrying its current values.
pub fn as_changes(props: &PropMap) -> Changes {
    props
        .iter()
        .map(|(name, prop)| (name.clone(), prop.value.clone()))
        .collect()
}
