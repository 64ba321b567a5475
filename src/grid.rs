use core::str::FromStr;
use std::fmt;
use std::ops::{Add, Mul};

use enum_map::Enum;
use serde::Deserialize;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Enum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector, y grows downwards.
    pub fn vector(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_inner(&self, size: Size) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < size.width && (self.y as usize) < size.height
    }

    /// Clamps both axes into `[0, dim - 1]`.
    pub fn crop(&self, size: Size) -> Self {
        let max_x = size.width.saturating_sub(1).min(i32::MAX as usize) as i32;
        let max_y = size.height.saturating_sub(1).min(i32::MAX as usize) as i32;

        Self {
            x: self.x.clamp(0, max_x),
            y: self.y.clamp(0, max_y),
        }
    }

    pub fn moved(&self, direction: Direction) -> Self {
        *self + direction.vector()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y)
    }
}

impl Add<Direction> for Position {
    type Output = Position;

    fn add(self, direction: Direction) -> Position {
        self + direction.vector()
    }
}

impl Mul<i32> for Position {
    type Output = Position;

    fn mul(self, n: i32) -> Position {
        Position::new(self.x * n, self.y * n)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (raw_width, raw_height) = s.split_once('x').ok_or(format!("invalid format: {}", s))?;

        let width = raw_width
            .parse::<usize>()
            .map_err(|_| format!("invalid width: {}", raw_width))?;
        let height = raw_height
            .parse::<usize>()
            .map_err(|_| format!("invalid height: {}", raw_height))?;

        if width == 0 || height == 0 {
            return Err(format!("size must not be empty: {}", s));
        }

        // Positions are i32, every cell must stay addressable
        let limit = i32::MAX as usize;

        if width > limit || height > limit || width.checked_mul(height).is_none() {
            return Err(format!("size is too large: {}", s));
        }

        Ok(Size { width, height })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    data: Vec<T>,
    size: Size,
}

pub struct GridIter<'a, T> {
    grid: &'a Grid<T>,
    pos: usize,
}

impl<T> Grid<T> {
    pub fn new<F: FnMut(Position) -> T>(size: Size, initializer: &mut F) -> Self {
        let mut data = Vec::with_capacity(size.area());

        for y in 0..size.height {
            for x in 0..size.width {
                data.push(initializer(Position::new(x as i32, y as i32)));
            }
        }

        Self { data, size }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn iter(&self) -> GridIter<T> {
        GridIter { grid: self, pos: 0 }
    }

    fn index(&self, position: Position) -> Option<usize> {
        if position.is_inner(self.size) {
            Some(position.x as usize + position.y as usize * self.size.width)
        } else {
            None
        }
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        self.data.get(self.index(position)?)
    }

    /// Swaps in `value` and hands back the previous occupant.
    pub fn replace(&mut self, position: Position, value: T) -> Result<T, &'static str> {
        let index = self.index(position).ok_or("Cell out of range")?;

        Ok(std::mem::replace(&mut self.data[index], value))
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = (Position, &'a T);
    type IntoIter = GridIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iterator for GridIter<'a, T> {
    type Item = (Position, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.grid.data.get(self.pos)?;
        let x = self.pos % self.grid.size.width;
        let y = self.pos / self.grid.size.width;

        self.pos += 1;

        Some((Position::new(x as i32, y as i32), value))
    }
}
