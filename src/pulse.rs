use crate::grid::{Direction, Position};

/// A signal travelling across the board, one cell per tick.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Pulse {
    pub position: Position,
    pub direction: Direction,
}

impl Pulse {
    pub fn new(position: Position, direction: Direction) -> Self {
        Self { position, direction }
    }

    pub fn step(&mut self) {
        self.position = self.position + self.direction;
    }

    pub fn stepped(mut self) -> Self {
        self.step();
        self
    }
}
