pub mod events;
pub mod text_renderer;

use indexmap::IndexSet;

use crate::board::Board;
use crate::grid::{Grid, Position, Size};
use crate::module::Chunk;

pub use events::RenderEvent;
pub use text_renderer::TextRenderer;

/// How a cell should be emphasised on top of its chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    Cursor,
    Pulse,
}

/// Everything a renderer needs to draw one frame, detached from the engine.
#[derive(Debug, Clone)]
pub struct Frame {
    pub chunks: Grid<Option<Chunk>>,
    pub cursor: Position,
    pub pulses: IndexSet<Position>,
    pub commandline: String,
    pub prompt: Option<String>,
    pub help: Vec<String>,
    pub status: Option<String>,
}

impl Frame {
    pub fn new(board: &Board, cursor: Position, commandline: &str, prompt: Option<String>, help: Vec<String>) -> Self {
        Self {
            chunks: Grid::new(board.size(), &mut |position| board.get_chunk_at(position)),
            cursor,
            pulses: board.pulses().map(|pulse| pulse.position).collect(),
            commandline: commandline.to_string(),
            prompt,
            help,
            status: None,
        }
    }

    pub fn size(&self) -> Size {
        self.chunks.size()
    }

    /// The cursor wins over pulses.
    pub fn highlight(&self, position: Position) -> Highlight {
        if position == self.cursor {
            Highlight::Cursor
        } else if self.pulses.contains(&position) {
            Highlight::Pulse
        } else {
            Highlight::None
        }
    }
}

/// Presents frames produced by the engine.
pub trait Renderer {
    type Error;

    /// Handle a lifecycle event of the control loop
    fn handle_event(&mut self, event: &RenderEvent) -> Result<(), Self::Error> {
        let _ = event;
        Ok(())
    }

    /// Draw the current state of the board
    fn draw(&mut self, frame: &Frame) -> Result<(), Self::Error>;

    /// Check if the user wants to quit (for interactive renderers)
    fn should_quit(&mut self) -> bool {
        false
    }
}
