use std::io::{self, Write};

use super::{Frame, Highlight, RenderEvent, Renderer};
use crate::grid::Position;

pub const PROMPT: &str = "(ilokalama):> ";

type Block = [[char; 3]; 3];

fn block(frame: &Frame, position: Position) -> Block {
    let mut block = [[' '; 3]; 3];

    match frame.chunks.get(position).copied().flatten() {
        Some(chunk) => {
            for (row, symbols) in chunk.iter().enumerate() {
                for (column, symbol) in symbols.iter().enumerate() {
                    if let Some(symbol) = symbol {
                        block[row][column] = symbol.glyph;
                    }
                }
            }
        }
        None => block[1][1] = '=',
    }

    match frame.highlight(position) {
        Highlight::Cursor => {
            block[1][0] = '[';
            block[1][2] = ']';
        }
        Highlight::Pulse => {
            for (row, column) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
                block[row][column] = '*';
            }
        }
        Highlight::None => {}
    }

    block
}

/// Draws the board as 3x3 character blocks, one block per module.
pub fn board_lines(frame: &Frame) -> Vec<String> {
    let size = frame.size();
    let mut lines = Vec::with_capacity(size.height * 3);

    for y in 0..size.height {
        let blocks: Vec<Block> = (0..size.width)
            .map(|x| block(frame, Position::new(x as i32, y as i32)))
            .collect();

        for row in 0..3 {
            lines.push(blocks.iter().flat_map(|b| b[row]).collect());
        }
    }

    lines
}

pub fn render_to_string(frame: &Frame) -> String {
    let mut lines = board_lines(frame);

    lines.push(String::new());
    lines.push(format!(
        "{}{}",
        frame.prompt.as_deref().unwrap_or(PROMPT),
        frame.commandline
    ));
    lines.extend(frame.status.iter().cloned());
    lines.extend(frame.help.iter().cloned());

    lines.join("\n")
}

/// Writes plain-text frames to any [`Write`] sink, without colours.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    type Error = io::Error;

    fn handle_event(&mut self, event: &RenderEvent) -> Result<(), Self::Error> {
        match event {
            RenderEvent::Tick(beat) => writeln!(self.out, "-- beat {} --", beat),
            RenderEvent::Started | RenderEvent::Stopped => Ok(()),
        }
    }

    fn draw(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        writeln!(self.out, "{}", render_to_string(frame))?;
        self.out.flush()
    }
}
