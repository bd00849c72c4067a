//! Owned frame snapshots and a JSON-lines render adapter.
//!
//! Used by the headless runner: every render becomes one `frame` line and
//! every cleared row one `lineCleared` line on the output stream.

use std::io::Write;

use serde::Serialize;
use tracing::warn;

use crate::core::{ActivePiece, Board};
use crate::render::RenderAdapter;
use crate::session::LoopPhase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSnapshot {
    pub kind: String,
    pub x: i32,
    pub y: i32,
    pub color: String,
    /// Absolute `[x, y]` of every occupied cell.
    pub cells: Vec<[i32; 2]>,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(p: &ActivePiece) -> Self {
        Self {
            kind: p.kind.as_str().to_string(),
            x: p.x,
            y: p.y,
            color: p.color.to_hex(),
            cells: p.cells().into_iter().map(|(x, y)| [x, y]).collect(),
        }
    }
}

/// A self-contained copy of one renderable frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub cols: u8,
    pub rows: u8,
    /// Rows top to bottom; `null` for empty cells, `"#RRGGBB"` otherwise.
    pub board: Vec<Vec<Option<String>>>,
    pub active: Option<ActiveSnapshot>,
}

impl FrameSnapshot {
    pub fn capture(board: &Board, active: Option<&ActivePiece>) -> Self {
        Self {
            cols: board.width(),
            rows: board.height(),
            board: board
                .rows()
                .map(|row| row.iter().map(|c| c.map(|c| c.to_hex())).collect())
                .collect(),
            active: active.map(ActiveSnapshot::from),
        }
    }
}

/// One line of the headless stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StreamEvent {
    Frame(FrameSnapshot),
    LineCleared { row: usize },
    Phase { phase: &'static str },
}

/// Render adapter writing [`StreamEvent`]s as JSON lines
pub struct JsonLinesAdapter<W: Write> {
    out: W,
    frames: u64,
}

impl<W: Write> JsonLinesAdapter<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Frames written so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &StreamEvent) -> bool {
        let result = serde_json::to_writer(&mut self.out, event)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"))
            .and_then(|()| self.out.flush());

        match result {
            Ok(()) => true,
            Err(e) => {
                // A broken output stream must not stop the game.
                warn!(error = %e, "failed to write stream event");
                false
            }
        }
    }
}

impl<W: Write> RenderAdapter for JsonLinesAdapter<W> {
    fn render(&mut self, board: &Board, active: Option<&ActivePiece>) {
        if self.emit(&StreamEvent::Frame(FrameSnapshot::capture(board, active))) {
            self.frames += 1;
        }
    }

    fn line_cleared(&mut self, row: usize) {
        self.emit(&StreamEvent::LineCleared { row });
    }

    fn phase_changed(&mut self, phase: LoopPhase) {
        self.emit(&StreamEvent::Phase {
            phase: phase.as_str(),
        });
    }
}
