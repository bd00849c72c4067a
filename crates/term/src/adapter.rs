//! Render adapter that draws the game on a terminal.

use std::io::{self, Write};

use tracing::warn;

use crate::core::{ActivePiece, Board};
use crate::engine::{LoopPhase, RenderAdapter};
use crate::fb::FrameBuffer;
use crate::game_view::{BoardView, Scene, Viewport};
use crate::renderer::TerminalRenderer;

/// Animation frames a cleared row keeps flashing for.
pub const FLASH_FRAMES: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flash {
    row: usize,
    frames_left: u8,
}

/// Keeps a copy of the last rendered frame so it can repaint on resize and
/// while a line-clear flash runs.
pub struct TermAdapter<W: Write = io::Stdout> {
    renderer: TerminalRenderer<W>,
    view: BoardView,
    viewport: Viewport,
    fb: FrameBuffer,
    board: Option<Board>,
    active: Option<ActivePiece>,
    phase: LoopPhase,
    flashes: Vec<Flash>,
    flash_rows: Vec<usize>,
}

impl<W: Write> TermAdapter<W> {
    pub fn new(renderer: TerminalRenderer<W>, view: BoardView, viewport: Viewport) -> Self {
        Self {
            renderer,
            view,
            viewport,
            fb: FrameBuffer::new(viewport.width, viewport.height),
            board: None,
            active: None,
            phase: LoopPhase::Stopped,
            flashes: Vec::new(),
            flash_rows: Vec::new(),
        }
    }

    pub fn renderer_mut(&mut self) -> &mut TerminalRenderer<W> {
        &mut self.renderer
    }

    /// The framebuffer of the last repaint.
    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn is_animating(&self) -> bool {
        !self.flashes.is_empty()
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.renderer.invalidate();
        self.repaint();
    }

    /// Advance flash animations by one frame. Returns whether anything is
    /// still animating.
    pub fn animate(&mut self) -> bool {
        if self.flashes.is_empty() {
            return false;
        }
        for f in &mut self.flashes {
            f.frames_left = f.frames_left.saturating_sub(1);
        }
        self.flashes.retain(|f| f.frames_left > 0);
        self.repaint();
        self.is_animating()
    }

    fn repaint(&mut self) {
        let Some(board) = &self.board else {
            return;
        };

        self.flash_rows.clear();
        self.flash_rows.extend(self.flashes.iter().map(|f| f.row));
        let scene = Scene {
            board,
            active: self.active.as_ref(),
            phase: self.phase,
            flash_rows: &self.flash_rows,
        };
        self.view.render_into(&scene, self.viewport, &mut self.fb);

        if let Err(e) = self.renderer.present(&self.fb) {
            warn!(error = %e, "terminal draw failed");
        }
    }
}

impl<W: Write> RenderAdapter for TermAdapter<W> {
    fn render(&mut self, board: &Board, active: Option<&ActivePiece>) {
        match &mut self.board {
            Some(b) => b.clone_from(board),
            None => self.board = Some(board.clone()),
        }
        self.active = active.cloned();
        self.repaint();
    }

    fn line_cleared(&mut self, row: usize) {
        match self.flashes.iter_mut().find(|f| f.row == row) {
            Some(f) => f.frames_left = FLASH_FRAMES,
            None => self.flashes.push(Flash {
                row,
                frames_left: FLASH_FRAMES,
            }),
        }
    }

    fn phase_changed(&mut self, phase: LoopPhase) {
        self.phase = phase;
        self.repaint();
    }
}
