//! Render adapter seam.
//!
//! The session calls the adapter synchronously after every state change.
//! Adapters only read the board and piece; drawing technology is their concern.

use crate::core::{ActivePiece, Board};
use crate::session::LoopPhase;

/// Presentation layer hooks
pub trait RenderAdapter {
    /// Draw a consistent frame. Called after a mutation has fully completed.
    fn render(&mut self, board: &Board, active: Option<&ActivePiece>);

    /// A full row is about to be removed. Called once per row, bottom to top.
    /// Any animation started here must not block.
    fn line_cleared(&mut self, _row: usize) {}

    /// The loop moved to `phase`.
    fn phase_changed(&mut self, _phase: LoopPhase) {}
}

/// Adapter that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAdapter;

impl RenderAdapter for NullAdapter {
    fn render(&mut self, _board: &Board, _active: Option<&ActivePiece>) {}
}

impl<A: RenderAdapter + ?Sized> RenderAdapter for &mut A {
    fn render(&mut self, board: &Board, active: Option<&ActivePiece>) {
        (**self).render(board, active)
    }

    fn line_cleared(&mut self, row: usize) {
        (**self).line_cleared(row)
    }

    fn phase_changed(&mut self, phase: LoopPhase) {
        (**self).phase_changed(phase)
    }
}

impl<A: RenderAdapter + ?Sized> RenderAdapter for Box<A> {
    fn render(&mut self, board: &Board, active: Option<&ActivePiece>) {
        (**self).render(board, active)
    }

    fn line_cleared(&mut self, row: usize) {
        (**self).line_cleared(row)
    }

    fn phase_changed(&mut self, phase: LoopPhase) {
        (**self).phase_changed(phase)
    }
}
