//! Game state module - the active piece and everything that moves it
//!
//! This module ties together the board, the shape catalog, collision checks and
//! the piece randomizer. It handles spawning, translation, rotation, the
//! descend-or-lock step, merging and line clearing. Timing lives in the engine.

use tracing::{debug, info};

use crate::collision::collides;
use crate::pieces::{catalog_shape, rotate_clockwise, Shape, ShapeCells};
use crate::rng::PieceRng;
use crate::types::{Color, PieceKind};
use crate::Board;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current rotation matrix
    pub shape: Shape,
    /// Column of the shape's top-left corner
    pub x: i32,
    /// Row of the shape's top-left corner
    pub y: i32,
    pub color: Color,
}

impl ActivePiece {
    /// Create a piece horizontally centered on the top row of a board `cols` wide
    pub fn spawn(kind: PieceKind, cols: u8) -> Self {
        let shape = catalog_shape(kind);
        Self {
            kind,
            shape,
            x: (cols as i32 - shape.width() as i32).div_euclid(2),
            y: 0,
            color: kind.color(),
        }
    }

    /// Absolute board coordinates of every occupied cell
    pub fn cells(&self) -> ShapeCells {
        self.shape
            .cells()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    fn collides_on(&self, board: &Board) -> bool {
        collides(&self.shape, self.x, self.y, board)
    }
}

/// Result of placing a new piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned,
    /// The spawn position was blocked; the board was wiped and the piece placed anyway.
    ToppedOut,
}

/// Summary of a lock (merge, line clear, respawn)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockReport {
    pub lines_cleared: u32,
    pub topped_out: bool,
}

/// Result of a descend-or-lock step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The piece moved down one row.
    Moved,
    /// The piece could not descend and was locked into the board.
    Locked(LockReport),
    /// There was no active piece.
    Idle,
}

/// Board, active piece and piece source
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    rng: PieceRng,
}

impl GameState {
    /// Create an empty board of `cols x rows` with no active piece
    pub fn new(cols: u8, rows: u8, seed: u64) -> Self {
        Self::with_board(Board::new(cols, rows), seed)
    }

    /// Start from an existing board (prepared positions, replays)
    pub fn with_board(board: Board, seed: u64) -> Self {
        Self {
            board,
            active: None,
            rng: PieceRng::new(seed),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Spawn a uniformly random piece at the top center
    pub fn spawn(&mut self) -> SpawnOutcome {
        let kind = self.rng.next_kind();
        self.spawn_kind(kind)
    }

    /// Spawn a specific piece at the top center
    ///
    /// If the spawn position is already blocked the whole board is cleared once
    /// and the piece stays where it spawned, which is always free on an empty board.
    pub fn spawn_kind(&mut self, kind: PieceKind) -> SpawnOutcome {
        let piece = ActivePiece::spawn(kind, self.board.width());
        self.active = Some(piece);

        if piece.collides_on(&self.board) {
            info!(kind = kind.as_str(), "spawn blocked, clearing board");
            self.board.clear();
            return SpawnOutcome::ToppedOut;
        }

        SpawnOutcome::Spawned
    }

    /// Clear the board and spawn a fresh piece
    pub fn restart(&mut self) -> SpawnOutcome {
        self.board.clear();
        self.active = None;
        self.spawn()
    }

    /// Move the active piece `dx` columns if the target is free
    pub fn translate(&mut self, dx: i32) -> bool {
        self.try_replace(|p| {
            Some(ActivePiece {
                x: p.x.checked_add(dx)?,
                ..p
            })
        })
    }

    /// Rotate the active piece clockwise in place (no wall kicks)
    pub fn rotate(&mut self) -> bool {
        self.try_replace(|p| {
            Some(ActivePiece {
                shape: rotate_clockwise(&p.shape),
                ..p
            })
        })
    }

    /// Manual down input: gain one row, or lock when the piece rests on something
    pub fn soft_drop(&mut self, on_line_cleared: impl FnMut(usize)) -> StepOutcome {
        self.descend_or_lock(on_line_cleared)
    }

    /// Gravity step, shared by the tick and the manual drop action
    pub fn drop_step(&mut self, on_line_cleared: impl FnMut(usize)) -> StepOutcome {
        self.descend_or_lock(on_line_cleared)
    }

    /// Whether the active piece can move one row down
    pub fn can_descend(&self) -> bool {
        match self.active {
            Some(p) => !collides(&p.shape, p.x, p.y + 1, &self.board),
            None => false,
        }
    }

    fn descend_or_lock(&mut self, on_line_cleared: impl FnMut(usize)) -> StepOutcome {
        if self.active.is_none() {
            return StepOutcome::Idle;
        }

        if self.try_replace(|p| Some(ActivePiece { y: p.y.checked_add(1)?, ..p })) {
            return StepOutcome::Moved;
        }

        StepOutcome::Locked(self.lock(on_line_cleared))
    }

    /// Merge the active piece, clear full rows and spawn the next piece
    pub fn lock(&mut self, on_line_cleared: impl FnMut(usize)) -> LockReport {
        if !self.merge() {
            return LockReport::default();
        }
        let lines_cleared = self.clear_lines(on_line_cleared);
        let topped_out = self.spawn() == SpawnOutcome::ToppedOut;

        debug!(lines_cleared, topped_out, "piece locked");
        LockReport {
            lines_cleared,
            topped_out,
        }
    }

    /// Write every cell of the active piece into the board and drop the piece.
    /// Returns false when there is no active piece.
    pub fn merge(&mut self) -> bool {
        let Some(piece) = self.active.take() else {
            return false;
        };

        for (x, y) in piece.cells() {
            self.board.set_cell(x, y, piece.color);
        }
        true
    }

    /// Remove every full row, bottom to top, and return how many were removed
    ///
    /// `on_line_cleared` receives the row index right before that row is removed.
    /// After a removal the same index is examined again, since the row above has
    /// shifted into it.
    pub fn clear_lines(&mut self, mut on_line_cleared: impl FnMut(usize)) -> u32 {
        let mut cleared = 0;
        let mut y = self.board.height() as usize;

        while y > 0 {
            let row = y - 1;
            if self.board.is_row_full(row) {
                on_line_cleared(row);
                self.board.remove_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Replace the active piece with `f(piece)` if that exists and does not collide
    fn try_replace(&mut self, f: impl FnOnce(ActivePiece) -> Option<ActivePiece>) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        match f(piece) {
            Some(next) if !next.collides_on(&self.board) => {
                self.active = Some(next);
                true
            }
            _ => false,
        }
    }
}
