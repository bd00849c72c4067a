//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, headless frame streams).
//!
//! # Board Dimensions
//!
//! The playfield defaults to the classic size and can be changed at startup:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_INTERVAL_MS` | 500 | Gravity step interval |
//!
//! There is no level progression: the interval stays fixed for a whole session.

/// Default board width in cells.
pub const DEFAULT_COLS: u8 = 10;
/// Default board height in cells.
pub const DEFAULT_ROWS: u8 = 20;
/// Default interval between gravity ticks.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Smallest accepted board dimension. Every catalog piece fits in 4x4.
pub const MIN_BOARD_DIM: u8 = 4;
/// Largest accepted board dimension.
pub const MAX_BOARD_DIM: u8 = 64;


/// 24-bit color identifier stored in occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// The seven piece kinds of the shape catalog
///
/// Each kind has a fixed shape and color:
/// - **I**: `#FF595E`, horizontal bar
/// - **O**: `#FFCA3A`, 2x2 square
/// - **T**: `#8AC926`, T-shaped
/// - **S**: `#1982C4`, S-shaped
/// - **Z**: `#6A4C93`, Z-shaped (mirror of S)
/// - **J**: `#FF9671`, J-shaped
/// - **L**: `#FFC75F`, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Catalog color for this kind.
    pub const fn color(self) -> Color {
        match self {
            PieceKind::I => Color::new(0xFF, 0x59, 0x5E),
            PieceKind::O => Color::new(0xFF, 0xCA, 0x3A),
            PieceKind::T => Color::new(0x8A, 0xC9, 0x26),
            PieceKind::S => Color::new(0x19, 0x82, 0xC4),
            PieceKind::Z => Color::new(0x6A, 0x4C, 0x93),
            PieceKind::J => Color::new(0xFF, 0x96, 0x71),
            PieceKind::L => Color::new(0xFF, 0xC7, 0x5F),
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Player and loop actions
///
/// These are the control surface exposed to input adapters. `SoftDrop` and
/// `Drop` share the same descend-one-or-lock semantics; there is no
/// slam-to-floor action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Drop,
    RotateCw,
    Pause,
    Resume,
    Reset,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "drop" => Some(GameAction::Drop),
            "rotatecw" => Some(GameAction::RotateCw),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Drop => "drop",
            GameAction::RotateCw => "rotateCw",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::Reset => "reset",
        }
    }
}

/// Cell on the board (None = empty, Some = filled with a color)
pub type Cell = Option<Color>;
