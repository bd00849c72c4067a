//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules: the grid, the shape catalog, collision
//! detection, rotation, line clearing and the active piece. It has **no
//! dependencies** on timers, terminals or I/O, making it:
//!
//! - **Deterministic**: Same seed produces the same piece sequence
//! - **Testable**: Every rule is exercised without a clock or a screen
//! - **Portable**: Runs in the terminal runner, headless, or in benches
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with row removal and occupancy queries
//! - [`collision`]: the single collision predicate used before every move
//! - [`pieces`]: the seven catalog shapes and clockwise matrix rotation
//! - [`game_state`]: active piece, spawn, translate/rotate, descend-or-lock, line clears
//! - [`rng`]: seeded uniform piece selection
//!
//! # Game Rules
//!
//! - **Spawn**: top row, horizontally centered (`floor((cols - width) / 2)`)
//! - **Topping out**: a blocked spawn wipes the board; there is no game over
//! - **Rotation**: clockwise only, no wall kicks
//! - **Gravity**: one row per step; a piece that cannot descend locks immediately
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::GameState;
//! use tui_blockfall_types::PieceKind;
//!
//! let mut game = GameState::new(10, 20, 12345);
//! game.spawn_kind(PieceKind::O);
//!
//! game.translate(1);
//! game.rotate();
//! game.drop_step(|row| println!("row {row} cleared"));
//!
//! assert_eq!(game.active().map(|p| (p.x, p.y)), Some((5, 1)));
//! ```

pub mod board;
pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod rng;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::collides;
pub use game_state::{ActivePiece, GameState, LockReport, SpawnOutcome, StepOutcome};
pub use pieces::{catalog_shape, rotate_clockwise, Shape};
pub use rng::PieceRng;
