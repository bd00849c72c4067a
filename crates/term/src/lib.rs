//! Terminal front end.
//!
//! Renders into a plain character framebuffer (no widget toolkit) and flushes
//! only the changed runs to the terminal. Board cells are drawn two columns
//! wide to compensate for the glyph aspect ratio.

pub mod adapter;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blockfall_core as core;
pub use tui_blockfall_engine as engine;
pub use tui_blockfall_types as types;

pub use adapter::{TermAdapter, FLASH_FRAMES};
pub use fb::{FrameBuffer, Glyph, Style};
pub use game_view::{AnchorY, BoardView, Scene, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
