//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and decides
//! which actions may pass while the game is paused. Terminal key repeat is
//! used as-is; there is no DAS/ARR layer.

pub mod map;

pub use tui_blockfall_types as types;

pub use map::{allowed_while_paused, handle_key_event, should_quit};
