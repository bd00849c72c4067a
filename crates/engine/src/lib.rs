//! Game loop engine
//!
//! Wraps the pure [`core`] rules in a session that owns the timer, the render
//! adapter and the loop state machine.
//!
//! # Module Structure
//!
//! - [`session`]: [`GameSession`] with start/pause/resume/reset and the control surface
//! - [`scheduler`]: the cancellable repeating timer seam ([`ManualScheduler`], [`TokioScheduler`])
//! - [`command`]: commands consumed by the single-consumer queue
//! - [`render`]: the [`RenderAdapter`] trait
//! - [`snapshot`]: owned frame copies and the JSON-lines adapter
//! - [`config`]: startup configuration
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tui_blockfall_engine::{GameConfig, GameSession, ManualScheduler, NullAdapter};
//!
//! let clock = ManualScheduler::new();
//! let mut session = GameSession::new(GameConfig::default(), 7, clock.clone(), NullAdapter);
//! session.start();
//!
//! let y0 = session.state().active().unwrap().y;
//! for tick in clock.advance(Duration::from_millis(500)) {
//!     session.on_tick(tick);
//! }
//! assert_eq!(session.state().active().unwrap().y, y0 + 1);
//! ```

pub mod command;
pub mod config;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod snapshot;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use command::Command;
pub use config::{ConfigError, GameConfig};
pub use render::{NullAdapter, RenderAdapter};
pub use scheduler::{ManualScheduler, TickScheduler, TickToken, TokioScheduler};
pub use session::{GameSession, LoopPhase};
pub use snapshot::{FrameSnapshot, JsonLinesAdapter, StreamEvent};
