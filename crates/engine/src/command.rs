//! Commands delivered to the session through the single consumer queue.

use crate::scheduler::TickToken;
use crate::types::GameAction;

/// Everything that can mutate a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Player or control input.
    Action(GameAction),
    /// Timer tick from a scheduler.
    Tick(TickToken),
    /// Stop the runner.
    Quit,
}

impl From<GameAction> for Command {
    fn from(action: GameAction) -> Self {
        Command::Action(action)
    }
}
