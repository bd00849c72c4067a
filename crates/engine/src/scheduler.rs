//! Tick scheduling.
//!
//! The session only needs "tick every N ms" and "cancel". [`ManualScheduler`]
//! runs on a virtual clock for tests; [`TokioScheduler`] drives a real
//! interval task and feeds ticks into the command queue.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::command::Command;

/// Identifies the schedule a tick came from.
///
/// The session bumps its generation on every pause/resume/reset, so a tick
/// that was already queued when its schedule was cancelled can be recognised
/// and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken {
    generation: u64,
}

impl TickToken {
    pub fn new(generation: u64) -> Self {
        Self { generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A cancellable repeating timer
pub trait TickScheduler {
    /// Start delivering `token` every `interval`, first delivery one interval
    /// from now. Replaces any previous schedule.
    fn schedule(&mut self, interval: Duration, token: TickToken);

    /// Stop delivering ticks. No-op when nothing is scheduled.
    fn cancel(&mut self);

    fn is_scheduled(&self) -> bool;
}

#[derive(Debug)]
struct Pending {
    interval: Duration,
    next_due: Duration,
    token: TickToken,
}

#[derive(Debug, Default)]
struct ManualClock {
    now: Duration,
    pending: Option<Pending>,
}

/// Virtual-time scheduler
///
/// Clones share the same clock, so a test can hand one clone to the session
/// and keep another to advance time.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Move the clock forward and return every tick that came due, in order.
    pub fn advance(&self, by: Duration) -> Vec<TickToken> {
        let mut clock = self.clock.borrow_mut();
        clock.now += by;
        let now = clock.now;

        let mut due = Vec::new();
        if let Some(p) = clock.pending.as_mut() {
            while p.next_due <= now {
                due.push(p.token);
                p.next_due += p.interval;
            }
        }
        due
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, interval: Duration, token: TickToken) {
        let mut clock = self.clock.borrow_mut();
        let interval = interval.max(Duration::from_millis(1));
        let next_due = clock.now + interval;
        clock.pending = Some(Pending {
            interval,
            next_due,
            token,
        });
    }

    fn cancel(&mut self) {
        self.clock.borrow_mut().pending = None;
    }

    fn is_scheduled(&self) -> bool {
        self.clock.borrow().pending.is_some()
    }
}

/// Scheduler backed by a tokio interval task
///
/// Each tick is sent as [`Command::Tick`] on the command channel; the
/// session consumes them in order with all other commands.
pub struct TokioScheduler {
    handle: Handle,
    tx: mpsc::UnboundedSender<Command>,
    task: Option<JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(handle: Handle, tx: mpsc::UnboundedSender<Command>) -> Self {
        Self {
            handle,
            tx,
            task: None,
        }
    }

    /// Use the runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current(tx: mpsc::UnboundedSender<Command>) -> Self {
        Self::new(Handle::current(), tx)
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule(&mut self, interval: Duration, token: TickToken) {
        self.cancel();

        let tx = self.tx.clone();
        self.task = Some(self.handle.spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            // Never burst to catch up after a stall.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(Command::Tick(token)).is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn is_scheduled(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_manual_first_tick_after_one_interval() {
        let mut s = ManualScheduler::new();
        s.schedule(500 * MS, TickToken::new(1));
        assert!(s.advance(499 * MS).is_empty());
        assert_eq!(s.advance(MS), vec![TickToken::new(1)]);
    }

    #[test]
    fn test_manual_multiple_due_ticks() {
        let mut s = ManualScheduler::new();
        s.schedule(100 * MS, TickToken::new(3));
        assert_eq!(s.advance(350 * MS).len(), 3);
        assert_eq!(s.advance(50 * MS).len(), 1);
    }

    #[test]
    fn test_manual_cancel_stops_ticks() {
        let mut s = ManualScheduler::new();
        s.schedule(100 * MS, TickToken::new(1));
        s.cancel();
        assert!(!s.is_scheduled());
        assert!(s.advance(1000 * MS).is_empty());
    }

    #[test]
    fn test_manual_reschedule_restarts_phase() {
        let mut s = ManualScheduler::new();
        s.schedule(100 * MS, TickToken::new(1));
        s.advance(80 * MS);
        s.schedule(100 * MS, TickToken::new(2));
        assert!(s.advance(90 * MS).is_empty());
        assert_eq!(s.advance(10 * MS), vec![TickToken::new(2)]);
    }

    #[test]
    fn test_manual_clones_share_clock() {
        let observer = ManualScheduler::new();
        let mut owned = observer.clone();
        owned.schedule(10 * MS, TickToken::new(7));
        assert!(observer.is_scheduled());
        assert_eq!(observer.advance(10 * MS), vec![TickToken::new(7)]);
        assert_eq!(owned.now(), 10 * MS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_ticks_and_cancels() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut s = TokioScheduler::current(tx);

        s.schedule(500 * MS, TickToken::new(1));
        assert!(s.is_scheduled());

        tokio::time::sleep(1250 * MS).await;
        let mut ticks = 0;
        while let Ok(cmd) = rx.try_recv() {
            assert_eq!(cmd, Command::Tick(TickToken::new(1)));
            ticks += 1;
        }
        assert_eq!(ticks, 2);

        s.cancel();
        tokio::time::sleep(2000 * MS).await;
        assert!(rx.try_recv().is_err());
    }
}
