//! Game loop tests: phases, tick handling and adapter notifications

use std::time::Duration;

use tui_blockfall::core::{ActivePiece, Board, GameState, StepOutcome};
use tui_blockfall::engine::{
    Command, GameConfig, GameSession, LoopPhase, ManualScheduler, RenderAdapter, TickScheduler,
    TokioScheduler,
};
use tui_blockfall::types::{GameAction, PieceKind};

#[derive(Default)]
struct Recorder {
    renders: usize,
    cleared: Vec<usize>,
    /// Render count seen by each `line_cleared` call.
    renders_at_clear: Vec<usize>,
    phases: Vec<LoopPhase>,
    last_active: Option<ActivePiece>,
}

impl RenderAdapter for Recorder {
    fn render(&mut self, _board: &Board, active: Option<&ActivePiece>) {
        self.renders += 1;
        self.last_active = active.copied();
    }

    fn line_cleared(&mut self, row: usize) {
        self.cleared.push(row);
        self.renders_at_clear.push(self.renders);
    }

    fn phase_changed(&mut self, phase: LoopPhase) {
        self.phases.push(phase);
    }
}

const INTERVAL: Duration = Duration::from_millis(500);

fn started() -> (GameSession<ManualScheduler, Recorder>, ManualScheduler) {
    let clock = ManualScheduler::new();
    let mut session = GameSession::new(GameConfig::default(), 42, clock.clone(), Recorder::default());
    session.start();
    (session, clock)
}

fn run_ticks(session: &mut GameSession<ManualScheduler, Recorder>, clock: &ManualScheduler, by: Duration) -> usize {
    let ticks = clock.advance(by);
    for &t in &ticks {
        session.on_tick(t);
    }
    ticks.len()
}

fn active_y(session: &GameSession<ManualScheduler, Recorder>) -> i32 {
    session.state().active().unwrap().y
}

#[test]
fn test_start_renders_and_reports_running() {
    let (s, _clock) = started();
    assert_eq!(s.phase(), LoopPhase::Running);
    assert_eq!(s.adapter().renders, 1);
    assert_eq!(s.adapter().phases, vec![LoopPhase::Running]);
    assert_eq!(s.adapter().last_active, s.state().active().copied());
}

#[test]
fn test_each_interval_descends_one_row() {
    let (mut s, clock) = started();
    let y0 = active_y(&s);

    assert_eq!(run_ticks(&mut s, &clock, Duration::from_millis(499)), 0);
    assert_eq!(active_y(&s), y0);

    assert_eq!(run_ticks(&mut s, &clock, Duration::from_millis(1)), 1);
    assert_eq!(active_y(&s), y0 + 1);

    assert_eq!(run_ticks(&mut s, &clock, INTERVAL * 2), 2);
    assert_eq!(active_y(&s), y0 + 3);
    assert_eq!(s.adapter().renders, 4);
}

#[test]
fn test_pause_stops_ticks_and_resume_does_not_catch_up() {
    let (mut s, clock) = started();
    let y0 = active_y(&s);

    assert!(s.pause());
    assert_eq!(run_ticks(&mut s, &clock, INTERVAL * 3), 0);
    assert_eq!(active_y(&s), y0);

    assert!(s.resume());
    assert_eq!(run_ticks(&mut s, &clock, Duration::from_millis(499)), 0);
    assert_eq!(run_ticks(&mut s, &clock, Duration::from_millis(1)), 1);
    assert_eq!(active_y(&s), y0 + 1);

    assert_eq!(
        s.adapter().phases,
        vec![LoopPhase::Running, LoopPhase::Paused, LoopPhase::Running]
    );
}

#[test]
fn test_every_successful_action_renders() {
    let (mut s, _clock) = started();
    let mut expected = s.adapter().renders;

    assert!(s.move_left());
    expected += 1;
    assert_eq!(s.adapter().renders, expected);

    assert!(s.move_right());
    expected += 1;
    assert_eq!(s.adapter().renders, expected);

    if s.rotate_clockwise() {
        expected += 1;
    }
    assert_eq!(s.adapter().renders, expected);

    assert_eq!(s.soft_drop_one_or_lock(), StepOutcome::Moved);
    expected += 1;
    assert_eq!(s.adapter().renders, expected);

    assert_eq!(s.instant_lock_step(), StepOutcome::Moved);
    expected += 1;
    assert_eq!(s.adapter().renders, expected);
}

#[test]
fn test_blocked_move_does_not_render() {
    let (mut s, _clock) = started();
    while s.move_left() {}
    let renders = s.adapter().renders;

    assert!(!s.move_left());
    assert_eq!(s.adapter().renders, renders);
}

#[test]
fn test_repeated_drops_eventually_lock_and_respawn() {
    let (mut s, _clock) = started();
    let mut locked = false;
    for _ in 0..25 {
        if let StepOutcome::Locked(report) = s.instant_lock_step() {
            assert!(!report.topped_out);
            locked = true;
            break;
        }
    }
    assert!(locked);
    assert_eq!(s.state().board().occupied_count(), 4);
    assert_eq!(active_y(&s), 0);
    assert!(s.adapter().cleared.is_empty());
}

#[test]
fn test_line_clear_is_forwarded_before_the_render() {
    let mut board = Board::new(10, 20);
    for x in (0..10).filter(|x| !(4..=5).contains(x)) {
        board.set_cell(x, 19, PieceKind::J.color());
    }
    let mut state = GameState::with_board(board, 42);
    state.spawn_kind(PieceKind::O);

    let clock = ManualScheduler::new();
    let mut s = GameSession::with_state(GameConfig::default(), state, clock.clone(), Recorder::default());
    assert_eq!(s.phase(), LoopPhase::Running);
    assert_eq!(s.adapter().renders, 1);

    // 18 ticks bring the O down to the floor, the 19th locks it.
    assert_eq!(run_ticks(&mut s, &clock, INTERVAL * 19), 19);

    assert_eq!(s.adapter().cleared, vec![19]);
    assert_eq!(s.adapter().renders_at_clear, vec![19]);
    assert_eq!(s.adapter().renders, 20);
    assert_eq!(s.state().board().occupied_count(), 2);
    assert!(s.state().board().row(0).iter().all(|c| c.is_none()));
}

#[test]
fn test_reset_from_pause_restarts_running() {
    let (mut s, clock) = started();
    s.instant_lock_step();
    s.pause();

    assert!(s.apply_action(GameAction::Reset));
    assert_eq!(s.phase(), LoopPhase::Running);
    assert_eq!(s.state().board().occupied_count(), 0);
    assert!(clock.is_scheduled());
    assert_eq!(run_ticks(&mut s, &clock, INTERVAL), 1);
}

#[test]
fn test_dispatch_routes_commands() {
    let (mut s, clock) = started();
    let y0 = active_y(&s);

    assert!(s.dispatch(Command::Action(GameAction::SoftDrop)));
    assert_eq!(active_y(&s), y0 + 1);

    for t in clock.advance(INTERVAL) {
        assert!(s.dispatch(Command::Tick(t)));
    }
    assert_eq!(active_y(&s), y0 + 2);

    assert!(s.dispatch(GameAction::Pause.into()));
    assert_eq!(s.phase(), LoopPhase::Paused);

    assert!(!s.dispatch(Command::Quit));
    assert_eq!(s.phase(), LoopPhase::Stopped);
    assert_eq!(s.adapter().phases.last(), Some(&LoopPhase::Stopped));
}

#[tokio::test(start_paused = true)]
async fn test_tokio_ticks_flow_through_the_queue() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut s = GameSession::new(
        GameConfig::default(),
        42,
        TokioScheduler::current(tx),
        Recorder::default(),
    );
    s.start();
    let y0 = s.state().active().unwrap().y;

    for _ in 0..2 {
        let command = rx.recv().await.unwrap();
        assert!(matches!(command, Command::Tick(_)));
        assert!(s.dispatch(command));
    }
    assert_eq!(s.state().active().unwrap().y, y0 + 2);

    s.pause();
    let waited = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
    assert!(waited.is_err(), "no ticks while paused");
    assert!(!s.scheduler().is_scheduled());
}
