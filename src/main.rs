//! Blockfall runner.
//!
//! Terminal mode draws with crossterm on a custom framebuffer; headless mode
//! streams frames as JSON lines on stdout and reads action names from stdin,
//! one per line. Both feed one command queue that the session drains on this
//! thread.

use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tui_blockfall::engine::{
    Command, GameConfig, GameSession, JsonLinesAdapter, LoopPhase, TickScheduler, TokioScheduler,
};
use tui_blockfall::input::{allowed_while_paused, handle_key_event, should_quit};
use tui_blockfall::term::{BoardView, TermAdapter, TerminalRenderer, Viewport};
use tui_blockfall::types::GameAction;

const ENV_LOG_FILE: &str = "BLOCKFALL_LOG";
const FRAME_INTERVAL: Duration = Duration::from_millis(50);
const INPUT_POLL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "tui-blockfall", version, about = "Falling-block puzzle in the terminal")]
struct Cli {
    /// JSON config file (overrides BLOCKFALL_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    cols: Option<u8>,
    #[arg(long)]
    rows: Option<u8>,
    /// Gravity interval in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Piece sequence seed; time-based when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Stream frames as JSON lines instead of drawing
    #[arg(long)]
    headless: bool,
    /// Ticks to run in headless mode (0 runs forever)
    #[arg(long, default_value_t = 100)]
    max_ticks: u64,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = GameConfig::resolve(self.config.as_deref())
            .context("failed to load configuration")?;
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval_ms = ms;
        }
        config.validate().context("invalid command-line options")
    }
}

/// Events from the blocking input thread.
enum TermInput {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Reading the terminal failed; the thread exits after sending this.
    Failed(io::Error),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.headless)?;

    let config = cli.game_config()?;
    let seed = cli.seed.unwrap_or_else(time_seed);
    info!(
        cols = config.cols,
        rows = config.rows,
        tick_ms = config.tick_interval_ms,
        seed,
        headless = cli.headless,
        "starting"
    );

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    if cli.headless {
        rt.block_on(run_headless(config, seed, cli.max_ticks))
    } else {
        let mut renderer = TerminalRenderer::new();
        renderer.enter()?;
        let result = rt.block_on(run_terminal(config, seed));
        // Always try to restore terminal state.
        let _ = renderer.exit();
        result
    }
}

fn init_logging(headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    // Stdout is the game screen; only log when a file is named.
    let Some(path) = std::env::var_os(ENV_LOG_FILE) else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.to_string_lossy()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

async fn run_headless(config: GameConfig, seed: u64, max_ticks: u64) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_stdin_thread(tx.clone());
    let scheduler = TokioScheduler::current(tx);
    let adapter = JsonLinesAdapter::new(std::io::stdout());
    let mut session = GameSession::new(config, seed, scheduler, adapter);
    session.start();

    let mut ticks = 0u64;
    while let Some(command) = rx.recv().await {
        if let Command::Action(action) = command {
            if session.phase() == LoopPhase::Paused && !allowed_while_paused(action) {
                debug!(action = action.as_str(), "ignored while paused");
                continue;
            }
        }
        let is_tick = matches!(command, Command::Tick(_));
        if !session.dispatch(command) {
            break;
        }
        if is_tick {
            ticks += 1;
            if max_ticks != 0 && ticks >= max_ticks {
                session.dispatch(Command::Quit);
                break;
            }
        }
    }

    info!(ticks, frames = session.adapter().frames(), "headless run finished");
    Ok(())
}

async fn run_terminal(config: GameConfig, seed: u64) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    spawn_input_thread(input_tx);

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let adapter = TermAdapter::new(TerminalRenderer::new(), BoardView::default(), Viewport::new(w, h));
    let mut session = GameSession::new(config, seed, TokioScheduler::current(tx), adapter);
    session.start();

    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            Some(command) = rx.recv() => {
                session.dispatch(command);
            }
            input = input_rx.recv() => {
                if handle_input(&mut session, input)?.is_break() {
                    break;
                }
            }
            _ = frames.tick(), if session.adapter().is_animating() => {
                session.adapter_mut().animate();
            }
        }
    }

    Ok(())
}

/// Apply one event from the input thread. Breaks on quit; a dead or failed
/// input thread stops the session and becomes an error.
fn handle_input<S: TickScheduler, W: Write>(
    session: &mut GameSession<S, TermAdapter<W>>,
    input: Option<TermInput>,
) -> Result<ControlFlow<()>> {
    match input {
        None => {
            session.dispatch(Command::Quit);
            bail!("terminal input thread exited");
        }
        Some(TermInput::Failed(e)) => {
            session.dispatch(Command::Quit);
            return Err(anyhow::Error::new(e).context("failed to read terminal input"));
        }
        Some(TermInput::Key(key)) if should_quit(key) => {
            session.dispatch(Command::Quit);
            return Ok(ControlFlow::Break(()));
        }
        Some(TermInput::Key(key)) => {
            if let Some(action) = handle_key_event(key) {
                if session.phase() == LoopPhase::Paused && !allowed_while_paused(action) {
                    debug!(action = action.as_str(), "ignored while paused");
                } else {
                    session.dispatch(Command::Action(action));
                }
            }
        }
        Some(TermInput::Resize(w, h)) => session.adapter_mut().resize(Viewport::new(w, h)),
    }
    Ok(ControlFlow::Continue(()))
}

/// Parse one line of headless input. Blank lines and `#` comments yield
/// `Ok(None)`.
fn parse_action_line(line: &str) -> Result<Option<GameAction>> {
    let name = line.trim();
    if name.is_empty() || name.starts_with('#') {
        return Ok(None);
    }
    match GameAction::from_str(name) {
        Some(action) => Ok(Some(action)),
        None => bail!("unknown action {name:?}"),
    }
}

/// Queue actions read from stdin until EOF or the receiver is dropped.
fn spawn_stdin_thread(tx: mpsc::UnboundedSender<Command>) {
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "stdin read failed");
                    break;
                }
            };
            match parse_action_line(&line) {
                Ok(Some(action)) => {
                    if tx.send(Command::Action(action)).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "skipping input line"),
            }
        }
        debug!("stdin closed");
    });
}

/// Forward terminal events until the receiver is dropped.
fn spawn_input_thread(tx: mpsc::UnboundedSender<TermInput>) {
    std::thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    warn!(error = %e, "input poll failed");
                    let _ = tx.send(TermInput::Failed(e));
                    break;
                }
            }
            let input = match event::read() {
                // Terminal auto-repeat counts as another press.
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => TermInput::Key(key),
                Ok(Event::Resize(w, h)) => TermInput::Resize(w, h),
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "input read failed");
                    let _ = tx.send(TermInput::Failed(e));
                    break;
                }
            };
            if tx.send(input).is_err() {
                break;
            }
        }
    });
}
