//! Terminal runner (default binary).
//!
//! This is the clock, keyboard and display around the engine. It fires one
//! gravity step per interval while the game is running and restarts the
//! interval whenever the pause state flips or a new game starts.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use blockfall::core::{Game, GameSnapshot, GameStatus};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{Intent, DEFAULT_TICK_MS, FAST_TICK_MS};

#[derive(Debug, Parser)]
#[command(name = "blockfall", about = "Falling-block puzzle in the terminal")]
struct Cli {
    #[arg(
        long,
        env = "BLOCKFALL_TICK_MS",
        default_value_t = DEFAULT_TICK_MS,
        help = "Gravity interval in milliseconds"
    )]
    tick_ms: u64,

    #[arg(long, help = "Use the faster 480ms clock (overrides --tick-ms)")]
    fast: bool,

    #[arg(long, env = "BLOCKFALL_SEED", help = "Seed for a reproducible piece sequence")]
    seed: Option<u64>,

    #[arg(
        long,
        env = "BLOCKFALL_LOG_FILE",
        help = "Write logs to this file (the terminal is reserved for the game)"
    )]
    log_file: Option<PathBuf>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v = DEBUG, -vv = TRACE)")]
    verbose: u8,
}

impl Cli {
    fn tick_interval(&self) -> Duration {
        let ms = if self.fast { FAST_TICK_MS } else { self.tick_ms };
        Duration::from_millis(ms.max(1))
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let level = cli.log_level();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
    info!(%level, "logging initialized");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut game = match cli.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };
    info!(tick_ms = cli.tick_interval().as_millis() as u64, "starting game");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, cli.tick_interval());

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(score = game.total_score(), "exiting");
    result
}

fn run(term: &mut TerminalRenderer, game: &mut Game, tick: Duration) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let mut last_tick = Instant::now();
    let mut was_paused = game.is_paused();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(intent) = handle_key_event(key) {
                        game.apply(intent);
                        if intent == Intent::Restart {
                            last_tick = Instant::now();
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if game.is_paused() != was_paused {
            was_paused = game.is_paused();
            last_tick = Instant::now();
        }

        // Tick.
        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            if game.status() == GameStatus::Playing {
                game.tick();
            }
        }
    }
}
