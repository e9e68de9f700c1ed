//! Terminal runner (default binary).
//!
//! Polls crossterm input until the next 16ms frame, feeds commands to the
//! core, advances the frame clock, turns signals into cues and draws the
//! snapshot through the diffing framebuffer renderer.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use blockfall::config::Args;
use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, is_theme_key, should_quit};
use blockfall::term::{FrameBuffer, GameView, Preferences, TerminalRenderer, Viewport};
use blockfall::types::{Signal, TICK_MS};

const DEFAULT_LOG_FILTER: &str = "blockfall=info,blockfall_core=info,blockfall_term=info";

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let prefs_path = args.prefs_path();
    let mut prefs = prefs_path
        .as_deref()
        .map(Preferences::load_or_default)
        .unwrap_or_default();
    if let Some(theme) = args.theme {
        prefs.set_theme(theme);
    }

    let seed = args.seed_or_clock();
    info!(seed, theme = prefs.theme().name(), "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &args, seed, &mut prefs, prefs_path.as_deref());

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "runner failed");
    }
    result
}

/// Log to a file when asked; the terminal itself is busy in raw mode.
/// Without a file no subscriber is installed and events are dropped.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    args: &Args,
    seed: u32,
    prefs: &mut Preferences,
    prefs_path: Option<&Path>,
) -> Result<()> {
    let mut game = GameState::new(seed);
    if args.paused {
        game.toggle_pause();
    }

    let mut view = GameView::default().with_theme(prefs.theme());
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let clock = Instant::now();
    let frame = Duration::from_millis(TICK_MS as u64);
    let mut next_frame = Instant::now();

    loop {
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(score = game.score(), "quit");
                        return Ok(());
                    }
                    if is_theme_key(key) {
                        cycle_theme(&mut view, prefs, prefs_path);
                    } else if let Some(command) = handle_key_event(key) {
                        let applied = game.apply(command);
                        debug!(command = command.as_str(), applied, "command");
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
            if Instant::now() < next_frame {
                continue;
            }
        }

        let now = Instant::now();
        next_frame += frame;
        if next_frame < now {
            next_frame = now + frame;
        }

        let now_ms = u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX);
        game.advance_to(now_ms);

        let mut bell = false;
        for signal in game.drain_signals() {
            debug!(cue = signal.as_str(), "signal");
            bell |= matches!(signal, Signal::Clear { .. });
        }
        if bell {
            term.bell()?;
        }

        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}

fn cycle_theme(view: &mut GameView, prefs: &mut Preferences, path: Option<&Path>) {
    let theme = view.theme().next();
    view.set_theme(theme);
    prefs.set_theme(theme);
    info!(theme = theme.name(), "theme changed");

    if let Some(path) = path {
        if let Err(e) = prefs.save(path) {
            warn!(error = %format!("{e:#}"), "could not save preferences");
        }
    }
}
