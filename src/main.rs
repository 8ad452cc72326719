//! Terminal puyo runner (default binary).
//!
//! Solo or versus, with any mix of human and AI boards. Uses crossterm for
//! input and the framebuffer renderer from `tui_puyo::term`.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use arrayvec::ArrayVec;
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_puyo::core::{SessionConfig, SessionEvent};
use tui_puyo::engine::{Arena, Mode, PlannerConfig};
use tui_puyo::input::{handle_key_event, should_quit};
use tui_puyo::term::{chain_callout, FrameBuffer, GameView, Panel, TerminalRenderer, Viewport};
use tui_puyo::types::{GameAction, OJAMA_BASE, POP_EFFECT_MS, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Solo,
    Versus,
}

/// Which boards the AI plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AiArg {
    None,
    /// The second board (versus) or nothing (solo)
    P2,
    Both,
}

#[derive(Parser, Debug)]
#[command(name = "tui-puyo", version, about)]
struct Cli {
    /// RNG seed. Player 2 uses seed + 1. Defaults to the current time.
    #[arg(long, env = "TUI_PUYO_SEED")]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = ModeArg::Versus, env = "TUI_PUYO_MODE")]
    mode: ModeArg,

    #[arg(long, value_enum, default_value_t = AiArg::P2, env = "TUI_PUYO_AI")]
    ai: AiArg,

    /// Number of puyo colors in play (2-6)
    #[arg(long, default_value_t = 4, env = "TUI_PUYO_COLORS")]
    colors: usize,

    /// Attack score per garbage cell
    #[arg(long, default_value_t = OJAMA_BASE, env = "TUI_PUYO_OJAMA_BASE")]
    ojama_base: u32,

    /// Write tracing output here (stdout belongs to the UI)
    #[arg(long, env = "TUI_PUYO_LOG", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let mut arena = build_arena(&cli)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut arena);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_arena(cli: &Cli) -> Result<Arena> {
    let config = SessionConfig {
        ojama_base: cli.ojama_base,
        ..SessionConfig::with_colors(cli.colors)
    };
    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    let ai = |on: bool| on.then(PlannerConfig::default);

    let arena = match cli.mode {
        ModeArg::Solo => Arena::solo(config, seed, ai(cli.ai == AiArg::Both)),
        ModeArg::Versus => Arena::versus(
            config,
            seed,
            [ai(cli.ai == AiArg::Both), ai(cli.ai != AiArg::None)],
        ),
    }
    .context("invalid session configuration")?;

    info!(seed, mode = ?cli.mode, ai = ?cli.ai, colors = cli.colors, "starting");
    Ok(arena)
}

/// Latest callout per board and how long it stays up
#[derive(Default, Clone, Copy)]
struct Callout {
    text: Option<&'static str>,
    remaining_ms: u32,
}

fn run(term: &mut TerminalRenderer, arena: &mut Arena) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut callouts = [Callout::default(); 2];

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let (mode, winner) = (arena.mode(), arena.winner());
        let panels: ArrayVec<Panel<'_>, 2> = arena
            .players()
            .iter()
            .enumerate()
            .map(|(i, p)| Panel {
                session: &p.session,
                title: title(mode, winner == Some(i), i, p.is_ai()),
                callout: callouts[i].text,
            })
            .collect();
        view.render_into(&panels, Viewport::new(w, h), &mut fb);
        drop(panels);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    // The human plays board 0; the arena ignores it when the AI owns it.
                    if let Some(action) = handle_key_event(key) {
                        if action == GameAction::Restart {
                            callouts = [Callout::default(); 2];
                        }
                        arena.handle_input(0, action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            arena.update(TICK_MS);

            for c in &mut callouts {
                c.remaining_ms = c.remaining_ms.saturating_sub(TICK_MS);
                if c.remaining_ms == 0 {
                    c.text = None;
                }
            }
            for (i, event) in arena.take_events() {
                if let SessionEvent::Chain { chain, .. } = event {
                    if let (Some(text), Some(slot)) = (chain_callout(chain), callouts.get_mut(i)) {
                        *slot = Callout {
                            text: Some(text),
                            remaining_ms: POP_EFFECT_MS,
                        };
                    }
                }
            }
        }
    }
}

fn title(mode: Mode, won: bool, index: usize, is_ai: bool) -> &'static str {
    match (mode, index, is_ai, won) {
        (Mode::Solo, ..) => "PUYO",
        (_, _, _, true) => "WINNER",
        (_, 0, false, _) => "P1",
        (_, _, false, _) => "P2",
        (_, 0, true, _) => "CPU 1",
        _ => "CPU 2",
    }
}
