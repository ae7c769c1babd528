//! Terminal skills game (default binary).
//!
//! Wires configuration, the skill catalog, the game loop runtime, crossterm
//! input and the framebuffer renderer together.

use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event};
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skills_tetris::core::{EngineConfig, GameState, SkillCatalog};
use skills_tetris::input::{handle_key_event, should_quit};
use skills_tetris::runtime::{GameRuntime, RuntimeConfig};
use skills_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use skills_tetris::types::TICK_MS;

fn main() -> Result<()> {
    init_logging()?;

    let catalog = load_catalog()?;
    let engine_config = EngineConfig::from_env().context("invalid engine configuration")?;
    let runtime_config = RuntimeConfig::from_env().context("invalid runtime configuration")?;
    info!(
        seed = engine_config.seed,
        skills = catalog.total_skills(),
        "starting skills game"
    );

    let state = GameState::new(catalog, engine_config)?;
    let runtime = GameRuntime::start(state, runtime_config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &runtime);

    // Always try to restore terminal state.
    let _ = term.exit();

    let final_state = runtime.shutdown()?;
    info!(
        score = final_state.score(),
        lines = final_state.lines(),
        discovered = final_state.discovery().len(),
        "session ended"
    );
    result
}

/// Log to the file named by `SKILLS_TETRIS_LOG_PATH`; stdout belongs to the UI.
fn init_logging() -> Result<()> {
    let Some(path) = env::var_os("SKILLS_TETRIS_LOG_PATH").filter(|p| !p.is_empty()) else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.to_string_lossy()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

/// Catalog from `SKILLS_TETRIS_CATALOG`, or the bundled one.
fn load_catalog() -> Result<SkillCatalog> {
    match env::var_os("SKILLS_TETRIS_CATALOG").filter(|p| !p.is_empty()) {
        Some(path) => SkillCatalog::from_path(&path)
            .with_context(|| format!("failed to load catalog {}", path.to_string_lossy())),
        None => SkillCatalog::builtin().context("bundled catalog is invalid"),
    }
}

fn run(term: &mut TerminalRenderer, runtime: &GameRuntime) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(u64::from(TICK_MS));

    loop {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        view.render_into(&runtime.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(frame)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(command) = handle_key_event(key) {
                    runtime.send(command)?;
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
