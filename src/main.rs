//! Terminal runner (default binary).
//!
//! Polls crossterm events, decodes each into at most one action, feeds the
//! game with seconds elapsed since startup, and redraws through the
//! framebuffer renderer whenever the game reports a change.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use log::{debug, info};

use tetrimino::config::Args;
use tetrimino::core::Game;
use tetrimino::fall_fast::ReleaseEmulator;
use tetrimino::input::decode_event;
use tetrimino::logging;
use tetrimino::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetrimino::types::{Action, Edge, GamePhase};

/// Upper bound on how long one loop iteration waits for input.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let config = args.game_config()?;
    let seed = args.seed();
    info!("seed {}", seed);
    let mut game = Game::new(config, seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let restored = term.exit();
    result.and(restored)
}

fn run(term: &mut TerminalRenderer, game: &mut Game) -> Result<()> {
    let clock = Instant::now();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snapshot = game.snapshot();

    let mut emulator = (!term.reports_key_release()).then(ReleaseEmulator::new);
    let mut redraw = true;

    while game.phase() != GamePhase::Exiting {
        if event::poll(POLL_INTERVAL).context("poll terminal events")? {
            match event::read().context("read terminal event")? {
                Event::Key(key) => {
                    let now = clock.elapsed().as_secs_f64();
                    if let Some(action) = decode_event(game.phase(), key) {
                        let forward = match (&mut emulator, action) {
                            (Some(e), Action::FallFast(Edge::Press)) => e.press(now),
                            _ => true,
                        };
                        if forward {
                            game.apply(action, now);
                        }
                    }
                }
                Event::Resize(w, h) => {
                    debug!("resize {}x{}", w, h);
                    term.invalidate();
                    redraw = true;
                }
                _ => {}
            }
        }

        let now = clock.elapsed().as_secs_f64();
        if let Some(e) = emulator.as_mut() {
            if game.phase() != GamePhase::Playing {
                e.reset();
            } else if e.release_due(now) {
                game.apply(Action::FallFast(Edge::Release), now);
            }
        }

        game.update(now);

        if game.is_modified() || redraw {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            game.snapshot_into(&mut snapshot);
            view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            game.clear_modified();
            redraw = false;
        }
    }

    info!(
        "exit: score {}, lines {}, level {}",
        game.score(),
        game.lines(),
        game.level()
    );
    Ok(())
}
