//! Terminal game runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer for output. Gravity
//! is driven by frame time through a `GravityClock`; results are reported to
//! the score server at game over.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use blockfall::config::GameConfig;
use blockfall::core::GameState;
use blockfall::engine::{GravityClock, Outcome, Session};
use blockfall::input::{map_key, should_quit};
use blockfall::logging;
use blockfall::scores::{HighScore, ScoreReporter, Submission};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    logging::init_file(config.log_level, &config.log_file)?;
    info!("starting (seed {}, player {})", config.seed, config.player);

    let mut reporter = match &config.scores_addr {
        Some(addr) => match ScoreReporter::start(addr.clone()) {
            Ok(reporter) => {
                reporter.refresh();
                Some(reporter)
            }
            Err(e) => {
                warn!("score reporting unavailable: {:#}", e);
                None
            }
        },
        None => {
            info!("score reporting disabled");
            None
        }
    };

    install_panic_hook();
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut reporter);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        warn!("exiting with error: {:#}", e);
    }
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: &GameConfig,
    reporter: &mut Option<ScoreReporter>,
) -> Result<()> {
    let session = Session::new(GameState::new(config.seed));
    let mut clock = GravityClock::new();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut high_scores: Vec<HighScore> = Vec::new();

    let frame = Duration::from_millis(u64::from(TICK_MS));
    let mut last_frame = Instant::now();

    loop {
        if let Some(scores) = reporter.as_mut().and_then(ScoreReporter::try_recv_scores) {
            high_scores = scores;
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let snap = session.current().snapshot();
        view.render_into(&snap, &high_scores, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if let Some(action) = map_key(key) {
                        let outcome = session.apply(action);
                        on_outcome(&outcome, config, reporter.as_ref());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            let outcome = session.advance(&mut clock, elapsed_ms);
            on_outcome(&outcome, config, reporter.as_ref());
        }
    }
}

fn on_outcome(outcome: &Outcome, config: &GameConfig, reporter: Option<&ScoreReporter>) {
    if !outcome.game_over_entered {
        return;
    }

    let state = &outcome.state;
    info!(
        "game over: score {}, level {}, lines {}",
        state.score(),
        state.level(),
        state.lines()
    );

    let Some(reporter) = reporter else {
        return;
    };
    match Submission::new(&config.player, state.score(), state.level(), state.lines()) {
        Ok(submission) => reporter.submit(submission),
        Err(e) => warn!("not submitting score: {}", e),
    }
}

/// Restore the terminal before the default hook prints the panic.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        default_hook(info);
    }));
}
