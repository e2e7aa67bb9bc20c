//! BLOCKFALL - a falling-block puzzle for the terminal
//!
//! The engine is a pure reducer; this binary is the driver that owns the
//! terminal, the keymap, and the single drop timer.

mod bag;
mod board;
mod game;
mod input;
mod piece;
mod score;
mod settings;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::{reduce, Action, GameState};
use input::{Command, InputMap};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Poll interval while no drop timer is armed (paused or game over)
const IDLE_POLL: Duration = Duration::from_millis(50);

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    // Log to a per-session file under the system temp directory
    let log_dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file = format!("{:08x}.log", session_id);

    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blockfall=debug".parse().unwrap()),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "blockfall starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    // Write the settings file so there is a template to edit
    if let Err(e) = settings.save() {
        eprintln!("Warning: Could not save settings: {}", e);
    }

    if let Ok(state) = &result {
        println!("\nThanks for playing BLOCKFALL!");
        println!("Final Score: {}", state.score.points);
        println!("Level: {} | Lines: {}", state.score.level, state.score.lines);
    }

    result.map(|_| ())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> io::Result<GameState> {
    let input_map = InputMap::from_settings(settings);
    let mut state = GameState::new();
    // Deadline for the next gravity tick; None while paused or over
    let mut next_tick = schedule_tick(&state);

    loop {
        terminal.draw(|frame| ui::render_game(frame, &state, settings))?;

        let timeout = match next_tick {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => IDLE_POLL,
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match input_map.command_for(key, &state) {
                        Some(Command::Quit) => return Ok(state),
                        Some(Command::Dispatch(action)) => {
                            state = apply(&mut next_tick, state, action);
                        }
                        None => {}
                    }
                }
                _ => {}
            }
        }

        if let Some(deadline) = next_tick {
            if Instant::now() >= deadline {
                state = apply(&mut next_tick, state, Action::Tick);
            }
        }
    }
}

/// Dispatch one action and keep the drop timer in line with the snapshot.
///
/// The timer is re-armed whenever level, pause, or game-over changes, and
/// advanced after every tick, so a tick can never fire against a
/// superseded snapshot.
fn apply(next_tick: &mut Option<Instant>, state: GameState, action: Action) -> GameState {
    let next = reduce(&state, action);

    let timing_changed = next.score.level != state.score.level
        || next.paused != state.paused
        || next.game_over != state.game_over;
    if timing_changed || action == Action::Tick {
        *next_tick = schedule_tick(&next);
    }

    next
}

/// The deadline for the next gravity tick, if one should be armed
fn schedule_tick(state: &GameState) -> Option<Instant> {
    if state.paused || state.game_over {
        None
    } else {
        Some(Instant::now() + state.score.drop_interval())
    }
}
