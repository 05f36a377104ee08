use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Size};
use tracing::debug;

use crate::app::App;
use crate::ui;

/// Input polling interval; roughly one frame at 60 Hz.
const FRAME: Duration = Duration::from_millis(16);

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Main terminal event loop: advances the animations, draws, and handles
/// input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let now = Instant::now();
        app.tick(now, Utc::now());
        terminal.draw(|f| ui::draw(f, app, now))?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, app, state, Instant::now()) {
                        break;
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                    app.resize(Size::new(width, height));
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when the app should exit; the
/// audio fade-out has been started by then.
pub fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    state: &mut EventLoopState,
    now: Instant,
) -> bool {
    let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code == KeyCode::Char('q') || ctrl_c {
        state.pending_gg = false;
        app.quit();
        return true;
    }

    if !app.is_revealed() {
        // Any key continues; the loader ignores it until it is ready.
        state.pending_gg = false;
        app.continue_intro(now);
        return false;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.page.scroll_to(0);
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            let bottom = app.page.max_offset();
            app.page.scroll_to(bottom);
        }
        KeyCode::Char('j') | KeyCode::Down => app.page.scroll_by(1),
        KeyCode::Char('k') | KeyCode::Up => app.page.scroll_by(-1),
        KeyCode::Char(' ') | KeyCode::PageDown => app.page.next_section(),
        KeyCode::PageUp => app.page.prev_section(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.select_track(index, now);
        }
        KeyCode::Char('h') => app.prev_track(now),
        KeyCode::Char('l') => app.next_track(now),
        KeyCode::Char('p') => app.toggle_play(now),
        KeyCode::Char('y') | KeyCode::Enter => app.say_yes(now),
        KeyCode::Char('n') | KeyCode::Tab | KeyCode::Left | KeyCode::Right => app.dodge_no(),
        _ => {}
    }

    false
}
