// Keyboard control: space pauses, up/down arrows adjust omega, q quits

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::messages::ControlEvent;

/// Omega change per arrow key press (rad/s)
pub const OMEGA_STEP: f32 = 0.1;

/// Drain pending key presses without blocking, newest last. Called once per
/// tick by the runtime; requires the terminal to be in raw mode.
pub fn poll_events() -> io::Result<Vec<ControlEvent>> {
    let mut events = Vec::new();

    while event::poll(Duration::ZERO)? {
        if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
            let pressed = kind == KeyEventKind::Press || kind == KeyEventKind::Repeat;
            if !pressed {
                continue;
            }

            match code {
                KeyCode::Char(' ') => events.push(ControlEvent::TogglePause),
                KeyCode::Up => events.push(ControlEvent::AdjustOmega(OMEGA_STEP)),
                KeyCode::Down => events.push(ControlEvent::AdjustOmega(-OMEGA_STEP)),
                KeyCode::Char('q') | KeyCode::Esc => events.push(ControlEvent::Quit),
                _ => {}
            }
        }
    }

    Ok(events)
}
