use crate::error::AppResult;
use crate::state::{State, View};
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if tx_clone.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!("Failed to read terminal event: {}", e);
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> AppResult<bool> {
        match self.rx.recv() {
            Ok(Event::Input(key)) => Ok(handle_key(state, key)),
            Ok(Event::Tick) => {
                state.advance_spinner_index();
                Ok(true)
            }
            Err(e) => {
                error!("Terminal event channel closed: {}", e);
                Ok(false)
            }
        }
    }
}

/// Apply a single key press to state. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return true;
    }
    match key {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
        KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            let toggled = match *state.current_view() {
                View::Login => state.toggle_to_register(),
                _ => state.toggle_to_login(),
            };
            if let Err(e) = toggled {
                debug!("Ignoring view toggle: {}", e);
            }
        }
        KeyEvent {
            code: KeyCode::Char('l'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            if state.is_authenticated() {
                state.logout();
            }
        }
        KeyEvent {
            code: KeyCode::Tab, ..
        } => state.next_field(),
        KeyEvent {
            code: KeyCode::BackTab,
            ..
        } => state.previous_field(),
        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => state.submit(),
        KeyEvent {
            code: KeyCode::Backspace,
            ..
        } => state.backspace(),
        _ if !state.focused_field().is_text() => handle_list_key(state, key),
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            ..
        } => {
            state.input_char(c);
        }
        _ => {}
    }
    true
}

fn handle_list_key(state: &mut State, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.next_item(),
        KeyCode::Char('k') | KeyCode::Up => state.previous_item(),
        KeyCode::Char('d') | KeyCode::Delete => state.delete_selected(),
        KeyCode::Char('r') => state.refresh_items(),
        _ => {}
    }
}
