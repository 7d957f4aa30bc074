use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind, MouseEvent};

use crate::error::{MoodlineError, Result};

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Mouse press, drag, release and wheel
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Periodic tick for timers and animation
    Tick,
}

/// Event handler with background thread
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
    #[allow(dead_code)]
    handler: thread::JoinHandle<()>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate in milliseconds
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate.max(1));
        let (sender, receiver) = mpsc::channel();

        let handler = thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                let forwarded = match event::read() {
                    // Windows reports releases too
                    Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(Event::Key(key))
                    }
                    Ok(event::Event::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                    Ok(event::Event::Resize(width, height)) => Some(Event::Resize(width, height)),
                    _ => None,
                };
                if let Some(ev) = forwarded {
                    if sender.send(ev).is_err() {
                        break;
                    }
                }
            } else if sender.send(Event::Tick).is_err() {
                break;
            }
        });

        Self { receiver, handler }
    }

    /// Get the next event, or a tick once `timeout` passes without one
    pub fn next(&self, timeout: Duration) -> Result<Event> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Ok(event),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(Event::Tick),
            Err(e) => Err(MoodlineError::Tui(e.to_string())),
        }
    }
}
