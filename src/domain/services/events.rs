#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

/// Redraw cadence while nothing else happens, drives the loading animation.
const TICK_RATE: Duration = Duration::from_millis(500);

/// Maps a pressed key to a UI event. Anything that isn't a hotkey is text for
/// the input box, which includes Shift+Enter and Alt+Enter newlines.
fn from_key(input: Input) -> Event {
    match input {
        Input {
            key: Key::Char('c'),
            ctrl: true,
            ..
        } => return Event::KeyboardCTRLC(),
        Input {
            key: Key::Char('d'),
            ctrl: true,
            ..
        }
        | Input {
            key: Key::PageDown,
            ..
        } => return Event::UIScrollPageDown(),
        Input {
            key: Key::Char('u'),
            ctrl: true,
            ..
        }
        | Input { key: Key::PageUp, .. } => return Event::UIScrollPageUp(),
        Input {
            key: Key::Down | Key::MouseScrollDown,
            ..
        } => return Event::UIScrollDown(),
        Input {
            key: Key::Up | Key::MouseScrollUp,
            ..
        } => return Event::UIScrollUp(),
        Input {
            key: Key::Enter,
            shift: false,
            alt: false,
            ..
        } => return Event::KeyboardEnter(),
        input => return Event::KeyboardCharInput(input),
    }
}

/// Translates a terminal event, `None` for the ones the UI ignores. Key
/// releases and repeats are dropped so Windows terminals don't double type.
pub fn from_terminal(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Paste(text) => return Some(Event::KeyboardPaste(text)),
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
            MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
            _ => return None,
        },
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
            return Some(from_key(key.into()));
        }
        _ => return None,
    }
}

/// Single event source for the UI loop. Service replies, terminal input and
/// the tick are raced, whichever is ready first wins.
pub struct EventsService {
    terminal: EventStream,
    service: mpsc::UnboundedReceiver<Event>,
    tick: time::Interval,
}

impl EventsService {
    pub fn new(service: mpsc::UnboundedReceiver<Event>) -> EventsService {
        let mut tick = time::interval(TICK_RATE);
        tick.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        return EventsService {
            terminal: EventStream::new(),
            service,
            tick,
        };
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.service.recv() => event,
                event = self.terminal.next() => match event {
                    Some(Ok(event)) => from_terminal(event),
                    Some(Err(err)) => {
                        tracing::warn!(error = ?err, "terminal event stream failed");
                        None
                    }
                    None => None,
                },
                _ = self.tick.tick() => Some(Event::UITick()),
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
