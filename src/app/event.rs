//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// The terminal regained focus; a good moment to look for content changes.
    FocusGained,
    Tick,
}

impl AppEvent {
    /// Map a raw crossterm event.  Key releases/repeats and events the pager
    /// has no use for are dropped.
    pub fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(k) if k.kind == KeyEventKind::Press => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            CtEvent::FocusGained => Some(AppEvent::FocusGained),
            _ => None,
        }
    }
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            // Poll with the tick rate so Tick events keep flowing while idle;
            // the content watcher runs off them.
            let has_event = event::poll(tick_rate).unwrap_or(false);
            let app_event = if has_event {
                match event::read().ok().and_then(AppEvent::from_crossterm) {
                    Some(ev) => ev,
                    None => continue,
                }
            } else {
                AppEvent::Tick
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn key_releases_are_dropped() {
        let mut release = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(AppEvent::from_crossterm(CtEvent::Key(release)).is_none());

        let press = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert!(matches!(
            AppEvent::from_crossterm(CtEvent::Key(press)),
            Some(AppEvent::Key(_))
        ));
    }

    #[test]
    fn resize_and_focus_pass_through() {
        assert!(matches!(
            AppEvent::from_crossterm(CtEvent::Resize(80, 24)),
            Some(AppEvent::Resize(80, 24))
        ));
        assert!(matches!(
            AppEvent::from_crossterm(CtEvent::FocusGained),
            Some(AppEvent::FocusGained)
        ));
        assert!(AppEvent::from_crossterm(CtEvent::FocusLost).is_none());
    }
}
