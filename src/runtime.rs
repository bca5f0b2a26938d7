use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Upper bound on how long the loop sleeps between wake-ups
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Unified event type consumed by the app loop
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// Nothing arrived before the wait expired
    Poll,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source reading crossterm events on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                // Windows reports releases too
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    tracing::error!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-backed event source for tests
pub struct ChannelEventSource {
    rx: Receiver<AppEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the application one event at a time
pub struct Runner<E: EventSource> {
    event_source: E,
    poll_interval: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, poll_interval: Duration) -> Self {
        Self {
            event_source,
            poll_interval,
        }
    }

    /// Wait for the next event, no longer than the poll interval or
    /// `next_due`, whichever is shorter. Yields `Poll` on timeout.
    pub fn step(&self, next_due: Option<Duration>) -> AppEvent {
        let timeout = next_due
            .map(|due| due.min(self.poll_interval))
            .unwrap_or(self.poll_interval);

        match self.event_source.recv_timeout(timeout) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Poll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn step_returns_poll_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(ChannelEventSource::new(rx), Duration::from_millis(1));

        match runner.step(None) {
            AppEvent::Poll => {}
            other => panic!("expected Poll on timeout, got {other:?}"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        let runner = Runner::new(ChannelEventSource::new(rx), Duration::from_millis(10));

        match runner.step(None) {
            AppEvent::Resize => {}
            other => panic!("expected Resize event, got {other:?}"),
        }
    }

    #[test]
    fn step_waits_no_longer_than_next_due() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(ChannelEventSource::new(rx), Duration::from_secs(5));

        let started = Instant::now();
        runner.step(Some(Duration::from_millis(5)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn step_on_disconnected_source_polls() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        drop(tx);
        let runner = Runner::new(ChannelEventSource::new(rx), Duration::from_millis(10));

        assert!(matches!(runner.step(None), AppEvent::Poll));
    }
}
