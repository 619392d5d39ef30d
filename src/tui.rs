//! Terminal wrapper.
//!
//! [`Tui`] owns the ratatui terminal, switches the terminal in and out of raw
//! mode, and runs a reader task that turns crossterm input, timers and
//! SIGTERM into [`Event`]s.

use std::io::Stdout;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::cursor;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use futures::{FutureExt, StreamExt};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

const GRACEFUL_SHUTDOWN_TIMEOUT_MS: u64 = 500;
const FORCEFUL_SHUTDOWN_TIMEOUT_MS: u64 = 2000;

pub type Backend = CrosstermBackend<Stdout>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Quit,
    Error(String),
    Tick,
    Render,
    Paste(String),
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

pub struct Tui {
    terminal: Terminal<Backend>,
    task: JoinHandle<()>,
    cancellation_token: CancellationToken,
    event_rx: UnboundedReceiver<Event>,
    event_tx: UnboundedSender<Event>,
    frame_rate: f64,
    tick_rate: f64,
}

impl Tui {
    /// `frame_rate` and `tick_rate` are per second.
    pub fn new(frame_rate: f64, tick_rate: f64) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal: Terminal::new(Backend::new(std::io::stdout()))?,
            task: tokio::spawn(async {}),
            cancellation_token: CancellationToken::new(),
            event_rx,
            event_tx,
            frame_rate,
            tick_rate,
        })
    }

    /// Raw mode, alternate screen, mouse capture and bracketed paste.
    pub fn enter(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        self.start();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stop()?;
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.flush()?;
            crossterm::execute!(
                std::io::stdout(),
                DisableBracketedPaste,
                DisableMouseCapture,
                LeaveAlternateScreen,
                cursor::Show
            )?;
            crossterm::terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    /// Restore the terminal and stop the process until it is resumed.
    pub fn suspend(&mut self) -> Result<()> {
        self.exit()?;
        #[cfg(not(windows))]
        signal_hook::low_level::raise(signal_hook::consts::SIGTSTP)?;
        Ok(())
    }

    pub async fn next_event(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }

    fn start(&mut self) {
        self.cancellation_token.cancel();
        self.cancellation_token = CancellationToken::new();
        self.task = tokio::spawn(read_events(
            self.event_tx.clone(),
            self.cancellation_token.clone(),
            self.tick_rate,
            self.frame_rate,
        ));
    }

    fn stop(&mut self) -> Result<()> {
        self.cancellation_token.cancel();
        let mut waited_ms = 0;
        while !self.task.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
            waited_ms += 1;
            if waited_ms >= GRACEFUL_SHUTDOWN_TIMEOUT_MS {
                self.task.abort();
            }
            if waited_ms >= FORCEFUL_SHUTDOWN_TIMEOUT_MS {
                return Err(eyre!("terminal event reader did not stop"));
            }
        }
        Ok(())
    }
}

/// Ctrl+C always quits, even while a dialog is showing.
fn translate_key(key: KeyEvent) -> Option<Event> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Event::Quit);
    }
    Some(Event::Key(key))
}

fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) => translate_key(key),
        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
        CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => None,
    }
}

#[cfg(unix)]
fn forward_sigterm(event_tx: UnboundedSender<Event>) {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::spawn(async move {
                sigterm.recv().await;
                debug!("SIGTERM received");
                let _ = event_tx.send(Event::Quit);
            });
        }
        Err(error) => warn!(%error, "Could not install SIGTERM handler"),
    }
}

async fn read_events(
    event_tx: UnboundedSender<Event>,
    cancellation_token: CancellationToken,
    tick_rate: f64,
    frame_rate: f64,
) {
    let mut event_stream = EventStream::new();
    let mut tick_interval = interval(Duration::from_secs_f64(1.0 / tick_rate));
    let mut frame_interval = interval(Duration::from_secs_f64(1.0 / frame_rate));

    #[cfg(unix)]
    forward_sigterm(event_tx.clone());

    loop {
        let event = tokio::select! {
            () = cancellation_token.cancelled() => break,
            _ = tick_interval.tick() => Event::Tick,
            _ = frame_interval.tick() => Event::Render,
            crossterm_event = event_stream.next().fuse() => match crossterm_event {
                Some(Ok(event)) => match translate(event) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(error)) => Event::Error(error.to_string()),
                None => break,
            },
        };
        if event_tx.send(event).is_err() {
            break;
        }
    }
    cancellation_token.cancel();
}

impl Deref for Tui {
    type Target = Terminal<Backend>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(error) = self.exit() {
            error!(%error, "Failed to restore terminal");
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(key), Some(Event::Quit));
    }

    #[test]
    fn test_only_key_presses_are_forwarded() {
        let release = KeyEvent {
            code: KeyCode::Tab,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(translate_key(release), None);

        let press = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(translate_key(press), Some(Event::Key(press)));
    }

    #[test]
    fn test_paste_and_resize() {
        assert_eq!(
            translate(CrosstermEvent::Paste("abc".into())),
            Some(Event::Paste("abc".into()))
        );
        assert_eq!(
            translate(CrosstermEvent::Resize(80, 24)),
            Some(Event::Resize(80, 24))
        );
        assert_eq!(translate(CrosstermEvent::FocusLost), None);
    }
}
