use crate::render::Renderer;
use borderlands_core::{Clock, Display, Event, LineInput, Poll};
use std::io::{self, BufRead, Stdout};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::warn;

/// The real console: stdin lines arrive from a reader thread so the word race can
/// wait with a timeout, and events are rendered to stdout.
pub struct TerminalConsole {
    origin: Instant,
    lines: Receiver<String>,
    out: Stdout,
    renderer: Renderer,
}

impl TerminalConsole {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self {
            origin: Instant::now(),
            lines: rx,
            out: io::stdout(),
            renderer: Renderer::default(),
        }
    }

    pub fn print(&mut self, text: &str) {
        if let Err(err) = self.renderer.prompt(&mut self.out, &format!("{text}\n")) {
            warn!(%err, "stdout write failed");
        }
    }

    pub fn clear_screen(&mut self) {
        if let Err(err) = self.renderer.clear(&mut self.out) {
            warn!(%err, "clear screen failed");
        }
    }
}

impl Clock for TerminalConsole {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

impl LineInput for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        if let Err(err) = self.renderer.prompt(&mut self.out, prompt) {
            warn!(%err, "stdout write failed");
        }
        self.lines.recv().ok()
    }

    fn poll_line(&mut self, timeout: Duration) -> Poll {
        match self.lines.recv_timeout(timeout) {
            Ok(line) => Poll::Line(line),
            Err(RecvTimeoutError::Timeout) => Poll::Idle,
            Err(RecvTimeoutError::Disconnected) => Poll::Closed,
        }
    }
}

impl Display for TerminalConsole {
    fn emit(&mut self, event: Event) {
        if let Err(err) = self.renderer.event(&mut self.out, &event) {
            warn!(%err, "stdout write failed");
        }
    }
}
