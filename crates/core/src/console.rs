//! Capabilities the engines need from the outside world.
//!
//! Engines never touch stdin, stdout or the system clock directly. The CLI supplies a
//! terminal-backed implementation and tests supply [`crate::ScriptedConsole`].

use crate::{EngineError, Event, InputError};
use std::time::Duration;

/// Result of a bounded wait for a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poll {
    Line(String),
    Idle,
    Closed,
}

pub trait Clock {
    /// Monotonic time since an arbitrary origin.
    fn now(&self) -> Duration;
    fn sleep(&mut self, duration: Duration);
}

pub trait LineInput {
    /// Blocks for one line. `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
    /// Waits at most `timeout` for a complete line.
    fn poll_line(&mut self, timeout: Duration) -> Poll;
}

pub trait Display {
    fn emit(&mut self, event: Event);
}

pub trait Console: Clock + LineInput + Display {}

impl<T: Clock + LineInput + Display + ?Sized> Console for T {}

pub(crate) fn read(console: &mut dyn Console, prompt: &str) -> Result<String, EngineError> {
    console.read_line(prompt).ok_or(EngineError::InputClosed)
}

/// Re-prompts until `parse` accepts the line. Rejections are reported, never counted.
pub(crate) fn read_valid<T>(
    console: &mut dyn Console,
    prompt: &str,
    mut parse: impl FnMut(&str) -> Result<T, InputError>,
) -> Result<T, EngineError> {
    loop {
        let line = read(console, prompt)?;
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(error) => console.emit(Event::Rejected { error }),
        }
    }
}

/// Blocks for `window`, reporting the remaining time every `tick`.
pub(crate) fn countdown(console: &mut dyn Console, window: Duration, tick: Duration) {
    let start = console.now();
    loop {
        let elapsed = console.now().saturating_sub(start);
        if elapsed >= window {
            break;
        }
        let remaining = window - elapsed;
        console.emit(Event::Countdown { remaining });
        console.sleep(remaining.min(tick));
    }
}
