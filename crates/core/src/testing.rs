//! A deterministic console for driving engines and runs without a terminal.

use crate::console::{Clock, Display, LineInput, Poll};
use crate::{Event, EventBus};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Scripted {
    delay: Duration,
    text: String,
}

/// Plays back queued lines against a virtual clock.
///
/// Each line becomes available `delay` after the previous one was consumed.
/// `sleep` and timed-out polls advance the clock instantly, so a fifteen second
/// countdown finishes in microseconds. Once the script is exhausted `read_line`
/// reports closed input while `poll_line` keeps timing out, unless the script
/// was marked [`closed`](Self::closed).
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    lines: VecDeque<Scripted>,
    closed: bool,
    clock: Duration,
    bus: EventBus,
    prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lines
            .into_iter()
            .fold(Self::new(), |console, line| console.line(line))
    }

    pub fn line(self, text: impl Into<String>) -> Self {
        self.line_after(Duration::ZERO, text)
    }

    pub fn line_after(mut self, delay: Duration, text: impl Into<String>) -> Self {
        self.lines.push_back(Scripted {
            delay,
            text: text.into(),
        });
        self
    }

    /// Makes `poll_line` report `Closed` once the queued lines are used up.
    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn events(&self) -> &[Event] {
        self.bus.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.bus.drain().collect()
    }

    /// Virtual time spent so far.
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining_lines(&self) -> usize {
        self.lines.len()
    }
}

impl Clock for ScriptedConsole {
    fn now(&self) -> Duration {
        self.clock
    }

    fn sleep(&mut self, duration: Duration) {
        self.clock += duration;
    }
}

impl LineInput for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        let next = self.lines.pop_front()?;
        self.clock += next.delay;
        Some(next.text)
    }

    fn poll_line(&mut self, timeout: Duration) -> Poll {
        let Some(front) = self.lines.front_mut() else {
            if self.closed {
                return Poll::Closed;
            }
            self.clock += timeout;
            return Poll::Idle;
        };
        if front.delay > timeout {
            front.delay -= timeout;
            self.clock += timeout;
            return Poll::Idle;
        }
        self.clock += front.delay;
        match self.lines.pop_front() {
            Some(next) => Poll::Line(next.text),
            None => Poll::Idle,
        }
    }
}

impl Display for ScriptedConsole {
    fn emit(&mut self, event: Event) {
        self.bus.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_waits_out_the_delay() {
        let mut console = ScriptedConsole::new().line_after(Duration::from_millis(250), "hi");
        let tick = Duration::from_millis(100);
        assert_eq!(console.poll_line(tick), Poll::Idle);
        assert_eq!(console.poll_line(tick), Poll::Idle);
        assert_eq!(console.poll_line(tick), Poll::Line("hi".to_string()));
        assert_eq!(console.elapsed(), Duration::from_millis(250));
        assert_eq!(console.poll_line(tick), Poll::Idle);
    }

    #[test]
    fn read_line_closes_when_script_runs_out() {
        let mut console = ScriptedConsole::with_lines(["a"]);
        assert_eq!(console.read_line("> ").as_deref(), Some("a"));
        assert_eq!(console.read_line("> "), None);
        assert_eq!(console.prompts(), ["> ", "> "]);
        assert_eq!(console.remaining_lines(), 0);
    }

    #[test]
    fn closed_script_ends_polling() {
        let mut console = ScriptedConsole::with_lines(["a"]).closed();
        let tick = Duration::from_millis(100);
        assert_eq!(console.poll_line(tick), Poll::Line("a".to_string()));
        assert_eq!(console.poll_line(tick), Poll::Closed);
        assert_eq!(console.elapsed(), Duration::ZERO);
    }
}
