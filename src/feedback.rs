// 📳 Feedback - short best-effort pulse on key presses
//
// The pulse is fire-and-forget. Implementations swallow their own failures:
// nothing the editor does may depend on a pulse being delivered.

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;

/// One tactile/audible pulse per call. Must never panic or block.
pub trait Feedback {
    fn pulse(&self);
}

/// Rings the terminal bell
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl TerminalBell {
    fn ring(&self) -> io::Result<()> {
        let mut out = io::stdout();
        out.write_all(b"\x07")?;
        out.flush()
    }
}

impl Feedback for TerminalBell {
    fn pulse(&self) {
        if let Err(err) = self.ring() {
            tracing::debug!(error = %err, "feedback pulse not delivered");
        }
    }
}

/// Feedback disabled in configuration
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Feedback for Silent {
    fn pulse(&self) {}
}

/// Counts pulses instead of emitting them (headless hosts, tests)
#[derive(Debug, Default)]
pub struct PulseCounter {
    count: Cell<usize>,
}

impl PulseCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl Feedback for PulseCounter {
    fn pulse(&self) {
        self.count.set(self.count.get() + 1);
    }
}

/// Pick the feedback implementation for the `haptics` config flag
pub fn from_config(enabled: bool) -> Rc<dyn Feedback> {
    if enabled {
        Rc::new(TerminalBell)
    } else {
        Rc::new(Silent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_counter_counts() {
        let counter = PulseCounter::new();
        counter.pulse();
        counter.pulse();
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn test_silent_does_nothing() {
        Silent.pulse();
    }

    #[test]
    fn test_from_config_disabled_is_usable() {
        let feedback = from_config(false);
        feedback.pulse();
    }
}
