//! Bounded spin wait

use twine_hal::Millis;

/// Point in time a wait gives up at
///
/// Only built when a timeout is configured, so an unbounded wait never
/// touches the clock.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    started: u32,
    timeout_ms: u16,
}

impl Deadline {
    /// Start timing a wait; `None` when `timeout_ms` is 0
    pub(crate) fn start<C: Millis>(clock: &C, timeout_ms: u16) -> Option<Self> {
        if timeout_ms == 0 {
            return None;
        }
        Some(Self {
            started: clock.millis(),
            timeout_ms,
        })
    }

    /// Whether at least the timeout has elapsed since the wait started
    pub(crate) fn expired<C: Millis>(&self, clock: &C) -> bool {
        clock.elapsed_since(self.started) >= u32::from(self.timeout_ms)
    }
}
