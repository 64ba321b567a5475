use std::time::Duration;

/// Collects elapsed time and reports when a full step has passed.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    step: Duration,
    delta: Duration,
}

impl Clock {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            delta: Duration::ZERO,
        }
    }

    /// Returns `true` once the accumulated time reaches the step. The
    /// accumulator starts over from zero afterwards, leftover time is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.delta += elapsed;

        if self.delta >= self.step {
            self.delta = Duration::ZERO;
            true
        } else {
            false
        }
    }
}
