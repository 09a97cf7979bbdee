use std::time::Instant;

use tally_core::{clock::Clock, timestamp::Timestamp};

/**
Milliseconds elapsed since the clock was created, read from [`Instant`].
*/
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        MonotonicClock::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Option<Timestamp> {
        Some(Timestamp::from_elapsed(self.origin.elapsed()))
    }
}
