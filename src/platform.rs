use tally_core::clock::Clock;

pub(crate) mod monotonic_clock;

pub use self::monotonic_clock::MonotonicClock;

pub(crate) type DefaultClock = MonotonicClock;

pub(crate) struct Platform {
    pub(crate) clock: Box<dyn Clock + Send + Sync>,
}

impl Default for Platform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform {
    pub fn new() -> Self {
        Platform {
            clock: Box::new(DefaultClock::default()),
        }
    }
}
