/*!
The [`Clock`] type.

Event timestamps come from a monotonic clock supplied by the host. The platform default lives in the `tally` crate; [`ManualClock`] is a clock that only moves when told to, for deterministic tests.
*/

use core::sync::atomic::{AtomicU64, Ordering};

use crate::{empty::Empty, timestamp::Timestamp};

/**
A source of monotonic timestamps.

Returning `None` means the time couldn't be read. Events recorded without a time take the last timestamp of their ping.
*/
pub trait Clock {
    fn now(&self) -> Option<Timestamp>;
}

impl<'a, T: Clock + ?Sized> Clock for &'a T {
    fn now(&self) -> Option<Timestamp> {
        (**self).now()
    }
}

impl<T: Clock> Clock for Option<T> {
    fn now(&self) -> Option<Timestamp> {
        match self {
            Some(clock) => clock.now(),
            None => Empty.now(),
        }
    }
}

impl<'a, T: Clock + ?Sized + 'a> Clock for alloc::boxed::Box<T> {
    fn now(&self) -> Option<Timestamp> {
        (**self).now()
    }
}

impl<'a, T: Clock + ?Sized + 'a> Clock for alloc::sync::Arc<T> {
    fn now(&self) -> Option<Timestamp> {
        (**self).now()
    }
}

impl Clock for Empty {
    fn now(&self) -> Option<Timestamp> {
        None
    }
}

impl Clock for fn() -> Option<Timestamp> {
    fn now(&self) -> Option<Timestamp> {
        (self)()
    }
}

/**
A clock that only advances when [`ManualClock::advance`] or [`ManualClock::set`] is called.
*/
#[derive(Debug, Default)]
pub struct ManualClock(AtomicU64);

impl ManualClock {
    pub const fn new(start: Timestamp) -> Self {
        ManualClock(AtomicU64::new(start.as_millis()))
    }

    pub fn advance(&self, millis: u64) {
        self.0.fetch_add(millis, Ordering::Relaxed);
    }

    /**
    Move the clock to `to`, even if that's earlier than its current reading.
    */
    pub fn set(&self, to: Timestamp) {
        self.0.store(to.as_millis(), Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Option<Timestamp> {
        Some(Timestamp::from_millis(self.0.load(Ordering::Relaxed)))
    }
}
