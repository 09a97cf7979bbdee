/*!
Configuring a [`Recorder`].

```
let recorder = tally::setup()
    .max_events(100)
    .max_extra_value_length(50)
    .build();

assert_eq!(100, recorder.max_events());
```
*/

use std::{error, fmt};

use tally_core::{
    clock::Clock,
    well_known::{MAX_EVENTS_PER_PING, MAX_LENGTH_EXTRA_KEY_VALUE},
};
use tally_store::{ErrorRecorder, EventStore};

use crate::{ambient, platform::Platform, recorder::Recorder};

/**
A builder for a [`Recorder`].
*/
pub struct Setup {
    max_events: usize,
    max_extra_value_length: usize,
    upload_enabled: bool,
    platform: Platform,
}

impl Default for Setup {
    fn default() -> Self {
        Self::new()
    }
}

impl Setup {
    pub fn new() -> Self {
        Setup {
            max_events: MAX_EVENTS_PER_PING,
            max_extra_value_length: MAX_LENGTH_EXTRA_KEY_VALUE,
            upload_enabled: true,
            platform: Default::default(),
        }
    }

    /**
    The most events a single ping can hold before further events are dropped.
    */
    pub fn max_events(mut self, max_events: usize) -> Self {
        self.max_events = max_events;
        self
    }

    /**
    The most bytes an extra value can hold before it's truncated.
    */
    pub fn max_extra_value_length(mut self, max_extra_value_length: usize) -> Self {
        self.max_extra_value_length = max_extra_value_length;
        self
    }

    /**
    Use `clock` for event timestamps instead of the platform's monotonic clock.
    */
    pub fn clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.platform.clock = Box::new(clock);
        self
    }

    pub fn upload_enabled(mut self, upload_enabled: bool) -> Self {
        self.upload_enabled = upload_enabled;
        self
    }

    /**
    Create a standalone recorder.
    */
    pub fn build(self) -> Recorder {
        Recorder::new(
            EventStore::with_max_events(self.platform.clock, self.max_events),
            ErrorRecorder::new(),
            self.upload_enabled,
            self.max_extra_value_length,
        )
    }

    /**
    Create the process-wide recorder that metrics without their own recorder use.

    This can only succeed once.
    */
    pub fn init(self) -> Result<&'static Recorder, InitError> {
        let shared = ambient::init(self.build()).ok_or(InitError { _priv: () })?;

        emit::debug!(
            rt: emit::runtime::internal(),
            "initialized shared recorder with {max_events} events per ping",
            max_events: shared.max_events(),
        );

        Ok(shared)
    }
}

/**
The process-wide recorder was already initialized.
*/
pub struct InitError {
    _priv: (),
}

impl fmt::Debug for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitError").finish_non_exhaustive()
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the shared recorder is already initialized")
    }
}

impl error::Error for InitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let recorder = Setup::new().build();

        assert_eq!(MAX_EVENTS_PER_PING, recorder.max_events());
        assert_eq!(
            MAX_LENGTH_EXTRA_KEY_VALUE,
            recorder.max_extra_value_length()
        );
        assert!(recorder.is_upload_enabled());
    }
}
