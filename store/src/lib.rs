/*!
Synchronized storage for recorded events and error counts.

The [`EventStore`] buffers events per ping until a ping is drained, and the [`ErrorRecorder`] counts the errors found while recording them. Both are safe to share between threads. Each guards its state with a single lock that's only held to push, increment, or copy values. Nothing that runs under it calls back into caller code.
*/

use std::{
    collections::HashMap,
    error, fmt, mem,
    sync::{Mutex, MutexGuard},
};

use tally_core::{
    clock::Clock, event::RecordedEvent, metric::CommonMetricData, timestamp::Timestamp,
    well_known::MAX_EVENTS_PER_PING,
};

use crate::internal_metrics::InternalMetrics;

mod errors;
mod internal_metrics;

pub use self::{errors::ErrorRecorder, internal_metrics::Metric};

/**
An ordered, append-only buffer of events for each ping.
*/
pub struct EventStore {
    max_events: usize,
    clock: Box<dyn Clock + Send + Sync>,
    metrics: InternalMetrics,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    pings: HashMap<String, PingBuffer>,
}

#[derive(Default)]
struct PingBuffer {
    events: Vec<RecordedEvent>,
    // Kept across drains so timestamps in the next batch don't go backwards
    last: Timestamp,
}

impl PingBuffer {
    fn push(
        &mut self,
        now: Option<Timestamp>,
        mut event: RecordedEvent,
        max_events: usize,
    ) -> Result<Timestamp, Overflow> {
        if self.events.len() >= max_events {
            return Err(Overflow { max_events });
        }

        let ts = now.unwrap_or(self.last).not_before(self.last);

        event.timestamp = ts.as_millis();
        self.last = ts;
        self.events.push(event);

        Ok(ts)
    }
}

/**
An event was dropped because its ping was already full.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overflow {
    max_events: usize,
}

impl Overflow {
    pub fn max_events(&self) -> usize {
        self.max_events
    }
}

impl fmt::Display for Overflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the ping already holds {} events", self.max_events)
    }
}

impl error::Error for Overflow {}

impl EventStore {
    pub fn new(clock: impl Clock + Send + Sync + 'static) -> Self {
        EventStore::with_max_events(clock, MAX_EVENTS_PER_PING)
    }

    pub fn with_max_events(clock: impl Clock + Send + Sync + 'static, max_events: usize) -> Self {
        EventStore {
            max_events,
            clock: Box::new(clock),
            metrics: Default::default(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn max_events(&self) -> usize {
        self.max_events
    }

    /**
    Append `event` to the end of `ping_name`'s buffer.

    The event's timestamp is replaced with the next monotonic timestamp for the ping: the clock's current reading, or the ping's last timestamp if that's later. If the ping already holds the maximum number of events then the event is dropped and an [`Overflow`] is returned.
    */
    pub fn append(&self, ping_name: &str, event: RecordedEvent) -> Result<Timestamp, Overflow> {
        let now = self.clock.now();

        let appended = {
            let mut state = self.lock();

            match state.pings.get_mut(ping_name) {
                Some(buffer) => buffer.push(now, event, self.max_events),
                None => {
                    let mut buffer = PingBuffer::default();
                    let appended = buffer.push(now, event, self.max_events);

                    state.pings.insert(ping_name.to_owned(), buffer);

                    appended
                }
            }
        };

        match appended {
            Ok(_) => self.metrics.events_appended.increment(),
            Err(_) => self.metrics.events_dropped.increment(),
        }

        appended
    }

    /**
    Copy the events recorded by `meta` into `ping_name`, in the order they were recorded.

    Returns `None` if the metric hasn't recorded anything into the ping.
    */
    pub fn peek(&self, meta: &CommonMetricData, ping_name: &str) -> Option<Vec<RecordedEvent>> {
        let state = self.lock();

        let events = state
            .pings
            .get(ping_name)?
            .events
            .iter()
            .filter(|event| event.is_recorded_by(meta))
            .cloned()
            .collect::<Vec<_>>();

        if events.is_empty() {
            None
        } else {
            Some(events)
        }
    }

    /**
    Take every event buffered for `ping_name`, leaving it empty.

    Appends that race with a drain land either in the returned batch or in the next one; none are lost.
    */
    pub fn drain_for_ping(&self, ping_name: &str) -> Vec<RecordedEvent> {
        let drained = {
            let mut state = self.lock();

            match state.pings.get_mut(ping_name) {
                Some(buffer) => mem::take(&mut buffer.events),
                None => Vec::new(),
            }
        };

        self.metrics.pings_drained.increment();
        self.metrics.events_drained.increment_by(drained.len());

        drained
    }

    /**
    The number of events currently buffered for `ping_name`.
    */
    pub fn len(&self, ping_name: &str) -> usize {
        self.lock()
            .pings
            .get(ping_name)
            .map(|buffer| buffer.events.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self, ping_name: &str) -> bool {
        self.len(ping_name) == 0
    }

    pub fn clear_all(&self) {
        self.lock().pings.clear();
    }

    pub fn sample_metrics(&self) -> impl Iterator<Item = Metric> + 'static {
        let buffered = {
            self.lock()
                .pings
                .values()
                .map(|buffer| buffer.events.len())
                .sum()
        };

        self.metrics
            .sample()
            .chain(Some(Metric::new("events_buffered", buffered)))
    }

    fn lock(&self) -> MutexGuard<State> {
        // Telemetry can't be allowed to take down its host
        // A panic while holding the lock leaves the buffers intact
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}
