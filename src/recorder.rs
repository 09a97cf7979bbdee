use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use tally_core::{error::ErrorType, event::RecordedEvent, metric::CommonMetricData};
use tally_store::{ErrorRecorder, EventStore, Metric};

use crate::ping::PingEvents;

/**
The storage and limits that metrics record into.

A `Recorder` is a handle; clones share the same storage. Create one with [`crate::setup`], either standalone with [`crate::Setup::build`] or as the process-wide recorder with [`crate::Setup::init`].
*/
#[derive(Clone)]
pub struct Recorder(Arc<Inner>);

struct Inner {
    // Shared for each `record`, exclusive for drains and clears
    batch: RwLock<()>,
    events: EventStore,
    errors: ErrorRecorder,
    upload_enabled: AtomicBool,
    max_extra_value_length: usize,
}

impl Recorder {
    pub(crate) fn new(
        events: EventStore,
        errors: ErrorRecorder,
        upload_enabled: bool,
        max_extra_value_length: usize,
    ) -> Self {
        Recorder(Arc::new(Inner {
            batch: RwLock::new(()),
            events,
            errors,
            upload_enabled: AtomicBool::new(upload_enabled),
            max_extra_value_length,
        }))
    }

    pub fn events(&self) -> &EventStore {
        &self.0.events
    }

    pub fn errors(&self) -> &ErrorRecorder {
        &self.0.errors
    }

    pub fn max_extra_value_length(&self) -> usize {
        self.0.max_extra_value_length
    }

    pub fn max_events(&self) -> usize {
        self.0.events.max_events()
    }

    pub fn is_upload_enabled(&self) -> bool {
        self.0.upload_enabled.load(Ordering::Acquire)
    }

    /**
    Turn recording on or off.

    Turning upload off clears every stored event and error count, and recording is a no-op until it's turned back on.
    */
    pub fn set_upload_enabled(&self, enabled: bool) {
        let was_enabled = {
            let _batch = self.exclusive();

            let was_enabled = self.0.upload_enabled.swap(enabled, Ordering::AcqRel);

            if was_enabled && !enabled {
                self.0.events.clear_all();
                self.0.errors.clear_all();
            }

            was_enabled
        };

        if was_enabled != enabled {
            emit::debug!(
                rt: emit::runtime::internal(),
                "upload enabled changed to {enabled}",
                enabled,
            );
        }
    }

    /**
    Begin recording a single event.

    Returns `None` if upload is disabled. Drains and clears wait for the returned guard, so everything recorded under it lands in the same batch.
    */
    pub(crate) fn begin_record(&self) -> Option<RwLockReadGuard<()>> {
        let batch = self
            .0
            .batch
            .read()
            .unwrap_or_else(|err| err.into_inner());

        if self.is_upload_enabled() {
            Some(batch)
        } else {
            None
        }
    }

    fn exclusive(&self) -> RwLockWriteGuard<()> {
        self.0
            .batch
            .write()
            .unwrap_or_else(|err| err.into_inner())
    }

    pub(crate) fn record_error(&self, meta: &CommonMetricData, ping: &str, error: ErrorType) {
        self.0.errors.record_error(meta, ping, error);

        emit::warn!(
            rt: emit::runtime::internal(),
            "recorded {error} for {metric} in {ping}",
            error: error.as_str(),
            metric: meta.identifier(),
            ping,
        );
    }

    pub(crate) fn record_error_in_all_pings(&self, meta: &CommonMetricData, error: ErrorType) {
        for ping in &meta.send_in_pings {
            self.record_error(meta, ping, error);
        }
    }

    /**
    Take every event buffered for `ping_name`, in recorded order.

    This is the hand-off to ping assembly. The ping's `Ping` lifetime error counts are cleared along with its events.
    */
    pub fn drain_for_ping(&self, ping_name: &str) -> Vec<RecordedEvent> {
        let events = {
            let _batch = self.exclusive();

            let events = self.0.events.drain_for_ping(ping_name);
            self.0.errors.clear_ping(ping_name);

            events
        };

        emit::debug!(
            rt: emit::runtime::internal(),
            "drained {count} events from {ping}",
            count: events.len(),
            ping: ping_name,
        );

        events
    }

    /**
    Drain `ping_name` and shape its events for submission.

    Returns `None` if there was nothing to collect.
    */
    pub fn collect_ping(&self, ping_name: &str) -> Option<PingEvents> {
        PingEvents::new(self.drain_for_ping(ping_name))
    }

    /**
    Clear data that only lives as long as the application, as happens on restart.
    */
    pub fn clear_application_lifetime(&self) {
        let _batch = self.exclusive();

        self.0.errors.clear_application_lifetime();
    }

    /**
    Clear every stored event and error count.
    */
    pub fn reset(&self) {
        let _batch = self.exclusive();

        self.0.events.clear_all();
        self.0.errors.clear_all();
    }

    pub fn sample_metrics(&self) -> impl Iterator<Item = Metric> + 'static {
        self.0.events.sample_metrics()
    }
}
