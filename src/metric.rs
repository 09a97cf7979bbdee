/*!
The [`EventMetric`] type.

An event metric records discrete occurrences, each with a timestamp and an optional set of string extras. Recording never fails: extras that don't validate are dropped or truncated, events that don't fit in a ping are dropped, and each of those problems is counted against the metric instead.
*/

use tally_core::{
    error::ErrorType,
    event::RecordedEvent,
    extras::{ErasedExtras, Extras},
    metric::CommonMetricData,
    timestamp::Timestamp,
    validate::{validate, AllowedExtraKeys},
};

use crate::{ambient, recorder::Recorder};

/**
A metric that records events.

Metrics record into the recorder given by [`EventMetric::with_recorder`], or the shared recorder from [`crate::Setup::init`] otherwise. If there's neither then recording does nothing.
*/
#[derive(Clone)]
pub struct EventMetric {
    meta: CommonMetricData,
    allowed_extra_keys: AllowedExtraKeys,
    recorder: Option<Recorder>,
}

impl EventMetric {
    pub fn new(meta: CommonMetricData, allowed_extra_keys: impl Into<AllowedExtraKeys>) -> Self {
        EventMetric {
            meta,
            allowed_extra_keys: allowed_extra_keys.into(),
            recorder: None,
        }
    }

    pub fn with_recorder(mut self, recorder: Recorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn meta(&self) -> &CommonMetricData {
        &self.meta
    }

    pub fn allowed_extra_keys(&self) -> &AllowedExtraKeys {
        &self.allowed_extra_keys
    }

    /**
    Record an event with the given extras.

    Pass [`tally_core::empty::Empty`] or `None` to record without extras. The event is appended to every ping the metric is sent in.
    */
    pub fn record(&self, extras: impl Extras) {
        self.record_erased(&extras)
    }

    fn record_erased(&self, extras: &dyn ErasedExtras) {
        if !self.meta.should_record() {
            return;
        }

        let Some(recorder) = self.recorder() else {
            return;
        };

        if !recorder.is_upload_enabled() {
            return;
        }

        let validated = validate(
            extras,
            &self.allowed_extra_keys,
            recorder.max_extra_value_length(),
        );

        let event = RecordedEvent::new(&self.meta, Timestamp::MIN, validated.extras);

        let Some(_batch) = recorder.begin_record() else {
            return;
        };

        for fault in &validated.faults {
            recorder.record_error_in_all_pings(&self.meta, fault.error);
        }

        for ping in &self.meta.send_in_pings {
            if recorder.events().append(ping, event.clone()).is_err() {
                recorder.record_error(&self.meta, ping, ErrorType::InvalidOverflow);
            }
        }
    }

    /**
    The events this metric has recorded into `ping_name`, or its first ping, in recorded order.

    This doesn't drain the ping. Returns `None` if nothing has been recorded.
    */
    pub fn test_get_value(&self, ping_name: Option<&str>) -> Option<Vec<RecordedEvent>> {
        let recorder = self.recorder()?;
        let ping = ping_name.or_else(|| self.meta.default_ping())?;

        recorder.events().peek(&self.meta, ping)
    }

    /**
    The number of times `error` has been recorded against this metric in `ping_name`, or its first ping.
    */
    pub fn test_get_num_recorded_errors(&self, error: ErrorType, ping_name: Option<&str>) -> i32 {
        match self.recorder() {
            Some(recorder) => recorder
                .errors()
                .num_recorded_errors(&self.meta, error, ping_name),
            None => 0,
        }
    }

    fn recorder(&self) -> Option<&Recorder> {
        self.recorder.as_ref().or_else(|| ambient::shared())
    }
}
