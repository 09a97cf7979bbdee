use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use tally_core::{
    error::ErrorType,
    metric::{CommonMetricData, Lifetime},
};

/**
Counts of the errors recorded against each metric, per ping.

Counts only ever go up. They're removed when their lifetime ends: `Ping` counts when their ping is drained, `Application` counts at an application boundary, and `User` counts only when storage is cleared.
*/
#[derive(Default)]
pub struct ErrorRecorder {
    state: Mutex<HashMap<ErrorKey, ErrorCount>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ErrorKey {
    ping: String,
    category: String,
    name: String,
    error: ErrorType,
}

impl ErrorKey {
    // Metrics are matched on category and name, the same way recorded events are
    fn new(meta: &CommonMetricData, ping_name: &str, error: ErrorType) -> Self {
        ErrorKey {
            ping: ping_name.to_owned(),
            category: meta.category.clone(),
            name: meta.name.clone(),
            error,
        }
    }
}

struct ErrorCount {
    lifetime: Lifetime,
    count: i32,
}

impl ErrorRecorder {
    pub fn new() -> Self {
        ErrorRecorder::default()
    }

    /**
    Count one `error` against `meta` in `ping_name`.
    */
    pub fn record_error(&self, meta: &CommonMetricData, ping_name: &str, error: ErrorType) {
        let key = ErrorKey::new(meta, ping_name, error);

        let mut state = self.lock();

        let entry = state.entry(key).or_insert(ErrorCount {
            lifetime: meta.lifetime,
            count: 0,
        });

        entry.count = entry.count.saturating_add(1);
    }

    /**
    Count one `error` against `meta` in every ping it's sent in.
    */
    pub fn record_error_in_all_pings(&self, meta: &CommonMetricData, error: ErrorType) {
        for ping in &meta.send_in_pings {
            self.record_error(meta, ping, error);
        }
    }

    /**
    The number of times `error` has been recorded against `meta`.

    Reads `ping_name`, or the first ping the metric is sent in. Metrics that have never recorded the error, or that aren't sent in any ping, have a count of zero.
    */
    pub fn num_recorded_errors(
        &self,
        meta: &CommonMetricData,
        error: ErrorType,
        ping_name: Option<&str>,
    ) -> i32 {
        let Some(ping) = ping_name.or_else(|| meta.default_ping()) else {
            return 0;
        };

        let key = ErrorKey::new(meta, ping, error);

        self.lock()
            .get(&key)
            .map(|entry| entry.count)
            .unwrap_or_default()
    }

    /**
    Remove the `Ping` lifetime counts stored in `ping_name`.
    */
    pub fn clear_ping(&self, ping_name: &str) {
        self.lock()
            .retain(|key, entry| !(entry.lifetime == Lifetime::Ping && key.ping == ping_name));
    }

    /**
    Remove every `Application` lifetime count.
    */
    pub fn clear_application_lifetime(&self) {
        self.lock()
            .retain(|_, entry| entry.lifetime != Lifetime::Application);
    }

    pub fn clear_all(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<HashMap<ErrorKey, ErrorCount>> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    fn meta() -> CommonMetricData {
        CommonMetricData::new("ui", "click", ["events", "metrics"])
    }

    #[test]
    fn counts_default_to_the_first_ping() {
        let errors = ErrorRecorder::new();
        let meta = meta();

        errors.record_error(&meta, "events", ErrorType::InvalidExtraKey);
        errors.record_error(&meta, "events", ErrorType::InvalidExtraKey);
        errors.record_error(&meta, "metrics", ErrorType::InvalidOverflow);

        assert_eq!(
            2,
            errors.num_recorded_errors(&meta, ErrorType::InvalidExtraKey, None)
        );
        assert_eq!(
            0,
            errors.num_recorded_errors(&meta, ErrorType::InvalidOverflow, None)
        );
        assert_eq!(
            1,
            errors.num_recorded_errors(&meta, ErrorType::InvalidOverflow, Some("metrics"))
        );
    }

    #[test]
    fn unknown_metrics_have_no_errors() {
        let errors = ErrorRecorder::new();

        assert_eq!(
            0,
            errors.num_recorded_errors(&meta(), ErrorType::InvalidValue, None)
        );
        assert_eq!(
            0,
            errors.num_recorded_errors(
                &CommonMetricData::new("ui", "orphan", Vec::<String>::new()),
                ErrorType::InvalidValue,
                None
            )
        );
    }

    #[test]
    fn metrics_with_the_same_identifier_count_separately() {
        let errors = ErrorRecorder::new();

        // Both of these are identified as `a.b.c`
        let first = CommonMetricData::new("a", "b.c", ["events"]);
        let second = CommonMetricData::new("a.b", "c", ["events"]);

        errors.record_error(&first, "events", ErrorType::InvalidExtraKey);

        assert_eq!(
            1,
            errors.num_recorded_errors(&first, ErrorType::InvalidExtraKey, None)
        );
        assert_eq!(
            0,
            errors.num_recorded_errors(&second, ErrorType::InvalidExtraKey, None)
        );
    }

    #[test]
    fn record_in_all_pings() {
        let errors = ErrorRecorder::new();
        let meta = meta();

        errors.record_error_in_all_pings(&meta, ErrorType::InvalidValue);

        for ping in ["events", "metrics"] {
            assert_eq!(
                1,
                errors.num_recorded_errors(&meta, ErrorType::InvalidValue, Some(ping))
            );
        }
    }

    #[test]
    fn counts_are_cleared_by_lifetime() {
        let errors = ErrorRecorder::new();

        let ping = meta();
        let app = CommonMetricData::new("ui", "app", ["events"]).with_lifetime(Lifetime::Application);
        let user = CommonMetricData::new("ui", "user", ["events"]).with_lifetime(Lifetime::User);

        for meta in [&ping, &app, &user] {
            errors.record_error(meta, "events", ErrorType::InvalidValue);
        }
        errors.record_error(&ping, "metrics", ErrorType::InvalidValue);

        let count = |meta: &CommonMetricData, ping: &str| {
            errors.num_recorded_errors(meta, ErrorType::InvalidValue, Some(ping))
        };

        errors.clear_ping("events");
        assert_eq!(0, count(&ping, "events"));
        assert_eq!(1, count(&ping, "metrics"));
        assert_eq!(1, count(&app, "events"));
        assert_eq!(1, count(&user, "events"));

        errors.clear_application_lifetime();
        assert_eq!(0, count(&app, "events"));
        assert_eq!(1, count(&user, "events"));

        errors.clear_all();
        assert_eq!(0, count(&user, "events"));
        assert_eq!(0, count(&ping, "metrics"));
    }

    #[test]
    fn concurrent_increments_are_counted() {
        let errors = Arc::new(ErrorRecorder::new());
        let meta = meta();

        let handles = (0..4)
            .map(|_| {
                let errors = errors.clone();
                let meta = meta.clone();

                thread::spawn(move || {
                    for _ in 0..100 {
                        errors.record_error(&meta, "events", ErrorType::InvalidOverflow);
                    }
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            400,
            errors.num_recorded_errors(&meta, ErrorType::InvalidOverflow, None)
        );
    }
}
