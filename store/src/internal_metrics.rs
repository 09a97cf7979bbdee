use std::sync::atomic::{AtomicUsize, Ordering};

/**
A sampled value of one of the store's own counters.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    pub name: &'static str,
    pub value: usize,
}

impl Metric {
    pub const fn new(name: &'static str, value: usize) -> Self {
        Metric { name, value }
    }
}

#[derive(Default)]
pub(crate) struct InternalMetrics {
    pub(crate) events_appended: Counter,
    pub(crate) events_dropped: Counter,
    pub(crate) events_drained: Counter,
    pub(crate) pings_drained: Counter,
}

#[derive(Default)]
pub(crate) struct Counter(AtomicUsize);

impl Counter {
    pub fn increment(&self) {
        self.increment_by(1);
    }

    pub fn increment_by(&self, by: usize) {
        self.0.fetch_add(by, Ordering::Relaxed);
    }

    pub fn sample(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

impl InternalMetrics {
    pub fn sample(&self) -> impl Iterator<Item = Metric> + 'static {
        let InternalMetrics {
            events_appended,
            events_dropped,
            events_drained,
            pings_drained,
        } = self;

        [
            Metric::new("events_appended", events_appended.sample()),
            Metric::new("events_dropped", events_dropped.sample()),
            Metric::new("events_drained", events_drained.sample()),
            Metric::new("pings_drained", pings_drained.sample()),
        ]
        .into_iter()
    }
}
