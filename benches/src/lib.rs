#![feature(test)]

extern crate test;

use tally::{CommonMetricData, Empty, EventMetric};

fn metric() -> EventMetric {
    let recorder = tally::setup().max_events(usize::MAX).build();

    EventMetric::new(
        CommonMetricData::new("bench", "event", ["events"]),
        ["reason", "source"].as_slice(),
    )
    .with_recorder(recorder)
}

#[bench]
fn record_empty(b: &mut test::Bencher) {
    let metric = metric();

    b.iter(|| metric.record(Empty))
}

#[bench]
fn record_2_extras(b: &mut test::Bencher) {
    let metric = metric();

    b.iter(|| metric.record([("reason", "tap"), ("source", "toolbar")]))
}

#[bench]
fn record_invalid_extra(b: &mut test::Bencher) {
    let metric = metric();

    b.iter(|| metric.record([("reason", "tap"), ("unknown", "x")]))
}

#[bench]
fn record_truncated_extra(b: &mut test::Bencher) {
    let metric = metric();
    let long = "x".repeat(500);

    b.iter(|| metric.record([("reason", long.as_str())]))
}

#[bench]
fn collect_100(b: &mut test::Bencher) {
    let recorder = tally::setup().build();
    let metric = EventMetric::new(
        CommonMetricData::new("bench", "event", ["events"]),
        ["reason"].as_slice(),
    )
    .with_recorder(recorder.clone());

    b.iter(|| {
        for _ in 0..100 {
            metric.record(("reason", "tap"));
        }

        recorder.collect_ping("events")
    })
}
