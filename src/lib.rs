/*!
Event metrics for application telemetry.

`tally` records discrete events, each with a timestamp and a small set of string extras, into per-ping buffers that are drained when a ping is assembled for upload.

```
use tally::{CommonMetricData, ErrorType, EventMetric};

let recorder = tally::setup().build();

let click = EventMetric::new(
    CommonMetricData::new("ui", "click", ["events"]),
    ["reason"].as_slice(),
)
.with_recorder(recorder.clone());

click.record([("reason", "toolbar"), ("unknown", "dropped")]);

let events = click.test_get_value(None).unwrap();

assert_eq!("toolbar", events[0].extra["reason"]);
assert_eq!(1, click.test_get_num_recorded_errors(ErrorType::InvalidExtraKey, None));

let ping = recorder.collect_ping("events").unwrap();
assert_eq!(1, ping.len());
```

Recording never panics or returns errors. Problems with a recording are counted against the metric as an [`ErrorType`], which can be read back with [`EventMetric::test_get_num_recorded_errors`].
*/

mod ambient;
mod platform;
mod recorder;

pub mod metric;
pub mod ping;
pub mod setup;

#[doc(inline)]
pub use tally_core::{
    clock::{Clock, ManualClock},
    empty::Empty,
    error::ErrorType,
    event::RecordedEvent,
    extras::Extras,
    key::{Key, ToKey},
    metric::{CommonMetricData, Lifetime},
    timestamp::Timestamp,
    validate::AllowedExtraKeys,
    value::{ToValue, Value},
};

pub use tally_store::Metric;

pub use self::{
    ambient::shared, metric::EventMetric, platform::MonotonicClock, ping::PingEvents,
    recorder::Recorder, setup::Setup,
};

/**
Start configuring a [`Recorder`].
*/
pub fn setup() -> Setup {
    Setup::new()
}
