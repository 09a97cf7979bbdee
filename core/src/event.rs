/*!
The [`RecordedEvent`] type.
*/

use alloc::{collections::BTreeMap, string::String};

use crate::{metric::CommonMetricData, timestamp::Timestamp};

/**
A single event as it was recorded.

This is the plain value handed across to bindings and test harnesses: `{ category, name, timestamp, extra }`. The `extra` mapping is always present, and it's empty when the event was recorded without extras.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    /**
    Milliseconds on the recorder's monotonic clock.
    */
    pub timestamp: u64,
    pub category: String,
    pub name: String,
    pub extra: BTreeMap<String, String>,
}

impl RecordedEvent {
    pub fn new(meta: &CommonMetricData, timestamp: Timestamp, extra: BTreeMap<String, String>) -> Self {
        RecordedEvent {
            timestamp: timestamp.as_millis(),
            category: meta.category.clone(),
            name: meta.name.clone(),
            extra,
        }
    }

    pub fn is_recorded_by(&self, meta: &CommonMetricData) -> bool {
        self.category == meta.category && self.name == meta.name
    }
}

#[cfg(feature = "sval")]
impl sval::Value for RecordedEvent {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        let label = sval::Label::new("RecordedEvent");

        stream.record_begin(None, Some(&label), None, Some(4))?;

        stream.record_value_begin(None, &sval::Label::new("timestamp"))?;
        stream.value(&self.timestamp)?;
        stream.record_value_end(None, &sval::Label::new("timestamp"))?;

        stream.record_value_begin(None, &sval::Label::new("category"))?;
        stream.value(&*self.category)?;
        stream.record_value_end(None, &sval::Label::new("category"))?;

        stream.record_value_begin(None, &sval::Label::new("name"))?;
        stream.value(&*self.name)?;
        stream.record_value_end(None, &sval::Label::new("name"))?;

        stream.record_value_begin(None, &sval::Label::new("extra"))?;
        stream.value(&self.extra)?;
        stream.record_value_end(None, &sval::Label::new("extra"))?;

        stream.record_end(None, Some(&label), None)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RecordedEvent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct as _;

        let mut record = serializer.serialize_struct("RecordedEvent", 4)?;

        record.serialize_field("timestamp", &self.timestamp)?;
        record.serialize_field("category", &self.category)?;
        record.serialize_field("name", &self.name)?;
        record.serialize_field("extra", &self.extra)?;

        record.end()
    }
}
