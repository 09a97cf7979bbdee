/*!
Events shaped for submission in a ping.

When a ping is collected its events are drained from the store and rebased, so the first event in the ping is at timestamp `0` and the rest are relative to it. In the JSON payload an event without extras has no `extra` field at all.
*/

use std::{error, fmt};

use tally_core::event::RecordedEvent;

/**
The events drained from a single ping, with timestamps relative to the first of them.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingEvents {
    events: Vec<RecordedEvent>,
}

impl PingEvents {
    pub(crate) fn new(mut events: Vec<RecordedEvent>) -> Option<Self> {
        let first = events.first()?.timestamp;

        for event in &mut events {
            event.timestamp = event.timestamp.saturating_sub(first);
        }

        Some(PingEvents { events })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordedEvent> {
        self.events.iter()
    }

    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /**
    Serialize the events as a JSON array.
    */
    pub fn to_json(&self) -> Result<String, Error> {
        sval_json::stream_to_string(self).map_err(Error)
    }
}

impl IntoIterator for PingEvents {
    type Item = RecordedEvent;
    type IntoIter = std::vec::IntoIter<RecordedEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl sval::Value for PingEvents {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        stream.seq_begin(Some(self.events.len()))?;

        for event in &self.events {
            stream.seq_value_begin()?;
            stream.value_computed(&PayloadEvent(event))?;
            stream.seq_value_end()?;
        }

        stream.seq_end()
    }
}

struct PayloadEvent<'a>(&'a RecordedEvent);

impl<'a> sval::Value for PayloadEvent<'a> {
    fn stream<'sval, S: sval::Stream<'sval> + ?Sized>(&'sval self, stream: &mut S) -> sval::Result {
        let event = self.0;

        stream.record_begin(None, None, None, None)?;

        stream.record_value_begin(None, &sval::Label::new("timestamp"))?;
        stream.u64(event.timestamp)?;
        stream.record_value_end(None, &sval::Label::new("timestamp"))?;

        stream.record_value_begin(None, &sval::Label::new("category"))?;
        stream.value_computed(event.category.as_str())?;
        stream.record_value_end(None, &sval::Label::new("category"))?;

        stream.record_value_begin(None, &sval::Label::new("name"))?;
        stream.value_computed(event.name.as_str())?;
        stream.record_value_end(None, &sval::Label::new("name"))?;

        if !event.extra.is_empty() {
            stream.record_value_begin(None, &sval::Label::new("extra"))?;
            stream.value_computed(&event.extra)?;
            stream.record_value_end(None, &sval::Label::new("extra"))?;
        }

        stream.record_end(None, None, None)
    }
}

/**
An error serializing a ping payload.
*/
pub struct Error(sval_json::Error);

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to serialize ping events: {}", self.0)
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn event(timestamp: u64, extra: &[(&str, &str)]) -> RecordedEvent {
        RecordedEvent {
            timestamp,
            category: "ui".into(),
            name: "click".into(),
            extra: extra
                .iter()
                .map(|(k, v)| (String::from(*k), String::from(*v)))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn timestamps_are_relative_to_the_first_event() {
        let ping = PingEvents::new(vec![event(120, &[]), event(125, &[]), event(190, &[])]).unwrap();

        assert_eq!(3, ping.len());

        let timestamps = ping
            .into_events()
            .into_iter()
            .map(|event| event.timestamp)
            .collect::<Vec<_>>();

        assert_eq!(vec![0, 5, 70], timestamps);
    }

    #[test]
    fn empty_pings_are_not_collected() {
        assert!(PingEvents::new(Vec::new()).is_none());
    }

    #[test]
    fn json_payload_omits_empty_extras() {
        let ping = PingEvents::new(vec![event(10, &[("reason", "x")]), event(12, &[])]).unwrap();

        assert_eq!(
            r#"[{"timestamp":0,"category":"ui","name":"click","extra":{"reason":"x"}},{"timestamp":2,"category":"ui","name":"click"}]"#,
            ping.to_json().unwrap()
        );
    }
}
