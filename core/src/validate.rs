/*!
Validation of event extras.

[`validate`] resolves any [`Extras`] into the mapping that gets stored with an event. Each problem it finds becomes a [`Fault`] alongside that mapping, never an error. It's up to the caller to count the faults against the metric.
*/

use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::ops::ControlFlow;

use crate::{error::ErrorType, extras::Extras, key::Key};

/**
The extra keys an event is allowed to record, in declaration order.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedExtraKeys(Vec<String>);

impl AllowedExtraKeys {
    pub fn new(keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        AllowedExtraKeys(keys.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|allowed| allowed == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|key| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for AllowedExtraKeys {
    fn from(keys: Vec<String>) -> Self {
        AllowedExtraKeys(keys)
    }
}

impl<'a> From<&'a [&'a str]> for AllowedExtraKeys {
    fn from(keys: &'a [&'a str]) -> Self {
        AllowedExtraKeys::new(keys.iter().copied())
    }
}

/**
A problem found with a single extra.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub error: ErrorType,
    pub key: String,
}

impl Fault {
    fn new(error: ErrorType, key: &Key) -> Self {
        Fault {
            error,
            key: String::from(key.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validated {
    pub extras: BTreeMap<String, String>,
    pub faults: Vec<Fault>,
}

impl Validated {
    pub fn count_faults(&self, error: ErrorType) -> usize {
        self.faults.iter().filter(|fault| fault.error == error).count()
    }
}

/**
Resolve `extras` into a sanitized mapping.

- Keys outside `allowed` are dropped with [`ErrorType::InvalidExtraKey`].
- A key seen more than once keeps its first value; each repeat is dropped with [`ErrorType::InvalidValue`].
- Values longer than `max_value_length` bytes are truncated on a character boundary and kept, with [`ErrorType::InvalidOverflow`].
*/
pub fn validate(
    extras: &(impl Extras + ?Sized),
    allowed: &AllowedExtraKeys,
    max_value_length: usize,
) -> Validated {
    let mut validated = Validated::default();

    extras.for_each(|key, value| {
        if !allowed.contains(key.as_str()) {
            validated
                .faults
                .push(Fault::new(ErrorType::InvalidExtraKey, &key));

            return ControlFlow::Continue(());
        }

        if validated.extras.contains_key(key.as_str()) {
            validated.faults.push(Fault::new(ErrorType::InvalidValue, &key));

            return ControlFlow::Continue(());
        }

        let mut value = value.to_extra_string();

        if value.len() > max_value_length {
            validated
                .faults
                .push(Fault::new(ErrorType::InvalidOverflow, &key));

            let end = truncate_at_boundary(&value, max_value_length).len();
            value.truncate(end);
        }

        validated.extras.insert(String::from(key.as_str()), value);

        ControlFlow::Continue(())
    });

    validated
}

/**
The longest prefix of `value` that fits in `max_len` bytes without splitting a character.
*/
pub fn truncate_at_boundary(value: &str, max_len: usize) -> &str {
    if value.len() <= max_len {
        return value;
    }

    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }

    &value[..end]
}
