use core::{cmp, fmt, ops::Sub, str::FromStr, time::Duration};

use crate::value::{ToValue, Value};

/**
A point on a monotonic clock, in milliseconds.

Timestamps are only comparable with others read from the same clock. They aren't wall-clock times.
*/
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const MIN: Timestamp = Timestamp(0);

    pub const fn from_millis(millis: u64) -> Self {
        Timestamp(millis)
    }

    pub fn from_elapsed(elapsed: Duration) -> Self {
        Timestamp(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }

    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /**
    The later of this timestamp and `earliest`.

    This is what keeps timestamps non-decreasing when a clock steps backwards or can't be read.
    */
    pub fn not_before(self, earliest: Timestamp) -> Self {
        cmp::max(self, earliest)
    }
}

impl Sub for Timestamp {
    type Output = u64;

    fn sub(self, rhs: Self) -> u64 {
        self.0.saturating_sub(rhs.0)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Timestamp {
    type Err = ParseTimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .map(Timestamp)
            .map_err(|_| ParseTimestampError {})
    }
}

impl ToValue for Timestamp {
    fn to_value(&self) -> Value {
        Value::from(self.0)
    }
}

#[derive(Debug)]
pub struct ParseTimestampError {}

impl fmt::Display for ParseTimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the input was not a valid timestamp")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseTimestampError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_roundtrip() {
        let ts = Timestamp::from_millis(1691961703);

        let fmt = ts.to_string();

        let parsed: Timestamp = fmt.parse().unwrap();

        assert_eq!(ts, parsed, "{}", fmt);
    }

    #[test]
    fn not_before_never_goes_backwards() {
        let last = Timestamp::from_millis(20);

        assert_eq!(last, Timestamp::from_millis(5).not_before(last));
        assert_eq!(
            Timestamp::from_millis(25),
            Timestamp::from_millis(25).not_before(last)
        );
        assert_eq!(5, Timestamp::from_millis(25) - last);
        assert_eq!(0, last - Timestamp::from_millis(25));
    }
}
