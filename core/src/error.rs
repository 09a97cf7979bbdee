/*!
The kinds of error recorded against a metric.

Errors never interrupt recording. Each one is counted instead, and the counts can be read back with the test accessors.
*/

use core::{fmt, str::FromStr};

#[non_exhaustive]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorType {
    /**
    A value didn't have the expected shape, like an extra key supplied twice.
    */
    InvalidValue,
    /**
    An extra key wasn't in the event's allow-list.
    */
    InvalidExtraKey,
    /**
    A value, or the number of recorded events, exceeded a configured limit.
    */
    InvalidOverflow,
}

impl ErrorType {
    pub const ALL: [ErrorType; 3] = [
        ErrorType::InvalidValue,
        ErrorType::InvalidExtraKey,
        ErrorType::InvalidOverflow,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidValue => "invalid_value",
            ErrorType::InvalidExtraKey => "invalid_extra_key",
            ErrorType::InvalidOverflow => "invalid_overflow",
        }
    }
}

impl fmt::Debug for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorType {
    type Err = ParseErrorTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorType::ALL
            .into_iter()
            .find(|error| s.eq_ignore_ascii_case(error.as_str()))
            .ok_or(ParseErrorTypeError {})
    }
}

#[derive(Debug)]
pub struct ParseErrorTypeError {}

impl fmt::Display for ParseErrorTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the input was not a valid error type")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseErrorTypeError {}
