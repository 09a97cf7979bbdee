/*!
Limits applied when no other value is configured.
*/

/**
The longest extra value that's stored as-is, in bytes.
*/
pub const MAX_LENGTH_EXTRA_KEY_VALUE: usize = 100;

/**
The most events buffered for a single ping before further records are dropped.
*/
pub const MAX_EVENTS_PER_PING: usize = 500;
