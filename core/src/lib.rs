/*!
Core types for recording event telemetry.

This crate holds the plain data and traits shared by the rest of `tally`: metric identity, error kinds, extras and their validation, clocks, and the recorded event itself. Storage lives in `tally_store`, and the recording engine in `tally`.
*/

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

extern crate core;

pub mod clock;
pub mod empty;
pub mod error;
pub mod event;
pub mod extras;
pub mod key;
pub mod metric;
pub mod timestamp;
pub mod validate;
pub mod value;
pub mod well_known;

mod internal {
    pub struct Erased<T>(pub(crate) T);
}
