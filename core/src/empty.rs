/*!
The [`Empty`] type.

An [`Empty`] can be used in place of a more meaningful implementation of most traits. As [`crate::extras::Extras`] it's an event with no extras, and as a [`crate::clock::Clock`] it never reads a time.
*/

/**
A type that behaves like a default, empty, null value.
*/
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Empty;
