/*!
The [`Key`] type.

Extra keys reach the validator either as plain strings or as symbolic keys, like the variants of an enum generated for an event's allowed extras. Both resolve to a canonical string through [`ToKey`] before they're checked against an allow-list.
*/

use alloc::{borrow::Cow, boxed::Box, string::String};
use core::{borrow::Borrow, fmt, hash};

/**
The canonical string form of an extra key.

A key may be:

- symbolic, holding a `&'static str` declared alongside the event.
- borrowed from the caller for the duration of a call.
- owned.
*/
#[derive(Clone)]
pub struct Key<'k>(Repr<'k>);

#[derive(Clone)]
enum Repr<'k> {
    Static(&'static str),
    Borrowed(&'k str),
    Owned(Box<str>),
}

impl Key<'static> {
    /**
    Create a symbolic key from a declared, static string.
    */
    pub const fn new(k: &'static str) -> Self {
        Key(Repr::Static(k))
    }

    pub fn new_owned(k: impl Into<Box<str>>) -> Self {
        Key(Repr::Owned(k.into()))
    }
}

impl<'k> Key<'k> {
    pub const fn new_ref(k: &'k str) -> Self {
        Key(Repr::Borrowed(k))
    }

    pub fn by_ref<'b>(&'b self) -> Key<'b> {
        match self.0 {
            Repr::Static(k) => Key(Repr::Static(k)),
            _ => Key(Repr::Borrowed(self.as_str())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self.0 {
            Repr::Static(k) => k,
            Repr::Borrowed(k) => k,
            Repr::Owned(ref k) => k,
        }
    }

    /**
    Get the key as a static string, if it was created from one.
    */
    pub fn as_static_str(&self) -> Option<&'static str> {
        match self.0 {
            Repr::Static(k) => Some(k),
            _ => None,
        }
    }

    pub fn is_symbolic(&self) -> bool {
        self.as_static_str().is_some()
    }

    pub fn to_owned(&self) -> Key<'static> {
        match self.0 {
            Repr::Static(k) => Key::new(k),
            _ => Key::new_owned(self.as_str()),
        }
    }
}

impl<'k> fmt::Debug for Key<'k> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<'k> fmt::Display for Key<'k> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl<'a> hash::Hash for Key<'a> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl<'a, 'b> PartialEq<Key<'b>> for Key<'a> {
    fn eq(&self, other: &Key<'b>) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<'a> Eq for Key<'a> {}

impl<'a> PartialEq<str> for Key<'a> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<'a, 'b> PartialEq<&'b str> for Key<'a> {
    fn eq(&self, other: &&'b str) -> bool {
        self.as_str() == *other
    }
}

impl<'a, 'b> PartialOrd<Key<'b>> for Key<'a> {
    fn partial_cmp(&self, other: &Key<'b>) -> Option<core::cmp::Ordering> {
        self.as_str().partial_cmp(other.as_str())
    }
}

impl<'a> Ord for Key<'a> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl<'k> Borrow<str> for Key<'k> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<'k> AsRef<str> for Key<'k> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(value: &'a str) -> Self {
        Key::new_ref(value)
    }
}

impl From<String> for Key<'static> {
    fn from(value: String) -> Self {
        Key::new_owned(value)
    }
}

/**
Convert a value into its canonical extra key.

Symbolic keys, like the variants of an enum of allowed extras, should return [`Key::new`] with their declared string.
*/
pub trait ToKey {
    fn to_key(&self) -> Key;
}

impl<'a, T: ToKey + ?Sized> ToKey for &'a T {
    fn to_key(&self) -> Key {
        (**self).to_key()
    }
}

impl<'k> ToKey for Key<'k> {
    fn to_key(&self) -> Key {
        self.by_ref()
    }
}

impl ToKey for str {
    fn to_key(&self) -> Key {
        Key::new_ref(self)
    }
}

impl ToKey for String {
    fn to_key(&self) -> Key {
        Key::new_ref(self)
    }
}

impl<'a> ToKey for Cow<'a, str> {
    fn to_key(&self) -> Key {
        match self {
            Cow::Borrowed(k) => Key::new_ref(k),
            Cow::Owned(k) => Key::new_ref(k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Reason {
        Crash,
    }

    impl ToKey for Reason {
        fn to_key(&self) -> Key {
            match self {
                Reason::Crash => Key::new("crash_reason"),
            }
        }
    }

    #[test]
    fn symbolic_key_resolves_to_declared_str() {
        let key = Reason::Crash.to_key();

        assert!(key.is_symbolic());
        assert_eq!(key, "crash_reason");
        assert_eq!(Some("crash_reason"), key.as_static_str());
    }

    #[test]
    fn string_keys_compare_by_value() {
        let owned = String::from("reason");

        assert_eq!(owned.to_key(), "reason".to_key());
        assert!(!owned.to_key().is_symbolic());
        assert_eq!(Key::new("reason"), owned.to_key().to_owned());
    }
}
