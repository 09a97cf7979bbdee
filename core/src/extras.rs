/*!
The [`Extras`] type.

Extras are the key-value annotations attached to a single recorded event. Callers can supply them in a few shapes:

- nothing at all, using [`Empty`] or `None`.
- a raw mapping, like a `BTreeMap<String, String>`, a `HashMap`, or a slice of pairs.
- a structured type that knows how to enumerate its own extras by implementing [`Extras`] directly.

All of them are resolved to a single canonical mapping by [`crate::validate::validate`].
*/

use alloc::{boxed::Box, collections::BTreeMap, sync::Arc, vec::Vec};
use core::ops::ControlFlow;

use crate::{
    empty::Empty,
    key::{Key, ToKey},
    value::{ToValue, Value},
};

pub trait Extras {
    fn for_each<'kv, F: FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>>(
        &'kv self,
        for_each: F,
    ) -> ControlFlow<()>;

    fn get<'v, K: ToKey>(&'v self, key: K) -> Option<Value<'v>> {
        let key = key.to_key();
        let mut value = None;

        self.for_each(|k, v| {
            if k == key {
                value = Some(v);

                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        value
    }

    fn count(&self) -> usize {
        let mut count = 0;

        self.for_each(|_, _| {
            count += 1;

            ControlFlow::Continue(())
        });

        count
    }

    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl<'a, E: Extras + ?Sized> Extras for &'a E {
    fn for_each<'kv, F: FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>>(
        &'kv self,
        for_each: F,
    ) -> ControlFlow<()> {
        (**self).for_each(for_each)
    }

    fn get<'v, K: ToKey>(&'v self, key: K) -> Option<Value<'v>> {
        (**self).get(key)
    }

    fn count(&self) -> usize {
        (**self).count()
    }
}

impl<E: Extras> Extras for Option<E> {
    fn for_each<'kv, F: FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>>(
        &'kv self,
        for_each: F,
    ) -> ControlFlow<()> {
        match self {
            Some(extras) => extras.for_each(for_each),
            None => ControlFlow::Continue(()),
        }
    }
}

impl<'a, E: Extras + ?Sized + 'a> Extras for Box<E> {
    fn for_each<'kv, F: FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>>(
        &'kv self,
        for_each: F,
    ) -> ControlFlow<()> {
        (**self).for_each(for_each)
    }
}

impl<'a, E: Extras + ?Sized + 'a> Extras for Arc<E> {
    fn for_each<'kv, F: FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>>(
        &'kv self,
        for_each: F,
    ) -> ControlFlow<()> {
        (**self).for_each(for_each)
    }
}

impl<K: ToKey, V: ToValue> Extras for (K, V) {
    fn for_each<'kv, F: FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>>(
        &'kv self,
        mut for_each: F,
    ) -> ControlFlow<()> {
        for_each(self.0.to_key(), self.1.to_value())
    }

    fn count(&self) -> usize {
        1
    }
}

impl<E: Extras> Extras for [E] {
    fn for_each<'kv, F: FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>>(
        &'kv self,
        mut for_each: F,
    ) -> ControlFlow<()> {
        for extras in self {
            extras.for_each(&mut for_each)?;
        }

        ControlFlow::Continue(())
    }

    fn count(&self) -> usize {
        self.iter().map(|extras| extras.count()).sum()
    }
}

impl<T, const N: usize> Extras for [T; N]
where
    [T]: Extras,
{
    fn for_each<'kv, F: FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>>(
        &'kv self,
        for_each: F,
    ) -> ControlFlow<()> {
        (self as &[_]).for_each(for_each)
    }

    fn count(&self) -> usize {
        (self as &[_]).count()
    }
}

impl<E: Extras> Extras for Vec<E> {
    fn for_each<'kv, F: FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>>(
        &'kv self,
        for_each: F,
    ) -> ControlFlow<()> {
        self.as_slice().for_each(for_each)
    }

    fn count(&self) -> usize {
        self.as_slice().count()
    }
}

impl<K: ToKey, V: ToValue> Extras for BTreeMap<K, V> {
    fn for_each<'kv, F: FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>>(
        &'kv self,
        mut for_each: F,
    ) -> ControlFlow<()> {
        for (k, v) in self {
            for_each(k.to_key(), v.to_value())?;
        }

        ControlFlow::Continue(())
    }

    fn count(&self) -> usize {
        self.len()
    }
}

#[cfg(feature = "std")]
impl<K: ToKey, V: ToValue, S> Extras for std::collections::HashMap<K, V, S> {
    fn for_each<'kv, F: FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>>(
        &'kv self,
        mut for_each: F,
    ) -> ControlFlow<()> {
        for (k, v) in self {
            for_each(k.to_key(), v.to_value())?;
        }

        ControlFlow::Continue(())
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl Extras for Empty {
    fn for_each<'kv, F: FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>>(
        &'kv self,
        _: F,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn count(&self) -> usize {
        0
    }
}

mod internal {
    use core::ops::ControlFlow;

    use crate::{key::Key, value::Value};

    pub trait DispatchExtras {
        fn dispatch_for_each<'kv, 'f>(
            &'kv self,
            for_each: &'f mut dyn FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>,
        ) -> ControlFlow<()>;

        fn dispatch_count(&self) -> usize;
    }

    pub trait SealedExtras {
        fn erase_extras(&self) -> crate::internal::Erased<&dyn DispatchExtras>;
    }
}

/**
An object-safe [`Extras`].

Any `&impl Extras` can be passed where a `&dyn ErasedExtras` is expected.
*/
pub trait ErasedExtras: internal::SealedExtras {}

impl<E: Extras> ErasedExtras for E {}

impl<E: Extras> internal::SealedExtras for E {
    fn erase_extras(&self) -> crate::internal::Erased<&dyn internal::DispatchExtras> {
        crate::internal::Erased(self)
    }
}

impl<E: Extras> internal::DispatchExtras for E {
    fn dispatch_for_each<'kv, 'f>(
        &'kv self,
        for_each: &'f mut dyn FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        self.for_each(for_each)
    }

    fn dispatch_count(&self) -> usize {
        self.count()
    }
}

impl<'a> Extras for dyn ErasedExtras + 'a {
    fn for_each<'kv, F: FnMut(Key<'kv>, Value<'kv>) -> ControlFlow<()>>(
        &'kv self,
        mut for_each: F,
    ) -> ControlFlow<()> {
        self.erase_extras().0.dispatch_for_each(&mut for_each)
    }

    fn count(&self) -> usize {
        self.erase_extras().0.dispatch_count()
    }
}
