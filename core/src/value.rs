use alloc::string::{String, ToString};
use core::fmt;

/**
An extra value before it's been stored.

Structured extras can carry booleans, integers, and anything else that can be displayed. They're all stored as strings, so every value is resolved through [`Value::to_extra_string`] before validation.
*/
#[derive(Clone)]
pub struct Value<'v>(value_bag::ValueBag<'v>);

impl<'v> Value<'v> {
    pub fn by_ref<'b>(&'b self) -> Value<'b> {
        Value(self.0.by_ref())
    }

    pub fn to_borrowed_str(&self) -> Option<&'v str> {
        self.0.to_borrowed_str()
    }

    pub fn to_extra_string(&self) -> String {
        match self.to_borrowed_str() {
            Some(value) => String::from(value),
            None => self.0.to_string(),
        }
    }
}

impl<'v> fmt::Debug for Value<'v> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<'v> fmt::Display for Value<'v> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl<'a, T: ToValue + ?Sized> ToValue for &'a T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<'v> ToValue for Value<'v> {
    fn to_value(&self) -> Value {
        self.by_ref()
    }
}

impl<'v> From<value_bag::ValueBag<'v>> for Value<'v> {
    fn from(value: value_bag::ValueBag<'v>) -> Self {
        Value(value)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::from(self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::from(self.as_str())
    }
}

impl<'v> From<&'v str> for Value<'v> {
    fn from(value: &'v str) -> Self {
        Value(value.into())
    }
}

macro_rules! impl_primitive {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }

            impl<'v> From<$ty> for Value<'v> {
                fn from(value: $ty) -> Self {
                    Value(value.into())
                }
            }
        )*
    };
}

impl_primitive!(bool, i32, i64, u32, u64, usize, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_resolve_to_display() {
        assert_eq!("true", true.to_value().to_extra_string());
        assert_eq!("42", 42i64.to_value().to_extra_string());
        assert_eq!("reason", "reason".to_value().to_extra_string());
    }
}
