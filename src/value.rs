//! Property and attribute values.
//!
//! [`Value`] is the dynamic currency between a component's fields and the
//! resolvers: the derive reads each field through [`ToValue`], the resolvers
//! transform it into class tokens, style fragments, or attribute values, and
//! the tree builder hands the results to a [`TreeConsumer`](crate::tree::TreeConsumer).

use std::fmt;
use std::rc::Rc;

// ---------------------------------------------------------------------------
// EnumLabel
// ---------------------------------------------------------------------------

/// A fieldless enum member together with its declared label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumLabel {
    /// Variant identifier as written in source (`Primary`).
    pub name: &'static str,
    /// Label declared with `#[label("...")]`, if any.
    pub label: Option<&'static str>,
}

impl EnumLabel {
    /// A label for variant `name`.
    pub const fn new(name: &'static str, label: Option<&'static str>) -> Self {
        Self { name, label }
    }

    /// The token substituted into templates: the declared label, or the
    /// lower-cased variant name.
    pub fn token(&self) -> String {
        match self.label {
            Some(label) => label.to_owned(),
            None => self.name.to_lowercase(),
        }
    }
}

// ---------------------------------------------------------------------------
// Callback
// ---------------------------------------------------------------------------

/// An event handler carried as an attribute value.
///
/// Equality is identity: two callbacks are equal only if they share the same
/// allocation.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(&Value)>);

impl Callback {
    /// Wrap a handler.
    pub fn new(f: impl Fn(&Value) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the handler with an event payload.
    pub fn invoke(&self, payload: &Value) {
        (self.0)(payload)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A dynamically typed property or attribute value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value (`None` fields).
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A labeled enum member.
    Enum(EnumLabel),
    /// Tokens produced by a [`FluentRuleProvider`](crate::fluent::FluentRuleProvider).
    Rules(Vec<String>),
    Callback(Callback),
}

impl Value {
    /// Whether this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value takes part in string concatenation when merged.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// The text of a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The flag of a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Callback(_) => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Enum(label) => f.write_str(&label.token()),
            Value::Rules(tokens) => f.write_str(&tokens.join(" ")),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<EnumLabel> for Value {
    fn from(label: EnumLabel) -> Self {
        Value::Enum(label)
    }
}

impl From<Callback> for Value {
    fn from(cb: Callback) -> Self {
        Value::Callback(cb)
    }
}

// ---------------------------------------------------------------------------
// ToValue
// ---------------------------------------------------------------------------

/// Read a field as a [`Value`]. Implemented for every type a reflected field
/// may hold.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

macro_rules! int_to_value {
    ($($ty:ty),*) => {
        $(impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::Int(i64::from(*self))
            }
        })*
    };
}

int_to_value!(i8, i16, i32, i64, u8, u16, u32);

/// Unsigned integers past `i64::MAX` keep their exact digits as a string.
macro_rules! wide_int_to_value {
    ($($ty:ty),*) => {
        $(impl ToValue for $ty {
            fn to_value(&self) -> Value {
                i64::try_from(*self).map_or_else(|_| Value::Str(self.to_string()), Value::Int)
            }
        })*
    };
}

wide_int_to_value!(u64, usize, u128, i128);

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for EnumLabel {
    fn to_value(&self) -> Value {
        Value::Enum(*self)
    }
}

impl ToValue for Callback {
    fn to_value(&self) -> Value {
        Value::Callback(self.clone())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}
