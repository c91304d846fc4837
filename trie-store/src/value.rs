//! The default payload type of a store.
//!
//! [`Value`] is a closed set of the scalar, list, duration and time-point cases a settings
//! store needs to hold. The trie never looks inside a value; only [`dump`](crate::Trie::dump)
//! and [`append`](crate::Trie::append) care about the case.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use num_traits::NumCast;

/// A stored setting.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Duration(Duration),
    Time(DateTime<Utc>),
    BoolList(Vec<bool>),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
    StrList(Vec<String>),
    List(Vec<Value>),
}

impl Value {
    /// Name of the case, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Duration(_) => "duration",
            Value::Time(_) => "time",
            Value::BoolList(_) => "bool list",
            Value::IntList(_) => "int list",
            Value::FloatList(_) => "float list",
            Value::StrList(_) => "string list",
            Value::List(_) => "list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_str_list(&self) -> Option<&[String]> {
        match self {
            Value::StrList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Read a numeric (or boolean/char) value as any primitive number type.
    ///
    /// Returns `None` for non-numeric cases and for values that do not fit in `T`. Strings are
    /// parsed as floating point numbers first.
    pub fn to_num<T: NumCast>(&self) -> Option<T> {
        match self {
            Value::Bool(b) => T::from(<u8 as From<bool>>::from(*b)),
            Value::Char(c) => T::from(<u32 as From<char>>::from(*c)),
            Value::Int(i) => T::from(*i),
            Value::UInt(u) => T::from(*u),
            Value::Float(f) => T::from(*f),
            Value::Str(s) => s.trim().parse::<f64>().ok().and_then(T::from),
            Value::Duration(d) => T::from(d.as_secs_f64()),
            _ => None,
        }
    }

    /// Combine `self` with `other` the way `append` does.
    ///
    /// Lists of the same element type are concatenated, a list absorbs a scalar of its element
    /// type, strings are concatenated and `Null` yields to the other side. Any other pair
    /// becomes a heterogeneous [`Value::List`].
    pub fn merge(self, other: Value) -> Value {
        match (self, other) {
            (Value::Null, other) => other,
            (this, Value::Null) => this,
            (Value::Str(mut a), Value::Str(b)) => {
                a.push_str(&b);
                Value::Str(a)
            }
            (Value::BoolList(mut a), Value::BoolList(b)) => {
                a.extend(b);
                Value::BoolList(a)
            }
            (Value::BoolList(mut a), Value::Bool(b)) => {
                a.push(b);
                Value::BoolList(a)
            }
            (Value::IntList(mut a), Value::IntList(b)) => {
                a.extend(b);
                Value::IntList(a)
            }
            (Value::IntList(mut a), Value::Int(b)) => {
                a.push(b);
                Value::IntList(a)
            }
            (Value::FloatList(mut a), Value::FloatList(b)) => {
                a.extend(b);
                Value::FloatList(a)
            }
            (Value::FloatList(mut a), Value::Float(b)) => {
                a.push(b);
                Value::FloatList(a)
            }
            (Value::StrList(mut a), Value::StrList(b)) => {
                a.extend(b);
                Value::StrList(a)
            }
            (Value::StrList(mut a), Value::Str(b)) => {
                a.push(b);
                Value::StrList(a)
            }
            (Value::List(mut a), Value::List(b)) => {
                a.extend(b);
                Value::List(a)
            }
            (Value::List(mut a), b) => {
                a.push(b);
                Value::List(a)
            }
            (a, b) => Value::List(vec![a, b]),
        }
    }
}

fn fmt_duration(d: &Duration, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let secs = d.as_secs();
    let parts = [
        (secs / 3600, "h"),
        (secs / 60 % 60, "m"),
        (secs % 60, "s"),
        (<u64 as From<u32>>::from(d.subsec_millis()), "ms"),
        (<u64 as From<u32>>::from(d.subsec_micros() % 1000), "us"),
        (<u64 as From<u32>>::from(d.subsec_nanos() % 1000), "ns"),
    ];
    let mut first = true;
    for (amount, unit) in parts.iter().filter(|(amount, _)| *amount > 0) {
        if !first {
            f.write_str(":")?;
        }
        write!(f, "{amount}{unit}")?;
        first = false;
    }
    if first {
        f.write_str("0s")?;
    }
    Ok(())
}

fn fmt_items<T: fmt::Display>(items: &[T], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

/// Formats a list element: like `Display`, except that strings are not quoted.
struct Item<'a>(&'a Value);

impl fmt::Display for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Str(s) => f.write_str(s),
            Value::Char(c) => write!(f, "{c}"),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("<null>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "'{c}'"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Duration(d) => fmt_duration(d, f),
            Value::Time(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
            Value::BoolList(items) => fmt_items(items, f),
            Value::IntList(items) => fmt_items(items, f),
            Value::FloatList(items) => fmt_items(items, f),
            Value::StrList(items) => fmt_items(items, f),
            Value::List(items) => {
                let items: Vec<Item<'_>> = items.iter().map(Item).collect();
                fmt_items(&items, f)
            }
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $case:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$case(v.into())
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    char => Char,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => UInt,
    u16 => UInt,
    u32 => UInt,
    u64 => UInt,
    f32 => Float,
    f64 => Float,
    String => Str,
    &str => Str,
    Duration => Duration,
    DateTime<Utc> => Time,
    Vec<bool> => BoolList,
    Vec<i64> => IntList,
    Vec<f64> => FloatList,
    Vec<String> => StrList,
    Vec<Value> => List,
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::StrList(v.into_iter().map(str::to_string).collect())
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}
