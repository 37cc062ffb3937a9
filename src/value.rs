use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Format used when rendering and parsing `datetime` values.
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format used when rendering and parsing `date` values.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// An untyped input value as it arrives at the request boundary.
///
/// Query strings and form bodies only ever produce [`RawValue::Text`]. The
/// other variants exist for programmatic callers that already hold native
/// values; coercion accepts both shapes for every parameter type.
///
/// # Examples
///
/// ```
/// use param_guard::RawValue;
///
/// assert!(RawValue::from("").is_empty());
/// assert!(RawValue::from(0).is_empty());
/// assert!(!RawValue::from("0").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Explicit null / no value
    Null,
    /// Boolean flag
    Bool(bool),
    /// Native integer
    Int(i64),
    /// Native float
    Float(f64),
    /// Text, typically straight from a query string or form field
    Text(String),
    /// Native decimal
    Decimal(Decimal),
    /// Native calendar date
    Date(NaiveDate),
    /// Native date and time without offset
    DateTime(NaiveDateTime),
}

impl RawValue {
    /// Returns `true` if the value counts as "not supplied".
    ///
    /// Empty means null, empty text, numeric zero or `false`. Whitespace-only
    /// text is *not* empty.
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Bool(b) => !b,
            RawValue::Int(i) => *i == 0,
            RawValue::Float(f) => *f == 0.0,
            RawValue::Text(s) => s.is_empty(),
            RawValue::Decimal(d) => d.is_zero(),
            RawValue::Date(_) | RawValue::DateTime(_) => false,
        }
    }

    /// Short name of the variant, used in coercion diagnostics.
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "bool",
            RawValue::Int(_) => "int",
            RawValue::Float(_) => "float",
            RawValue::Text(_) => "text",
            RawValue::Decimal(_) => "decimal",
            RawValue::Date(_) => "date",
            RawValue::DateTime(_) => "datetime",
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Int(i)
    }
}

impl From<i32> for RawValue {
    fn from(i: i32) -> Self {
        RawValue::Int(i64::from(i))
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        RawValue::Float(f)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<Decimal> for RawValue {
    fn from(d: Decimal) -> Self {
        RawValue::Decimal(d)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(d: NaiveDate) -> Self {
        RawValue::Date(d)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(dt: NaiveDateTime) -> Self {
        RawValue::DateTime(dt)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(RawValue::Null, Into::into)
    }
}

/// A typed, validated parameter value.
///
/// Produced by coercion; one variant per [`ParamType`](crate::ParamType).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `int` parameter
    Int(i64),
    /// `text` parameter
    Text(String),
    /// `float` parameter
    Float(f64),
    /// `decimal` parameter, exact
    Decimal(Decimal),
    /// `date` parameter
    Date(NaiveDate),
    /// `datetime` parameter
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns the integer if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the text if this is a `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the float if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the decimal if this is a `Decimal`.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the date if this is a `Date`.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the datetime if this is a `DateTime`.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Orders two values of the same variant.
    ///
    /// Returns `None` for mismatched variants and for NaN floats.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "{}", s),
            Value::Float(x) => write_float(f, *x),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

/// Very large and very small magnitudes use a signed two-digit exponent
/// (`1e+20`, `1e-05`) so bounds stay readable in messages.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let magnitude = x.abs();
    if !x.is_finite() || x == 0.0 || (1e-4..1e16).contains(&magnitude) {
        return write!(f, "{}", x);
    }
    let sci = format!("{:e}", x);
    match sci.split_once('e') {
        Some((mantissa, exp)) => match exp.strip_prefix('-') {
            Some(digits) => write!(f, "{}e-{:0>2}", mantissa, digits),
            None => write!(f, "{}e+{:0>2}", mantissa, exp),
        },
        None => f.write_str(&sci),
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}
