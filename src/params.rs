use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::{RawValue, Tainted, Value};

/// Raw request parameters, every value wrapped in [`Tainted`].
///
/// # Examples
///
/// ```
/// use param_guard::RawParams;
///
/// let input: RawParams = [("p1", "1"), ("p2", "abc")].into_iter().collect();
/// assert_eq!(input.len(), 2);
/// assert!(input.contains("p1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParams {
    values: HashMap<String, Tainted<RawValue>>,
}

impl RawParams {
    /// Creates an empty input set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, returning the set for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.values
            .insert(name.into(), Tainted::new(value.into()));
    }

    /// Returns the tainted value for a name.
    pub fn get(&self, name: &str) -> Option<&Tainted<RawValue>> {
        self.values.get(name)
    }

    /// Returns `true` if a value was supplied under `name`, even an empty one.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of supplied values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawParams
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RawParams::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Parameters that passed validation, keyed by name.
///
/// Only the crate's validator constructs this type, so holding a
/// `ValidParams` proves every value was coerced and checked. Parameters that
/// were optional, absent and had no default are not present.
///
/// # Examples
///
/// ```
/// use param_guard::{validate, ParamSpec, ParamSpecs, ParamType, RawParams};
///
/// let specs = ParamSpecs::new()
///     .param("page", ParamSpec::builder(ParamType::Int).default(1).build().unwrap())
///     .param("q", ParamSpec::builder(ParamType::Text).build().unwrap());
///
/// let params = validate(&specs, &RawParams::new(), None).unwrap();
/// assert_eq!(params.get_int("page"), Some(1));
/// assert!(!params.contains("q"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidParams {
    values: HashMap<String, Value>,
}

impl ValidParams {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Returns the value for a name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns an `int` parameter.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    /// Returns a `text` parameter.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    /// Returns a `float` parameter.
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    /// Returns a `decimal` parameter.
    pub fn get_decimal(&self, name: &str) -> Option<Decimal> {
        self.get(name).and_then(Value::as_decimal)
    }

    /// Returns a `date` parameter.
    pub fn get_date(&self, name: &str) -> Option<NaiveDate> {
        self.get(name).and_then(Value::as_date)
    }

    /// Returns a `datetime` parameter.
    pub fn get_datetime(&self, name: &str) -> Option<NaiveDateTime> {
        self.get(name).and_then(Value::as_datetime)
    }

    /// Returns `true` if the parameter is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterates over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of validated parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no parameter made it into the output.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the set and returns the underlying map.
    pub fn into_inner(self) -> HashMap<String, Value> {
        self.values
    }
}

impl AsRef<HashMap<String, Value>> for ValidParams {
    fn as_ref(&self) -> &HashMap<String, Value> {
        &self.values
    }
}
