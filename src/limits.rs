//! Bounds for parameter values and the aliases resolved at validation time.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Days, Local, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{BoundSide, ConfigError};
use crate::{Coercer, ParamType, RawValue, Tainted, Value};

/// Source of the current date for resolving limit aliases.
///
/// Validation asks the clock on every call, so a spec built once at startup
/// with `max("today")` keeps tracking the calendar.
pub trait Clock: Send + Sync {
    /// Returns the current date.
    fn today(&self) -> NaiveDate;
}

/// The local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use param_guard::{Clock, FixedClock};
///
/// let day = NaiveDate::from_ymd_opt(2012, 6, 30).unwrap();
/// assert_eq!(FixedClock::new(day).today(), day);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    /// Creates a clock that always reports `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// A named bound whose value depends on when validation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitAlias {
    /// The current date
    Today,
    /// The day after the current date
    Tomorrow,
}

impl LimitAlias {
    /// Returns the alias name as written in specs.
    pub fn name(self) -> &'static str {
        match self {
            LimitAlias::Today => "today",
            LimitAlias::Tomorrow => "tomorrow",
        }
    }

    /// Produces the concrete bound for the clock's current date.
    pub fn resolve(self, clock: &dyn Clock) -> Value {
        let today = clock.today();
        match self {
            LimitAlias::Today => Value::Date(today),
            LimitAlias::Tomorrow => {
                Value::Date(today.checked_add_days(Days::new(1)).unwrap_or(today))
            }
        }
    }
}

/// A configured `min` or `max`.
#[derive(Debug, Clone, PartialEq)]
pub enum Limit {
    /// A concrete bound of the parameter's type (a length for text)
    Value(Value),
    /// A bound resolved when validation runs
    Alias(LimitAlias),
}

impl Limit {
    /// Normalizes a configured bound for a parameter of type `ty`.
    ///
    /// - text parameters take non-negative integer lengths
    /// - integers widen to `float` and `decimal`; floats convert to `decimal`
    /// - a text bound on a non-text parameter is a registered alias for that
    ///   type, or else a literal parsed with the type's own coercion
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the bound cannot limit this type.
    pub fn for_type(ty: ParamType, side: BoundSide, bound: Value) -> Result<Limit, ConfigError> {
        let mismatch = |found: &'static str| ConfigError::BoundTypeMismatch {
            side,
            expected: ty,
            found,
        };

        let normalized = match (ty, bound) {
            (ParamType::Text, Value::Int(n)) if n < 0 => {
                return Err(ConfigError::InvalidBound {
                    side,
                    reason: format!("length bound {} is negative", n),
                })
            }
            (ParamType::Text, Value::Int(n)) => Value::Int(n),
            (ParamType::Text, other) => return Err(mismatch(variant_name(&other))),

            (ty, Value::Text(name)) => {
                if let Some(alias) = ty.limit_alias(&name) {
                    return Ok(Limit::Alias(alias));
                }
                ty.coerce(Tainted::new(RawValue::Text(name)))
                    .map_err(|e| ConfigError::InvalidBound {
                        side,
                        reason: e.message().to_string(),
                    })?
            }

            (ParamType::Int, Value::Int(n)) => Value::Int(n),
            (ParamType::Float, Value::Int(n)) => Value::Float(n as f64),
            (ParamType::Float, Value::Float(x)) if x.is_nan() => {
                return Err(ConfigError::InvalidBound {
                    side,
                    reason: "NaN cannot be compared".to_string(),
                })
            }
            (ParamType::Float, Value::Float(x)) => Value::Float(x),
            (ParamType::Decimal, Value::Int(n)) => Value::Decimal(Decimal::from(n)),
            (ParamType::Decimal, Value::Float(x)) => {
                Value::Decimal(Decimal::try_from(x).map_err(|_| ConfigError::InvalidBound {
                    side,
                    reason: format!("{} is not representable as a decimal", x),
                })?)
            }
            (ParamType::Decimal, Value::Decimal(d)) => Value::Decimal(d),
            (ParamType::Date, Value::Date(d)) => Value::Date(d),
            (ParamType::DateTime, Value::DateTime(dt)) => Value::DateTime(dt),
            (_, other) => return Err(mismatch(variant_name(&other))),
        };

        Ok(Limit::Value(normalized))
    }

    /// Returns the concrete bound, resolving aliases against `clock`.
    pub fn resolve(&self, clock: &dyn Clock) -> Value {
        match self {
            Limit::Value(v) => v.clone(),
            Limit::Alias(alias) => alias.resolve(clock),
        }
    }
}

/// Renders the bound as configured, so aliases show by name.
impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Value(v) => write!(f, "{}", v),
            Limit::Alias(alias) => f.write_str(alias.name()),
        }
    }
}

fn variant_name(value: &Value) -> &'static str {
    match value {
        Value::Int(_) => "int",
        Value::Text(_) => "text",
        Value::Float(_) => "float",
        Value::Decimal(_) => "decimal",
        Value::Date(_) => "date",
        Value::DateTime(_) => "datetime",
    }
}

/// Checks `value` against the bounds and returns the failure fragment.
///
/// Text compares its length in characters; everything else compares the
/// value itself. Both bounds are inclusive. `max` is checked first. Values
/// that cannot be ordered against a bound (NaN, or a `process` hook that
/// changed the variant) pass that bound.
pub(crate) fn check(
    ty: ParamType,
    value: &Value,
    min: Option<&Limit>,
    max: Option<&Limit>,
    clock: &dyn Clock,
) -> Option<String> {
    let length;
    let (subject, above, below) = match value.as_text() {
        Some(text) if ty.limits_by_length() => {
            length = Value::from(text.chars().count());
            (&length, "shorter", "longer")
        }
        _ => (value, "less", "greater"),
    };

    if let Some(max) = max {
        if subject.compare(&max.resolve(clock)) == Some(Ordering::Greater) {
            return Some(format!("must be {} than {}", above, max));
        }
    }
    if let Some(min) = min {
        if subject.compare(&min.resolve(clock)) == Some(Ordering::Less) {
            return Some(format!("must be {} than {}", below, min));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn limit(ty: ParamType, bound: impl Into<Value>) -> Limit {
        Limit::for_type(ty, BoundSide::Max, bound.into()).expect("valid bound")
    }

    #[test]
    fn int_bounds_are_inclusive() {
        let clock = SystemClock;
        let (min, max) = (limit(ParamType::Int, 0), limit(ParamType::Int, 10));
        let run = |n: i64| check(ParamType::Int, &Value::Int(n), Some(&min), Some(&max), &clock);

        assert_eq!(run(0), None);
        assert_eq!(run(1), None);
        assert_eq!(run(10), None);
        assert_eq!(run(-1).as_deref(), Some("must be greater than 0"));
        assert_eq!(run(11).as_deref(), Some("must be less than 10"));
    }

    #[test]
    fn text_bounds_use_length() {
        let clock = SystemClock;
        let (min, max) = (limit(ParamType::Text, 1), limit(ParamType::Text, 4));
        let run = |s: &str| check(ParamType::Text, &Value::from(s), Some(&min), Some(&max), &clock);

        assert_eq!(run("a"), None);
        assert_eq!(run("aaaa"), None);
        assert_eq!(run("zzzz"), None);
        assert_eq!(run("").as_deref(), Some("must be longer than 1"));
        assert_eq!(run("aaaaa").as_deref(), Some("must be shorter than 4"));
        // Characters, not bytes.
        assert_eq!(run("ёжик"), None);
    }

    #[test]
    fn float_bounds() {
        let clock = SystemClock;
        let (min, max) = (limit(ParamType::Float, 0.1), limit(ParamType::Float, 0.9));
        let run = |x: f64| check(ParamType::Float, &Value::Float(x), Some(&min), Some(&max), &clock);

        assert_eq!(run(0.1), None);
        assert_eq!(run(0.9), None);
        assert_eq!(run(0.09).as_deref(), Some("must be greater than 0.1"));
        assert_eq!(run(0.91).as_deref(), Some("must be less than 0.9"));
        assert_eq!(run(f64::NAN), None);
    }

    #[test]
    fn max_is_checked_before_min() {
        let clock = SystemClock;
        // Inverted bounds are rejected by the spec builder; here both fail.
        let (min, max) = (limit(ParamType::Int, 10), limit(ParamType::Int, 0));
        let message = check(ParamType::Int, &Value::Int(5), Some(&min), Some(&max), &clock);

        assert_eq!(message.as_deref(), Some("must be less than 0"));
    }

    #[test]
    fn date_alias_resolves_against_clock() {
        let max = limit(ParamType::Date, "today");
        assert_eq!(max, Limit::Alias(LimitAlias::Today));

        let monday = FixedClock::new(date(2012, 6, 4));
        let tuesday = FixedClock::new(date(2012, 6, 5));
        let value = Value::Date(date(2012, 6, 5));

        assert_eq!(
            check(ParamType::Date, &value, None, Some(&max), &monday).as_deref(),
            Some("must be less than today")
        );
        assert_eq!(check(ParamType::Date, &value, None, Some(&max), &tuesday), None);
    }

    #[test]
    fn tomorrow_is_one_day_after_today() {
        let clock = FixedClock::new(date(2012, 12, 31));
        assert_eq!(
            LimitAlias::Tomorrow.resolve(&clock),
            Value::Date(date(2013, 1, 1))
        );
    }

    #[test]
    fn unregistered_name_is_parsed_as_literal() {
        assert_eq!(
            limit(ParamType::Date, "2012-12-31"),
            Limit::Value(Value::Date(date(2012, 12, 31)))
        );
        assert_eq!(limit(ParamType::Int, "7"), Limit::Value(Value::Int(7)));

        // "today" only aliases for dates.
        let err = Limit::for_type(ParamType::DateTime, BoundSide::Min, "today".into()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBound { side: BoundSide::Min, .. }));
    }

    #[test]
    fn numeric_bounds_widen() {
        assert_eq!(limit(ParamType::Float, 1), Limit::Value(Value::Float(1.0)));
        assert_eq!(
            limit(ParamType::Decimal, 5),
            Limit::Value(Value::Decimal(Decimal::from(5)))
        );
        assert_eq!(
            limit(ParamType::Decimal, 1.25),
            Limit::Value(Value::Decimal(Decimal::new(125, 2)))
        );
    }

    #[test]
    fn mismatched_bounds_are_rejected() {
        let err = Limit::for_type(ParamType::Int, BoundSide::Max, Value::Float(1.5)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::BoundTypeMismatch {
                side: BoundSide::Max,
                expected: ParamType::Int,
                found: "float",
            }
        );

        let err = Limit::for_type(ParamType::Text, BoundSide::Min, Value::from("a")).unwrap_err();
        assert!(matches!(err, ConfigError::BoundTypeMismatch { .. }));

        let err = Limit::for_type(ParamType::Text, BoundSide::Min, Value::Int(-1)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBound { .. }));
    }

    #[test]
    fn limit_display_keeps_alias_name() {
        assert_eq!(Limit::Alias(LimitAlias::Tomorrow).to_string(), "tomorrow");
        assert_eq!(limit(ParamType::Int, 10).to_string(), "10");
    }
}
