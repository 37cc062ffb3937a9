use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::value::{DATETIME_FORMAT, DATE_FORMAT};
use crate::{ParamType, RawValue, Tainted, Value};

/// Error returned when a raw value cannot be interpreted as the declared type.
///
/// The validator never surfaces this directly: it is turned into a
/// [`ValidationError`](crate::ValidationError) with code
/// [`ErrorCode::Value`](crate::ErrorCode::Value). The message names what was
/// expected but never echoes the rejected input.
///
/// # Examples
///
/// ```
/// use param_guard::{CoercionError, CoercionErrorKind};
///
/// let error = CoercionError::new(CoercionErrorKind::Malformed, "not an integer");
/// assert_eq!(error.kind(), CoercionErrorKind::Malformed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionError {
    kind: CoercionErrorKind,
    message: String,
}

impl CoercionError {
    /// Creates a new coercion error.
    pub fn new(kind: CoercionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> CoercionErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "coercion failed ({}): {}", self.kind, self.message)
    }
}

impl std::error::Error for CoercionError {}

/// Kind of coercion error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionErrorKind {
    /// Text does not have the required syntax
    Malformed,
    /// The raw value's variant cannot become the declared type
    Unsupported,
    /// The value does not fit the target representation
    OutOfRange,
    /// Coercion was called on a null value
    Missing,
}

impl fmt::Display for CoercionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed input"),
            Self::Unsupported => write!(f, "unsupported input"),
            Self::OutOfRange => write!(f, "out of range"),
            Self::Missing => write!(f, "missing input"),
        }
    }
}

/// Converts tainted raw input into a typed [`Value`].
///
/// `ParamType` implements this trait; it is the coercion table. Custom
/// implementations can be used directly by callers that need a one-off
/// conversion outside a [`ParamSpec`](crate::ParamSpec).
///
/// # Invariants
///
/// Implementations MUST:
/// - Trim surrounding whitespace before parsing text (except for text itself)
/// - Return `Err(CoercionError)` rather than panic on any input
/// - Not echo the raw input in error messages
///
/// # Examples
///
/// ```
/// use param_guard::{Coercer, ParamType, RawValue, Tainted, Value};
///
/// let value = ParamType::Int.coerce(Tainted::new(RawValue::from(" 3 "))).unwrap();
/// assert_eq!(value, Value::Int(3));
///
/// assert!(ParamType::Int.coerce(Tainted::new(RawValue::from("aa"))).is_err());
/// ```
pub trait Coercer {
    /// Coerces a tainted raw value into a typed value.
    ///
    /// # Errors
    ///
    /// Returns `CoercionError` if the input cannot be interpreted.
    fn coerce(&self, input: Tainted<RawValue>) -> Result<Value, CoercionError>;
}

impl Coercer for ParamType {
    fn coerce(&self, input: Tainted<RawValue>) -> Result<Value, CoercionError> {
        let raw = input.into_inner();
        if raw == RawValue::Null {
            return Err(CoercionError::new(
                CoercionErrorKind::Missing,
                format!("cannot coerce null to {}", self),
            ));
        }

        match self {
            ParamType::Int => to_int(raw).map(Value::Int),
            ParamType::Text => Ok(Value::Text(to_text(raw))),
            ParamType::Float => to_float(raw).map(Value::Float),
            ParamType::Decimal => to_decimal(raw).map(Value::Decimal),
            ParamType::Date => to_date(raw).map(Value::Date),
            ParamType::DateTime => to_datetime(raw).map(Value::DateTime),
        }
    }
}

fn unsupported(raw: &RawValue, target: ParamType) -> CoercionError {
    CoercionError::new(
        CoercionErrorKind::Unsupported,
        format!("{} input cannot become {}", raw.kind_name(), target),
    )
}

fn to_int(raw: RawValue) -> Result<i64, CoercionError> {
    match raw {
        RawValue::Int(i) => Ok(i),
        RawValue::Bool(b) => Ok(i64::from(b)),
        RawValue::Text(s) => s.trim().parse::<i64>().map_err(|_| {
            CoercionError::new(CoercionErrorKind::Malformed, "expected an integer")
        }),
        // Fractions are truncated toward zero.
        RawValue::Float(f) => {
            let t = f.trunc();
            if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
                Ok(t as i64)
            } else {
                Err(CoercionError::new(
                    CoercionErrorKind::OutOfRange,
                    "float does not fit a 64-bit integer",
                ))
            }
        }
        RawValue::Decimal(d) => d.trunc().to_i64().ok_or_else(|| {
            CoercionError::new(
                CoercionErrorKind::OutOfRange,
                "decimal does not fit a 64-bit integer",
            )
        }),
        other => Err(unsupported(&other, ParamType::Int)),
    }
}

fn to_text(raw: RawValue) -> String {
    match raw {
        RawValue::Text(s) => s,
        RawValue::Int(i) => i.to_string(),
        RawValue::Float(f) => f.to_string(),
        RawValue::Bool(b) => b.to_string(),
        RawValue::Decimal(d) => d.to_string(),
        RawValue::Date(d) => d.format(DATE_FORMAT).to_string(),
        RawValue::DateTime(dt) => dt.format(DATETIME_FORMAT).to_string(),
        RawValue::Null => String::new(),
    }
}

fn to_float(raw: RawValue) -> Result<f64, CoercionError> {
    match raw {
        RawValue::Float(f) => Ok(f),
        RawValue::Int(i) => Ok(i as f64),
        RawValue::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
        RawValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CoercionError::new(CoercionErrorKind::Malformed, "expected a number")),
        RawValue::Decimal(d) => d.to_f64().ok_or_else(|| {
            CoercionError::new(CoercionErrorKind::OutOfRange, "decimal does not fit a float")
        }),
        other => Err(unsupported(&other, ParamType::Float)),
    }
}

fn to_decimal(raw: RawValue) -> Result<Decimal, CoercionError> {
    match raw {
        RawValue::Decimal(d) => Ok(d),
        RawValue::Int(i) => Ok(Decimal::from(i)),
        RawValue::Bool(b) => Ok(Decimal::from(i64::from(b))),
        RawValue::Text(s) => {
            let s = s.trim();
            // Parsed from the text itself, never through f64.
            let d = Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .map_err(|_| {
                    CoercionError::new(CoercionErrorKind::Malformed, "expected a decimal")
                })?;
            // The parser rounds past 28 significant digits instead of failing.
            let mantissa = s.split(['e', 'E']).next().unwrap_or(s);
            if significant_digits(mantissa) != significant_digits(&d.to_string()) {
                return Err(CoercionError::new(
                    CoercionErrorKind::OutOfRange,
                    "decimal has more digits than can be kept exactly",
                ));
            }
            Ok(d)
        }
        RawValue::Float(f) => Decimal::try_from(f).map_err(|_| {
            CoercionError::new(CoercionErrorKind::OutOfRange, "float does not fit a decimal")
        }),
        other => Err(unsupported(&other, ParamType::Decimal)),
    }
}

/// Digits of a plain decimal literal without sign, point, or leading and
/// trailing zeros.
fn significant_digits(s: &str) -> String {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    digits.trim_start_matches('0').trim_end_matches('0').to_string()
}

/// Checks `s` against a shape where `d` stands for an ASCII digit and every
/// other byte must match literally.
fn has_shape(s: &str, shape: &str) -> bool {
    s.len() == shape.len()
        && s.bytes().zip(shape.bytes()).all(|(c, p)| match p {
            b'd' => c.is_ascii_digit(),
            lit => c == lit,
        })
}

fn to_date(raw: RawValue) -> Result<NaiveDate, CoercionError> {
    match raw {
        RawValue::Date(d) => Ok(d),
        RawValue::Text(s) => {
            let s = s.trim();
            if !has_shape(s, "dddd-dd-dd") {
                return Err(CoercionError::new(
                    CoercionErrorKind::Malformed,
                    "expected a date as YYYY-MM-DD",
                ));
            }
            NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| {
                CoercionError::new(CoercionErrorKind::OutOfRange, "no such calendar date")
            })
        }
        other => Err(unsupported(&other, ParamType::Date)),
    }
}

fn to_datetime(raw: RawValue) -> Result<NaiveDateTime, CoercionError> {
    match raw {
        RawValue::DateTime(dt) => Ok(dt),
        RawValue::Text(s) => {
            let s = s.trim();
            let s = s.strip_suffix('Z').unwrap_or(s);
            if !has_shape(s, "dddd-dd-ddTdd:dd:dd") {
                return Err(CoercionError::new(
                    CoercionErrorKind::Malformed,
                    "expected a datetime as YYYY-MM-DDTHH:MM:SS",
                ));
            }
            NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).map_err(|_| {
                CoercionError::new(CoercionErrorKind::OutOfRange, "no such calendar datetime")
            })
        }
        other => Err(unsupported(&other, ParamType::DateTime)),
    }
}
