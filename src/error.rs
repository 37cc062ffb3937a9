use std::fmt;

use crate::ParamType;

/// Errors that can occur in the parameter validation crate.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A request parameter failed validation
    Validation(ValidationError),
    /// A parameter specification was authored incorrectly
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(e) => write!(f, "Validation failed: {}", e),
            Error::Config(e) => write!(f, "Invalid parameter specification: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Validation(e) => Some(e),
            Error::Config(e) => Some(e),
        }
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

/// Why a parameter was rejected.
///
/// The string forms (`required`, `value`, `limits`, `custom`) are the
/// machine-readable codes exposed to HTTP clients and used as keys for
/// message overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    /// Value missing and no default configured
    Required,
    /// Value could not be coerced to the declared type
    Value,
    /// Value outside the configured `min`/`max`
    Limits,
    /// Custom validator rejected the value
    Custom,
}

impl ErrorCode {
    /// All codes, in the order they can occur during validation.
    pub const ALL: [ErrorCode; 4] = [
        ErrorCode::Required,
        ErrorCode::Value,
        ErrorCode::Limits,
        ErrorCode::Custom,
    ];

    /// Returns the wire name of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Required => "required",
            ErrorCode::Value => "value",
            ErrorCode::Limits => "limits",
            ErrorCode::Custom => "custom",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request parameter failed validation.
///
/// Carries the three fields an HTTP layer needs to build a 400 response:
/// the parameter name (`key`), the failure [`ErrorCode`], and the fully
/// resolved human-readable message. The declared type of the failing
/// parameter is kept as context.
///
/// # Examples
///
/// ```
/// use param_guard::{validate, ErrorCode, ParamSpec, ParamSpecs, ParamType, RawParams};
///
/// let specs = ParamSpecs::new()
///     .param("page", ParamSpec::builder(ParamType::Int).required().build().unwrap());
///
/// let err = validate(&specs, &RawParams::new(), None).unwrap_err();
/// assert_eq!(err.key(), "page");
/// assert_eq!(err.code(), ErrorCode::Required);
/// assert_eq!(err.message(), "\"page\" parameter is required");
/// assert_eq!(err.status_code(), 400);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    key: String,
    code: ErrorCode,
    message: String,
    param_type: ParamType,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(
        key: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        param_type: ParamType,
    ) -> Self {
        Self {
            key: key.into(),
            code,
            message: message.into(),
            param_type,
        }
    }

    /// Returns the name of the offending parameter.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the failure code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the resolved message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the declared type of the offending parameter.
    pub fn param_type(&self) -> ParamType {
        self.param_type
    }

    /// HTTP status an error translation layer should respond with.
    pub fn status_code(&self) -> u16 {
        400
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.key, self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Which side of a limit a configuration problem refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    /// The `min` bound
    Min,
    /// The `max` bound
    Max,
}

impl fmt::Display for BoundSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundSide::Min => write!(f, "min"),
            BoundSide::Max => write!(f, "max"),
        }
    }
}

/// A parameter specification was authored incorrectly.
///
/// These are programming mistakes caught while building specs at route
/// setup time. They are never produced while validating a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The type key is not one of the recognized parameter types
    UnknownType {
        /// The key that was given
        name: String,
    },
    /// A bound value has a type the parameter cannot be compared against
    BoundTypeMismatch {
        /// Which bound
        side: BoundSide,
        /// Declared parameter type
        expected: ParamType,
        /// Variant name of the bound that was supplied
        found: &'static str,
    },
    /// A bound value is unusable for the parameter type
    InvalidBound {
        /// Which bound
        side: BoundSide,
        /// What is wrong with it
        reason: String,
    },
    /// The default value cannot be coerced to the parameter type
    InvalidDefault {
        /// Why coercion failed
        reason: String,
    },
    /// Both bounds are concrete and `min` is greater than `max`
    InvertedBounds {
        /// Rendered `min`
        min: String,
        /// Rendered `max`
        max: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownType { name } => write!(
                f,
                "unknown parameter type '{}', expected one of {}",
                name,
                ParamType::KEYS.join(", ")
            ),
            ConfigError::BoundTypeMismatch {
                side,
                expected,
                found,
            } => write!(
                f,
                "{} bound of type {} cannot limit a {} parameter",
                side, found, expected
            ),
            ConfigError::InvalidBound { side, reason } => {
                write!(f, "invalid {} bound: {}", side, reason)
            }
            ConfigError::InvalidDefault { reason } => write!(f, "invalid default: {}", reason),
            ConfigError::InvertedBounds { min, max } => {
                write!(f, "min bound {} is greater than max bound {}", min, max)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_wire_names() {
        let names: Vec<_> = ErrorCode::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["required", "value", "limits", "custom"]);
        assert_eq!(format!("{}", ErrorCode::Limits), "limits");
    }

    #[test]
    fn validation_error_accessors() {
        let error = ValidationError::new("p1", ErrorCode::Value, "bad", ParamType::Int);

        assert_eq!(error.key(), "p1");
        assert_eq!(error.code(), ErrorCode::Value);
        assert_eq!(error.message(), "bad");
        assert_eq!(error.param_type(), ParamType::Int);
        assert_eq!(error.status_code(), 400);
    }

    #[test]
    fn validation_error_display() {
        let error = ValidationError::new("p1", ErrorCode::Custom, "nope", ParamType::Text);
        assert_eq!(format!("{}", error), "p1 (custom): nope");
    }

    #[test]
    fn unknown_type_lists_keys() {
        let error = ConfigError::UnknownType {
            name: "KillaGorilla".to_string(),
        };
        let output = error.to_string();

        assert!(output.contains("KillaGorilla"));
        assert!(output.contains("datetime"));
    }

    #[test]
    fn crate_error_wraps_both_classes() {
        let v: Error = ValidationError::new("k", ErrorCode::Required, "m", ParamType::Int).into();
        let c: Error = ConfigError::InvertedBounds {
            min: "5".to_string(),
            max: "1".to_string(),
        }
        .into();

        assert!(matches!(v, Error::Validation(_)));
        assert!(c.to_string().contains("min bound 5 is greater than max bound 1"));
    }
}
