use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::limits::LimitAlias;

/// The declared type of a request parameter.
///
/// This is the closed set of types the coercion table knows about. Adding a
/// type means adding a variant here, which forces every `match` over it
/// (coercion, limit semantics, alias lookup) to handle the new case.
///
/// # Examples
///
/// ```
/// use param_guard::ParamType;
///
/// let ty: ParamType = "decimal".parse().unwrap();
/// assert_eq!(ty, ParamType::Decimal);
/// assert!("KillaGorilla".parse::<ParamType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// 64-bit signed integer
    Int,
    /// Free text; limits apply to its length
    Text,
    /// 64-bit float
    Float,
    /// Exact decimal
    Decimal,
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DDTHH:MM:SS`, optional trailing `Z`
    DateTime,
}

impl ParamType {
    /// Recognized type keys.
    pub const KEYS: [&'static str; 6] = ["int", "text", "float", "decimal", "date", "datetime"];

    /// Returns the type key used in specs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            ParamType::Int => "int",
            ParamType::Text => "text",
            ParamType::Float => "float",
            ParamType::Decimal => "decimal",
            ParamType::Date => "date",
            ParamType::DateTime => "datetime",
        }
    }

    /// Whether `min`/`max` compare against the value's length instead of the value.
    pub fn limits_by_length(self) -> bool {
        matches!(self, ParamType::Text)
    }

    /// Looks up a named limit alias registered for this type.
    ///
    /// Alias lookup is scoped by type: only `date` registers aliases
    /// (`today`, `tomorrow`), so the same name on any other type is not an alias.
    pub fn limit_alias(self, name: &str) -> Option<LimitAlias> {
        match (self, name) {
            (ParamType::Date, "today") => Some(LimitAlias::Today),
            (ParamType::Date, "tomorrow") => Some(LimitAlias::Tomorrow),
            _ => None,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(ParamType::Int),
            // Legacy key from older API definitions.
            "text" | "unicode" => Ok(ParamType::Text),
            "float" => Ok(ParamType::Float),
            "decimal" => Ok(ParamType::Decimal),
            "date" => Ok(ParamType::Date),
            "datetime" => Ok(ParamType::DateTime),
            other => Err(ConfigError::UnknownType {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_str() {
        for key in ParamType::KEYS {
            let ty: ParamType = key.parse().expect("recognized key");
            assert_eq!(ty.name(), key);
        }
    }

    #[test]
    fn unicode_is_text() {
        assert_eq!("unicode".parse::<ParamType>(), Ok(ParamType::Text));
    }

    #[test]
    fn unknown_key_is_config_error() {
        let err = "KillaGorilla".parse::<ParamType>().unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownType {
                name: "KillaGorilla".to_string()
            }
        );
    }

    #[test]
    fn aliases_are_scoped_by_type() {
        assert_eq!(ParamType::Date.limit_alias("today"), Some(LimitAlias::Today));
        assert_eq!(
            ParamType::Date.limit_alias("tomorrow"),
            Some(LimitAlias::Tomorrow)
        );
        assert_eq!(ParamType::Date.limit_alias("yesterday"), None);
        assert_eq!(ParamType::DateTime.limit_alias("today"), None);
        assert_eq!(ParamType::Text.limit_alias("today"), None);
    }

    #[test]
    fn only_text_limits_by_length() {
        assert!(ParamType::Text.limits_by_length());
        assert!(!ParamType::Int.limits_by_length());
        assert!(!ParamType::Date.limits_by_length());
    }
}
