//! Error message templates and overrides.
//!
//! A failure message is resolved in this order:
//! 1. the parameter spec's own `errors` entry for the code
//! 2. the caller's [`ErrorMessages`] entry for the parameter and code
//! 3. the built-in template for the code

use std::collections::HashMap;

use crate::ErrorCode;

/// Per-parameter message overrides supplied by the endpoint.
///
/// # Examples
///
/// ```
/// use param_guard::{ErrorCode, ErrorMessages};
///
/// let messages = ErrorMessages::new()
///     .with("email", ErrorCode::Required, "Tell us where to write")
///     .with("email", ErrorCode::Value, "That does not look right");
///
/// assert_eq!(messages.get("email", ErrorCode::Required), Some("Tell us where to write"));
/// assert_eq!(messages.get("email", ErrorCode::Limits), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMessages {
    by_param: HashMap<String, HashMap<ErrorCode, String>>,
}

impl ErrorMessages {
    /// Creates an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override, returning the set for chaining.
    pub fn with(mut self, param: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        self.insert(param, code, message);
        self
    }

    /// Adds or replaces an override.
    pub fn insert(&mut self, param: impl Into<String>, code: ErrorCode, message: impl Into<String>) {
        self.by_param
            .entry(param.into())
            .or_default()
            .insert(code, message.into());
    }

    /// Looks up the override for a parameter and code.
    pub fn get(&self, param: &str, code: ErrorCode) -> Option<&str> {
        self.by_param
            .get(param)
            .and_then(|codes| codes.get(&code))
            .map(String::as_str)
    }

    /// Returns `true` if no overrides are configured.
    pub fn is_empty(&self) -> bool {
        self.by_param.is_empty()
    }
}

/// Formats the built-in message for a failure.
///
/// `detail` is the type name for `value`, the limit fragment for `limits`
/// and the validator's reason for `custom`; it is ignored for `required`.
pub fn default_message(code: ErrorCode, key: &str, detail: &str) -> String {
    match code {
        ErrorCode::Required => format!("\"{}\" parameter is required", key),
        ErrorCode::Value => format!(
            "\"{}\" parameter must have a valid value of \"{}\" type",
            key, detail
        ),
        ErrorCode::Limits => format!("Value of \"{}\" {}", key, detail),
        ErrorCode::Custom => format!("\"{}\" parameter has a wrong value ({})", key, detail),
    }
}

pub(crate) fn resolve(
    own: &HashMap<ErrorCode, String>,
    overrides: Option<&ErrorMessages>,
    key: &str,
    code: ErrorCode,
    detail: &str,
) -> String {
    if let Some(message) = own.get(&code) {
        return message.clone();
    }
    if let Some(message) = overrides.and_then(|o| o.get(key, code)) {
        return message.to_string();
    }
    default_message(code, key, detail)
}
