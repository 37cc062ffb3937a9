use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{BoundSide, ConfigError};
use crate::limits::Limit;
use crate::{Coercer, ErrorCode, ParamType, RawValue, Tainted, Value};

/// Custom check run on the coerced value; `Some(reason)` rejects it.
pub type ValidatorFn = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Transform applied to the coerced value before limits are checked.
pub type ProcessFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Immutable descriptor of one request parameter.
///
/// Built once (usually next to the route definition) with
/// [`ParamSpec::builder`] and shared by every request afterwards. Specs are
/// `Send + Sync` and cheap to clone.
///
/// # Examples
///
/// ```
/// use param_guard::{ParamSpec, ParamType};
///
/// let page = ParamSpec::builder(ParamType::Int)
///     .required()
///     .min(1)
///     .max(500)
///     .build()
///     .expect("valid spec");
///
/// assert!(page.is_required());
/// assert_eq!(page.param_type(), ParamType::Int);
/// ```
#[derive(Clone)]
pub struct ParamSpec {
    param_type: ParamType,
    required: bool,
    default: Option<RawValue>,
    min: Option<Limit>,
    max: Option<Limit>,
    validator: Option<ValidatorFn>,
    process: Option<ProcessFn>,
    errors: HashMap<ErrorCode, String>,
}

impl ParamSpec {
    /// Starts building a spec for a parameter of the given type.
    pub fn builder(param_type: ParamType) -> ParamSpecBuilder {
        ParamSpecBuilder::new(param_type)
    }

    /// Starts building a spec from a type key such as `"int"` or `"date"`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownType` for an unrecognized key.
    ///
    /// # Examples
    ///
    /// ```
    /// use param_guard::{ConfigError, ParamSpec};
    ///
    /// assert!(ParamSpec::builder_for("datetime").is_ok());
    /// assert!(matches!(
    ///     ParamSpec::builder_for("KillaGorilla"),
    ///     Err(ConfigError::UnknownType { .. })
    /// ));
    /// ```
    pub fn builder_for(type_key: &str) -> Result<ParamSpecBuilder, ConfigError> {
        let param_type = type_key.parse::<ParamType>().inspect_err(|e| {
            tracing::error!(error = %e, "rejected parameter spec");
        })?;
        Ok(ParamSpecBuilder::new(param_type))
    }

    /// Returns the declared type.
    pub fn param_type(&self) -> ParamType {
        self.param_type
    }

    /// Returns `true` if the parameter must be present (or defaulted).
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the configured default, if any.
    pub fn default_value(&self) -> Option<&RawValue> {
        self.default.as_ref()
    }

    /// Returns the configured lower bound.
    pub fn min(&self) -> Option<&Limit> {
        self.min.as_ref()
    }

    /// Returns the configured upper bound.
    pub fn max(&self) -> Option<&Limit> {
        self.max.as_ref()
    }

    /// Returns the spec's own message for a failure code.
    pub fn error_message(&self, code: ErrorCode) -> Option<&str> {
        self.errors.get(&code).map(String::as_str)
    }

    pub(crate) fn errors(&self) -> &HashMap<ErrorCode, String> {
        &self.errors
    }

    pub(crate) fn validator(&self) -> Option<&ValidatorFn> {
        self.validator.as_ref()
    }

    pub(crate) fn process(&self) -> Option<&ProcessFn> {
        self.process.as_ref()
    }
}

impl fmt::Debug for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpec")
            .field("param_type", &self.param_type)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("validator", &self.validator.is_some())
            .field("process", &self.process.is_some())
            .field("errors", &self.errors)
            .finish()
    }
}

/// Builder for [`ParamSpec`].
///
/// Bounds and the default are checked against the declared type in
/// [`build`](Self::build), so authoring mistakes surface at setup time.
pub struct ParamSpecBuilder {
    param_type: ParamType,
    required: bool,
    default: Option<RawValue>,
    min: Option<Value>,
    max: Option<Value>,
    validator: Option<ValidatorFn>,
    process: Option<ProcessFn>,
    errors: HashMap<ErrorCode, String>,
}

impl fmt::Debug for ParamSpecBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpecBuilder")
            .field("param_type", &self.param_type)
            .field("required", &self.required)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

impl ParamSpecBuilder {
    fn new(param_type: ParamType) -> Self {
        Self {
            param_type,
            required: false,
            default: None,
            min: None,
            max: None,
            validator: None,
            process: None,
            errors: HashMap::new(),
        }
    }

    /// Marks the parameter as required.
    ///
    /// A configured default still satisfies a required parameter.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the value substituted when the input is missing or empty.
    ///
    /// The default goes through coercion, `process`, limits and the custom
    /// validator exactly like supplied input.
    pub fn default(mut self, value: impl Into<RawValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the inclusive lower bound.
    ///
    /// For text this is a minimum length. For dates it may be an alias
    /// such as `"today"`.
    pub fn min(mut self, bound: impl Into<Value>) -> Self {
        self.min = Some(bound.into());
        self
    }

    /// Sets the inclusive upper bound.
    ///
    /// For text this is a maximum length. For dates it may be an alias
    /// such as `"today"`.
    pub fn max(mut self, bound: impl Into<Value>) -> Self {
        self.max = Some(bound.into());
        self
    }

    /// Sets a custom check; returning `Some(reason)` rejects the value.
    pub fn validator<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(check));
        self
    }

    /// Sets a transform applied after coercion and before limit checks.
    pub fn process<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.process = Some(Arc::new(transform));
        self
    }

    /// Overrides the message reported for a failure code.
    pub fn error(mut self, code: ErrorCode, message: impl Into<String>) -> Self {
        self.errors.insert(code, message.into());
        self
    }

    /// Checks the configuration and produces the immutable spec.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a bound cannot limit the declared type, the
    /// default cannot be coerced, or both bounds are concrete and inverted.
    pub fn build(self) -> Result<ParamSpec, ConfigError> {
        self.try_build().inspect_err(|e| {
            tracing::error!(error = %e, "rejected parameter spec");
        })
    }

    fn try_build(self) -> Result<ParamSpec, ConfigError> {
        let ty = self.param_type;
        let min = self
            .min
            .map(|b| Limit::for_type(ty, BoundSide::Min, b))
            .transpose()?;
        let max = self
            .max
            .map(|b| Limit::for_type(ty, BoundSide::Max, b))
            .transpose()?;

        if let (Some(Limit::Value(lo)), Some(Limit::Value(hi))) = (&min, &max) {
            if lo.compare(hi) == Some(std::cmp::Ordering::Greater) {
                return Err(ConfigError::InvertedBounds {
                    min: lo.to_string(),
                    max: hi.to_string(),
                });
            }
        }

        if let Some(default) = &self.default {
            if !default.is_empty() {
                ty.coerce(Tainted::new(default.clone()))
                    .map_err(|e| ConfigError::InvalidDefault {
                        reason: e.message().to_string(),
                    })?;
            }
        }

        Ok(ParamSpec {
            param_type: ty,
            required: self.required,
            default: self.default,
            min,
            max,
            validator: self.validator,
            process: self.process,
            errors: self.errors,
        })
    }
}

/// Ordered set of parameter specs for one endpoint.
///
/// Parameters are validated in insertion order, which decides which failure
/// is reported when several parameters are invalid.
///
/// # Examples
///
/// ```
/// use param_guard::{ParamSpec, ParamSpecs, ParamType};
///
/// let specs = ParamSpecs::new()
///     .param("q", ParamSpec::builder(ParamType::Text).required().build().unwrap())
///     .param("page", ParamSpec::builder(ParamType::Int).default(1).build().unwrap());
///
/// let names: Vec<_> = specs.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["q", "page"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParamSpecs {
    entries: Vec<(String, ParamSpec)>,
}

impl ParamSpecs {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, returning the set for chaining.
    ///
    /// Re-adding a name replaces its spec but keeps its original position.
    pub fn param(mut self, name: impl Into<String>, spec: ParamSpec) -> Self {
        self.insert(name, spec);
        self
    }

    /// Adds or replaces a parameter.
    pub fn insert(&mut self, name: impl Into<String>, spec: ParamSpec) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = spec,
            None => self.entries.push((name, spec)),
        }
    }

    /// Looks up a parameter's spec by name.
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    /// Iterates over `(name, spec)` in validation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamSpec)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ParamSpec)> for ParamSpecs {
    fn from_iter<I: IntoIterator<Item = (K, ParamSpec)>>(iter: I) -> Self {
        let mut specs = ParamSpecs::new();
        for (name, spec) in iter {
            specs.insert(name, spec);
        }
        specs
    }
}
