use std::fmt;
use std::sync::Arc;

use crate::limits::{self, Clock, SystemClock};
use crate::{
    Coercer, ErrorCode, ErrorMessages, ParamSpec, ParamSpecs, RawParams, RawValue,
    Tainted, ValidParams, ValidationError, Value,
};

/// Validates raw request input against a set of parameter specs.
///
/// Parameters are processed in spec order and validation stops at the first
/// failure. Limit aliases resolve against the local system date.
///
/// # Errors
///
/// Returns the first parameter's `ValidationError`.
///
/// # Examples
///
/// ```
/// use param_guard::{validate, ParamSpec, ParamSpecs, ParamType, RawParams, Value};
///
/// let specs = ParamSpecs::new()
///     .param("p1", ParamSpec::builder(ParamType::Int).required().min(0).max(10).build().unwrap())
///     .param("p2", ParamSpec::builder(ParamType::Text).required().min(1).max(4).build().unwrap());
///
/// let input = RawParams::new().with("p1", "1").with("p2", 2);
/// let params = validate(&specs, &input, None).unwrap();
///
/// assert_eq!(params.get("p1"), Some(&Value::Int(1)));
/// assert_eq!(params.get("p2"), Some(&Value::from("2")));
/// ```
pub fn validate(
    specs: &ParamSpecs,
    input: &RawParams,
    messages: Option<&ErrorMessages>,
) -> Result<ValidParams, ValidationError> {
    validate_with_clock(specs, input, messages, &SystemClock)
}

/// Like [`validate`], resolving limit aliases against `clock`.
///
/// # Errors
///
/// Returns the first parameter's `ValidationError`.
pub fn validate_with_clock(
    specs: &ParamSpecs,
    input: &RawParams,
    messages: Option<&ErrorMessages>,
    clock: &dyn Clock,
) -> Result<ValidParams, ValidationError> {
    let span = tracing::debug_span!("validate_params", params = specs.len());
    let _enter = span.enter();

    let mut values = ValidParams::new();
    for (name, spec) in specs.iter() {
        if let Some(value) = validate_param(name, spec, input.get(name), messages, clock)? {
            values.insert(name, value);
        }
    }
    Ok(values)
}

/// Runs one parameter through presence, coercion, process, limits and the
/// custom validator. `Ok(None)` means optional and absent.
fn validate_param(
    name: &str,
    spec: &ParamSpec,
    supplied: Option<&Tainted<RawValue>>,
    messages: Option<&ErrorMessages>,
    clock: &dyn Clock,
) -> Result<Option<Value>, ValidationError> {
    let ty = spec.param_type();
    let fail = |code: ErrorCode, detail: &str| {
        tracing::debug!(param = name, code = %code, "parameter rejected");
        let message = crate::messages::resolve(spec.errors(), messages, name, code, detail);
        ValidationError::new(name, code, message, ty)
    };

    // An empty default counts as no default.
    let raw = supplied
        .filter(|raw| !raw.peek().is_empty())
        .cloned()
        .or_else(|| {
            spec.default_value()
                .filter(|d| !d.is_empty())
                .map(|d| Tainted::new(d.clone()))
        });

    let raw = match raw {
        Some(raw) => raw,
        None if spec.is_required() => return Err(fail(ErrorCode::Required, "")),
        None => {
            tracing::debug!(param = name, "optional parameter absent");
            return Ok(None);
        }
    };

    let mut value = ty.coerce(raw).map_err(|e| {
        tracing::debug!(param = name, kind = %e.kind(), "coercion failed");
        fail(ErrorCode::Value, ty.name())
    })?;

    if let Some(process) = spec.process() {
        value = process(value);
    }

    if let Some(fragment) = limits::check(ty, &value, spec.min(), spec.max(), clock) {
        return Err(fail(ErrorCode::Limits, &fragment));
    }

    if let Some(validator) = spec.validator() {
        if let Some(reason) = validator(&value) {
            return Err(fail(ErrorCode::Custom, &reason));
        }
    }

    tracing::debug!(param = name, "parameter accepted");
    Ok(Some(value))
}

/// An endpoint's parameter specs and message overrides, validated as a unit.
///
/// Build one per endpoint at setup time and call [`validate`](Self::validate)
/// per request. Clones share the clock.
///
/// # Examples
///
/// ```
/// use param_guard::{ErrorCode, ErrorMessages, ParamSpec, ParamSpecs, ParamType, RawParams, Validator};
///
/// let validator = Validator::new(
///     ParamSpecs::new().param("id", ParamSpec::builder(ParamType::Int).required().build().unwrap()),
/// )
/// .with_messages(ErrorMessages::new().with("id", ErrorCode::Required, "Which item?"));
///
/// let err = validator.validate(&RawParams::new()).unwrap_err();
/// assert_eq!(err.message(), "Which item?");
///
/// let ok = validator.validate(&RawParams::new().with("id", "42")).unwrap();
/// assert_eq!(ok.get_int("id"), Some(42));
/// ```
#[derive(Clone)]
pub struct Validator {
    params: ParamSpecs,
    messages: ErrorMessages,
    clock: Arc<dyn Clock>,
}

impl Validator {
    /// Creates a validator using the system clock and no message overrides.
    pub fn new(params: ParamSpecs) -> Self {
        Self {
            params,
            messages: ErrorMessages::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Sets the message overrides.
    pub fn with_messages(mut self, messages: ErrorMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Sets the clock used for limit aliases.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Returns the parameter specs.
    pub fn params(&self) -> &ParamSpecs {
        &self.params
    }

    /// Returns the message overrides.
    pub fn messages(&self) -> &ErrorMessages {
        &self.messages
    }

    /// Validates input against the stored specs and overrides.
    ///
    /// # Errors
    ///
    /// Returns the first parameter's `ValidationError`.
    pub fn validate(&self, input: &RawParams) -> Result<ValidParams, ValidationError> {
        self.validate_with(input, None, None)
    }

    /// Validates input, replacing the stored specs or overrides for this call
    /// when given.
    ///
    /// # Errors
    ///
    /// Returns the first parameter's `ValidationError`.
    pub fn validate_with(
        &self,
        input: &RawParams,
        params: Option<&ParamSpecs>,
        messages: Option<&ErrorMessages>,
    ) -> Result<ValidParams, ValidationError> {
        validate_with_clock(
            params.unwrap_or(&self.params),
            input,
            Some(messages.unwrap_or(&self.messages)),
            self.clock.as_ref(),
        )
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("params", &self.params)
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}
