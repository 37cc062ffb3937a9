//! Extraction boundary trait and per-source validation.

use crate::{RawParams, ValidParams, ValidationError, Validator};

/// Extracts raw parameters from a framework-specific request.
///
/// Implementations only map framework types to [`RawParams`]; they never
/// coerce or check values. Query-string arguments and form fields are kept
/// apart so an endpoint can validate each with its own specs.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use param_guard::web::ExtractRawParams;
/// use param_guard::RawParams;
///
/// struct MyFrameworkRequest {
///     id: String,
///     query: HashMap<String, String>,
/// }
///
/// impl ExtractRawParams for MyFrameworkRequest {
///     fn request_id(&self) -> &str {
///         &self.id
///     }
///
///     fn extract_args(&self) -> RawParams {
///         self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
///     }
///
///     fn extract_form(&self) -> RawParams {
///         RawParams::new()
///     }
/// }
/// ```
pub trait ExtractRawParams {
    /// Identifier used to correlate log lines for this request.
    fn request_id(&self) -> &str;

    /// Extracts the query-string arguments.
    fn extract_args(&self) -> RawParams;

    /// Extracts the form fields of the request body.
    fn extract_form(&self) -> RawParams;
}

/// Validates a request's query-string arguments.
///
/// # Errors
///
/// Returns the first `ValidationError`; an HTTP layer answers it with 400.
pub fn validate_args<R>(request: &R, validator: &Validator) -> Result<ValidParams, ValidationError>
where
    R: ExtractRawParams + ?Sized,
{
    validate_source(request, "args", request.extract_args(), validator)
}

/// Validates a request's form fields.
///
/// # Errors
///
/// Returns the first `ValidationError`; an HTTP layer answers it with 400.
pub fn validate_form<R>(request: &R, validator: &Validator) -> Result<ValidParams, ValidationError>
where
    R: ExtractRawParams + ?Sized,
{
    validate_source(request, "form", request.extract_form(), validator)
}

fn validate_source<R>(
    request: &R,
    source: &'static str,
    input: RawParams,
    validator: &Validator,
) -> Result<ValidParams, ValidationError>
where
    R: ExtractRawParams + ?Sized,
{
    let span = tracing::debug_span!("request_params", request_id = %request.request_id(), source);
    let _enter = span.enter();

    validator.validate(&input).inspect_err(|e| {
        tracing::debug!(key = %e.key(), code = %e.code(), "request parameters rejected");
    })
}
