//! Example handlers demonstrating web integration with parameter validation.
//!
//! These show the handler flow end to end: declare specs once, extract the
//! request's raw inputs, validate, then either use the typed values or turn
//! the error into a 400 body.
//!
//! **These examples are for documentation and testing only.**
//! They demonstrate usage patterns without requiring actual HTTP infrastructure.

use chrono::NaiveDate;

use crate::{ConfigError, ErrorCode, ParamSpec, ParamSpecs, ParamType, Validator, Value};

use super::{validate_args, validate_form, ErrorBody, ExtractRawParams};

/// Result of the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Request ID for tracing
    pub request_id: String,
    /// Search query, trimmed
    pub query: String,
    /// Requested page
    pub page: i64,
}

/// Builds the validator used by [`handle_search`].
///
/// # Errors
///
/// Returns a `ConfigError` if a spec is malformed.
pub fn search_validator() -> Result<Validator, ConfigError> {
    let specs = ParamSpecs::new()
        .param(
            "q",
            ParamSpec::builder(ParamType::Text)
                .required()
                .min(1)
                .max(200)
                .process(|v| match v {
                    Value::Text(s) => Value::Text(s.trim().to_string()),
                    other => other,
                })
                .error(ErrorCode::Required, "Search query is missing")
                .build()?,
        )
        .param(
            "page",
            ParamSpec::builder(ParamType::Int).default(1).min(1).max(100).build()?,
        );
    Ok(Validator::new(specs))
}

/// Handles a search endpoint driven by query-string arguments.
///
/// # Examples
///
/// ```
/// use param_guard::web::{RequestAdapter, example_handler::{handle_search, search_validator}};
///
/// let validator = search_validator().unwrap();
/// let mut adapter = RequestAdapter::new("req-search-001");
/// adapter.add_query_param("q", "  rust params  ");
///
/// let result = handle_search(&adapter, &validator).expect("valid search");
/// assert_eq!(result.query, "rust params");
/// assert_eq!(result.page, 1);
/// ```
pub fn handle_search<R>(request: &R, validator: &Validator) -> Result<SearchResult, ErrorBody>
where
    R: ExtractRawParams + ?Sized,
{
    let params = validate_args(request, validator)?;

    Ok(SearchResult {
        request_id: request.request_id().to_string(),
        query: params.get_text("q").unwrap_or_default().to_string(),
        page: params.get_int("page").unwrap_or(1),
    })
}

/// A booking accepted by [`handle_booking`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Request ID for tracing
    pub request_id: String,
    /// Guest name
    pub guest: String,
    /// Arrival date
    pub arrival: NaiveDate,
    /// Number of nights
    pub nights: i64,
}

/// Handles a booking form. Arrival must be no earlier than tomorrow.
///
/// The validator is passed in so callers control its clock.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use param_guard::web::{RequestAdapter, example_handler::{booking_validator, handle_booking}};
/// use param_guard::FixedClock;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// let validator = booking_validator().unwrap().with_clock(FixedClock::new(today));
///
/// let mut adapter = RequestAdapter::new("req-book-001");
/// adapter.add_form_field("guest", "Ada");
/// adapter.add_form_field("arrival", "2024-03-10");
///
/// let body = handle_booking(&adapter, &validator).unwrap_err();
/// assert_eq!(body.key, "arrival");
/// assert_eq!(body.code, "limits");
/// ```
pub fn handle_booking<R>(request: &R, validator: &Validator) -> Result<Booking, ErrorBody>
where
    R: ExtractRawParams + ?Sized,
{
    let params = validate_form(request, validator)?;

    Ok(Booking {
        request_id: request.request_id().to_string(),
        guest: params.get_text("guest").unwrap_or_default().to_string(),
        arrival: params.get_date("arrival").unwrap_or_default(),
        nights: params.get_int("nights").unwrap_or(1),
    })
}

/// Builds the validator used by [`handle_booking`], on the system clock.
///
/// # Errors
///
/// Returns a `ConfigError` if a spec is malformed.
pub fn booking_validator() -> Result<Validator, ConfigError> {
    let specs = ParamSpecs::new()
        .param(
            "guest",
            ParamSpec::builder(ParamType::Text)
                .required()
                .max(64)
                .build()?,
        )
        .param(
            "arrival",
            ParamSpec::builder(ParamType::Date)
                .required()
                .min("tomorrow")
                .build()?,
        )
        .param(
            "nights",
            ParamSpec::builder(ParamType::Int)
                .default(1)
                .min(1)
                .max(30)
                .validator(|v| match v.as_int() {
                    Some(n) if n % 7 == 0 => Some("use the weekly rate".to_string()),
                    _ => None,
                })
                .build()?,
        );
    Ok(Validator::new(specs))
}
