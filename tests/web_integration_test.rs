//! Integration tests for the web module.
//!
//! These tests walk the complete flow from request extraction to typed
//! values or a 400 error body.

use std::collections::HashMap;

use chrono::NaiveDate;
use param_guard::web::example_handler::{
    booking_validator, handle_booking, handle_search, search_validator,
};
use param_guard::web::{validate_args, validate_form, ErrorBody, ExtractRawParams, RequestAdapter};
use param_guard::{
    ErrorCode, ErrorMessages, FixedClock, ParamSpec, ParamSpecs, ParamType, RawParams, Validator,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn args_flow_to_typed_values() {
    init_tracing();
    let validator = Validator::new(
        ParamSpecs::new()
            .param("id", ParamSpec::builder(ParamType::Int).required().min(1).build().unwrap())
            .param("from", ParamSpec::builder(ParamType::DateTime).build().unwrap()),
    );
    let mut adapter = RequestAdapter::new("req-args-001");
    adapter.add_query_param("id", " 17 ");
    adapter.add_query_param("from", "2012-01-01T11:00:00Z");

    let params = validate_args(&adapter, &validator).unwrap();

    assert_eq!(params.get_int("id"), Some(17));
    assert_eq!(
        params.get_datetime("from"),
        NaiveDate::from_ymd_opt(2012, 1, 1).and_then(|d| d.and_hms_opt(11, 0, 0))
    );
}

#[test]
fn failure_maps_to_error_body() {
    init_tracing();
    let validator = Validator::new(
        ParamSpecs::new()
            .param("title", ParamSpec::builder(ParamType::Text).required().max(4).build().unwrap()),
    );
    let mut adapter = RequestAdapter::new("req-form-001");
    adapter.add_form_field("title", "too long");

    let err = validate_form(&adapter, &validator).unwrap_err();
    let body = ErrorBody::from(&err);

    assert_eq!(body.status, 400);
    assert_eq!(body.key, "title");
    assert_eq!(body.code, "limits");
    assert_eq!(body.message, "Value of \"title\" must be shorter than 4");
}

#[test]
fn validator_messages_reach_the_body() {
    let validator = Validator::new(
        ParamSpecs::new().param("id", ParamSpec::builder(ParamType::Int).required().build().unwrap()),
    )
    .with_messages(ErrorMessages::new().with("id", ErrorCode::Value, "id must be a number"));
    let mut adapter = RequestAdapter::new("req-1");
    adapter.add_query_param("id", "abc");

    let body = ErrorBody::from(validate_args(&adapter, &validator).unwrap_err());

    assert_eq!(body.message, "id must be a number");
    assert_eq!(body.code, "value");
}

#[test]
fn search_handler_full_flow() {
    let validator = search_validator().unwrap();
    let mut adapter = RequestAdapter::new("req-search-001");
    adapter.add_query_param("q", "  rust  ");
    adapter.add_query_param("page", "2");

    let result = handle_search(&adapter, &validator).unwrap();

    assert_eq!(result.request_id, "req-search-001");
    assert_eq!(result.query, "rust");
    assert_eq!(result.page, 2);
}

#[test]
fn search_handler_rejects_blank_query_after_trim() {
    let validator = search_validator().unwrap();
    let mut adapter = RequestAdapter::new("req-search-002");
    adapter.add_query_param("q", "   ");

    let body = handle_search(&adapter, &validator).unwrap_err();

    assert_eq!(body.key, "q");
    assert_eq!(body.code, "limits");
    assert_eq!(body.message, "Value of \"q\" must be longer than 1");
}

#[test]
fn booking_handler_on_fixed_clock() {
    let today = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
    let validator = booking_validator().unwrap().with_clock(FixedClock::new(today));
    let mut adapter = RequestAdapter::new("req-book-001");
    adapter.add_form_field("guest", "Grace");
    adapter.add_form_field("arrival", "2024-01-01");
    adapter.add_form_field("nights", "3");

    let booking = handle_booking(&adapter, &validator).unwrap();

    assert_eq!(booking.guest, "Grace");
    assert_eq!(booking.arrival, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(booking.nights, 3);
}

struct QueryOnly {
    id: String,
    query: HashMap<String, String>,
}

impl ExtractRawParams for QueryOnly {
    fn request_id(&self) -> &str {
        &self.id
    }

    fn extract_args(&self) -> RawParams {
        self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    fn extract_form(&self) -> RawParams {
        RawParams::new()
    }
}

#[test]
fn custom_request_types_plug_in() {
    let request = QueryOnly {
        id: "req-custom-001".to_string(),
        query: HashMap::from([("q".to_string(), "hello".to_string())]),
    };

    let result = handle_search(&request, &search_validator().unwrap()).unwrap();

    assert_eq!(result.query, "hello");
    assert_eq!(result.request_id, "req-custom-001");
}
