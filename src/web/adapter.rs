//! Request adapter for mapping HTTP requests to raw parameter sets.

use std::collections::HashMap;

use crate::RawParams;

use super::ExtractRawParams;

/// Framework-agnostic view of the inputs of one HTTP request.
///
/// `RequestAdapter` holds simple owned data so it does not couple to any
/// framework's request types. Framework code fills it from its own request
/// (decoded query string and form body) and hands it to
/// [`validate_args`](super::validate_args) / [`validate_form`](super::validate_form).
///
/// # Examples
///
/// ```
/// use param_guard::web::{ExtractRawParams, RequestAdapter};
///
/// let mut adapter = RequestAdapter::new("req-12345");
/// adapter.add_query_param("page", "2");
/// adapter.add_form_field("title", "Hello");
///
/// assert_eq!(adapter.request_id(), "req-12345");
/// assert!(adapter.extract_args().contains("page"));
/// assert!(adapter.extract_form().contains("title"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    /// Unique request identifier, used for log correlation
    request_id: String,
    /// Decoded query-string arguments
    query_params: HashMap<String, String>,
    /// Decoded form fields from the request body
    form_fields: HashMap<String, String>,
}

impl RequestAdapter {
    /// Creates an adapter with no inputs.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            query_params: HashMap::new(),
            form_fields: HashMap::new(),
        }
    }

    /// Adds a query-string argument. A repeated name keeps the last value.
    pub fn add_query_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query_params.insert(key.into(), value.into());
    }

    /// Adds a form field. A repeated name keeps the last value.
    pub fn add_form_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.form_fields.insert(key.into(), value.into());
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl ExtractRawParams for RequestAdapter {
    fn request_id(&self) -> &str {
        &self.request_id
    }

    fn extract_args(&self) -> RawParams {
        self.query_params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn extract_form(&self) -> RawParams {
        self.form_fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RawValue, Tainted};

    #[test]
    fn request_adapter_new() {
        let adapter = RequestAdapter::new("req-test");
        assert_eq!(adapter.request_id(), "req-test");
        assert!(adapter.extract_args().is_empty());
        assert!(adapter.extract_form().is_empty());
    }

    #[test]
    fn query_params_become_tainted_text() {
        let mut adapter = RequestAdapter::new("req-1");
        adapter.add_query_param("page", "3");

        let args = adapter.extract_args();
        assert_eq!(args.get("page"), Some(&Tainted::new(RawValue::from("3"))));
    }

    #[test]
    fn sources_stay_separate() {
        let mut adapter = RequestAdapter::new("req-1");
        adapter.add_query_param("a", "query");
        adapter.add_form_field("b", "form");

        let args = adapter.extract_args();
        let form = adapter.extract_form();

        assert!(args.contains("a") && !args.contains("b"));
        assert!(form.contains("b") && !form.contains("a"));
    }

    #[test]
    fn repeated_name_keeps_last_value() {
        let mut adapter = RequestAdapter::new("req-1");
        adapter.add_form_field("tag", "first");
        adapter.add_form_field("tag", "second");

        let form = adapter.extract_form();
        assert_eq!(form.len(), 1);
        assert_eq!(form.get("tag"), Some(&Tainted::new(RawValue::from("second"))));
    }

    #[test]
    fn empty_values_are_kept() {
        let mut adapter = RequestAdapter::new("req-1");
        adapter.add_query_param("q", "");

        assert!(adapter.extract_args().contains("q"));
    }

    #[test]
    fn multiple_extractions_produce_independent_copies() {
        let mut adapter = RequestAdapter::new("req-1");
        adapter.add_query_param("k", "v");

        let first = adapter.extract_args();
        let second = adapter.extract_args();

        assert_eq!(first, second);
    }
}
