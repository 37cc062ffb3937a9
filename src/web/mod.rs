//! Web framework integration surface.
//!
//! This module is the boundary between an HTTP framework and the validator.
//! It handles:
//! - Collecting query-string arguments and form fields as [`RawParams`]
//!   (every value `Tainted`)
//! - Validating each source against an endpoint's [`Validator`]
//! - Describing failures as the body of a 400 response
//!
//! It contains no framework-specific code, no routing and no serialization.
//! Framework integrations implement [`ExtractRawParams`] for their request
//! type, or fill a [`RequestAdapter`].
//!
//! # Example Flow
//!
//! ```
//! use param_guard::web::{validate_args, ErrorBody, RequestAdapter};
//! use param_guard::{ParamSpec, ParamSpecs, ParamType, Validator};
//!
//! // At route setup
//! let validator = Validator::new(
//!     ParamSpecs::new()
//!         .param("q", ParamSpec::builder(ParamType::Text).required().max(64).build().unwrap())
//!         .param("page", ParamSpec::builder(ParamType::Int).default(1).min(1).build().unwrap()),
//! );
//!
//! // Per request
//! let mut request = RequestAdapter::new("req-1");
//! request.add_query_param("page", "0");
//!
//! match validate_args(&request, &validator) {
//!     Ok(params) => unreachable!("q is missing: {:?}", params),
//!     Err(err) => {
//!         let body = ErrorBody::from(&err);
//!         assert_eq!(body.status, 400);
//!         assert_eq!(body.key, "q");
//!     }
//! }
//! ```
//!
//! [`RawParams`]: crate::RawParams
//! [`Validator`]: crate::Validator

mod adapter;
pub mod example_handler;
mod extract;
mod response;

pub use adapter::RequestAdapter;
pub use extract::{validate_args, validate_form, ExtractRawParams};
pub use response::ErrorBody;
