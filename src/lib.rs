//! Declarative validation and coercion of HTTP request parameters.
//!
//! Each endpoint declares, once, the parameters it accepts: a type, whether
//! the parameter is required, an optional default, inclusive bounds, a
//! custom check and custom messages. Every request's raw input is then
//! turned into typed values, or rejected with the first failure.
//!
//! - **Taint tracking**: raw input arrives as [`Tainted<RawValue>`] and only
//!   leaves through a [`Coercer`]
//! - **Typed output**: [`ValidParams`] can only be produced by validation
//! - **Explicit errors**: [`ValidationError`] carries the key, a machine
//!   readable [`ErrorCode`] and a message; spec mistakes are
//!   [`ConfigError`]s raised when the spec is built
//!
//! # Core Types
//!
//! - [`ParamType`]: Closed set of parameter types (`int`, `text`, `float`,
//!   `decimal`, `date`, `datetime`)
//! - [`ParamSpec`]: Immutable descriptor of one parameter, built with
//!   [`ParamSpecBuilder`]
//! - [`ParamSpecs`]: Ordered specs for one endpoint
//! - [`Validator`]: Specs plus message overrides and a [`Clock`]
//!
//! # Examples
//!
//! ```
//! use param_guard::{validate, ErrorCode, ParamSpec, ParamSpecs, ParamType, RawParams};
//!
//! let specs = ParamSpecs::new()
//!     .param("page", ParamSpec::builder(ParamType::Int).required().min(1).build().unwrap())
//!     .param("since", ParamSpec::builder(ParamType::Date).max("today").build().unwrap());
//!
//! let ok = validate(&specs, &RawParams::new().with("page", "2"), None).unwrap();
//! assert_eq!(ok.get_int("page"), Some(2));
//!
//! let err = validate(&specs, &RawParams::new().with("page", "0"), None).unwrap_err();
//! assert_eq!(err.code(), ErrorCode::Limits);
//! assert_eq!(err.message(), "Value of \"page\" must be greater than 1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod coerce;
mod error;
pub mod limits;
mod messages;
mod param_spec;
mod param_type;
mod params;
mod tainted;
mod validate;
mod value;

pub mod web;

pub use coerce::{Coercer, CoercionError, CoercionErrorKind};
pub use error::{BoundSide, ConfigError, Error, ErrorCode, ValidationError};
pub use limits::{Clock, FixedClock, Limit, LimitAlias, SystemClock};
pub use messages::{default_message, ErrorMessages};
pub use param_spec::{ParamSpec, ParamSpecBuilder, ParamSpecs, ProcessFn, ValidatorFn};
pub use param_type::ParamType;
pub use params::{RawParams, ValidParams};
pub use tainted::Tainted;
pub use validate::{validate, validate_with_clock, Validator};
pub use value::{RawValue, Value};
