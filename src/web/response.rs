use crate::ValidationError;

/// Body of the response sent when request parameters fail validation.
///
/// Serialization is left to the framework; the fields map one to one onto
/// a JSON object such as `{"message": ..., "key": ..., "code": ...}`.
///
/// # Examples
///
/// ```
/// use param_guard::web::ErrorBody;
/// use param_guard::{ErrorCode, ParamType, ValidationError};
///
/// let err = ValidationError::new("p1", ErrorCode::Required, "\"p1\" parameter is required", ParamType::Int);
/// let body = ErrorBody::from(&err);
///
/// assert_eq!(body.status, 400);
/// assert_eq!(body.code, "required");
/// assert_eq!(body.message, "\"p1\" parameter is required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable message
    pub message: String,
    /// Name of the failing parameter
    pub key: String,
    /// Error code (`required`, `value`, `limits` or `custom`)
    pub code: &'static str,
    /// HTTP status code
    pub status: u16,
}

impl From<&ValidationError> for ErrorBody {
    fn from(err: &ValidationError) -> Self {
        Self {
            message: err.message().to_string(),
            key: err.key().to_string(),
            code: err.code().as_str(),
            status: err.status_code(),
        }
    }
}

impl From<ValidationError> for ErrorBody {
    fn from(err: ValidationError) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorCode, ParamType};

    #[test]
    fn body_carries_every_error_field() {
        let err = ValidationError::new("when", ErrorCode::Limits, "too late", ParamType::Date);
        let body = ErrorBody::from(err);

        assert_eq!(
            body,
            ErrorBody {
                message: "too late".to_string(),
                key: "when".to_string(),
                code: "limits",
                status: 400,
            }
        );
    }

    #[test]
    fn every_code_maps_to_bad_request() {
        for code in ErrorCode::ALL {
            let err = ValidationError::new("k", code, "m", ParamType::Text);
            assert_eq!(ErrorBody::from(&err).status, 400);
        }
    }
}
