use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A read against the table store failed. The cache keeps its last good state.
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// A mutation was rejected by the table store. The cache is left unchanged.
    #[error("Write error: {0}")]
    WriteError(String),

    /// Input was rejected before reaching the table store.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ApiError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, ApiError::FetchError(_))
    }

    pub fn is_write(&self) -> bool {
        matches!(self, ApiError::WriteError(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::ValidationError(_))
    }

    /// The message surfaced to the caller, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            ApiError::FetchError(msg)
            | ApiError::WriteError(msg)
            | ApiError::ValidationError(msg) => msg,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<&str> = errs.iter().map(|e| e.code.as_ref()).collect();
                format!("{field} ({})", codes.join(", "))
            })
            .collect();
        fields.sort();
        ApiError::ValidationError(format!("invalid fields: {}", fields.join("; ")))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1))]
        name: String,
        #[validate(length(min = 1))]
        bed: String,
    }

    #[test]
    fn test_validation_errors_list_fields_in_order() {
        let form = Form {
            name: String::new(),
            bed: String::new(),
        };
        let err: ApiError = form.validate().unwrap_err().into();

        assert!(err.is_validation());
        assert_eq!(err.message(), "invalid fields: bed (length); name (length)");
    }

    #[test]
    fn test_message_strips_kind() {
        let err = ApiError::WriteError("duplicate key".to_string());
        assert_eq!(err.message(), "duplicate key");
        assert_eq!(err.to_string(), "Write error: duplicate key");
        assert!(err.is_write());
        assert!(!err.is_fetch());
    }
}
