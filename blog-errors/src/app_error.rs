use crate::FieldErrors;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    UserInput(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Authentication failed: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::UserInput(msg) => msg.as_str(),
            Self::Validation(_) => "Some fields are invalid.",
            Self::Unauthenticated(msg) => msg.as_str(),
            Self::Forbidden(_) => "You are not allowed to do that.",
            Self::NotFound(_) => "The requested resource does not exist.",
            Self::Database(_) | Self::Internal(_) => "Something went wrong on the server. Try again later.",
        }
    }

    /// Field-level messages, when the error carries any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

#[cfg(feature = "server")]
mod server_impl {
    use super::AppError;
    use crate::FieldErrors;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        errors: Option<FieldErrors>,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                AppError::UserInput(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
                AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
                AppError::Forbidden(_) => StatusCode::FORBIDDEN,
                AppError::NotFound(_) => StatusCode::NOT_FOUND,
                AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            let body = ErrorResponse {
                message: self.user_message().to_string(),
                errors: self.field_errors().cloned(),
            };
            (status, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_details_stay_out_of_user_message() {
        let err = AppError::Database("relation \"blogs\" does not exist".to_string());
        assert!(!err.user_message().contains("blogs"));
        assert!(err.to_string().contains("blogs"));
    }

    #[test]
    fn test_field_errors_convert_into_validation() {
        let mut errors = FieldErrors::new();
        errors.add("name", "Category name must not be empty");

        let err: AppError = errors.into();
        let fields = err.field_errors().expect("validation error carries fields");
        assert_eq!(fields.get("name"), Some("Category name must not be empty"));
    }

    #[test]
    fn test_serializes_with_variant_tag() {
        let err = AppError::NotFound("blog".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["NotFound"], "blog");
    }

    #[cfg(feature = "server")]
    #[test]
    fn test_status_codes() {
        use axum::http::StatusCode;

        assert_eq!(AppError::UserInput(String::new()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Validation(FieldErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthenticated(String::new()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Forbidden(String::new()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound(String::new()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Database(String::new()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
