use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use common::database_provider::DbError;
use serde_json::json;
use thiserror::Error;

/// Request-level failure taxonomy: validation 400, bad credentials 401,
/// deactivated account / role denial 403, unknown ids 404, storage 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account is deactivated")]
    Deactivated,
    #[error("Unauthorized access")]
    Forbidden,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Internal server error")]
    Db(#[from] DbError),
    #[error("Internal server error")]
    Internal,
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            // Storage detail stays in the server log; the caller gets a
            // constant message.
            ApiError::Db(_) | ApiError::Internal => json!({"message": "Internal server error"}),
            other => json!({"message": other.to_string()}),
        };
        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            ApiError::MissingField(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Deactivated | ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Db(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Installed via `web::JsonConfig` so a body the extractor rejects gets the
/// shared `{"message": ...}` body instead of actix's raw serde string.
pub fn json_error_handler(_err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation("Invalid request body".to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            ApiError::MissingField("email").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Deactivated.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::NotFound("User not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn storage_errors_do_not_leak_detail() {
        let err = ApiError::Db(DbError::TransactionFailed(
            "connection reset by peer at 10.0.0.3".into(),
        ));
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // the body builder above serializes a constant message for Db errors
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn missing_field_message_names_the_field() {
        assert_eq!(
            ApiError::MissingField("patient_id").to_string(),
            "Missing required field: patient_id"
        );
    }
}
