use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use platform_db::DbError;
use products_hr::ValidationError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Shared handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("bad request: {0}")]
    InvalidInput(String),
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound => "NOT_FOUND",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }

    /// Render as a JSON body instead of plain text.
    pub fn into_json(self) -> JsonError {
        JsonError(self)
    }

    fn log(&self) {
        if let ApiError::Internal(err) = self {
            error!(error = ?err, "request failed");
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::NotFound { .. } => Self::NotFound,
            other => Self::internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        // Display for Internal never includes the cause.
        (self.status(), self.to_string()).into_response()
    }
}

/// [`ApiError`] rendered as `{"code": ..., "message": ...}`.
#[derive(Debug)]
pub struct JsonError(pub ApiError);

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl From<ApiError> for JsonError {
    fn from(value: ApiError) -> Self {
        Self(value)
    }
}

impl From<DbError> for JsonError {
    fn from(value: DbError) -> Self {
        Self(value.into())
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let JsonError(err) = self;
        err.log();
        let body = ErrorBody {
            code: err.code(),
            message: err.to_string(),
        };
        (err.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use products_hr::{DateError, HIRING_DATE};

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn internal_errors_are_masked() {
        let response = ApiError::internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert_eq!(body, "internal server error");
    }

    #[test]
    fn store_not_found_maps_to_404() {
        let err = ApiError::from(DbError::NotFound { id: 7 });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn store_failures_map_to_500() {
        let err = ApiError::from(DbError::MissingUrl);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_failures_map_to_400() {
        let err = ApiError::from(ValidationError::InvalidDate {
            field: HIRING_DATE,
            source: DateError {
                value: "invalid-date".into(),
            },
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("invalid-date"));
    }

    #[tokio::test]
    async fn json_errors_carry_code() {
        let response = ApiError::NotFound.into_json().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "resource not found");
    }
}
