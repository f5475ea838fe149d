use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use models::validation::ValidationErrors;
use serde::Serialize;
use serde_json::{json, Value};
use service::errors::ServiceError;
use service::selection::NO_SELECTION_MESSAGE;
use thiserror::Error;
use tracing::error;

use crate::observability::CONCURRENCY_CONFLICTS_TOTAL;
use crate::selection::flash_cookie;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    /// Rejected form, answered with the submission and the lists needed to
    /// show it again.
    #[error("validation failed: {errors}")]
    Validation { form: Value, errors: ValidationErrors, options: Value },
    #[error("{0}")]
    Conflict(String),
    #[error("no member selected")]
    MissingSelection,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid(form: &impl Serialize, errors: ValidationErrors, options: &impl Serialize) -> Self {
        Self::Validation {
            form: serde_json::to_value(form).unwrap_or(Value::Null),
            errors,
            options: serde_json::to_value(options).unwrap_or(Value::Null),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            ServiceError::Validation(errors) => Self::Validation { form: Value::Null, errors, options: Value::Null },
            ServiceError::ConcurrencyConflict(msg) => Self::Conflict(msg),
            ServiceError::MissingSelection => Self::MissingSelection,
            ServiceError::Db(msg) => Self::Internal(msg),
            ServiceError::Model(e) => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, Json(json!({"error": msg}))).into_response(),
            ApiError::Validation { form, errors, options } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"form": form, "errors": errors, "options": options})),
            )
                .into_response(),
            ApiError::Conflict(msg) => {
                CONCURRENCY_CONFLICTS_TOTAL.inc();
                error!(error = %msg, "concurrency conflict");
                (StatusCode::CONFLICT, Json(json!({"error": msg}))).into_response()
            }
            ApiError::MissingSelection => {
                let jar = CookieJar::new().add(flash_cookie(NO_SELECTION_MESSAGE));
                (jar, Redirect::to("/Member")).into_response()
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, Json(json!({"error": msg}))).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response(),
            ApiError::Internal(msg) => {
                error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "internal server error"}))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::not_found("boat"), StatusCode::NOT_FOUND),
            (ServiceError::invalid("boat_class", "required"), StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::ConcurrencyConflict("stale".into()), StatusCode::CONFLICT),
            (ServiceError::Db("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn missing_selection_redirects_with_message() {
        let res = ApiError::MissingSelection.into_response();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()), Some("/Member"));
        let cookie = res.headers().get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default();
        assert!(cookie.starts_with("message="));
    }
}
