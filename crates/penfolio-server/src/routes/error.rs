use axum::Json;
use axum::response::{IntoResponse, Response};
use penfolio_core::error::CoreError;
use sea_orm::DbErr;
use serde::Serialize;
use std::borrow::Cow;
use thiserror::Error;
use utoipa::ToSchema;

/// Wrapper all route handlers return their failures through. Everything
/// that reaches a caller goes out as an [`ErrorData`] body with a stable
/// machine-checkable kind.
#[derive(Error, Debug)]
pub(crate) enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error.")]
    SeaOrm(#[from] DbErr),
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ApiErrorType {
    NotFound,
    Forbidden,
    ValidationFailed,
    Conflict,
}

pub(crate) trait GetStatusCode {
    fn status_code(&self) -> http::StatusCode;
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorData<T> {
    pub(crate) error: T,
    pub(crate) error_description: Cow<'static, str>,
}

impl<T> ErrorData<T> {
    pub fn new<A: Into<Cow<'static, str>>>(error: T, error_description: A) -> Self {
        Self {
            error,
            error_description: error_description.into(),
        }
    }
}

pub(crate) trait ErrorDataProvider<T: GetStatusCode> {
    fn error_data(self) -> Option<ErrorData<T>>;
}

impl ErrorDataProvider<ApiErrorType> for ApiError {
    fn error_data(self) -> Option<ErrorData<ApiErrorType>> {
        let res = match self {
            Self::Core(CoreError::NotFound(reason)) => ErrorData::new(ApiErrorType::NotFound, reason),
            Self::Core(CoreError::Forbidden(reason)) => ErrorData::new(ApiErrorType::Forbidden, reason),
            Self::Core(CoreError::Validation(reason)) => ErrorData::new(ApiErrorType::ValidationFailed, reason),
            Self::Core(CoreError::Conflict(reason)) => ErrorData::new(ApiErrorType::Conflict, reason),
            Self::Core(CoreError::Db(DbErr::RecordNotFound(_))) | Self::SeaOrm(DbErr::RecordNotFound(_)) => {
                ErrorData::new(ApiErrorType::NotFound, "Record not found")
            }
            Self::Core(CoreError::Db(_) | CoreError::Hash(_)) | Self::SeaOrm(_) => return None,
        };
        Some(res)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error_to_axum_response(self)
    }
}

impl GetStatusCode for ApiError {
    fn status_code(&self) -> http::StatusCode {
        match self {
            Self::Core(CoreError::Db(_)) | Self::SeaOrm(_) => http::StatusCode::SERVICE_UNAVAILABLE,
            _ => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl GetStatusCode for ApiErrorType {
    fn status_code(&self) -> http::StatusCode {
        match self {
            Self::NotFound => http::StatusCode::NOT_FOUND,
            Self::Forbidden => http::StatusCode::FORBIDDEN,
            Self::ValidationFailed => http::StatusCode::BAD_REQUEST,
            Self::Conflict => http::StatusCode::CONFLICT,
        }
    }
}

pub(crate) fn error_to_axum_response<E, T>(error: T) -> Response
where
    E: GetStatusCode + serde::Serialize,
    T: GetStatusCode + ErrorDataProvider<E>,
{
    let status_code = GetStatusCode::status_code(&error);
    let error_data = error.error_data();
    match error_data {
        Some(data) => {
            let status_code = GetStatusCode::status_code(&data.error);
            let json = Json(data);
            (status_code, json).into_response()
        }
        None => status_code.into_response(),
    }
}
