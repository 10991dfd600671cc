//! # Application Error Types
//!
//! 애플리케이션 전역에서 사용하는 에러 타입과 비즈니스 에러 코드를 정의합니다.
//! 모든 에러는 `AppError`로 통합되며, `actix_web::ResponseError` 구현을 통해
//! 공통 응답 봉투(`ApiResponse`) 형태의 HTTP 응답으로 자동 변환됩니다.
//!
//! ## 응답 형식
//!
//! ```json
//! {
//!   "code": 1004,
//!   "message": "User not found.",
//!   "data": null
//! }
//! ```
//!
//! ## 비즈니스 에러 코드
//!
//! | 코드 | 메시지 | HTTP |
//! |------|--------|------|
//! | 400 | Bad Request | 400 |
//! | 401 | Unauthorized | 401 |
//! | 404 | Not Found | 404 |
//! | 500 | Internal Server Error | 500 |
//! | 600 | File upload failed. | 400 |
//! | 1001 | The email is already in use. | 409 |
//! | 1002 | The username is already in use. | 409 |
//! | 1003 | User info update failed. | 500 |
//! | 1004 | User not found. | 404 |
//! | 1005 | The password is incorrect. | 401 |
//! | 1006 | The email is not found. | 404 |
//! | 1007 | Send email failed. | 502 |
//! | 1008 | The email code is incorrect. | 400 |
//! | 1009 | The email code has not expired yet. | 429 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, ErrorCode};
//!
//! let user = repo.find_by_name(&name).await?
//!     .ok_or(AppError::Business(ErrorCode::UserNotFound))?;
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;
use crate::domain::dto::common::ApiResponse;

/// 클라이언트에 노출되는 비즈니스 에러 코드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    BadRequest,
    Unauthorized,
    NotFound,
    InternalServerError,
    FileUploadFailed,
    EmailAlreadyUse,
    UserNameAlreadyUse,
    UserInfoUpdateFailed,
    UserNotFound,
    PasswordIncorrect,
    EmailNotFound,
    SendEmailFailed,
    EmailCodeIncorrect,
    EmailCodeNotExpired,
}

impl ErrorCode {
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::BadRequest => 400,
            ErrorCode::Unauthorized => 401,
            ErrorCode::NotFound => 404,
            ErrorCode::InternalServerError => 500,
            ErrorCode::FileUploadFailed => 600,
            ErrorCode::EmailAlreadyUse => 1001,
            ErrorCode::UserNameAlreadyUse => 1002,
            ErrorCode::UserInfoUpdateFailed => 1003,
            ErrorCode::UserNotFound => 1004,
            ErrorCode::PasswordIncorrect => 1005,
            ErrorCode::EmailNotFound => 1006,
            ErrorCode::SendEmailFailed => 1007,
            ErrorCode::EmailCodeIncorrect => 1008,
            ErrorCode::EmailCodeNotExpired => 1009,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "ok",
            ErrorCode::BadRequest => "Bad Request",
            ErrorCode::Unauthorized => "Unauthorized",
            ErrorCode::NotFound => "Not Found",
            ErrorCode::InternalServerError => "Internal Server Error",
            ErrorCode::FileUploadFailed => "File upload failed.",
            ErrorCode::EmailAlreadyUse => "The email is already in use.",
            ErrorCode::UserNameAlreadyUse => "The username is already in use.",
            ErrorCode::UserInfoUpdateFailed => "User info update failed.",
            ErrorCode::UserNotFound => "User not found.",
            ErrorCode::PasswordIncorrect => "The password is incorrect.",
            ErrorCode::EmailNotFound => "The email is not found.",
            ErrorCode::SendEmailFailed => "Send email failed.",
            ErrorCode::EmailCodeIncorrect => "The email code is incorrect.",
            ErrorCode::EmailCodeNotExpired => "The email code has not expired yet.",
        }
    }

    /// 에러 코드에 대응하는 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,
            ErrorCode::BadRequest
            | ErrorCode::FileUploadFailed
            | ErrorCode::EmailCodeIncorrect => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized | ErrorCode::PasswordIncorrect => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound | ErrorCode::UserNotFound | ErrorCode::EmailNotFound => {
                StatusCode::NOT_FOUND
            }
            ErrorCode::EmailAlreadyUse | ErrorCode::UserNameAlreadyUse => StatusCode::CONFLICT,
            ErrorCode::SendEmailFailed => StatusCode::BAD_GATEWAY,
            ErrorCode::EmailCodeNotExpired => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::InternalServerError | ErrorCode::UserInfoUpdateFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Redis error: {0}")]
    RedisError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict error: {0}")]
    ConflictError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    /// 코드 테이블에 정의된 비즈니스 에러
    #[error("{}", .0.message())]
    Business(ErrorCode),
}

impl AppError {
    /// 응답 봉투에 실릴 에러 코드를 반환합니다.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::Business(code) => *code,
            AppError::ValidationError(_) => ErrorCode::BadRequest,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::AuthenticationError(_) | AppError::AuthorizationError(_) => {
                ErrorCode::Unauthorized
            }
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 내부 인프라 에러인지 여부 (상세 메시지를 클라이언트에 노출하지 않음)
    fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(_)
                | AppError::RedisError(_)
                | AppError::ExternalServiceError(_)
                | AppError::InternalError(_)
        )
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Business(code) => code.status(),
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let code = self.error_code();

        let message = if self.is_internal() {
            log::error!("❌ {}", self);
            code.message().to_string()
        } else {
            self.to_string()
        };

        actix_web::HttpResponse::build(self.status_code())
            .json(ApiResponse::<()>::failure(code.code(), message))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러에 문맥 정보를 덧붙여 `AppError::InternalError`로 변환합니다.
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
